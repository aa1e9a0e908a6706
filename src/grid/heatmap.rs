// src/grid/heatmap.rs
//! Spot × volatility price heatmaps
//!
//! Rows follow the volatility axis and columns follow the spot axis, so
//! `call_matrix[[v, s]]` is the call priced at `volatility_axis[v]` and
//! `spot_axis[s]`. Strike, maturity and rate stay at their base values.

use crate::analytics::bs_analytic::{price, PriceQuote};
use crate::error::PricingResult;
use crate::grid::config::GridConfig;
use crate::math_utils::linspace;
use crate::params::MarketParameters;
use ndarray::Array2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Both axes and both price matrices.
///
/// On the wire the matrices are nested arrays, one inner array per volatility
/// row, under the keys `call_heatmap`, `put_heatmap`, `S_range` and
/// `sigma_range`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapGrid {
    #[serde(rename = "S_range", alias = "spot_axis")]
    pub spot_axis: Vec<f64>,
    #[serde(rename = "sigma_range", alias = "volatility_axis")]
    pub volatility_axis: Vec<f64>,
    /// Indexed `[volatility, spot]`
    #[serde(rename = "call_heatmap", alias = "call_matrix", with = "matrix_rows")]
    pub call_matrix: Array2<f64>,
    /// Indexed `[volatility, spot]`
    #[serde(rename = "put_heatmap", alias = "put_matrix", with = "matrix_rows")]
    pub put_matrix: Array2<f64>,
}

impl HeatmapGrid {
    /// `(rows, columns)` = `(volatility points, spot points)`
    pub fn shape(&self) -> (usize, usize) {
        (self.volatility_axis.len(), self.spot_axis.len())
    }

    pub fn quote_at(&self, volatility_index: usize, spot_index: usize) -> Option<PriceQuote> {
        let call_price = *self.call_matrix.get([volatility_index, spot_index])?;
        let put_price = *self.put_matrix.get([volatility_index, spot_index])?;
        Some(PriceQuote {
            call_price,
            put_price,
        })
    }
}

/// Spot axis: `max(floor, (1 − band)·S)` to `(1 + band)·S`.
///
/// A zero spot has no band to scale, so the axis falls back to
/// `[floor, degenerate_spot_max]`.
pub fn spot_axis(spot: f64, config: &GridConfig) -> Vec<f64> {
    let lower = config.spot_floor.max(spot * (1.0 - config.spot_band));
    let upper = if spot > 0.0 {
        spot * (1.0 + config.spot_band)
    } else {
        warn!(
            lower,
            upper = config.degenerate_spot_max,
            "zero spot, heatmap spot axis uses the fallback range"
        );
        config.degenerate_spot_max
    };
    linspace(lower, upper, config.heatmap_points)
}

/// Volatility axis: `σ − band·σ` to `σ + band·σ`.
pub fn volatility_axis(volatility: f64, config: &GridConfig) -> Vec<f64> {
    let delta = volatility * config.volatility_band;
    linspace(volatility - delta, volatility + delta, config.heatmap_points)
}

/// Call and put prices over the default 11×11 spot × volatility grid
pub fn heatmap(base: &MarketParameters) -> PricingResult<HeatmapGrid> {
    heatmap_with_config(base, &GridConfig::default())
}

pub fn heatmap_with_config(base: &MarketParameters, config: &GridConfig) -> PricingResult<HeatmapGrid> {
    config.validate()?;
    base.validate()?;

    let spot_axis = spot_axis(base.spot, config);
    let volatility_axis = volatility_axis(base.volatility, config);
    debug!(
        spot = base.spot,
        volatility = base.volatility,
        rows = volatility_axis.len(),
        columns = spot_axis.len(),
        "evaluating heatmap"
    );

    let price_row = |&volatility: &f64| -> PricingResult<Vec<PriceQuote>> {
        spot_axis
            .iter()
            .map(|&spot| {
                price(&MarketParameters {
                    spot,
                    volatility,
                    ..*base
                })
            })
            .collect()
    };

    let rows = if config.parallel {
        volatility_axis
            .par_iter()
            .map(price_row)
            .collect::<PricingResult<Vec<_>>>()?
    } else {
        volatility_axis
            .iter()
            .map(price_row)
            .collect::<PricingResult<Vec<_>>>()?
    };

    let shape = (volatility_axis.len(), spot_axis.len());
    let call_matrix = Array2::from_shape_fn(shape, |(v, s)| rows[v][s].call_price);
    let put_matrix = Array2::from_shape_fn(shape, |(v, s)| rows[v][s].put_price);

    Ok(HeatmapGrid {
        spot_axis,
        volatility_axis,
        call_matrix,
        put_matrix,
    })
}

mod matrix_rows {
    use ndarray::Array2;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(matrix: &Array2<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(matrix.rows().into_iter().map(|row| row.to_vec()))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Array2<f64>, D::Error> {
        let rows = Vec::<Vec<f64>>::deserialize(deserializer)?;
        let shape = (rows.len(), rows.first().map_or(0, Vec::len));
        if rows.iter().any(|row| row.len() != shape.1) {
            return Err(D::Error::custom("heatmap rows must all have the same length"));
        }
        Array2::from_shape_vec(shape, rows.into_iter().flatten().collect()).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_axes_for_regular_spot() {
        let config = GridConfig::default();
        let spots = spot_axis(100.0, &config);
        assert_eq!(spots.len(), 11);
        assert_eq!(spots[0], 50.0);
        assert_eq!(spots[10], 150.0);

        let vols = volatility_axis(0.2, &config);
        assert_eq!(vols.len(), 11);
        assert_abs_diff_eq!(vols[0], 0.1, epsilon = 1e-15);
        assert_abs_diff_eq!(vols[5], 0.2, epsilon = 1e-15);
        assert_abs_diff_eq!(vols[10], 0.3, epsilon = 1e-15);
    }

    #[test]
    fn test_spot_floor_applies_to_small_spots() {
        let spots = spot_axis(1.6, &GridConfig::default());
        assert_eq!(spots[0], 1.0);
        assert_abs_diff_eq!(spots[10], 2.4, epsilon = 1e-15);
    }

    #[test]
    fn test_degenerate_spot_fallback() {
        let spots = spot_axis(0.0, &GridConfig::default());
        assert_eq!(spots[0], 1.0);
        assert_eq!(spots[10], 100.0);
    }

    #[test]
    fn test_quote_at_bounds() {
        let base = MarketParameters::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
        let grid = heatmap(&base).unwrap();
        assert!(grid.quote_at(10, 10).is_some());
        assert!(grid.quote_at(11, 0).is_none());
        assert!(grid.quote_at(0, 11).is_none());
    }

    #[test]
    fn test_json_uses_nested_rows() {
        let base = MarketParameters::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
        let grid = heatmap(&base).unwrap();
        let json = serde_json::to_value(&grid).unwrap();

        assert_eq!(json["S_range"].as_array().unwrap().len(), 11);
        assert_eq!(json["sigma_range"].as_array().unwrap().len(), 11);
        let calls = json["call_heatmap"].as_array().unwrap();
        assert_eq!(calls.len(), 11);
        assert_eq!(calls[3].as_array().unwrap().len(), 11);
        assert_eq!(calls[3][7].as_f64().unwrap(), grid.call_matrix[[3, 7]]);
        assert_eq!(json["put_heatmap"][10][0].as_f64().unwrap(), grid.put_matrix[[10, 0]]);
        assert!(json.get("call_matrix").is_none());

        let decoded: HeatmapGrid = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, grid);
    }

    #[test]
    fn test_json_rejects_ragged_rows() {
        let json = r#"{"S_range": [1.0, 2.0], "sigma_range": [0.1, 0.2],
            "call_heatmap": [[1.0, 2.0], [3.0]], "put_heatmap": [[1.0, 2.0], [3.0, 4.0]]}"#;
        assert!(serde_json::from_str::<HeatmapGrid>(json).is_err());
    }

    #[test]
    fn test_custom_resolution() {
        let base = MarketParameters::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
        let config = GridConfig {
            heatmap_points: 5,
            parallel: false,
            ..Default::default()
        };
        let grid = heatmap_with_config(&base, &config).unwrap();
        assert_eq!(grid.shape(), (5, 5));
        assert_eq!(grid.call_matrix.dim(), (5, 5));
        assert_eq!(grid.spot_axis, vec![50.0, 75.0, 100.0, 125.0, 150.0]);
    }
}
