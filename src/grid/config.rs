// src/grid/config.rs
use crate::error::{validation::*, PricingError, PricingResult};
use crate::grid::sweep::DEFAULT_SWEEP_STEPS;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Shape of the sensitivity grids
///
/// The defaults reproduce the 11×11 heatmap: spot from `max(1, 0.5·S)` to
/// `1.5·S` (or `[1, 100]` when `S == 0`) and volatility from `0.5·σ` to `1.5·σ`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Points on each heatmap axis
    pub heatmap_points: usize,
    /// Relative half-width of the spot axis around S
    pub spot_band: f64,
    /// Lowest spot the heatmap axis may start at
    pub spot_floor: f64,
    /// Upper end of the spot axis when S == 0
    pub degenerate_spot_max: f64,
    /// Relative half-width of the volatility axis around σ
    pub volatility_band: f64,
    /// Steps used when a sweep request does not name a count
    pub default_sweep_steps: usize,
    /// Evaluate rows/points on the rayon pool
    pub parallel: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            heatmap_points: 11,
            spot_band: 0.5,
            spot_floor: 1.0,
            degenerate_spot_max: 100.0,
            volatility_band: 0.5,
            default_sweep_steps: DEFAULT_SWEEP_STEPS,
            parallel: true,
        }
    }
}

impl GridConfig {
    /// Validate the grid configuration
    pub fn validate(&self) -> PricingResult<()> {
        validate_steps("heatmap_points", self.heatmap_points)?;
        validate_steps("default_sweep_steps", self.default_sweep_steps)?;
        validate_band("spot_band", self.spot_band)?;
        validate_band("volatility_band", self.volatility_band)?;
        validate_positive("spot_floor", self.spot_floor)?;
        validate_finite("degenerate_spot_max", self.degenerate_spot_max)?;

        if self.degenerate_spot_max <= self.spot_floor {
            return Err(PricingError::InvalidConfiguration {
                field: "degenerate_spot_max".to_string(),
                reason: format!("must exceed spot_floor ({})", self.spot_floor),
            });
        }

        Ok(())
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(source: &str) -> PricingResult<Self> {
        let config: GridConfig =
            toml::from_str(source).map_err(|e| PricingError::InvalidConfiguration {
                field: "grid config".to_string(),
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> PricingResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| PricingError::InvalidConfiguration {
            field: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&source)
    }
}

// A band of 1 or more would push the lower end of an axis to zero or below.
fn validate_band(name: &str, band: f64) -> PricingResult<()> {
    validate_positive(name, band)?;
    if band >= 1.0 {
        return Err(PricingError::InvalidParameters {
            parameter: name.to_string(),
            value: band,
            constraint: "must be below 1".to_string(),
        });
    }
    Ok(())
}
