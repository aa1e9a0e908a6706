// src/grid/sweep.rs
//! One-dimensional sensitivity sweeps
//!
//! A sweep holds four inputs fixed, moves the fifth across a linspace and
//! prices one option side at every point.

use crate::analytics::bs_analytic::{price, OptionType};
use crate::error::{validation::*, PricingError, PricingResult};
use crate::grid::config::GridConfig;
use crate::math_utils::linspace;
use crate::params::{normalize, MarketParameters, RawInput, TimeUnit};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Steps used by [`SweepSpec::new`]
pub const DEFAULT_SWEEP_STEPS: usize = 20;

/// The input a sweep moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepVariable {
    #[serde(alias = "stock_price")]
    Spot,
    #[serde(alias = "strike_price")]
    Strike,
    #[serde(alias = "time_to_expiry")]
    TimeToMaturity,
    #[serde(alias = "rate")]
    RiskFreeRate,
    Volatility,
}

impl SweepVariable {
    pub const ALL: [SweepVariable; 5] = [
        SweepVariable::Spot,
        SweepVariable::Strike,
        SweepVariable::TimeToMaturity,
        SweepVariable::RiskFreeRate,
        SweepVariable::Volatility,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SweepVariable::Spot => "spot",
            SweepVariable::Strike => "strike",
            SweepVariable::TimeToMaturity => "time_to_maturity",
            SweepVariable::RiskFreeRate => "risk_free_rate",
            SweepVariable::Volatility => "volatility",
        }
    }

    /// Copy of `base` with this input replaced by `value`.
    ///
    /// Maturity values are read in `time_unit` and converted to years.
    pub fn apply(self, base: &MarketParameters, value: f64, time_unit: TimeUnit) -> MarketParameters {
        let mut params = *base;
        match self {
            SweepVariable::Spot => params.spot = value,
            SweepVariable::Strike => params.strike = value,
            SweepVariable::TimeToMaturity => params.time_to_maturity = time_unit.to_years(value),
            SweepVariable::RiskFreeRate => params.risk_free_rate = value,
            SweepVariable::Volatility => params.volatility = value,
        }
        params
    }
}

impl fmt::Display for SweepVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SweepVariable {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spot" | "stock_price" => Ok(SweepVariable::Spot),
            "strike" | "strike_price" => Ok(SweepVariable::Strike),
            "time_to_maturity" | "time_to_expiry" => Ok(SweepVariable::TimeToMaturity),
            "risk_free_rate" | "rate" => Ok(SweepVariable::RiskFreeRate),
            "volatility" => Ok(SweepVariable::Volatility),
            _ => Err(PricingError::UnknownVariant {
                kind: "sweep variable",
                name: s.to_string(),
            }),
        }
    }
}

/// What to sweep and over which range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepSpec {
    pub variable: SweepVariable,
    pub range_min: f64,
    pub range_max: f64,
    #[serde(default = "default_steps")]
    pub steps: usize,
    /// Unit of the range when the maturity is swept
    #[serde(default)]
    pub time_unit: TimeUnit,
}

fn default_steps() -> usize {
    DEFAULT_SWEEP_STEPS
}

impl SweepSpec {
    pub fn new(variable: SweepVariable, range_min: f64, range_max: f64) -> Self {
        SweepSpec {
            variable,
            range_min,
            range_max,
            steps: DEFAULT_SWEEP_STEPS,
            time_unit: TimeUnit::Years,
        }
    }

    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_time_unit(mut self, time_unit: TimeUnit) -> Self {
        self.time_unit = time_unit;
        self
    }

    pub fn validate(&self) -> PricingResult<()> {
        validate_steps("steps", self.steps)?;
        validate_range(self.variable.name(), self.range_min, self.range_max)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub value: f64,
    pub price: f64,
}

/// Sweep output, ordered by ascending `value`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepResult {
    pub variable: SweepVariable,
    pub option_type: OptionType,
    #[serde(rename = "data")]
    pub points: Vec<SweepPoint>,
}

impl SweepResult {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }

    pub fn prices(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.price)
    }
}

/// Price one side of the option across a linspace of one input
///
/// # Errors
///
/// `InvalidConfiguration` when `steps < 2`, when `steps` exceeds 1,000,000,
/// when `range_min >= range_max` or when the range width overflows;
/// `InvalidParameters` when `base` or either end of the range would violate
/// the kernel preconditions (for example a volatility range starting at 0);
/// `DomainError` when a point prices to a non-finite value.
pub fn sweep(
    base: &MarketParameters,
    spec: &SweepSpec,
    option_type: OptionType,
) -> PricingResult<SweepResult> {
    sweep_with_config(base, spec, option_type, &GridConfig::default())
}

pub fn sweep_with_config(
    base: &MarketParameters,
    spec: &SweepSpec,
    option_type: OptionType,
    config: &GridConfig,
) -> PricingResult<SweepResult> {
    spec.validate()?;
    base.validate()?;
    // Every input is monotone along the linspace, so valid endpoints imply valid points.
    for endpoint in [spec.range_min, spec.range_max] {
        spec.variable.apply(base, endpoint, spec.time_unit).validate()?;
    }

    debug!(
        variable = %spec.variable,
        option_type = %option_type,
        steps = spec.steps,
        range_min = spec.range_min,
        range_max = spec.range_max,
        "evaluating sweep"
    );

    let values = linspace(spec.range_min, spec.range_max, spec.steps);
    let evaluate_point = |&value: &f64| -> PricingResult<SweepPoint> {
        let params = spec.variable.apply(base, value, spec.time_unit);
        Ok(SweepPoint {
            value,
            price: price(&params)?.for_side(option_type),
        })
    };

    let points = if config.parallel {
        values
            .par_iter()
            .map(evaluate_point)
            .collect::<PricingResult<Vec<_>>>()?
    } else {
        values
            .iter()
            .map(evaluate_point)
            .collect::<PricingResult<Vec<_>>>()?
    };

    Ok(SweepResult {
        variable: spec.variable,
        option_type,
        points,
    })
}

/// Sweep from caller inputs; the raw maturity unit also governs swept maturities
pub fn sweep_raw(raw: &RawInput, spec: &SweepSpec, option_type: OptionType) -> PricingResult<SweepResult> {
    let base = normalize(raw)?;
    let spec = spec.with_time_unit(raw.time_unit);
    sweep(&base, &spec, option_type)
}
