// src/params.rs
//! Market parameters and the days/years normalization step
//!
//! Callers describe a contract with a [`RawInput`], whose maturity may be
//! given in calendar days. [`normalize`] turns it into [`MarketParameters`]
//! with maturity as a year-fraction, which is the only form the pricing
//! kernel and the grid evaluator accept.

use crate::error::{validation::*, PricingResult};
use serde::{Deserialize, Serialize};

/// Calendar days per year used for the days→years conversion and for theta.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Unit in which a time-to-maturity is quoted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    #[default]
    Years,
    Days,
}

impl TimeUnit {
    /// Convert a maturity quoted in this unit into a year-fraction
    pub fn to_years(self, value: f64) -> f64 {
        match self {
            TimeUnit::Years => value,
            TimeUnit::Days => value / DAYS_PER_YEAR,
        }
    }
}

/// Canonical Black-Scholes inputs, maturity in years
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketParameters {
    /// Spot price S (≥ 0; zero is the degenerate worthless-underlying case)
    #[serde(rename = "stock_price", alias = "spot")]
    pub spot: f64,
    /// Strike price K (> 0)
    #[serde(rename = "strike_price", alias = "strike")]
    pub strike: f64,
    /// Time to maturity T in years (> 0)
    #[serde(rename = "time_to_expiry", alias = "time_to_maturity")]
    pub time_to_maturity: f64,
    /// Continuously compounded risk-free rate r (any finite value)
    pub risk_free_rate: f64,
    /// Volatility σ (> 0)
    pub volatility: f64,
}

impl MarketParameters {
    /// Build validated parameters
    pub fn new(
        spot: f64,
        strike: f64,
        time_to_maturity: f64,
        risk_free_rate: f64,
        volatility: f64,
    ) -> PricingResult<Self> {
        let params = MarketParameters {
            spot,
            strike,
            time_to_maturity,
            risk_free_rate,
            volatility,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check the preconditions the kernel relies on
    pub fn validate(&self) -> PricingResult<()> {
        validate_finite("spot", self.spot)?;
        validate_non_negative("spot", self.spot)?;
        validate_finite("strike", self.strike)?;
        validate_positive("strike", self.strike)?;
        validate_finite("time_to_maturity", self.time_to_maturity)?;
        validate_positive("time_to_maturity", self.time_to_maturity)?;
        validate_finite("risk_free_rate", self.risk_free_rate)?;
        validate_finite("volatility", self.volatility)?;
        validate_positive("volatility", self.volatility)?;
        Ok(())
    }

    /// Discount factor e^(−rT)
    pub fn discount_factor(&self) -> f64 {
        (-self.risk_free_rate * self.time_to_maturity).exp()
    }
}

/// Caller-facing inputs; maturity may be quoted in days
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawInput {
    #[serde(rename = "stock_price")]
    pub spot: f64,
    #[serde(rename = "strike_price")]
    pub strike: f64,
    #[serde(rename = "time_to_expiry")]
    pub time_to_maturity: f64,
    pub risk_free_rate: f64,
    pub volatility: f64,
    #[serde(rename = "time_in_days", with = "time_in_days", default)]
    pub time_unit: TimeUnit,
}

impl RawInput {
    /// Inputs with maturity quoted in years
    pub fn in_years(spot: f64, strike: f64, years: f64, risk_free_rate: f64, volatility: f64) -> Self {
        RawInput {
            spot,
            strike,
            time_to_maturity: years,
            risk_free_rate,
            volatility,
            time_unit: TimeUnit::Years,
        }
    }

    /// Inputs with maturity quoted in calendar days
    pub fn in_days(spot: f64, strike: f64, days: f64, risk_free_rate: f64, volatility: f64) -> Self {
        RawInput {
            time_unit: TimeUnit::Days,
            ..Self::in_years(spot, strike, days, risk_free_rate, volatility)
        }
    }

    pub fn time_unit_is_days(&self) -> bool {
        self.time_unit == TimeUnit::Days
    }
}

impl Default for RawInput {
    /// 30-day at-the-money contract on a 100 underlying
    fn default() -> Self {
        RawInput::in_days(100.0, 100.0, 30.0, 0.05, 0.2)
    }
}

/// Resolve the maturity unit and check every precondition of the kernel
///
/// # Errors
///
/// `InvalidParameters` when the strike, the volatility or the normalized
/// maturity is not strictly positive, when the spot is negative, or when any
/// field is not finite.
pub fn normalize(raw: &RawInput) -> PricingResult<MarketParameters> {
    MarketParameters::new(
        raw.spot,
        raw.strike,
        raw.time_unit.to_years(raw.time_to_maturity),
        raw.risk_free_rate,
        raw.volatility,
    )
}

mod time_in_days {
    use super::TimeUnit;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(unit: &TimeUnit, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(*unit == TimeUnit::Days)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TimeUnit, D::Error> {
        Ok(if bool::deserialize(deserializer)? {
            TimeUnit::Days
        } else {
            TimeUnit::Years
        })
    }
}
