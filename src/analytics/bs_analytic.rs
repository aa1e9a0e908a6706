// src/analytics/bs_analytic.rs
//! Analytical Black-Scholes formulas for European options and Greeks
//!
//! # Mathematical Foundation
//!
//! Under the Black-Scholes model, the underlying asset follows:
//! ```text
//! dS_t = r S_t dt + σ S_t dW_t
//! ```
//!
//! The risk-neutral pricing formula gives:
//! ```text
//! V(S,t) = e^(-r(T-t)) * E^Q[payoff(S_T) | S_t = S]
//! ```
//!
//! For European options, this has closed-form solutions involving
//! the cumulative normal distribution function Φ(x).
//!
//! # Reporting conventions
//!
//! - Theta is quoted per calendar day (annual theta / 365)
//! - Vega is quoted per 1 volatility point (∂V/∂σ × 0.01)
//! - Rho is quoted per 1 rate point (∂V/∂r × 0.01)

use crate::error::{PricingError, PricingResult};
use crate::math_utils::{norm_cdf, norm_pdf};
use crate::params::{normalize, MarketParameters, RawInput, DAYS_PER_YEAR};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// Scaling applied to vega and rho so they read per percentage point.
const PER_POINT: f64 = 0.01;

/// Side of a European option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

impl FromStr for OptionType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" => Ok(OptionType::Call),
            "put" => Ok(OptionType::Put),
            _ => Err(PricingError::UnknownVariant {
                kind: "option type",
                name: s.to_string(),
            }),
        }
    }
}

/// Call and put prices for one parameter set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub call_price: f64,
    pub put_price: f64,
}

impl PriceQuote {
    pub fn for_side(&self, option_type: OptionType) -> f64 {
        match option_type {
            OptionType::Call => self.call_price,
            OptionType::Put => self.put_price,
        }
    }
}

/// First-order sensitivities plus gamma for one option side
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Greeks {
    /// ∂V/∂S
    pub delta: f64,
    /// ∂²V/∂S²
    pub gamma: f64,
    /// ∂V/∂t per calendar day
    pub theta: f64,
    /// ∂V/∂σ per volatility point
    pub vega: f64,
    /// ∂V/∂r per rate point
    pub rho: f64,
}

/// Prices and Greeks for both sides of one parameter set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    pub call_price: f64,
    pub put_price: f64,
    pub call_greeks: Greeks,
    pub put_greeks: Greeks,
}

impl Valuation {
    pub fn quote(&self) -> PriceQuote {
        PriceQuote {
            call_price: self.call_price,
            put_price: self.put_price,
        }
    }

    pub fn greeks_for(&self, option_type: OptionType) -> Greeks {
        match option_type {
            OptionType::Call => self.call_greeks,
            OptionType::Put => self.put_greeks,
        }
    }
}

/// Black-Scholes d₁ and d₂
///
/// # Formula
/// ```text
/// d₁ = [ln(S/K) + (r + σ²/2)T] / (σ√T)
/// d₂ = d₁ - σ√T
/// ```
///
/// With `S == 0` both are `-∞`.
pub fn d1_d2(params: &MarketParameters) -> (f64, f64) {
    let sigma = params.volatility;
    let t = params.time_to_maturity;
    let vol_sqrt_t = sigma * t.sqrt();
    let d1 = ((params.spot / params.strike).ln() + (params.risk_free_rate + 0.5 * sigma * sigma) * t)
        / vol_sqrt_t;
    (d1, d1 - vol_sqrt_t)
}

fn ensure_finite(output: &str, value: f64) -> PricingResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::DomainError {
            parameter: output.to_string(),
            value,
        })
    }
}

fn ensure_finite_greeks(side: OptionType, greeks: &Greeks) -> PricingResult<()> {
    let fields = [
        ("delta", greeks.delta),
        ("gamma", greeks.gamma),
        ("theta", greeks.theta),
        ("vega", greeks.vega),
        ("rho", greeks.rho),
    ];
    for (name, value) in fields {
        ensure_finite(&format!("{}_{}", side, name), value)?;
    }
    Ok(())
}

// Normalization already rejects these; reaching here is a caller bug.
fn check_domain(params: &MarketParameters) -> PricingResult<()> {
    if !(params.volatility > 0.0) {
        return Err(PricingError::DomainError {
            parameter: "volatility".to_string(),
            value: params.volatility,
        });
    }
    if !(params.time_to_maturity > 0.0) {
        return Err(PricingError::DomainError {
            parameter: "time_to_maturity".to_string(),
            value: params.time_to_maturity,
        });
    }
    Ok(())
}

/// Black-Scholes European call and put prices
///
/// # Formula
/// ```text
/// C = S*Φ(d₁) - K*e^(-rT)*Φ(d₂)
/// P = K*e^(-rT)*Φ(-d₂) - S*Φ(-d₁)
/// ```
///
/// A zero spot is priced at its limit: the call is worthless and the put is
/// worth the discounted strike.
///
/// # Errors
///
/// `DomainError` if σ or T is not strictly positive, or if either price is
/// not finite (for example a rate so negative that `e^(-rT)` overflows).
pub fn price(params: &MarketParameters) -> PricingResult<PriceQuote> {
    check_domain(params)?;
    let discounted_strike = params.strike * params.discount_factor();

    let quote = if params.spot == 0.0 {
        trace!(strike = params.strike, "zero spot, returning limit prices");
        PriceQuote {
            call_price: 0.0,
            put_price: discounted_strike,
        }
    } else {
        let (d1, d2) = d1_d2(params);
        let s = params.spot;
        PriceQuote {
            call_price: s * norm_cdf(d1) - discounted_strike * norm_cdf(d2),
            put_price: discounted_strike * norm_cdf(-d2) - s * norm_cdf(-d1),
        }
    };

    ensure_finite("call_price", quote.call_price)?;
    ensure_finite("put_price", quote.put_price)?;
    Ok(quote)
}

/// Black-Scholes Greeks for the call and the put, in that order
///
/// # Formulas
/// ```text
/// Δ_call = Φ(d₁)                   Δ_put = Δ_call - 1
/// Γ      = φ(d₁) / (S σ √T)
/// Θ_call = [-S σ φ(d₁)/(2√T) - r K e^(-rT) Φ(d₂)]  / 365
/// Θ_put  = [-S σ φ(d₁)/(2√T) + r K e^(-rT) Φ(-d₂)] / 365
/// ν      = S √T φ(d₁) * 0.01
/// ρ_call =  K T e^(-rT) Φ(d₂)  * 0.01
/// ρ_put  = -K T e^(-rT) Φ(-d₂) * 0.01
/// ```
///
/// Gamma and vega are shared by both sides. At `S == 0` every Greek takes its
/// limit: the call is flat, the put has delta −1 and keeps its rate exposure.
///
/// # Errors
///
/// `DomainError` if σ or T is not strictly positive, or if any Greek is not
/// finite.
pub fn greeks(params: &MarketParameters) -> PricingResult<(Greeks, Greeks)> {
    check_domain(params)?;
    let k = params.strike;
    let r = params.risk_free_rate;
    let t = params.time_to_maturity;
    let discounted_strike = k * params.discount_factor();

    if params.spot == 0.0 {
        trace!(strike = k, "zero spot, returning limit Greeks");
        let put = Greeks {
            delta: -1.0,
            gamma: 0.0,
            theta: r * discounted_strike / DAYS_PER_YEAR,
            vega: 0.0,
            rho: -t * discounted_strike * PER_POINT,
        };
        ensure_finite_greeks(OptionType::Put, &put)?;
        return Ok((Greeks::default(), put));
    }

    let s = params.spot;
    let sigma = params.volatility;
    let sqrt_t = t.sqrt();
    let (d1, d2) = d1_d2(params);
    let pdf_d1 = norm_pdf(d1);
    let cdf_d1 = norm_cdf(d1);
    let cdf_d2 = norm_cdf(d2);
    let cdf_minus_d2 = norm_cdf(-d2);

    let gamma = pdf_d1 / (s * sigma * sqrt_t);
    let vega = s * sqrt_t * pdf_d1 * PER_POINT;
    let decay = -(s * sigma * pdf_d1) / (2.0 * sqrt_t);

    let call = Greeks {
        delta: cdf_d1,
        gamma,
        theta: (decay - r * discounted_strike * cdf_d2) / DAYS_PER_YEAR,
        vega,
        rho: t * discounted_strike * cdf_d2 * PER_POINT,
    };
    let put = Greeks {
        delta: cdf_d1 - 1.0,
        gamma,
        theta: (decay + r * discounted_strike * cdf_minus_d2) / DAYS_PER_YEAR,
        vega,
        rho: -t * discounted_strike * cdf_minus_d2 * PER_POINT,
    };
    ensure_finite_greeks(OptionType::Call, &call)?;
    ensure_finite_greeks(OptionType::Put, &put)?;
    Ok((call, put))
}

/// Prices and Greeks for both sides in one call
pub fn evaluate(params: &MarketParameters) -> PricingResult<Valuation> {
    let quote = price(params)?;
    let (call_greeks, put_greeks) = greeks(params)?;
    Ok(Valuation {
        call_price: quote.call_price,
        put_price: quote.put_price,
        call_greeks,
        put_greeks,
    })
}

/// [`evaluate`] on caller inputs, normalizing the maturity unit first
pub fn evaluate_raw(raw: &RawInput) -> PricingResult<Valuation> {
    evaluate(&normalize(raw)?)
}
