//! # fast-bs: Closed-Form Black-Scholes Pricing and Sensitivity Grids
//!
//! A Rust library for pricing European options under the Black-Scholes model,
//! computing their Greeks, and exploring how prices respond to the inputs.
//!
//! ## Key Features
//!
//! - **Closed-form kernel**: call/put prices and delta, gamma, theta, vega, rho
//! - **Explicit units**: maturities in days or years, theta per day, vega and rho per point
//! - **Sensitivity sweeps**: price one side across a linspace of any input
//! - **Heatmaps**: 11×11 spot × volatility price grids, evaluated in parallel with Rayon
//! - **Typed errors**: invalid inputs are reported, never silently corrected
//!
//! ## Quick Start
//!
//! ```rust
//! use fast_bs::analytics::{evaluate, OptionType};
//! use fast_bs::grid::{heatmap, sweep, SweepSpec, SweepVariable};
//! use fast_bs::params::{normalize, RawInput};
//!
//! // One-year at-the-money contract, maturity given in days
//! let raw = RawInput::in_days(100.0, 100.0, 365.0, 0.05, 0.2);
//! let params = normalize(&raw).expect("Valid parameters");
//!
//! let valuation = evaluate(&params).expect("Valid parameters");
//! println!("call = {:.4}, put = {:.4}", valuation.call_price, valuation.put_price);
//!
//! let spec = SweepSpec::new(SweepVariable::Spot, 50.0, 150.0).with_steps(11);
//! let curve = sweep(&params, &spec, OptionType::Call).expect("Valid sweep");
//! assert_eq!(curve.len(), 11);
//!
//! let grid = heatmap(&params).expect("Valid parameters");
//! assert_eq!(grid.shape(), (11, 11));
//! ```
//!
//! ## Layers
//!
//! Normalization ([`params`]) resolves the maturity unit and checks inputs, the
//! kernel ([`analytics`]) evaluates one parameter set, and the evaluator
//! ([`grid`]) calls the kernel over sweeps and heatmaps. Every operation is a
//! pure function of its inputs.

// Module declarations
pub mod error;
pub mod math_utils;
pub mod params;
pub mod analytics;
pub mod grid;
pub mod output;

// Re-export commonly used types for convenience
pub use analytics::{Greeks, OptionType, PriceQuote, Valuation};
pub use error::{PricingError, PricingResult};
pub use grid::{GridConfig, HeatmapGrid, SweepResult, SweepSpec, SweepVariable};
pub use params::{normalize, MarketParameters, RawInput, TimeUnit};
