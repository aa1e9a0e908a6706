// src/analytics/mod.rs
//! Closed-form pricing kernel

pub mod bs_analytic;

pub use bs_analytic::{evaluate, evaluate_raw, greeks, price, Greeks, OptionType, PriceQuote, Valuation};
