// tests/integration_test.rs
use approx::assert_abs_diff_eq;
use fast_bs::analytics::{evaluate, evaluate_raw, price, OptionType};
use fast_bs::grid::{heatmap, sweep, sweep_raw, SweepSpec, SweepVariable};
use fast_bs::params::{normalize, MarketParameters, RawInput};
use fast_bs::PricingError;

fn base() -> MarketParameters {
    MarketParameters::new(100.0, 100.0, 1.0, 0.05, 0.2).expect("Valid parameters")
}

#[test]
fn test_end_to_end_reference_contract() {
    let valuation = evaluate_raw(&RawInput::in_years(100.0, 100.0, 1.0, 0.05, 0.2)).unwrap();

    println!("\nValuation: {:#?}", valuation);

    assert_abs_diff_eq!(valuation.call_price, 10.4506, epsilon = 1e-4);
    assert_abs_diff_eq!(valuation.put_price, 5.5735, epsilon = 1e-4);
    assert_abs_diff_eq!(valuation.call_greeks.delta, 0.6368, epsilon = 1e-4);
    assert_abs_diff_eq!(valuation.call_greeks.gamma, 0.01876, epsilon = 1e-5);
    assert_abs_diff_eq!(valuation.call_greeks.vega, 0.3752, epsilon = 1e-4);
    assert_abs_diff_eq!(valuation.call_greeks.theta, -0.01757, epsilon = 1e-4);
    assert_abs_diff_eq!(valuation.call_greeks.rho, 0.5323, epsilon = 1e-4);
}

#[test]
fn test_days_input_matches_years_input() {
    let in_days = evaluate_raw(&RawInput::in_days(100.0, 100.0, 365.0, 0.05, 0.2)).unwrap();
    let in_years = evaluate_raw(&RawInput::in_years(100.0, 100.0, 1.0, 0.05, 0.2)).unwrap();
    assert_eq!(in_days, in_years);
}

#[test]
fn test_invalid_inputs_surface_as_errors() {
    let err = evaluate_raw(&RawInput::in_years(100.0, -5.0, 1.0, 0.05, 0.2)).unwrap_err();
    assert!(err.is_invalid_parameter());

    let err = evaluate_raw(&RawInput::in_days(100.0, 100.0, 0.0, 0.05, 0.2)).unwrap_err();
    assert!(matches!(err, PricingError::InvalidParameters { .. }));
}

#[test]
fn test_non_finite_results_are_errors() {
    let err = evaluate_raw(&RawInput::in_years(100.0, 100.0, 1.0, -1000.0, 0.2)).unwrap_err();
    assert!(err.is_domain_error());

    let spec = SweepSpec::new(SweepVariable::RiskFreeRate, -1e308, 1e308).with_steps(3);
    assert!(sweep(&base(), &spec, OptionType::Call).unwrap_err().is_invalid_parameter());
}

#[test]
fn test_sweep_linspace() {
    let spec = SweepSpec::new(SweepVariable::Spot, 50.0, 150.0).with_steps(11);
    let result = sweep(&base(), &spec, OptionType::Call).unwrap();

    let values: Vec<f64> = result.values().collect();
    assert_eq!(result.len(), 11);
    assert_eq!(values[0], 50.0);
    assert_eq!(values[5], 100.0);
    assert_eq!(values[10], 150.0);
    assert!(values.windows(2).all(|w| w[0] < w[1]));

    assert_eq!(result.variable, SweepVariable::Spot);
    assert_eq!(result.option_type, OptionType::Call);
}

#[test]
fn test_sweep_prices_match_kernel() {
    let params = base();
    for variable in SweepVariable::ALL {
        let (lo, hi) = match variable {
            SweepVariable::Spot => (60.0, 140.0),
            SweepVariable::Strike => (80.0, 120.0),
            SweepVariable::TimeToMaturity => (0.1, 2.0),
            SweepVariable::RiskFreeRate => (-0.01, 0.08),
            SweepVariable::Volatility => (0.05, 0.6),
        };
        let spec = SweepSpec::new(variable, lo, hi);

        for option_type in [OptionType::Call, OptionType::Put] {
            let result = sweep(&params, &spec, option_type).unwrap();
            assert_eq!(result.len(), 20);
            for point in &result.points {
                let expected = price(&variable.apply(&params, point.value, spec.time_unit))
                    .unwrap()
                    .for_side(option_type);
                assert_eq!(point.price, expected, "{} sweep at {}", variable, point.value);
            }
        }
    }
}

#[test]
fn test_maturity_sweep_in_days() {
    let raw = RawInput::in_days(100.0, 100.0, 30.0, 0.05, 0.2);
    let spec = SweepSpec::new(SweepVariable::TimeToMaturity, 73.0, 365.0).with_steps(5);
    let result = sweep_raw(&raw, &spec, OptionType::Put).unwrap();

    let params = normalize(&raw).unwrap();
    let last = result.points.last().unwrap();
    assert_eq!(last.value, 365.0);
    let one_year = MarketParameters {
        time_to_maturity: 1.0,
        ..params
    };
    assert_eq!(last.price, price(&one_year).unwrap().put_price);

    // Longer maturities are worth more for an at-the-money call with r > 0
    let calls = sweep_raw(&raw, &spec, OptionType::Call).unwrap();
    assert!(calls.prices().collect::<Vec<_>>().windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_sweep_rejects_invalid_requests() {
    let too_few = SweepSpec::new(SweepVariable::Volatility, 0.1, 0.5).with_steps(1);
    assert!(sweep(&base(), &too_few, OptionType::Call).unwrap_err().is_invalid_parameter());

    let inverted = SweepSpec::new(SweepVariable::Strike, 120.0, 80.0);
    assert!(sweep(&base(), &inverted, OptionType::Call).unwrap_err().is_invalid_parameter());

    let negative_strike = SweepSpec::new(SweepVariable::Strike, -10.0, 80.0);
    assert!(sweep(&base(), &negative_strike, OptionType::Put).unwrap_err().is_invalid_parameter());

    assert!("moneyness".parse::<SweepVariable>().unwrap_err().is_invalid_parameter());
}

#[test]
fn test_heatmap_shape_and_axes() {
    let params = MarketParameters::new(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
    let grid = heatmap(&params).unwrap();

    assert_eq!(grid.spot_axis.len(), 11);
    assert_eq!(grid.volatility_axis.len(), 11);
    assert_eq!(grid.spot_axis[0], 50.0);
    assert_eq!(grid.spot_axis[10], 150.0);
    assert_abs_diff_eq!(grid.volatility_axis[0], 0.1, epsilon = 1e-12);
    assert_abs_diff_eq!(grid.volatility_axis[10], 0.3, epsilon = 1e-12);
    assert_eq!(grid.call_matrix.dim(), (11, 11));
    assert_eq!(grid.put_matrix.dim(), (11, 11));
}

#[test]
fn test_heatmap_orientation() {
    let params = MarketParameters::new(100.0, 95.0, 0.5, 0.03, 0.25).unwrap();
    let grid = heatmap(&params).unwrap();

    for (v, &volatility) in grid.volatility_axis.iter().enumerate() {
        for (s, &spot) in grid.spot_axis.iter().enumerate() {
            let expected = price(&MarketParameters {
                spot,
                volatility,
                ..params
            })
            .unwrap();
            assert_eq!(grid.call_matrix[[v, s]], expected.call_price);
            assert_eq!(grid.put_matrix[[v, s]], expected.put_price);
        }
    }

    // Columns: calls rise with spot. Rows: both sides rise with volatility.
    assert!(grid.call_matrix[[5, 10]] > grid.call_matrix[[5, 0]]);
    assert!(grid.put_matrix[[5, 10]] < grid.put_matrix[[5, 0]]);
    assert!(grid.call_matrix[[10, 5]] > grid.call_matrix[[0, 5]]);
    assert!(grid.put_matrix[[10, 5]] > grid.put_matrix[[0, 5]]);
}

#[test]
fn test_heatmap_zero_spot_fallback() {
    let params = MarketParameters::new(0.0, 100.0, 1.0, 0.05, 0.2).unwrap();
    let grid = heatmap(&params).unwrap();

    assert_eq!(grid.spot_axis.len(), 11);
    assert_eq!(grid.spot_axis[0], 1.0);
    assert_eq!(grid.spot_axis[10], 100.0);
    assert!(grid.call_matrix.iter().all(|p| p.is_finite()));
}

#[test]
fn test_zero_spot_kernel_and_valuation() {
    let params = MarketParameters::new(0.0, 100.0, 1.0, 0.05, 0.2).unwrap();
    let valuation = evaluate(&params).unwrap();
    assert_eq!(valuation.call_price, 0.0);
    assert_abs_diff_eq!(valuation.put_price, 100.0 * (-0.05f64).exp(), epsilon = 1e-12);
    assert_eq!(valuation.call_greeks.delta, 0.0);
    assert_eq!(valuation.put_greeks.delta, -1.0);
}

#[test]
fn test_json_shapes() {
    let valuation = evaluate(&base()).unwrap();
    let json = serde_json::to_value(valuation).unwrap();
    assert!(json["call_greeks"]["delta"].is_f64());
    assert!(json["put_price"].is_f64());

    let spec = SweepSpec::new(SweepVariable::Volatility, 0.1, 0.4).with_steps(4);
    let result = sweep(&base(), &spec, OptionType::Put).unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["variable"], "volatility");
    assert_eq!(json["option_type"], "put");
    assert_eq!(json["data"].as_array().unwrap().len(), 4);

    let request: SweepSpec = serde_json::from_str(
        r#"{"variable": "stock_price", "range_min": 80, "range_max": 120, "steps": 5}"#,
    )
    .unwrap();
    assert_eq!(request.variable, SweepVariable::Spot);

    // Omitted steps fall back to the default of 20
    let request: SweepSpec = serde_json::from_str(
        r#"{"variable": "stock_price", "range_min": 80, "range_max": 120}"#,
    )
    .unwrap();
    assert_eq!(request.steps, 20);
    assert_eq!(sweep(&base(), &request, OptionType::Call).unwrap().len(), 20);

    let grid = heatmap(&base()).unwrap();
    let json = serde_json::to_value(&grid).unwrap();
    assert_eq!(json["S_range"][0], 50.0);
    assert_eq!(json["call_heatmap"].as_array().unwrap().len(), 11);

    let bad = serde_json::from_str::<SweepSpec>(
        r#"{"variable": "dividend", "range_min": 0, "range_max": 1, "steps": 5}"#,
    );
    assert!(bad.is_err());
}
