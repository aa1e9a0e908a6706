// demos/error_handling_demo.rs
use fast_bs::analytics::{evaluate_raw, OptionType};
use fast_bs::grid::{sweep, GridConfig, SweepSpec, SweepVariable};
use fast_bs::params::{MarketParameters, RawInput};
use fast_bs::PricingError;

fn report<T>(result: Result<T, PricingError>) {
    match result {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }
}

fn main() {
    println!("Error Handling Demo for fast-bs");
    println!("===============================\n");

    println!("1. Testing a negative strike...");
    report(evaluate_raw(&RawInput::in_years(100.0, -100.0, 1.0, 0.05, 0.2)));

    println!("\n2. Testing a zero maturity given in days...");
    report(evaluate_raw(&RawInput::in_days(100.0, 100.0, 0.0, 0.05, 0.2)));

    println!("\n3. Testing a non-finite volatility...");
    report(MarketParameters::new(100.0, 100.0, 1.0, 0.05, f64::NAN));

    println!("\n4. Testing a zero spot (valid, priced at its limit)...");
    match evaluate_raw(&RawInput::in_years(0.0, 100.0, 1.0, 0.05, 0.2)) {
        Ok(v) => println!(
            "   ✓ Priced: call = {:.4}, put = {:.4}, put delta = {}",
            v.call_price, v.put_price, v.put_greeks.delta
        ),
        Err(e) => println!("   Unexpected error: {}", e),
    }

    let base = MarketParameters::new(100.0, 100.0, 1.0, 0.05, 0.2).expect("Valid parameters");

    println!("\n5. Testing a sweep with too few steps...");
    let spec = SweepSpec::new(SweepVariable::Spot, 50.0, 150.0).with_steps(1);
    report(sweep(&base, &spec, OptionType::Call));

    println!("\n6. Testing a sweep whose range crosses zero volatility...");
    let spec = SweepSpec::new(SweepVariable::Volatility, 0.0, 0.5);
    report(sweep(&base, &spec, OptionType::Put));

    println!("\n7. Testing an inverted range...");
    let spec = SweepSpec::new(SweepVariable::Strike, 150.0, 50.0);
    report(sweep(&base, &spec, OptionType::Call));

    println!("\n8. Testing unknown tags...");
    report("dividend_yield".parse::<SweepVariable>());
    report("straddle".parse::<OptionType>());

    println!("\n9. Testing an invalid grid configuration...");
    report(GridConfig::from_toml_str("spot_band = 1.5"));

    println!("\n10. Testing error classification...");
    let err = evaluate_raw(&RawInput::in_years(100.0, 100.0, 1.0, 0.05, -0.2))
        .expect_err("Negative volatility is rejected");
    match err {
        PricingError::InvalidParameters {
            ref parameter,
            value,
            ref constraint,
        } => println!(
            "   ✓ Structured error: parameter = {}, value = {}, constraint = {}",
            parameter, value, constraint
        ),
        other => println!("   Unexpected variant: {:?}", other),
    }

    println!("\nError handling demo completed!");
}
