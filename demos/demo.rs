// demos/demo.rs
use fast_bs::analytics::{evaluate, OptionType};
use fast_bs::grid::{heatmap, sweep, SweepSpec, SweepVariable};
use fast_bs::math_utils::Timer;
use fast_bs::output;
use fast_bs::params::{normalize, RawInput};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("Running fast-bs Demo\n");

    let raw = RawInput::in_days(100.0, 100.0, 90.0, 0.05, 0.25);
    let params = normalize(&raw).expect("Valid parameters");
    println!(
        "Contract: S = {}, K = {}, T = {} days ({:.4} years), r = {}, sigma = {}\n",
        raw.spot, raw.strike, raw.time_to_maturity, params.time_to_maturity, raw.risk_free_rate, raw.volatility
    );

    let mut timer = Timer::new();
    timer.start();
    let valuation = evaluate(&params).expect("Valid parameters");
    println!("Single evaluation took {:.3} ms", timer.elapsed_ms());

    println!("\n{:<8} {:>12} {:>12}", "", "Call", "Put");
    println!("{:<8} {:>12.4} {:>12.4}", "Price", valuation.call_price, valuation.put_price);
    let (call, put) = (valuation.call_greeks, valuation.put_greeks);
    println!("{:<8} {:>12.4} {:>12.4}", "Delta", call.delta, put.delta);
    println!("{:<8} {:>12.6} {:>12.6}", "Gamma", call.gamma, put.gamma);
    println!("{:<8} {:>12.4} {:>12.4}", "Theta", call.theta, put.theta);
    println!("{:<8} {:>12.4} {:>12.4}", "Vega", call.vega, put.vega);
    println!("{:<8} {:>12.4} {:>12.4}", "Rho", call.rho, put.rho);

    let parity = params.spot - params.strike * params.discount_factor();
    println!(
        "\nPut-call parity check: C - P = {:.8}, S - K e^(-rT) = {:.8}",
        valuation.call_price - valuation.put_price,
        parity
    );

    println!("\n--- Volatility sweep (call) ---");
    let spec = SweepSpec::new(SweepVariable::Volatility, 0.05, 0.6).with_steps(12);
    let curve = sweep(&params, &spec, OptionType::Call).expect("Valid sweep");
    for point in &curve.points {
        println!("  sigma = {:.3}  price = {:.4}", point.value, point.price);
    }

    println!("\n--- Spot x volatility heatmap (put) ---");
    timer.start();
    let grid = heatmap(&params).expect("Valid parameters");
    println!("Heatmap {:?} computed in {:.3} ms", grid.shape(), timer.elapsed_ms());

    print!("{:>8}", "vol\\S");
    for spot in &grid.spot_axis {
        print!("{:>8.1}", spot);
    }
    println!();
    for (row, volatility) in grid.volatility_axis.iter().enumerate() {
        print!("{:>8.3}", volatility);
        for price in grid.put_matrix.row(row) {
            print!("{:>8.2}", price);
        }
        println!();
    }

    let dir = std::path::Path::new("results");
    if std::fs::create_dir_all(dir).is_ok() {
        let sweep_path = dir.join("volatility_sweep.csv");
        let heatmap_path = dir.join("heatmap.csv");
        match output::write_sweep_to_file(&sweep_path, &curve)
            .and_then(|_| output::write_heatmap_to_file(&heatmap_path, &grid))
        {
            Ok(()) => println!("\nResults written to {}", dir.display()),
            Err(e) => eprintln!("\nCould not write results: {}", e),
        }
    }
}
