// scripts/benchmark.rs
use anyhow::{Context, Result};
use fast_bs::analytics::{evaluate, OptionType};
use fast_bs::grid::{heatmap_with_config, sweep_with_config, GridConfig, SweepSpec, SweepVariable};
use fast_bs::math_utils::Timer;
use fast_bs::params::MarketParameters;
use std::env;
use std::hint::black_box;
use std::process::Command;
use tracing::info;

#[derive(Debug)]
struct SystemInfo {
    os: String,
    cpu_cores: usize,
    rust_version: String,
    rustc_flags: String,
    rayon_threads: usize,
}

impl SystemInfo {
    fn gather() -> Self {
        Self {
            os: env::consts::OS.to_string(),
            cpu_cores: num_cpus::get(),
            rust_version: Command::new("rustc")
                .arg("--version")
                .output()
                .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
                .unwrap_or_else(|_| "Unknown Rust version".to_string()),
            rustc_flags: env::var("RUSTFLAGS").unwrap_or_else(|_| "default".to_string()),
            rayon_threads: rayon::current_num_threads(),
        }
    }
}

#[derive(Debug)]
struct BenchmarkResult {
    name: String,
    evaluations: usize,
    time_ms: f64,
    evaluations_per_sec: f64,
}

impl BenchmarkResult {
    fn new(name: impl Into<String>, evaluations: usize, time_ms: f64) -> Self {
        BenchmarkResult {
            name: name.into(),
            evaluations,
            time_ms,
            evaluations_per_sec: evaluations as f64 / (time_ms / 1000.0),
        }
    }
}

fn run_kernel_benchmarks(base: &MarketParameters) -> Result<Vec<BenchmarkResult>> {
    let mut results = Vec::new();

    for &evaluations in &[10_000, 100_000, 1_000_000] {
        info!(evaluations, "benchmarking kernel");
        let mut timer = Timer::new();
        timer.start();
        for i in 0..evaluations {
            let params = MarketParameters {
                spot: base.spot + (i % 100) as f64 * 0.01,
                ..*base
            };
            black_box(evaluate(black_box(&params))?);
        }
        results.push(BenchmarkResult::new(
            format!("Price + Greeks ({}k evaluations)", evaluations / 1000),
            evaluations,
            timer.elapsed_ms(),
        ));
    }

    Ok(results)
}

fn run_grid_benchmarks(base: &MarketParameters) -> Result<Vec<BenchmarkResult>> {
    let mut results = Vec::new();

    for parallel in [false, true] {
        let mode = if parallel { "parallel" } else { "sequential" };
        let config = GridConfig {
            parallel,
            ..Default::default()
        };

        let spec = SweepSpec::new(SweepVariable::Spot, 50.0, 150.0).with_steps(100_000);
        info!(mode, steps = spec.steps, "benchmarking sweep");
        let mut timer = Timer::new();
        timer.start();
        black_box(sweep_with_config(base, &spec, OptionType::Call, &config)?);
        results.push(BenchmarkResult::new(
            format!("Spot sweep, 100k points ({})", mode),
            spec.steps,
            timer.elapsed_ms(),
        ));

        for points in [11, 101, 501] {
            let config = GridConfig {
                heatmap_points: points,
                ..config.clone()
            };
            info!(mode, points, "benchmarking heatmap");
            timer.start();
            black_box(heatmap_with_config(base, &config)?);
            results.push(BenchmarkResult::new(
                format!("Heatmap {}x{} ({})", points, points, mode),
                points * points,
                timer.elapsed_ms(),
            ));
        }
    }

    Ok(results)
}

fn write_results_to_csv(results: &[BenchmarkResult], system_info: &SystemInfo, filename: &str) -> Result<()> {
    let mut wtr = csv::Writer::from_path(filename).with_context(|| format!("creating {}", filename))?;

    wtr.write_record(["Key", "Value", "", ""])?;
    wtr.write_record(["OS", system_info.os.as_str(), "", ""])?;
    wtr.write_record(["CPU Cores", &system_info.cpu_cores.to_string(), "", ""])?;
    wtr.write_record(["Rust Version", system_info.rust_version.as_str(), "", ""])?;
    wtr.write_record(["RUSTFLAGS", system_info.rustc_flags.as_str(), "", ""])?;
    wtr.write_record(["Rayon Threads", &system_info.rayon_threads.to_string(), "", ""])?;
    wtr.write_record([
        "Benchmark Date",
        &chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        "",
        "",
    ])?;

    wtr.write_record(["Benchmark", "Evaluations", "Time_ms", "Evaluations_per_sec"])?;
    for result in results {
        wtr.write_record([
            result.name.clone(),
            result.evaluations.to_string(),
            format!("{:.2}", result.time_ms),
            format!("{:.0}", result.evaluations_per_sec),
        ])?;
    }
    wtr.flush()?;

    info!(filename, "results written");
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("fast-bs Benchmark Suite");
    println!("=======================\n");

    let system_info = SystemInfo::gather();
    println!("System Information:");
    println!("  OS: {}", system_info.os);
    println!("  CPU Cores: {}", system_info.cpu_cores);
    println!("  Rust Version: {}", system_info.rust_version);
    println!("  RUSTFLAGS: {}", system_info.rustc_flags);
    println!("  Rayon Threads: {}", system_info.rayon_threads);
    println!();

    let base = MarketParameters::new(100.0, 100.0, 1.0, 0.05, 0.2)?;
    let mut results = run_kernel_benchmarks(&base)?;
    results.extend(run_grid_benchmarks(&base)?);

    println!("{:<40} {:>12} {:>12} {:>16}", "Benchmark", "Evaluations", "Time (ms)", "Evals/sec");
    for result in &results {
        println!(
            "{:<40} {:>12} {:>12.2} {:>16.0}",
            result.name, result.evaluations, result.time_ms, result.evaluations_per_sec
        );
    }

    let filename = env::args().nth(1).unwrap_or_else(|| "benchmark_results.csv".to_string());
    write_results_to_csv(&results, &system_info, &filename)
}
