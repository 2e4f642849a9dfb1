use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "halo-dfs workspace automation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the DFS strategy benchmarks and write a comparison report
    Bench {
        /// Run quickly (lower sample size/time)
        #[arg(long, default_value_t = false)]
        quick: bool,

        /// Generate report only (skip running benchmarks)
        #[arg(long, default_value_t = false)]
        report_only: bool,

        /// Also build with the `tracing` feature enabled
        #[arg(long, default_value_t = false)]
        tracing: bool,
    },
}

const BENCH: &str = "dfs_benchmark";
const STRATEGIES: &[&str] = &["explicit_stack", "recursive"];
const REPORT: &str = "benchmark_results/report.md";

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Bench {
            quick,
            report_only,
            tracing,
        } => {
            if !report_only {
                run_benchmarks(quick, tracing)?;
            }
            generate_report()?;
        }
    }

    Ok(())
}

fn run_benchmarks(quick: bool, tracing: bool) -> Result<()> {
    println!("Running {BENCH}...");
    let start = Instant::now();

    let mut cmd = Command::new("cargo");
    cmd.env("CARGO_INCREMENTAL", "0");
    cmd.args(["bench", "--bench", BENCH]);
    if tracing {
        cmd.args(["--features", "tracing"]);
    }

    // Args for the test runner (Criterion) go after --
    cmd.arg("--");
    if quick {
        cmd.args(["--measurement-time", "0.1", "--sample-size", "10", "--noplot"]);
    }

    let status = cmd
        .status()
        .with_context(|| format!("failed to spawn cargo bench for {BENCH}"))?;
    if !status.success() {
        anyhow::bail!("{BENCH} failed with {status}");
    }

    println!("Finished {BENCH} in {:.2?}", start.elapsed());
    Ok(())
}

/// Mean throughput (elements or iterations per second) per workload and strategy.
type Results = BTreeMap<String, BTreeMap<String, f64>>;

fn generate_report() -> Result<()> {
    println!("\n>>> Generating Report...");
    let criterion_dir = Path::new("target/criterion");
    if !criterion_dir.exists() {
        eprintln!("No criterion output found at {}", criterion_dir.display());
        return Ok(());
    }

    let mut results = Results::new();
    collect_results(criterion_dir, &mut results)?;

    let report_path = Path::new(REPORT);
    if let Some(parent) = report_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let mut file = fs::File::create(report_path)
        .with_context(|| format!("failed to create {}", report_path.display()))?;

    writeln!(file, "# DFS Strategy Benchmark Report")?;
    writeln!(file)?;
    write!(file, "| Workload |")?;
    for strategy in STRATEGIES {
        write!(file, " {strategy} (Ops/s) |")?;
    }
    writeln!(file, " recursive vs stack |")?;
    write!(file, "|---|")?;
    for _ in STRATEGIES {
        write!(file, "---|")?;
    }
    writeln!(file, "---|")?;

    for (workload, by_strategy) in &results {
        write!(file, "| {workload} |")?;
        for strategy in STRATEGIES {
            match by_strategy.get(*strategy) {
                Some(ops) => write!(file, " {} |", format_ops(*ops))?,
                None => write!(file, " N/A |")?,
            }
        }
        match (by_strategy.get("recursive"), by_strategy.get("explicit_stack")) {
            (Some(rec), Some(stack)) if *stack > 0.0 => writeln!(file, " **{:.2}x** |", rec / stack)?,
            _ => writeln!(file, " - |")?,
        }
    }

    println!("Report written to {}", report_path.display());
    Ok(())
}

fn format_ops(ops: f64) -> String {
    if ops > 1_000_000.0 {
        format!("{:.2}M", ops / 1_000_000.0)
    } else if ops > 1_000.0 {
        format!("{:.2}K", ops / 1_000.0)
    } else {
        format!("{ops:.0}")
    }
}

/// Splits a criterion benchmark id into `(workload, strategy)`.
///
/// Grouped ids look like `dfs_reachable/<strategy>/<shape>`, flat ones like
/// `dfs_max_<strategy>`.
fn split_id(id: &str) -> Option<(String, String)> {
    let parts: Vec<&str> = id.split('/').collect();
    if let [group, strategy, shape] = parts.as_slice() {
        return Some((format!("{group}/{shape}"), (*strategy).to_string()));
    }
    STRATEGIES.iter().find_map(|strategy| {
        id.strip_suffix(strategy)
            .and_then(|w| w.strip_suffix('_'))
            .map(|w| (w.to_string(), (*strategy).to_string()))
    })
}

fn collect_results(dir: &Path, results: &mut Results) -> Result<()> {
    for entry in fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))? {
        let path = entry?.path();
        if path.is_dir() {
            if path.file_name().and_then(|s| s.to_str()) == Some("report") {
                continue;
            }
            collect_results(&path, results)?;
            continue;
        }
        // Structure: .../<bench dir>/new/estimates.json next to benchmark.json
        if path.file_name().and_then(|s| s.to_str()) != Some("estimates.json") {
            continue;
        }
        let Some(run_dir) = path.parent() else { continue };
        if run_dir.file_name().and_then(|s| s.to_str()) != Some("new") {
            continue;
        }

        let bench_json = run_dir.join("benchmark.json");
        let Ok(meta) = fs::read_to_string(&bench_json) else { continue };
        let meta: serde_json::Value = serde_json::from_str(&meta)
            .with_context(|| format!("malformed {}", bench_json.display()))?;
        let Some(full_id) = meta.get("full_id").and_then(|v| v.as_str()) else { continue };
        let Some((workload, strategy)) = split_id(full_id) else { continue };

        let elements = meta
            .get("throughput")
            .and_then(|t| t.get("Elements"))
            .and_then(serde_json::Value::as_f64);

        let estimates: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path)?)
            .with_context(|| format!("malformed {}", path.display()))?;
        let Some(time_ns) = estimates
            .get("mean")
            .and_then(|m| m.get("point_estimate"))
            .and_then(serde_json::Value::as_f64)
        else {
            continue;
        };
        if time_ns <= 0.0 {
            continue;
        }

        let metric = elements.unwrap_or(1.0) * 1e9 / time_ns;
        results.entry(workload).or_default().insert(strategy, metric);
    }
    Ok(())
}
