use std::collections::BTreeMap;
use std::env;
use std::time::Instant;

use pwl_dp::regression::linear_baseline;
use pwl_dp::{Algorithm, PwlInstance, Sample, Solution};
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

/// (m1, m2, K) grid shapes, smallest first.
const SHAPES: &[(usize, usize, usize)] = &[
    (4, 3, 3),
    (6, 4, 3),
    (8, 5, 4),
    (12, 8, 4),
    (16, 10, 5),
    (24, 12, 5),
    (32, 16, 6),
];

const SAMPLE_COUNT: usize = 240;

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("pwl_probe: {err}");
            Options::print_help();
            std::process::exit(2);
        }
    };

    eprintln!("\n{}", "=".repeat(80));
    eprintln!("PWL-DP Probe: optimum agreement and scaling across engines");
    eprintln!("{}", "=".repeat(80));
    eprintln!();
    eprintln!("Every selected engine runs on deterministic datasets over growing grids.");
    eprintln!(
        "  • Search engines only run while m1 <= {} (exponential time)",
        options.verify_limit
    );
    eprintln!("  • Below that limit each result is checked against the backtracking optimum");
    eprintln!("  • Above it the DP engines are checked against each other");
    eprintln!();

    let mut sys = System::new();
    let mut measurements = Vec::new();
    let datasets = datasets();
    let total = datasets.len();

    for (idx, (name, samples)) in datasets.iter().enumerate() {
        eprintln!("[{}/{}] Dataset '{}' ({} samples)", idx + 1, total, name, samples.len());
        measurements.extend(run_dataset(name, samples, &options, &mut sys));
        eprintln!();
    }

    print_summary(&measurements, &options);

    if let Err(err) = options.format.write(&measurements) {
        eprintln!("pwl_probe output error: {err}");
        std::process::exit(1);
    }
}

struct Options {
    format: OutputFormat,
    verify_limit: usize,
    algorithms: Vec<Algorithm>,
}

impl Options {
    fn parse<I, T>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut format = OutputFormat::Csv;
        let mut verify_limit = 8usize;
        let mut algorithms = Algorithm::ALL.to_vec();

        while let Some(arg) = args.next() {
            let arg = arg.into();
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) => (flag.to_string(), Some(value.to_string())),
                None => (arg.clone(), None),
            };
            let mut value = |name: &str| -> Result<String, String> {
                match inline.clone() {
                    Some(v) => Ok(v),
                    None => args
                        .next()
                        .map(Into::into)
                        .ok_or_else(|| format!("missing value after {name}")),
                }
            };
            match flag.as_str() {
                "--help" | "-h" => {
                    Options::print_help();
                    std::process::exit(0);
                }
                "--format" => format = OutputFormat::from_str(&value("--format")?)?,
                "--verify-limit" => {
                    verify_limit = value("--verify-limit")?
                        .parse::<usize>()
                        .map_err(|_| "verify limit must be a positive integer".to_string())?;
                }
                "--algorithm" => {
                    let name = value("--algorithm")?;
                    algorithms = if name == "all" {
                        Algorithm::ALL.to_vec()
                    } else {
                        vec![name.parse::<Algorithm>().map_err(|e| e.to_string())?]
                    };
                }
                _ => return Err(format!("unrecognized argument '{arg}'")),
            }
        }

        Ok(Self {
            format,
            verify_limit,
            algorithms,
        })
    }

    fn print_help() {
        println!(
            "\
Usage: cargo run --bin pwl_probe [-- <options>]

Options:
  --format <csv|table|json>     Output format (default: csv)
  --verify-limit <N>            Largest m1 for which search engines run and verify (default: 8)
  --algorithm <name|all>        exhaustive, backtracking, dp-topdown, dp-bottomup, dp-refined (default: all)
  -h, --help                    Print this help message

Examples:
  cargo run --release --bin pwl_probe
  cargo run --release --bin pwl_probe -- --format table --algorithm dp-refined
"
        );
    }
}

#[derive(Copy, Clone)]
enum OutputFormat {
    Csv,
    Table,
    Json,
}

impl OutputFormat {
    fn from_str(value: &str) -> Result<Self, String> {
        match value {
            "csv" => Ok(Self::Csv),
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format '{other}'")),
        }
    }

    fn write(self, measurements: &[Measurement]) -> Result<(), String> {
        match self {
            OutputFormat::Csv => write_csv(measurements),
            OutputFormat::Table => write_table(measurements),
            OutputFormat::Json => write_json(measurements),
        }
    }
}

#[derive(Clone)]
struct Measurement {
    dataset: &'static str,
    algorithm: Algorithm,
    shape: String,
    wall_s: f64,
    rss_delta_kib: u64,
    error: Option<f64>,
    verification_status: VerificationStatus,
    verification_detail: Option<String>,
}

#[derive(Clone, Copy)]
enum VerificationStatus {
    NotChecked,
    Passed,
    Failed,
}

impl VerificationStatus {
    fn label(&self) -> &'static str {
        match self {
            VerificationStatus::NotChecked => "not_checked",
            VerificationStatus::Passed => "passed",
            VerificationStatus::Failed => "failed",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            VerificationStatus::Passed => "✓",
            VerificationStatus::Failed => "✗",
            VerificationStatus::NotChecked => "○",
        }
    }
}

fn run_dataset(
    name: &'static str,
    samples: &[Sample],
    options: &Options,
    sys: &mut System,
) -> Vec<Measurement> {
    let mut out = Vec::new();
    for &(m1, m2, k) in SHAPES {
        let shape = format!("m1={m1} m2={m2} K={k}");
        let instance = match PwlInstance::new(samples.to_vec(), k, m1, m2) {
            Ok(instance) => instance,
            Err(err) => {
                eprintln!("      {shape}: invalid instance: {err}");
                continue;
            }
        };
        if let Ok(fit) = linear_baseline(&instance) {
            eprintln!("      {shape}: regression baseline error={:.6}", fit.error);
        }

        // Search engines give the ground truth on small grids; past the limit
        // the DP engines are checked against each other.
        let searchable = m1 <= options.verify_limit;
        let reference = if searchable {
            Algorithm::Backtracking.solve(&instance).ok()
        } else {
            None
        };
        let mut dp_reference: Option<f64> = None;

        for &algorithm in &options.algorithms {
            if algorithm.is_search() && !searchable {
                continue;
            }
            eprint!("      {shape} {:<13} ", algorithm.name());
            let mut result: Option<Solution> = None;
            let m = measure(name, algorithm, shape.clone(), sys, || {
                let outcome = algorithm.solve(&instance);
                let verdict = match (&outcome, reference.as_ref(), dp_reference) {
                    (Err(err), _, _) => (VerificationStatus::Failed, Some(err.to_string())),
                    (Ok(sol), Some(truth), _) => compare(sol.error, truth.error),
                    (Ok(sol), None, Some(other)) => compare(sol.error, other),
                    (Ok(_), None, None) => (VerificationStatus::NotChecked, None),
                };
                result = outcome.ok();
                verdict
            });
            let error = result.as_ref().map(|s| s.error);
            if !algorithm.is_search() && dp_reference.is_none() {
                dp_reference = error;
            }
            eprintln!(
                "{} error={}, time={:.3}s, status={}",
                m.verification_status.icon(),
                error.map_or_else(|| "-".to_string(), |e| format!("{e:.6}")),
                m.wall_s,
                m.verification_status.label()
            );
            out.push(Measurement { error, ..m });
        }
    }
    out
}

fn compare(got: f64, expected: f64) -> (VerificationStatus, Option<String>) {
    let tolerance = 1e-9 * expected.abs().max(1.0);
    if (got - expected).abs() <= tolerance {
        (VerificationStatus::Passed, None)
    } else {
        (
            VerificationStatus::Failed,
            Some(format!("expected {expected}, got {got}")),
        )
    }
}

fn print_summary(measurements: &[Measurement], options: &Options) {
    eprintln!("\n{}", "=".repeat(80));
    eprintln!("Probe Summary");
    eprintln!("{}", "=".repeat(80));
    eprintln!();

    let mut passed = 0;
    let mut failed = 0;
    let mut not_checked = 0;
    for m in measurements {
        match m.verification_status {
            VerificationStatus::Passed => passed += 1,
            VerificationStatus::Failed => failed += 1,
            VerificationStatus::NotChecked => not_checked += 1,
        }
    }

    let total = measurements.len().max(1);
    eprintln!("Verification Results:");
    eprintln!("  Total runs: {}", measurements.len());
    eprintln!("  ✓ Passed: {} ({:.1}%)", passed, 100.0 * passed as f64 / total as f64);
    eprintln!("  ✗ Failed: {} ({:.1}%)", failed, 100.0 * failed as f64 / total as f64);
    eprintln!(
        "  ○ Not checked: {} ({:.1}%)",
        not_checked,
        100.0 * not_checked as f64 / total as f64
    );
    eprintln!("  Search engines limited to m1 <= {}", options.verify_limit);
    eprintln!();

    if failed > 0 {
        eprintln!("Failed Runs:");
        for m in measurements {
            if matches!(m.verification_status, VerificationStatus::Failed) {
                eprintln!("  ✗ {} {} ({})", m.dataset, m.algorithm, m.shape);
                if let Some(ref detail) = m.verification_detail {
                    eprintln!("     Error: {}", detail);
                }
            }
        }
        eprintln!();
    }

    eprintln!("Time by Algorithm:");
    let mut by_algorithm: BTreeMap<&str, Vec<&Measurement>> = BTreeMap::new();
    for m in measurements {
        by_algorithm.entry(m.algorithm.name()).or_default().push(m);
    }
    for (name, ms) in &by_algorithm {
        let times: Vec<f64> = ms.iter().map(|m| m.wall_s).collect();
        let max_time = times.iter().copied().fold(0.0, f64::max);
        let avg_time = times.iter().sum::<f64>() / times.len() as f64;
        let max_mem = ms.iter().map(|m| m.rss_delta_kib).max().unwrap_or(0);
        eprintln!(
            "  {:<13} runs={:<3} max={:.3}s avg={:.3}s max_rss_delta={} KiB",
            name,
            ms.len(),
            max_time,
            avg_time,
            max_mem
        );
    }
    eprintln!();

    eprintln!("{}", "=".repeat(80));
    if failed == 0 {
        eprintln!("✓ All verified runs agree on the optimum.");
    } else {
        eprintln!("✗ {} run(s) disagree. Please review the errors above.", failed);
    }
    eprintln!("{}", "=".repeat(80));
    eprintln!();
}

fn measure<F>(
    dataset: &'static str,
    algorithm: Algorithm,
    shape: String,
    sys: &mut System,
    compute: F,
) -> Measurement
where
    F: FnOnce() -> (VerificationStatus, Option<String>),
{
    let before = rss_kib(sys);
    let start = Instant::now();
    let (status, detail) = compute();
    let duration = start.elapsed();
    let after = rss_kib(sys);

    Measurement {
        dataset,
        algorithm,
        shape,
        wall_s: duration.as_secs_f64(),
        rss_delta_kib: after.saturating_sub(before),
        error: None,
        verification_status: status,
        verification_detail: detail,
    }
}

fn write_csv(measurements: &[Measurement]) -> Result<(), String> {
    println!("dataset,algorithm,shape,wall_s,rss_delta_kib,error,verification_status,verification_detail");
    for m in measurements {
        let detail = m
            .verification_detail
            .as_ref()
            .map(|s| s.replace('"', "'"))
            .unwrap_or_default();
        println!(
            "{},{},{},{:.3},{},{},{},\"{}\"",
            m.dataset,
            m.algorithm,
            m.shape,
            m.wall_s,
            m.rss_delta_kib,
            m.error.map(|e| format!("{e:.9}")).unwrap_or_default(),
            m.verification_status.label(),
            detail
        );
    }
    Ok(())
}

fn write_table(measurements: &[Measurement]) -> Result<(), String> {
    let mut col1 = "dataset".len();
    let mut col2 = "shape".len();
    for m in measurements {
        col1 = col1.max(m.dataset.len());
        col2 = col2.max(m.shape.len());
    }

    println!(
        "{:<col1$}  {:<13}  {:<col2$}  {:>10}  {:>14}  {:>14}  {:>12}  {}",
        "dataset",
        "algorithm",
        "shape",
        "wall_s",
        "rss_delta_kib",
        "error",
        "status",
        "detail",
        col1 = col1,
        col2 = col2
    );
    println!(
        "{:-<col1$}  {:-<13}  {:-<col2$}  {:-<10}  {:-<14}  {:-<14}  {:-<12}  {:-<12}",
        "",
        "",
        "",
        "",
        "",
        "",
        "",
        "",
        col1 = col1,
        col2 = col2
    );
    for m in measurements {
        println!(
            "{:<col1$}  {:<13}  {:<col2$}  {:>10.3}  {:>14}  {:>14}  {:>12}  {}",
            m.dataset,
            m.algorithm.name(),
            m.shape,
            m.wall_s,
            m.rss_delta_kib,
            m.error.map(|e| format!("{e:.6}")).unwrap_or_else(|| "-".into()),
            m.verification_status.label(),
            m.verification_detail.as_deref().unwrap_or(""),
            col1 = col1,
            col2 = col2
        );
    }
    Ok(())
}

fn write_json(measurements: &[Measurement]) -> Result<(), String> {
    println!("[");
    for (idx, m) in measurements.iter().enumerate() {
        let detail = m.verification_detail.as_ref().map(|s| s.replace('"', "'"));
        println!(
            "  {{\"dataset\":\"{}\",\"algorithm\":\"{}\",\"shape\":\"{}\",\"wall_s\":{:.3},\"rss_delta_kib\":{},\"error\":{},\"verification\":{{\"status\":\"{}\",\"detail\":{}}}}}{}",
            m.dataset,
            m.algorithm,
            m.shape,
            m.wall_s,
            m.rss_delta_kib,
            m.error.map_or_else(|| "null".to_string(), |e| format!("{e}")),
            m.verification_status.label(),
            match detail {
                Some(ref d) => format!("\"{d}\""),
                None => "null".to_string(),
            },
            if idx + 1 == measurements.len() { "" } else { "," }
        );
    }
    println!("]");
    Ok(())
}

fn rss_kib(sys: &mut System) -> u64 {
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    if let Some(process) = get_current_pid().ok().and_then(|pid| sys.process(pid)) {
        process.memory() / 1024
    } else {
        0
    }
}

fn datasets() -> Vec<(&'static str, Vec<Sample>)> {
    vec![
        ("sine", sine_wave(SAMPLE_COUNT)),
        ("kinked_ramp", kinked_ramp(SAMPLE_COUNT)),
    ]
}

fn sine_wave(n: usize) -> Vec<Sample> {
    (0..n)
        .map(|k| {
            let x = k as f64 / (n - 1) as f64 * 6.0;
            Sample::new(x, x.sin())
        })
        .collect()
}

/// Two linear regimes with a kink at x = 0.6 plus a deterministic wobble.
fn kinked_ramp(n: usize) -> Vec<Sample> {
    (0..n)
        .map(|k| {
            let x = k as f64 / (n - 1) as f64;
            let base = if x < 0.6 { 2.0 * x } else { 1.2 - 3.0 * (x - 0.6) };
            let wobble = 0.05 * ((k * 7919 % 97) as f64 / 97.0 - 0.5);
            Sample::new(x, base + wobble)
        })
        .collect()
}
