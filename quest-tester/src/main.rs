mod checks;
mod client;
mod harness;
mod reports;
mod util;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use checks::{Check, CheckResult, CheckRunner, expand_checks};
use harness::Harness;
use util::{split_csv, timestamped_name};

#[derive(Debug, Parser)]
#[command(name = "quest-tester", version = "0.1.0")]
#[command(
    about = "Automated checks for the Continental Quest backend gateway over mock, bridge and HTTP transports"
)]
struct Args {
    /// URL the landing page is served from; omit for a standalone page
    #[arg(long)]
    page_url: Option<String>,

    /// Attach an in-process bridge exposing every backend method
    #[arg(long)]
    bridge: bool,

    /// Checks to run (comma-separated, or "all")
    #[arg(long, default_value = "all")]
    checks: String,

    /// List all available checks and exit
    #[arg(long)]
    list_checks: bool,

    /// Number of iterations per check
    #[arg(long, default_value_t = 3)]
    iterations: usize,

    /// Seed for mock progress values and generated updates
    #[arg(long, default_value_t = 1337)]
    seed: u64,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Write the report here instead of stdout; a directory gets a timestamped file
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_checks(&args)? {
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let (selected, unknown) = expand_checks(&split_csv(&args.checks));
    for err in unknown {
        eprintln!("⚠️  {}", err.to_string().yellow());
    }

    let harness = Harness::build(args.page_url.as_deref(), args.bridge, args.seed)?;
    let selection = harness.gateway.selection();
    println!(
        "🔌 Transport: {} ({})",
        selection.kind.label().bright_white(),
        selection.reason
    );
    if let Some(base_url) = &selection.base_url {
        println!("🌐 Base URL: {base_url}");
    }

    let results = run_checks(&args, &selected, &harness).await;
    write_reports(&args, &results, start_time)?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_checks(args: &Args) -> Result<bool> {
    if !args.list_checks {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone(), "txt")?;
    writeln!(output_target.writer(), "Available checks:")?;
    for check in Check::ALL {
        writeln!(
            output_target.writer(),
            "  {:20} - {}",
            check.name(),
            check.description()
        )?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🎮 Continental Quest Gateway Tester".bright_cyan().bold());
    println!("{}", "===================================".cyan());
}

async fn run_checks(args: &Args, selected: &[Check], harness: &Harness) -> Vec<CheckResult> {
    let runner = CheckRunner::new(args.verbose, args.seed);
    let mut results = Vec::with_capacity(selected.len());
    for &check in selected {
        let result = runner.run(check, harness, args.iterations).await;
        let mark = if result.passed { "✅" } else { "❌" };
        println!(
            "{mark} {} - {}/{} in {:?}",
            check,
            result.successful_iterations,
            result.iterations_run,
            result.average_duration
        );
        results.push(result);
    }
    results
}

const fn report_extension(report: &str) -> &'static str {
    match report.as_bytes() {
        b"json" => "json",
        b"markdown" => "md",
        _ => "txt",
    }
}

fn write_reports(args: &Args, results: &[CheckResult], start_time: Instant) -> Result<()> {
    let mut output_target =
        OutputTarget::new(args.output.clone(), report_extension(&args.report))?;

    match args.report.as_str() {
        "json" => reports::generate_json_report(&mut output_target, results)?,
        "markdown" => {
            if results.is_empty() {
                writeln!(
                    &mut output_target,
                    "# Continental Quest Gateway Check Results\n\n_No checks executed._"
                )?;
            } else {
                reports::generate_markdown_report(&mut output_target, results)?;
            }
        }
        _ => {
            let duration = start_time.elapsed();
            if results.is_empty() {
                writeln!(&mut output_target, "No checks executed.")?;
            } else {
                reports::generate_console_report(&mut output_target, results, duration)?;
            }
        }
    }

    if args.report != "json" {
        let duration = start_time.elapsed();
        writeln!(&mut output_target)?;
        writeln!(&mut output_target, "🏁 Total time: {duration:?}")?;
    }
    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>, ext: &str) -> Result<Self> {
        let Some(mut path) = path else {
            return Ok(Self::Stdout(BufWriter::new(stdout())));
        };
        if path.is_dir() {
            path.push(timestamped_name(ext));
        }
        let file =
            File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
        Ok(Self::File(BufWriter::new(file)))
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn base_args() -> Args {
        Args {
            page_url: None,
            bridge: false,
            checks: "all".to_string(),
            list_checks: false,
            iterations: 1,
            seed: 1337,
            report: "json".to_string(),
            verbose: false,
            output: None,
        }
    }

    fn sample_result(passed: bool) -> CheckResult {
        CheckResult {
            check_name: "launch".to_string(),
            transport: "mock".to_string(),
            passed,
            iterations_run: 1,
            successful_iterations: usize::from(passed),
            failures: if passed {
                Vec::new()
            } else {
                vec!["iteration 0: boom".to_string()]
            },
            average_duration: Duration::from_millis(1),
            performance_data: vec![Duration::from_millis(1)],
        }
    }

    fn temp_file(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!("quest-tester-{label}-{}", std::process::id()))
    }

    #[test]
    fn maybe_list_checks_writes_output() {
        let temp = temp_file("list.txt");
        let args = Args {
            list_checks: true,
            output: Some(temp.clone()),
            ..base_args()
        };
        assert!(maybe_list_checks(&args).unwrap());
        let content = std::fs::read_to_string(temp).unwrap();
        assert!(content.contains("Available checks"));
        assert!(content.contains("concurrent-updates"));
    }

    #[test]
    fn maybe_list_checks_returns_false_when_disabled() {
        assert!(!maybe_list_checks(&base_args()).unwrap());
    }

    #[test]
    fn write_reports_emits_json_for_results() {
        let temp = temp_file("report.json");
        let args = Args {
            output: Some(temp.clone()),
            ..base_args()
        };
        write_reports(&args, &[sample_result(true)], Instant::now()).unwrap();
        let content = std::fs::read_to_string(temp).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed[0]["check_name"], "launch");
    }

    #[test]
    fn write_reports_markdown_empty_results() {
        let temp = temp_file("empty.md");
        let args = Args {
            report: "markdown".to_string(),
            output: Some(temp.clone()),
            ..base_args()
        };
        write_reports(&args, &[], Instant::now()).unwrap();
        let content = std::fs::read_to_string(temp).unwrap();
        assert!(content.contains("No checks executed"));
    }

    #[test]
    fn write_reports_into_directory_uses_timestamped_name() {
        let dir = temp_file("reports-dir");
        std::fs::create_dir_all(&dir).unwrap();
        let args = Args {
            report: "console".to_string(),
            output: Some(dir.clone()),
            ..base_args()
        };
        write_reports(&args, &[sample_result(false)], Instant::now()).unwrap();
        let written: Vec<_> = std::fs::read_dir(&dir)
            .unwrap()
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        assert!(written.iter().any(|name| name.ends_with(".txt")));
    }

    #[test]
    fn run_checks_against_mock_all_pass() {
        let args = base_args();
        let harness = Harness::build(None, false, args.seed).unwrap();
        let results = tokio_test::block_on(run_checks(&args, &Check::ALL, &harness));
        assert_eq!(results.len(), Check::ALL.len());
        assert!(results.iter().all(|r| r.passed));
    }

    #[test]
    fn report_extension_matches_format() {
        assert_eq!(report_extension("json"), "json");
        assert_eq!(report_extension("markdown"), "md");
        assert_eq!(report_extension("console"), "txt");
    }
}
