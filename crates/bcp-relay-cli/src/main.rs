//! bcp-relay CLI - copy SQL Server tables between databases with bcp.

mod terminal;

use bcp_relay::{confirm, Answer, BulkCopyError, JobConfig, Orchestrator, RunContext, RunReport};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use terminal::{wait_for_enter, TerminalPrompt};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "bcp-relay")]
#[command(about = "Bulk export-import utility: copy SQL Server tables with bcp")]
#[command(version)]
struct Cli {
    /// Path to config file (prompts for connections when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Database tables to bulk export-import; replaces the tables of the config file
    #[arg(short, long, num_args = 1.., value_name = "TABLE")]
    tables: Option<Vec<String>>,

    /// Do not prompt for confirmation
    #[arg(short = 'y', long = "confirm-yes")]
    confirm_yes: bool,

    /// bcp executable to invoke
    #[arg(long, default_value = "bcp")]
    bcp_path: String,

    /// Output JSON run report to stdout
    #[arg(long)]
    output_json: bool,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "warn")]
    verbosity: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(&cli.verbosity, &cli.log_format);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<(), BulkCopyError> {
    let base_dir = std::env::current_dir()?;
    let mut prompt = TerminalPrompt::new();

    let job = JobConfig::resolve(
        cli.config.as_deref(),
        cli.tables,
        &mut prompt,
        &mut std::io::stdout(),
    )?;

    println!();
    print!("{}", job.summary());
    println!();
    println!();

    if !cli.confirm_yes && confirm(&mut prompt)? == Answer::No {
        info!("Bulk copy declined");
        return Ok(());
    }

    let ctx = RunContext::create(&base_dir);
    let mut orchestrator = Orchestrator::new(job).with_tool(cli.bcp_path);
    let report = orchestrator.run(&ctx, &mut std::io::stdout())?;

    print_summary(&report);
    if cli.output_json {
        println!("{}", report.to_json()?);
    }

    wait_for_enter()?;
    Ok(())
}

fn print_summary(report: &RunReport) {
    println!();
    println!("##############################");
    println!("Duration: {}", report.duration_display());
    println!("Tables: {}/{}", report.tables_copied, report.tables_total);
    if !report.failed_tables.is_empty() {
        println!("Failed tables: {}", report.failed_tables.join(", "));
    }
    println!("Log file: {}", report.log_file.display());
    println!("##############################");
    println!();
}

fn setup_logging(verbosity: &str, format: &str) {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    // stderr keeps stdout for operator output and the JSON report.
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr);

    if format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
