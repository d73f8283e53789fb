//! Bulk copy orchestrator - export then import, one table at a time.

mod run_log;

pub use run_log::RunLog;

use crate::bcp::{
    self, export_args, import_args, normalize_output, ProcessRunner, Step, ToolRunner,
};
use crate::config::JobConfig;
use crate::context::RunContext;
use crate::error::Result;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Drives bcp over every table of a job.
pub struct Orchestrator<R: ToolRunner = ProcessRunner> {
    job: JobConfig,
    tool: String,
    runner: R,
}

/// How one table ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TableOutcome {
    /// Exported, imported, intermediate file removed.
    Copied,
    /// A bcp step failed; later tables were still processed.
    Failed {
        step: Step,
        /// `None` when the tool could not be started or was killed.
        exit_code: Option<i32>,
        output: String,
    },
}

/// Outcome of one table, in copy order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableReport {
    pub table: String,
    #[serde(flatten)]
    pub outcome: TableOutcome,
}

/// Result of a bulk copy run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Unique run identifier.
    pub run_id: String,

    /// When the run started.
    pub started_at: DateTime<Local>,

    /// When the last table finished.
    pub completed_at: DateTime<Local>,

    /// Whole seconds between start and completion.
    pub duration_seconds: u64,

    /// Directory holding intermediate files and logs.
    pub work_dir: PathBuf,

    /// The run's log file.
    pub log_file: PathBuf,

    /// Total tables processed.
    pub tables_total: usize,

    /// Tables successfully copied.
    pub tables_copied: usize,

    /// Tables that failed.
    pub tables_failed: usize,

    /// List of failed table names.
    pub failed_tables: Vec<String>,

    /// Per-table outcomes.
    pub tables: Vec<TableReport>,
}

impl RunReport {
    /// Serialize as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// `"<m> min <s> sec"`
    pub fn duration_display(&self) -> String {
        format!(
            "{} min {} sec",
            self.duration_seconds / 60,
            self.duration_seconds % 60
        )
    }
}

impl Orchestrator<ProcessRunner> {
    /// Create an orchestrator that runs the real `bcp` executable.
    pub fn new(job: JobConfig) -> Self {
        Self::with_runner(job, ProcessRunner)
    }
}

impl<R: ToolRunner> Orchestrator<R> {
    /// Create an orchestrator with a custom tool runner.
    pub fn with_runner(job: JobConfig, runner: R) -> Self {
        Self {
            job,
            tool: bcp::DEFAULT_TOOL.to_string(),
            runner,
        }
    }

    /// Use a different bcp executable.
    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = tool.into();
        self
    }

    /// Copy every table of the job in order.
    ///
    /// Progress and per-table errors go to `console`; tool output and error
    /// records go to the run log. A failed table never stops the batch.
    pub fn run(&mut self, ctx: &RunContext, console: &mut dyn Write) -> Result<RunReport> {
        info!(
            "Starting bulk copy run {}: {} tables",
            ctx.run_id,
            self.job.tables.len()
        );

        let mut log = RunLog::open(&ctx.log_path);
        let tables = self.job.tables.clone();
        let mut reports = Vec::with_capacity(tables.len());

        for table in &tables {
            writeln!(console, "Copying data from table [{}] ...", table)?;

            let outcome = self.copy_table(ctx, table, &mut log);
            match &outcome {
                TableOutcome::Copied => {
                    info!("Table {} copied", table);
                    writeln!(console, "Table [{}] successfully copied!", table)?;
                    writeln!(console)?;
                }
                TableOutcome::Failed {
                    step,
                    exit_code,
                    output,
                } => {
                    error!("Table {} failed during {}", table, step);
                    let record = error_record(table, *step, *exit_code, output);
                    log.append(&format!("{}\r\n", record));
                    writeln!(console, "{}", record)?;
                }
            }

            reports.push(TableReport {
                table: table.clone(),
                outcome,
            });
        }

        let completed_at = Local::now();
        let duration_seconds = (completed_at - ctx.started_at).num_seconds().max(0) as u64;

        let failed_tables: Vec<String> = reports
            .iter()
            .filter(|r| r.outcome != TableOutcome::Copied)
            .map(|r| r.table.clone())
            .collect();

        let report = RunReport {
            run_id: ctx.run_id.clone(),
            started_at: ctx.started_at,
            completed_at,
            duration_seconds,
            work_dir: ctx.work_dir.clone(),
            log_file: ctx.log_path.clone(),
            tables_total: reports.len(),
            tables_copied: reports.len() - failed_tables.len(),
            tables_failed: failed_tables.len(),
            failed_tables,
            tables: reports,
        };

        info!(
            "Bulk copy run {} finished: {}/{} tables in {}",
            report.run_id,
            report.tables_copied,
            report.tables_total,
            report.duration_display()
        );

        Ok(report)
    }

    fn copy_table(&mut self, ctx: &RunContext, table: &str, log: &mut RunLog) -> TableOutcome {
        let data_file = ctx.data_file(table);

        let steps = [
            (Step::Export, export_args(table, &data_file, &self.job.source)),
            (
                Step::Import,
                import_args(table, &data_file, &self.job.destination),
            ),
        ];

        for (step, args) in steps {
            if let Err(outcome) = self.run_step(step, &args, log) {
                remove_data_file(&data_file);
                return outcome;
            }
        }

        remove_data_file(&data_file);
        TableOutcome::Copied
    }

    fn run_step(
        &mut self,
        step: Step,
        args: &[String],
        log: &mut RunLog,
    ) -> std::result::Result<(), TableOutcome> {
        debug!("{} {}", self.tool, bcp::redacted(args));

        match self.runner.run(&self.tool, args) {
            Ok(output) if output.success() => {
                log.append(&normalize_output(&output.stdout));
                Ok(())
            }
            Ok(output) => Err(TableOutcome::Failed {
                step,
                exit_code: output.exit_code,
                output: output.stdout,
            }),
            Err(e) => Err(TableOutcome::Failed {
                step,
                exit_code: None,
                output: format!("unable to start {}: {}", self.tool, e),
            }),
        }
    }
}

/// Human-readable failure record carrying the step, exit code and output.
pub fn error_record(table: &str, step: Step, exit_code: Option<i32>, output: &str) -> String {
    let code = exit_code
        .map(|c| c.to_string())
        .unwrap_or_else(|| "none".to_string());
    normalize_output(&format!(
        " [ERROR]: ({}, table [{}], exit code {}, {})",
        step,
        table,
        code,
        output.trim_end()
    ))
}

fn remove_data_file(path: &Path) {
    if !path.exists() {
        return;
    }
    if let Err(e) = std::fs::remove_file(path) {
        warn!("Unable to remove [{}]: {}", path.display(), e);
    }
}
