//! # bcp-relay
//!
//! Table-by-table copy between two SQL Server databases using the `bcp`
//! bulk-copy tool.
//!
//! For every table the orchestrator exports the rows of the source table to
//! a flat file (`bcp <table> out`), imports that file into the destination
//! table (`bcp <table> in`), appends bcp's output to the run log and moves
//! on. A failing table is reported and skipped; it never stops the batch.
//!
//! ## Example
//!
//! ```rust,no_run
//! use bcp_relay::{JobConfig, Orchestrator, RunContext};
//! use std::path::Path;
//!
//! # struct NoPrompt;
//! # impl bcp_relay::Prompt for NoPrompt {
//! #     fn read_line(&mut self, _: &str) -> bcp_relay::Result<String> { Ok(String::new()) }
//! #     fn read_password(&mut self, _: &str) -> bcp_relay::Result<String> { Ok(String::new()) }
//! # }
//! fn main() -> bcp_relay::Result<()> {
//!     let job = JobConfig::resolve(
//!         Some(Path::new("bulk.ini")),
//!         None,
//!         &mut NoPrompt,
//!         &mut std::io::stdout(),
//!     )?;
//!     let ctx = RunContext::create(&std::env::current_dir()?);
//!     let report = Orchestrator::new(job).run(&ctx, &mut std::io::stdout())?;
//!     println!("Copied {}/{} tables", report.tables_copied, report.tables_total);
//!     Ok(())
//! }
//! ```

pub mod bcp;
pub mod config;
pub mod confirm;
pub mod context;
pub mod error;
pub mod orchestrator;
pub mod prompt;

// Re-exports for convenient access
pub use bcp::{ProcessRunner, Step, ToolOutput, ToolRunner};
pub use config::{Auth, ConnectionConfig, JobConfig};
pub use confirm::{confirm, Answer};
pub use context::RunContext;
pub use error::{BulkCopyError, Result};
pub use orchestrator::{Orchestrator, RunReport, TableOutcome, TableReport};
pub use prompt::Prompt;
