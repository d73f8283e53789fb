//! Job configuration: loading, prompting, and table resolution.

mod file;
mod interactive;
mod types;

pub use file::{load, parse};
pub use interactive::{
    prompt_connections, PromptedConnections, DEFAULT_DATABASE, DEFAULT_DESTINATION_INSTANCE,
    DEFAULT_SOURCE_INSTANCE,
};
pub use types::*;

use crate::error::{BulkCopyError, Result};
use crate::prompt::Prompt;
use std::io::Write;
use std::path::Path;
use tracing::info;

impl JobConfig {
    /// Resolve the job from a config file, or from prompts when no file is
    /// given. `tables_override` replaces whatever table list was resolved.
    /// Prompt banners are written to `console`.
    pub fn resolve(
        config_path: Option<&Path>,
        tables_override: Option<Vec<String>>,
        prompt: &mut dyn Prompt,
        console: &mut dyn Write,
    ) -> Result<Self> {
        let mut job = match config_path {
            Some(path) => {
                let job = load(path)?;
                info!("Loaded configuration from {}", path.display());
                job
            }
            None => {
                let conns = prompt_connections(prompt, console)?;
                JobConfig {
                    source: conns.source,
                    destination: conns.destination,
                    tables: Vec::new(),
                }
            }
        };

        if let Some(tables) = tables_override {
            job.tables = tables;
        }

        job.validate()?;
        Ok(job)
    }

    /// A job must name at least one table.
    pub fn validate(&self) -> Result<()> {
        if self.tables.is_empty() {
            return Err(BulkCopyError::NoTables);
        }
        Ok(())
    }

    /// Human-readable summary shown before the confirmation gate.
    pub fn summary(&self) -> String {
        let tables = self
            .tables
            .iter()
            .map(|t| format!("- {}", t))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "##############################\n\
             Importing data\n\
             FROM: {}\n\
             INTO: {}\n\
             \n\
             TABLES: \n\
             {}\n\
             ##############################\n",
            self.source.describe(),
            self.destination.describe(),
            tables
        )
    }
}

/// Split a comma-separated table list and trim each entry.
///
/// Blank entries are kept as empty table names, so `bulk.tables =` names one
/// (empty) table rather than none.
pub(crate) fn split_tables(raw: &str) -> Vec<String> {
    raw.split(',').map(|s| s.trim().to_string()).collect()
}
