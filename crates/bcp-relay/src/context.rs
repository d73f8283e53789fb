//! Per-run working directory and log location.

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Directory under the base dir that holds one folder per run.
pub const OUT_DIR: &str = "out";

/// Directory under the run folder that holds the log file.
pub const LOGS_DIR: &str = "logs";

/// Log file name format, microsecond resolution.
const LOG_FILE_FORMAT: &str = "%Y_%m_%d__%H_%M_%S_%6f";

/// Values scoped to one execution.
///
/// The work dir is left in place after the run so intermediate files and the
/// log can be inspected.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Unique run identifier, also the work dir name.
    pub run_id: String,

    /// When the run started.
    pub started_at: DateTime<Local>,

    /// `<base>/out/<run_id>`.
    pub work_dir: PathBuf,

    /// `<work_dir>/logs/<timestamp>.txt`.
    pub log_path: PathBuf,
}

impl RunContext {
    /// Create the run directories under `base`.
    ///
    /// Directory creation is best effort: failures are logged and the
    /// context is returned anyway.
    pub fn create(base: &Path) -> Self {
        let ctx = Self::plan(base, uuid::Uuid::new_v4().to_string(), Local::now());

        if let Err(e) = std::fs::create_dir_all(&ctx.work_dir) {
            warn!(
                "Unable to create temporary dir [{}]: {}",
                ctx.work_dir.display(),
                e
            );
        }
        if let Some(logs_dir) = ctx.log_path.parent() {
            if let Err(e) = std::fs::create_dir_all(logs_dir) {
                warn!("Unable to create [{}] dir: {}", logs_dir.display(), e);
            }
        }
        debug!("Run {} working in {}", ctx.run_id, ctx.work_dir.display());

        ctx
    }

    /// Compute the run paths without touching the filesystem.
    pub fn plan(base: &Path, run_id: String, started_at: DateTime<Local>) -> Self {
        let work_dir = base.join(OUT_DIR).join(&run_id);
        let log_name = format!("{}.txt", started_at.format(LOG_FILE_FORMAT));
        let log_path = work_dir.join(LOGS_DIR).join(log_name);

        Self {
            run_id,
            started_at,
            work_dir,
            log_path,
        }
    }

    /// Intermediate data file for `table`.
    pub fn data_file(&self, table: &str) -> PathBuf {
        self.work_dir.join(format!("{}.txt", table))
    }
}
