//! The run's shared log file.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use tracing::warn;

/// Log file opened once per run and appended to by every table step.
///
/// If the file cannot be created the log degrades to a sink so the copy
/// itself still runs.
pub struct RunLog {
    writer: Box<dyn Write>,
}

impl RunLog {
    /// Create (truncate) the log file at `path`.
    pub fn open(path: &Path) -> Self {
        match File::create(path) {
            Ok(file) => Self::from_writer(file),
            Err(e) => {
                warn!("Unable to open log file [{}]: {}", path.display(), e);
                Self::from_writer(io::sink())
            }
        }
    }

    pub fn from_writer(writer: impl Write + 'static) -> Self {
        Self {
            writer: Box::new(writer),
        }
    }

    /// Append `text` and flush. Write failures are logged, never raised.
    pub fn append(&mut self, text: &str) {
        let result = self
            .writer
            .write_all(text.as_bytes())
            .and_then(|_| self.writer.flush());
        if let Err(e) = result {
            warn!("Unable to write to log file: {}", e);
        }
    }
}
