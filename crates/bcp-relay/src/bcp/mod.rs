//! bcp command templates.
//!
//! Argument order matters to bcp: the table, the direction and the data file
//! are positional and come first, flags follow.

mod runner;

pub use runner::{ProcessRunner, ToolOutput, ToolRunner};

use crate::config::ConnectionConfig;
use serde::Serialize;
use std::path::Path;

/// Default program name, resolved through `PATH`.
pub const DEFAULT_TOOL: &str = "bcp";

/// UTF-8 code page passed with `-C`.
pub const CODE_PAGE: &str = "65001";

/// Direction of one bcp invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// `bcp <table> out <file>` against the source.
    Export,
    /// `bcp <table> in <file>` against the destination.
    Import,
}

impl Step {
    pub fn direction(&self) -> &'static str {
        match self {
            Step::Export => "out",
            Step::Import => "in",
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "bcp {}", self.direction())
    }
}

/// Arguments for `bcp <table> out <file> -S <instance> -d <db> -c -C 65001 [auth]`.
pub fn export_args(table: &str, data_file: &Path, conn: &ConnectionConfig) -> Vec<String> {
    let mut args = vec![
        table.to_string(),
        Step::Export.direction().to_string(),
        data_file.display().to_string(),
    ];
    args.extend(connection_args(conn));
    args
}

/// Arguments for `bcp <table> in <file> -q -E -S <instance> -d <db> -c -C 65001 [auth]`.
pub fn import_args(table: &str, data_file: &Path, conn: &ConnectionConfig) -> Vec<String> {
    let mut args = vec![
        table.to_string(),
        Step::Import.direction().to_string(),
        data_file.display().to_string(),
        "-q".to_string(),
        "-E".to_string(),
    ];
    args.extend(connection_args(conn));
    args
}

fn connection_args(conn: &ConnectionConfig) -> Vec<String> {
    let mut args = vec![
        "-S".to_string(),
        conn.instance.clone(),
        "-d".to_string(),
        conn.database.clone(),
        "-c".to_string(),
        "-C".to_string(),
        CODE_PAGE.to_string(),
    ];
    args.extend(conn.auth.args());
    args
}

/// Render arguments for logging with the `-P` value masked.
pub fn redacted(args: &[String]) -> String {
    let mut out = Vec::with_capacity(args.len());
    let mut mask_next = false;
    for arg in args {
        if mask_next {
            out.push("****");
            mask_next = false;
        } else {
            mask_next = arg == "-P";
            out.push(arg.as_str());
        }
    }
    out.join(" ")
}

/// Replace literal `\r\n` escape pairs with a real CR LF.
pub fn normalize_output(output: &str) -> String {
    output.replace("\\r\\n", "\r\n")
}
