//! Blocking execution of the external tool.

use std::io;
use std::process::{Command, Stdio};

/// Result of one finished tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code, `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,

    /// Captured standard output, lossily decoded as UTF-8.
    pub stdout: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs a program to completion and captures its standard output.
pub trait ToolRunner {
    /// `Err` means the program could not be started at all.
    fn run(&mut self, program: &str, args: &[String]) -> io::Result<ToolOutput>;
}

/// [`ToolRunner`] backed by a child process.
///
/// stdin and stderr stay attached to the terminal, so bcp can still ask for
/// input and report warnings directly.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl ToolRunner for ProcessRunner {
    fn run(&mut self, program: &str, args: &[String]) -> io::Result<ToolOutput> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .output()?;

        Ok(ToolOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}
