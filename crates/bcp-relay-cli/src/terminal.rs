//! Terminal-backed prompts.
//!
//! dialoguer drives the prompts when stdin and stderr are both terminals.
//! Otherwise answers are read line by line from stdin, so the tool can be
//! scripted through a pipe.

use bcp_relay::{BulkCopyError, Prompt, Result};
use dialoguer::{Input, Password};
use std::io::{self, BufRead, IsTerminal, Write};

/// [`Prompt`] reading from the controlling terminal, or from piped stdin.
pub struct TerminalPrompt {
    interactive: bool,
}

impl TerminalPrompt {
    pub fn new() -> Self {
        Self {
            interactive: io::stdin().is_terminal() && io::stderr().is_terminal(),
        }
    }

    fn read_piped(&self, message: &str) -> Result<String> {
        read_line_from(&mut io::stdin().lock(), &mut io::stdout(), message)
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompt for TerminalPrompt {
    fn read_line(&mut self, message: &str) -> Result<String> {
        if !self.interactive {
            return self.read_piped(message);
        }
        let input: String = Input::new()
            .with_prompt(prompt_text(message))
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)?;
        Ok(input)
    }

    fn read_password(&mut self, message: &str) -> Result<String> {
        if !self.interactive {
            return self.read_piped(message);
        }
        let input: String = Password::new()
            .with_prompt(prompt_text(message))
            .allow_empty_password(true)
            .interact()
            .map_err(prompt_error)?;
        Ok(input)
    }
}

/// Show `message` on `out` and read one line from `reader`.
///
/// The line ending is stripped. End of input is [`BulkCopyError::InputClosed`].
fn read_line_from(
    reader: &mut impl BufRead,
    out: &mut impl Write,
    message: &str,
) -> Result<String> {
    write!(out, "{}", message)?;
    out.flush()?;

    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(BulkCopyError::InputClosed);
    }

    let trimmed = line
        .strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(&line);
    Ok(trimmed.to_string())
}

/// dialoguer appends its own `": "`.
fn prompt_text(message: &str) -> &str {
    message.trim_end().trim_end_matches(':')
}

fn prompt_error(e: dialoguer::Error) -> BulkCopyError {
    BulkCopyError::Prompt(e.to_string())
}

/// Block until the operator presses Enter. Closed stdin returns at once.
pub fn wait_for_enter() -> io::Result<()> {
    print!("Press Enter to continue...");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(())
}
