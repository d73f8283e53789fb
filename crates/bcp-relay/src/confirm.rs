//! Confirmation gate before any data moves.

use crate::error::{BulkCopyError, Result};
use crate::prompt::Prompt;
use tracing::debug;

pub const CONFIRM_MESSAGE: &str = "Would you like to apply this bulk? y (yes) | n (no): ";

/// Operator decision at the confirmation gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    /// Parse `y`/`yes`/`n`/`no`, ignoring case and surrounding whitespace.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "y" | "yes" => Some(Answer::Yes),
            "n" | "no" => Some(Answer::No),
            _ => None,
        }
    }
}

/// Ask until the operator gives a valid answer. There is no retry limit.
///
/// Closed input counts as [`Answer::No`].
pub fn confirm(prompt: &mut dyn Prompt) -> Result<Answer> {
    loop {
        let input = match prompt.read_line(CONFIRM_MESSAGE) {
            Ok(input) => input,
            Err(BulkCopyError::InputClosed) => {
                debug!("Confirmation input closed");
                return Ok(Answer::No);
            }
            Err(e) => return Err(e),
        };

        if let Some(answer) = Answer::parse(&input) {
            return Ok(answer);
        }
    }
}
