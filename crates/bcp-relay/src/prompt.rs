//! Line-oriented operator input.
//!
//! The interactive config flow and the confirmation gate only need two
//! primitives: read a line, read a masked line. The binary backs them with a
//! terminal; tests back them with canned answers.

use crate::error::Result;

/// Source of operator answers.
pub trait Prompt {
    /// Show `message` and read one line of plain input.
    ///
    /// Returns [`BulkCopyError::InputClosed`](crate::BulkCopyError::InputClosed)
    /// at end of input.
    fn read_line(&mut self, message: &str) -> Result<String>;

    /// Show `message` and read one line without echoing it.
    fn read_password(&mut self, message: &str) -> Result<String>;
}

/// Read a line and fall back to `default` when it is blank.
///
/// Non-blank answers are returned with surrounding whitespace trimmed.
pub fn read_or_default(prompt: &mut dyn Prompt, message: &str, default: &str) -> Result<String> {
    let answer = prompt.read_line(message)?;
    Ok(or_default(&answer, default))
}

pub(crate) fn or_default(answer: &str, default: &str) -> String {
    let trimmed = answer.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}
