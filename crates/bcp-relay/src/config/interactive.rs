//! Interactive connection prompts.

use super::{Auth, ConnectionConfig};
use crate::error::Result;
use crate::prompt::{read_or_default, Prompt};
use std::io::Write;

pub const DEFAULT_SOURCE_INSTANCE: &str = "153.89.154.109";
pub const DEFAULT_DESTINATION_INSTANCE: &str = "localhost";
pub const DEFAULT_DATABASE: &str = "csd-tarfac";

/// Both connections as answered by the operator.
#[derive(Debug, Clone)]
pub struct PromptedConnections {
    pub source: ConnectionConfig,
    pub destination: ConnectionConfig,
}

/// Ask for the source connection, then the destination connection.
///
/// Section banners are written to `console`.
pub fn prompt_connections(
    prompt: &mut dyn Prompt,
    console: &mut dyn Write,
) -> Result<PromptedConnections> {
    writeln!(console)?;
    write_banner(console, "SOURCE DB")?;
    let source = prompt_connection(prompt, DEFAULT_SOURCE_INSTANCE)?;

    writeln!(console)?;
    writeln!(console)?;
    write_banner(console, "DESTINATION DB")?;
    let destination = prompt_connection(prompt, DEFAULT_DESTINATION_INSTANCE)?;

    Ok(PromptedConnections {
        source,
        destination,
    })
}

fn prompt_connection(prompt: &mut dyn Prompt, default_instance: &str) -> Result<ConnectionConfig> {
    let instance = read_or_default(
        prompt,
        &format!("SQL server_name\\instance [{}]:", default_instance),
        default_instance,
    )?;
    let database = read_or_default(
        prompt,
        &format!("DB name [{}]:", DEFAULT_DATABASE),
        DEFAULT_DATABASE,
    )?;
    let auth = prompt_auth(prompt)?;

    Ok(ConnectionConfig {
        instance,
        database,
        auth,
    })
}

/// A blank user selects Windows authentication and skips the password.
fn prompt_auth(prompt: &mut dyn Prompt) -> Result<Auth> {
    let user = read_or_default(prompt, "DB user [Windows Authentication]:", "")?;
    if user.is_empty() {
        return Ok(Auth::Integrated);
    }

    let password = prompt.read_password("DB password:")?;
    Ok(Auth::Credentials { user, password })
}

fn write_banner(console: &mut dyn Write, title: &str) -> Result<()> {
    writeln!(console, "##############################")?;
    writeln!(console, "# {}", title)?;
    writeln!(console, "##############################")?;
    console.flush()?;
    Ok(())
}
