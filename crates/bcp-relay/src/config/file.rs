//! INI config file loading.
//!
//! ```ini
//! [Database]
//! database.source.instance = SRV01\SQLEXPRESS
//! database.source.dbname = sales
//! database.source.windowsauth = True
//! database.destination.instance = localhost
//! database.destination.dbname = sales
//! database.destination.windowsauth = False
//! database.destination.user = sa
//! database.destination.password = secret
//!
//! [Bulk]
//! bulk.tables = Customers, Orders
//! ```

use super::{split_tables, Auth, ConnectionConfig, JobConfig};
use crate::error::{BulkCopyError, Result};
use ini::{Ini, ParseOption, Properties};
use std::path::Path;
use tracing::debug;

const DATABASE_SECTION: &str = "Database";
const BULK_SECTION: &str = "Bulk";
const TABLES_KEY: &str = "bulk.tables";

/// Only this exact literal selects Windows authentication.
const WINDOWS_AUTH_ENABLED: &str = "True";

/// Load a job from an INI file.
pub fn load(path: &Path) -> Result<JobConfig> {
    if !path.exists() {
        return Err(BulkCopyError::ConfigNotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    debug!("Read config file {}", path.display());
    parse(&content)
}

/// Parse a job from INI text.
pub fn parse(content: &str) -> Result<JobConfig> {
    // Instance names carry backslashes, so escapes and quotes are kept literal.
    let options = ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    };
    let ini = Ini::load_from_str_opt(content, options)?;

    let database = ini.section(Some(DATABASE_SECTION)).ok_or_else(|| {
        BulkCopyError::Config(format!("missing section [{}]", DATABASE_SECTION))
    })?;

    let source = connection(database, "source")?;
    let destination = connection(database, "destination")?;

    let tables = ini
        .section(Some(BULK_SECTION))
        .and_then(|bulk| lookup(bulk, TABLES_KEY))
        .map(split_tables)
        .unwrap_or_default();

    Ok(JobConfig {
        source,
        destination,
        tables,
    })
}

fn connection(section: &Properties, side: &str) -> Result<ConnectionConfig> {
    let instance = required(section, &format!("database.{}.instance", side))?;
    let database = required(section, &format!("database.{}.dbname", side))?;
    let windows_auth = required(section, &format!("database.{}.windowsauth", side))?;

    let auth = if windows_auth == WINDOWS_AUTH_ENABLED {
        Auth::Integrated
    } else {
        Auth::Credentials {
            user: required(section, &format!("database.{}.user", side))?,
            password: required(section, &format!("database.{}.password", side))?,
        }
    };

    Ok(ConnectionConfig {
        instance,
        database,
        auth,
    })
}

fn required(section: &Properties, key: &str) -> Result<String> {
    lookup(section, key)
        .map(str::to_string)
        .ok_or_else(|| BulkCopyError::missing_key(DATABASE_SECTION, key))
}

/// Key names are case-insensitive; section names are not.
fn lookup<'a>(section: &'a Properties, key: &str) -> Option<&'a str> {
    section
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| v)
}
