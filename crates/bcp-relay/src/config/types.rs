//! Connection and job type definitions.

use serde::Serialize;

/// Authentication mode passed to bcp for one connection.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Auth {
    /// Windows (trusted) authentication, `-T`.
    Integrated,
    /// SQL Server login, `-U <user> -P <password>`.
    Credentials {
        user: String,
        #[serde(skip_serializing)]
        password: String,
    },
}

impl Auth {
    /// bcp arguments selecting this authentication mode.
    pub fn args(&self) -> Vec<String> {
        match self {
            Auth::Integrated => vec!["-T".to_string()],
            Auth::Credentials { user, password } => vec![
                "-U".to_string(),
                user.clone(),
                "-P".to_string(),
                password.clone(),
            ],
        }
    }

    /// Short human-readable label used in the job summary.
    pub fn describe(&self) -> String {
        match self {
            Auth::Integrated => "(Windows authentication)".to_string(),
            Auth::Credentials { user, .. } => format!("(user: {})", user),
        }
    }
}

// Manual impl so passwords never reach log output.
impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Auth::Integrated => write!(f, "Integrated"),
            Auth::Credentials { user, .. } => f
                .debug_struct("Credentials")
                .field("user", user)
                .field("password", &"[REDACTED]")
                .finish(),
        }
    }
}

/// One side of the copy: a SQL Server instance and database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionConfig {
    /// `server_name\instance` or address passed to `-S`.
    pub instance: String,

    /// Database name passed to `-d`.
    pub database: String,

    /// Authentication mode.
    pub auth: Auth,
}

impl ConnectionConfig {
    /// `<instance> (DB: <db>) (<auth>)`
    pub fn describe(&self) -> String {
        format!(
            "{} (DB: {}) {}",
            self.instance,
            self.database,
            self.auth.describe()
        )
    }
}

/// Everything a run needs: both connections and the tables to copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobConfig {
    /// Connection rows are exported from.
    pub source: ConnectionConfig,

    /// Connection rows are imported into.
    pub destination: ConnectionConfig,

    /// Tables in copy order. Duplicates are kept.
    pub tables: Vec<String>,
}
