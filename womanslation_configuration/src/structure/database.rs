use std::time::Duration;

use serde::Deserialize;

use crate::{traits::TryResolve, DatabaseConfigurationError};


const DEFAULT_INITIAL_BACKOFF_MILLISECONDS: u64 = 250;
const DEFAULT_MAXIMUM_BACKOFF_MILLISECONDS: u64 = 5_000;
const DEFAULT_DEADLINE_SECONDS: u64 = 30;


#[derive(Deserialize, Debug, Clone)]
pub(crate) struct UnresolvedConnectionRetryConfiguration {
    initial_backoff_milliseconds: u64,

    maximum_backoff_milliseconds: u64,

    deadline_seconds: u64,
}

impl Default for UnresolvedConnectionRetryConfiguration {
    fn default() -> Self {
        Self {
            initial_backoff_milliseconds: DEFAULT_INITIAL_BACKOFF_MILLISECONDS,
            maximum_backoff_milliseconds: DEFAULT_MAXIMUM_BACKOFF_MILLISECONDS,
            deadline_seconds: DEFAULT_DEADLINE_SECONDS,
        }
    }
}


/// How the initial database connection is retried on startup.
///
/// The delay between attempts starts at `initial_backoff`, doubles after
/// every failed attempt up to `maximum_backoff`, and no new attempt is made
/// once `deadline` has passed since the first one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionRetryConfiguration {
    pub initial_backoff: Duration,

    pub maximum_backoff: Duration,

    pub deadline: Duration,
}

impl TryResolve for UnresolvedConnectionRetryConfiguration {
    type Resolved = ConnectionRetryConfiguration;
    type Error = DatabaseConfigurationError;

    fn try_resolve(self) -> Result<Self::Resolved, Self::Error> {
        if self.initial_backoff_milliseconds == 0 || self.deadline_seconds == 0 {
            return Err(DatabaseConfigurationError::ZeroRetryDuration);
        }

        if self.initial_backoff_milliseconds > self.maximum_backoff_milliseconds {
            return Err(DatabaseConfigurationError::InitialBackoffExceedsMaximum {
                initial_backoff_milliseconds: self.initial_backoff_milliseconds,
                maximum_backoff_milliseconds: self.maximum_backoff_milliseconds,
            });
        }

        Ok(Self::Resolved {
            initial_backoff: Duration::from_millis(self.initial_backoff_milliseconds),
            maximum_backoff: Duration::from_millis(self.maximum_backoff_milliseconds),
            deadline: Duration::from_secs(self.deadline_seconds),
        })
    }
}



#[derive(Deserialize, Debug, Clone)]
pub(crate) struct UnresolvedDatabaseConfiguration {
    host: String,

    port: u16,

    username: String,

    password: Option<String>,

    database_name: String,

    statement_cache_capacity: Option<usize>,

    #[serde(default)]
    connection_retry: UnresolvedConnectionRetryConfiguration,
}


/// PostgreSQL-related configuration.
///
/// When the `DATABASE_URL` environment variable is set, the server connects
/// to that instead and only `connection_retry` is used from here.
#[derive(Debug, Clone)]
pub struct DatabaseConfiguration {
    /// Host of the database.
    pub host: String,

    /// Port the database is listening at.
    pub port: u16,

    /// Login username.
    pub username: String,

    /// Login password.
    pub password: Option<String>,

    /// Database name.
    pub database_name: String,

    /// Size of the per-connection prepared statement cache (sqlx default if unset).
    pub statement_cache_capacity: Option<usize>,

    pub connection_retry: ConnectionRetryConfiguration,
}

impl TryResolve for UnresolvedDatabaseConfiguration {
    type Resolved = DatabaseConfiguration;
    type Error = DatabaseConfigurationError;

    fn try_resolve(self) -> Result<Self::Resolved, Self::Error> {
        Ok(Self::Resolved {
            host: self.host,
            port: self.port,
            username: self.username,
            password: self.password,
            database_name: self.database_name,
            statement_cache_capacity: self.statement_cache_capacity,
            connection_retry: self.connection_retry.try_resolve()?,
        })
    }
}
