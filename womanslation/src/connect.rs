//! Startup connection to the PostgreSQL database.

use std::{
    str::FromStr,
    time::{Duration, Instant},
};

use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool,
};
use thiserror::Error;
use tracing::{info, warn};
use womanslation_configuration::{ConnectionRetryConfiguration, DatabaseConfiguration};


/// When set, this environment variable overrides the `[database]` connection parameters.
pub const DATABASE_URL_ENVIRONMENT_VARIABLE: &str = "DATABASE_URL";

const DEFAULT_STATEMENT_CACHE_CAPACITY: usize = 200;


#[derive(Debug, Error)]
pub enum DatabaseConnectionError {
    #[error("invalid database URL in the {} environment variable", DATABASE_URL_ENVIRONMENT_VARIABLE)]
    InvalidDatabaseUrl {
        #[source]
        error: sqlx::Error,
    },

    #[error("unable to connect to the database")]
    UnableToConnect {
        #[source]
        error: sqlx::Error,
    },

    #[error(
        "unable to connect to the database after {} attempts in {:.1} seconds",
        .attempts,
        .elapsed.as_secs_f64()
    )]
    DeadlineExceeded {
        attempts: u32,

        elapsed: Duration,

        #[source]
        last_error: sqlx::Error,
    },
}


fn application_name() -> String {
    format!("womanslation-api_v{}", env!("CARGO_PKG_VERSION"))
}

/// Builds connection options from the `[database]` configuration table alone.
pub fn connect_options_from_configuration(
    database_configuration: &DatabaseConfiguration,
) -> PgConnectOptions {
    let mut connection_options = PgConnectOptions::new_without_pgpass()
        .application_name(&application_name())
        .statement_cache_capacity(
            database_configuration
                .statement_cache_capacity
                .unwrap_or(DEFAULT_STATEMENT_CACHE_CAPACITY),
        )
        .host(&database_configuration.host)
        .port(database_configuration.port)
        .username(&database_configuration.username)
        .database(&database_configuration.database_name);

    if let Some(password) = &database_configuration.password {
        connection_options = connection_options.password(password.as_str());
    }

    connection_options
}

/// Builds connection options from `database_url` if given,
/// otherwise from the `[database]` configuration table.
pub fn resolve_connect_options(
    database_configuration: &DatabaseConfiguration,
    database_url: Option<&str>,
) -> Result<PgConnectOptions, DatabaseConnectionError> {
    match database_url {
        Some(database_url) => {
            let connection_options = PgConnectOptions::from_str(database_url)
                .map_err(|error| DatabaseConnectionError::InvalidDatabaseUrl { error })?;

            Ok(connection_options
                .application_name(&application_name())
                .statement_cache_capacity(
                    database_configuration
                        .statement_cache_capacity
                        .unwrap_or(DEFAULT_STATEMENT_CACHE_CAPACITY),
                ))
        }
        None => Ok(connect_options_from_configuration(
            database_configuration,
        )),
    }
}


pub async fn establish_database_connection_pool(
    connection_options: PgConnectOptions,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .idle_timeout(Some(Duration::from_secs(60 * 20)))
        .max_lifetime(Some(Duration::from_secs(60 * 60)))
        .min_connections(1)
        .max_connections(10)
        .test_before_acquire(true)
        .connect_with(connection_options)
        .await
}



/// Exponentially growing delays between connection attempts, capped at a maximum.
#[derive(Debug, Clone)]
pub struct ConnectionBackoff {
    next_delay: Duration,
    maximum_delay: Duration,
}

impl ConnectionBackoff {
    pub fn new(retry_configuration: &ConnectionRetryConfiguration) -> Self {
        Self {
            next_delay: retry_configuration.initial_backoff,
            maximum_delay: retry_configuration.maximum_backoff,
        }
    }

    /// Returns the delay to wait before the next attempt and doubles the following one.
    pub fn next_delay(&mut self) -> Duration {
        let current_delay = self.next_delay;

        self.next_delay = current_delay
            .saturating_mul(2)
            .min(self.maximum_delay);

        current_delay
    }
}


/// Errors that retrying can not fix (e.g. malformed options).
fn is_permanent_connection_error(error: &sqlx::Error) -> bool {
    matches!(
        error,
        sqlx::Error::Configuration(_) | sqlx::Error::Tls(_)
    )
}


/// Connects to the database, retrying with exponential backoff until
/// the configured deadline would be exceeded by the next wait.
pub async fn establish_database_connection_pool_with_retry(
    database_configuration: &DatabaseConfiguration,
) -> Result<PgPool, DatabaseConnectionError> {
    let database_url = std::env::var(DATABASE_URL_ENVIRONMENT_VARIABLE).ok();
    if database_url.is_some() {
        info!(
            "Using the database connection URL from the {} environment variable.",
            DATABASE_URL_ENVIRONMENT_VARIABLE
        );
    }

    let connection_options = resolve_connect_options(database_configuration, database_url.as_deref())?;


    let retry_configuration = &database_configuration.connection_retry;
    let mut backoff = ConnectionBackoff::new(retry_configuration);

    let started_at = Instant::now();
    let mut attempts: u32 = 0;

    loop {
        attempts += 1;

        let last_error = match establish_database_connection_pool(connection_options.clone()).await {
            Ok(pool) => {
                info!(
                    attempts,
                    elapsed_ms = started_at.elapsed().as_millis() as u64,
                    "Connected to the database."
                );

                return Ok(pool);
            }
            Err(error) => error,
        };

        if is_permanent_connection_error(&last_error) {
            return Err(DatabaseConnectionError::UnableToConnect { error: last_error });
        }


        let delay = backoff.next_delay();
        let elapsed = started_at.elapsed();

        if elapsed + delay > retry_configuration.deadline {
            return Err(DatabaseConnectionError::DeadlineExceeded {
                attempts,
                elapsed,
                last_error,
            });
        }

        warn!(
            attempts,
            retry_in_ms = delay.as_millis() as u64,
            error = %last_error,
            "Unable to connect to the database, retrying."
        );

        tokio::time::sleep(delay).await;
    }
}
