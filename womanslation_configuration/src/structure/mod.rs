use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

mod database;
mod http;
mod logging;
mod seeding;

pub use database::*;
pub use http::*;
pub use logging::*;
pub use seeding::*;

use crate::traits::{Resolve, TryResolve, TryResolveWithContext};
use crate::utilities::get_default_configuration_file_path;
use crate::{ConfigurationLoadingError, ConfigurationResolutionError};



#[derive(Deserialize, Debug)]
pub(crate) struct UnresolvedConfiguration {
    /// Logging-related configuration.
    logging: UnresolvedLoggingConfiguration,

    /// Configuration related to the HTTP server.
    http: UnresolvedHttpConfiguration,

    /// Configuration related to the database.
    database: UnresolvedDatabaseConfiguration,

    /// Example data loading. The whole table is optional.
    #[serde(default)]
    seeding: UnresolvedSeedingConfiguration,
}


/// The entire Womanslation backend configuration.
#[derive(Debug, Clone)]
pub struct Configuration {
    /// This is the file path this [`Configuration`] instance was loaded from.
    pub configuration_file_path: PathBuf,

    /// Logging-related configuration.
    pub logging: LoggingConfiguration,

    /// Configuration related to the HTTP server.
    pub http: HttpConfiguration,

    /// Configuration related to the database.
    pub database: DatabaseConfiguration,

    /// Example data loading.
    pub seeding: SeedingConfiguration,
}



pub(crate) struct ConfigurationResolutionContext {
    configuration_file_path: PathBuf,
}

impl TryResolveWithContext for UnresolvedConfiguration {
    type Resolved = Configuration;
    type Context = ConfigurationResolutionContext;
    type Error = ConfigurationResolutionError;

    fn try_resolve_with_context(
        self,
        context: Self::Context,
    ) -> Result<Self::Resolved, Self::Error> {
        let logging = self.logging.try_resolve()?;
        let http = self.http.resolve();
        let database = self.database.try_resolve()?;
        let seeding = self.seeding.resolve();

        Ok(Configuration {
            configuration_file_path: context.configuration_file_path,
            logging,
            http,
            database,
            seeding,
        })
    }
}


impl Configuration {
    /// Parse and validate configuration from a TOML string.
    ///
    /// `configuration_file_path` is only recorded, not read.
    pub fn from_toml_str<P>(
        configuration_string: &str,
        configuration_file_path: P,
    ) -> Result<Self, ConfigurationLoadingError>
    where
        P: Into<PathBuf>,
    {
        let unresolved_configuration =
            toml::from_str::<UnresolvedConfiguration>(configuration_string)?;

        let resolved_configuration =
            unresolved_configuration.try_resolve_with_context(ConfigurationResolutionContext {
                configuration_file_path: configuration_file_path.into(),
            })?;

        Ok(resolved_configuration)
    }

    /// Load the configuration from a specific file path.
    pub fn load_from_path<P>(configuration_file_path: P) -> Result<Self, ConfigurationLoadingError>
    where
        P: AsRef<Path>,
    {
        let configuration_file_path = configuration_file_path.as_ref();

        let configuration_string = fs::read_to_string(configuration_file_path).map_err(|error| {
            ConfigurationLoadingError::UnableToReadConfigurationFile {
                path: configuration_file_path.to_path_buf(),
                error,
            }
        })?;

        // The file was just read, so this only fails in truly odd situations;
        // the path as given is good enough then.
        let canonical_configuration_file_path = dunce::canonicalize(configuration_file_path)
            .unwrap_or_else(|_| configuration_file_path.to_path_buf());

        Self::from_toml_str(&configuration_string, canonical_configuration_file_path)
    }

    /// Load the configuration from the default path (`./data/configuration.toml`).
    pub fn load_from_default_path() -> Result<Self, ConfigurationLoadingError> {
        Self::load_from_path(get_default_configuration_file_path()?)
    }
}



#[cfg(test)]
mod test {
    use std::time::Duration;

    use super::*;

    const SAMPLE_CONFIGURATION: &str = r#"
[logging]
console_output_level_filter = "info,womanslation=debug"
log_file_output_level_filter = "info"
log_file_output_directory = "./data/logs"

[http]
host = "127.0.0.1"
port = 8088
allowed_cors_origin = "https://example.com"

[database]
host = "localhost"
port = 5432
username = "womanslation"
database_name = "womanslation"
"#;

    #[test]
    fn parses_minimal_configuration_with_defaults() {
        let configuration =
            Configuration::from_toml_str(SAMPLE_CONFIGURATION, "configuration.toml").unwrap();

        assert_eq!(configuration.http.port, 8088);
        assert_eq!(configuration.http.allowed_cors_origin, "https://example.com");
        assert_eq!(configuration.database.password, None);
        assert_eq!(configuration.database.statement_cache_capacity, None);
        assert_eq!(
            configuration.database.connection_retry,
            ConnectionRetryConfiguration {
                initial_backoff: Duration::from_millis(250),
                maximum_backoff: Duration::from_secs(5),
                deadline: Duration::from_secs(30),
            }
        );
        assert!(configuration.seeding.seed_example_phrases_when_empty);
        assert_eq!(
            configuration.configuration_file_path,
            PathBuf::from("configuration.toml")
        );
    }

    #[test]
    fn parses_explicit_retry_and_seeding_tables() {
        let configuration_string = format!(
            "{SAMPLE_CONFIGURATION}
[database.connection_retry]
initial_backoff_milliseconds = 100
maximum_backoff_milliseconds = 1000
deadline_seconds = 5

[seeding]
seed_example_phrases_when_empty = false
"
        );

        let configuration =
            Configuration::from_toml_str(&configuration_string, "configuration.toml").unwrap();

        assert_eq!(
            configuration.database.connection_retry.initial_backoff,
            Duration::from_millis(100)
        );
        assert_eq!(
            configuration.database.connection_retry.deadline,
            Duration::from_secs(5)
        );
        assert!(!configuration.seeding.seed_example_phrases_when_empty);
    }

    #[test]
    fn rejects_invalid_tracing_filter() {
        let configuration_string = SAMPLE_CONFIGURATION.replace(
            "console_output_level_filter = \"info,womanslation=debug\"",
            "console_output_level_filter = \"womanslation=loud\"",
        );

        let error = Configuration::from_toml_str(&configuration_string, "configuration.toml")
            .unwrap_err();

        assert!(matches!(
            error,
            ConfigurationLoadingError::ResolutionError {
                error: ConfigurationResolutionError::LoggingConfigurationError { .. }
            }
        ));
    }

    #[test]
    fn rejects_backoff_larger_than_maximum() {
        let configuration_string = format!(
            "{SAMPLE_CONFIGURATION}
[database.connection_retry]
initial_backoff_milliseconds = 2000
maximum_backoff_milliseconds = 1000
deadline_seconds = 5
"
        );

        let error = Configuration::from_toml_str(&configuration_string, "configuration.toml")
            .unwrap_err();

        assert!(matches!(
            error,
            ConfigurationLoadingError::ResolutionError {
                error: ConfigurationResolutionError::DatabaseConfigurationError { .. }
            }
        ));
    }

    #[test]
    fn missing_file_is_reported_with_its_path() {
        let error = Configuration::load_from_path("./definitely/not/here.toml").unwrap_err();

        assert!(matches!(
            error,
            ConfigurationLoadingError::UnableToReadConfigurationFile { .. }
        ));
    }
}
