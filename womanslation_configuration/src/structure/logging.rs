use std::path::PathBuf;

use serde::Deserialize;
use tracing_subscriber::{filter::ParseError, EnvFilter};

use crate::{traits::TryResolve, LoggingConfigurationError};


#[derive(Deserialize, Clone, Debug)]
pub(crate) struct UnresolvedLoggingConfiguration {
    console_output_level_filter: String,

    log_file_output_level_filter: String,

    log_file_output_directory: String,
}


#[derive(Clone, Debug)]
pub struct LoggingConfiguration {
    /// `EnvFilter` directives for console output.
    pub console_output_level_filter: String,

    /// `EnvFilter` directives for the daily log files.
    pub log_file_output_level_filter: String,

    pub log_file_output_directory: PathBuf,
}


impl TryResolve for UnresolvedLoggingConfiguration {
    type Resolved = LoggingConfiguration;
    type Error = LoggingConfigurationError;

    fn try_resolve(self) -> Result<Self::Resolved, Self::Error> {
        if let Err(error) = EnvFilter::try_new(&self.console_output_level_filter) {
            return Err(LoggingConfigurationError::InvalidTracingFilter {
                invalid_filter: self.console_output_level_filter,
                kind: "console_output_level_filter".into(),
                error,
            });
        }

        if let Err(error) = EnvFilter::try_new(&self.log_file_output_level_filter) {
            return Err(LoggingConfigurationError::InvalidTracingFilter {
                invalid_filter: self.log_file_output_level_filter,
                kind: "log_file_output_level_filter".into(),
                error,
            });
        }

        Ok(Self::Resolved {
            console_output_level_filter: self.console_output_level_filter,
            log_file_output_level_filter: self.log_file_output_level_filter,
            log_file_output_directory: PathBuf::from(self.log_file_output_directory),
        })
    }
}


impl LoggingConfiguration {
    pub fn console_output_level_filter(&self) -> Result<EnvFilter, ParseError> {
        EnvFilter::try_new(&self.console_output_level_filter)
    }

    pub fn log_file_output_level_filter(&self) -> Result<EnvFilter, ParseError> {
        EnvFilter::try_new(&self.log_file_output_level_filter)
    }
}
