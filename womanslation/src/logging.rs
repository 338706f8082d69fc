//! Tracing setup: console output plus a daily-rolling log file.

use std::path::Path;

use thiserror::Error;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{InitError, RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter,
    Layer,
};


#[derive(Debug, Error)]
pub enum TracingInitializationError {
    #[error("unable to set up the rolling log file appender")]
    UnableToCreateLogFileAppender {
        #[from]
        #[source]
        error: InitError,
    },

    #[error("unable to install the global tracing subscriber")]
    UnableToInstallSubscriber {
        #[from]
        #[source]
        error: TryInitError,
    },
}


/// Installs the global tracing subscriber.
///
/// Console events are filtered by `console_level_filter`, while log file events
/// are filtered by `log_file_level_filter` and written to
/// `log_file_output_directory/log_file_name_prefix.YYYY-MM-DD` by a background worker.
///
/// The returned guard flushes the log file when dropped, so it must be held
/// until the very end of `main`.
pub fn initialize_tracing<P>(
    console_level_filter: EnvFilter,
    log_file_level_filter: EnvFilter,
    log_file_output_directory: P,
    log_file_name_prefix: &str,
) -> Result<WorkerGuard, TracingInitializationError>
where
    P: AsRef<Path>,
{
    let rolling_file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(log_file_name_prefix)
        .build(log_file_output_directory.as_ref())?;

    let (non_blocking_file_writer, guard) = tracing_appender::non_blocking(rolling_file_appender);


    let console_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_filter(console_level_filter);

    let log_file_layer = fmt::layer()
        .with_ansi(false)
        .with_writer(non_blocking_file_writer)
        .with_filter(log_file_level_filter);

    tracing_subscriber::registry()
        .with(console_layer)
        .with(log_file_layer)
        .try_init()?;


    Ok(guard)
}
