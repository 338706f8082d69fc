use std::{env::current_dir, path::PathBuf};

use crate::ConfigurationLoadingError;


/// Returns the default configuration file path,
/// which is `{current directory}/data/configuration.toml`.
pub(crate) fn get_default_configuration_file_path() -> Result<PathBuf, ConfigurationLoadingError> {
    let mut configuration_file_path = current_dir()
        .map_err(|error| ConfigurationLoadingError::UnableToDetermineCurrentDirectory { error })?;

    configuration_file_path.push("data");
    configuration_file_path.push("configuration.toml");

    Ok(configuration_file_path)
}
