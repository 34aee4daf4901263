//! Reading the sprout configuration file.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;

use crate::config::Config;
use crate::error::{Error, Result};

fn get_reader(description: &str, path: &str) -> Result<File> {
    File::open(path).map_err(|e| Error::io_error(description.to_string(), path.to_string(), e))
}

/// Reads the configuration from disk.
///
/// When `required` is false and no file exists at `config_path`, the built-in
/// defaults are returned instead.
///
/// # Errors
///
/// Returns an error if:
/// - The file is required but missing
/// - The file exists but cannot be read
/// - The file contains invalid YAML or unknown value types
pub fn get_config(config_path: &str, required: bool) -> Result<Config> {
    if !required && !Path::new(config_path).exists() {
        debug!("No config file at `{config_path}`, using defaults");
        return Ok(Config::default());
    }

    let mut contents = String::new();
    get_reader("config file", config_path)?
        .read_to_string(&mut contents)
        .map_err(|e| Error::io_error("config file".to_string(), config_path.to_string(), e))?;

    if contents.trim().is_empty() {
        debug!("Config file at `{config_path}` is empty, using defaults");
        return Ok(Config::default());
    }

    match serde_yaml::from_str(&contents) {
        Ok(config) => Ok(config),
        Err(e) => Err(Error::yaml_error(
            "reading".to_string(),
            "config".to_string(),
            config_path.to_string(),
            e,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_optional_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        let config = get_config(path.to_str().unwrap(), false).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_missing_required_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        let result = get_config(path.to_str().unwrap(), true);
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_empty_config_file_uses_defaults() {
        let temp_file = NamedTempFile::new().unwrap();
        let config = get_config(temp_file.path().to_str().unwrap(), true).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_yaml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "project_prefix: [unclosed").unwrap();
        let result = get_config(temp_file.path().to_str().unwrap(), true);
        assert!(matches!(result, Err(Error::Yaml { .. })));
    }
}
