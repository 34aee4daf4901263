//! Configuration for sprout.
//!
//! The configuration is read from a YAML file (by default `~/.sprout/config.yml`).
//! Every field is optional and falls back to the built-in defaults, so a missing or
//! partial file is fine. Process-wide state such as the current directory and the
//! home directory is never read here; it is passed in through [`Locations`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default path for the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "~/.sprout/config.yml";

const DEFAULT_TEMPLATE_REPOSITORY: &str =
    "https://github.com/sprout-templates/typescript-starter.git";
const DEFAULT_PROJECT_PREFIX: &str = "test";
const DEFAULT_ALTERNATE_FOLDER: &str = "~/typescript_test";
const DEFAULT_PACKAGE_MANAGER: &str = "pnpm";
const DEFAULT_EDITOR: &str = "code";
const DEFAULT_RUNTIME: &str = "node";
const DEFAULT_MINIMUM_RUNTIME_VERSION: &str = "18.0.0";

fn strings(parts: &[&str]) -> Vec<String> {
    parts.iter().map(ToString::to_string).collect()
}

/// Where a new project should be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    CurrentDirectory,
    AlternateFolder,
}

/// The parts of the process environment the scaffolder depends on, captured once.
#[derive(Debug, Clone)]
pub struct Locations {
    pub current_directory: PathBuf,
    pub home: Option<PathBuf>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Interpreter whose version is checked before provisioning.
    pub command: String,
    pub minimum_version: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            command: DEFAULT_RUNTIME.to_string(),
            minimum_version: DEFAULT_MINIMUM_RUNTIME_VERSION.to_string(),
        }
    }
}

/// Command line templates for each external step.
///
/// Arguments may reference `{repository}`, `{target}`, `{package_manager}` and `{editor}`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct StepCommands {
    pub clone: Vec<String>,
    pub reinitialize: Vec<String>,
    pub package_manager_probe: Vec<String>,
    pub package_manager_install: Vec<String>,
    pub install_dependencies: Vec<String>,
    pub open_editor: Vec<String>,
}

impl Default for StepCommands {
    fn default() -> Self {
        Self {
            clone: strings(&["git", "clone", "--depth", "1", "{repository}", "{target}"]),
            reinitialize: strings(&["git", "init"]),
            package_manager_probe: strings(&["{package_manager}", "--version"]),
            package_manager_install: strings(&["npm", "install", "-g", "{package_manager}"]),
            install_dependencies: strings(&["{package_manager}", "install"]),
            open_editor: strings(&["{editor}", "{target}"]),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub template_repository: String,
    pub project_prefix: String,
    pub alternate_folder: String,
    /// Used instead of the detected home directory when expanding `~`.
    pub home_override: Option<String>,
    pub package_manager: String,
    pub editor: String,
    pub runtime: RuntimeConfig,
    pub commands: StepCommands,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            template_repository: DEFAULT_TEMPLATE_REPOSITORY.to_string(),
            project_prefix: DEFAULT_PROJECT_PREFIX.to_string(),
            alternate_folder: DEFAULT_ALTERNATE_FOLDER.to_string(),
            home_override: None,
            package_manager: DEFAULT_PACKAGE_MANAGER.to_string(),
            editor: DEFAULT_EDITOR.to_string(),
            runtime: RuntimeConfig::default(),
            commands: StepCommands::default(),
        }
    }
}

impl Config {
    /// Resolves the folder new projects are created in for the given destination.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HomeNotFound`] if the alternate folder starts with `~` and
    /// neither `home_override` nor `locations.home` is available.
    pub fn base_folder(&self, destination: Destination, locations: &Locations) -> Result<PathBuf> {
        match destination {
            Destination::CurrentDirectory => Ok(locations.current_directory.clone()),
            Destination::AlternateFolder => {
                let home = self
                    .home_override
                    .as_ref()
                    .map(PathBuf::from)
                    .or_else(|| locations.home.clone());
                expand_home(&self.alternate_folder, home.as_deref())
            }
        }
    }
}

/// Expands a leading `~` against an explicit home directory.
///
/// # Errors
///
/// Returns [`Error::HomeNotFound`] if the path needs a home directory and none is given,
/// and [`Error::NonUtf8Path`] if the home directory cannot be spliced into `path`.
pub fn expand_home(path: &str, home: Option<&Path>) -> Result<PathBuf> {
    if path != "~" && !path.starts_with("~/") {
        return Ok(PathBuf::from(path));
    }

    let Some(home) = home else {
        return Err(Error::HomeNotFound(path.to_string()));
    };
    let Some(home) = home.to_str() else {
        return Err(Error::NonUtf8Path(home.display().to_string()));
    };

    let expanded = shellexpand::tilde_with_context(path, || Some(home));
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Resolves the configuration file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// configuration path. Shell expansions like `~` are resolved.
///
/// # Examples
///
/// ```
/// use sprout_core::config::get_config_path;
///
/// let custom_path = get_config_path(&Some("/path/to/config.yml".to_string()));
/// assert_eq!(custom_path, "/path/to/config.yml");
/// ```
#[must_use]
pub fn get_config_path(config_path_arg: &Option<String>) -> String {
    let config_path = match config_path_arg {
        Some(config_path) => config_path,
        None => DEFAULT_CONFIG_PATH,
    };

    shellexpand::tilde(config_path).to_string()
}
