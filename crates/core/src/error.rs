use std::process::ExitStatus;

use leon::{ParseError, RenderError};
use thiserror::Error;

use crate::preconditions::Version;
use crate::steps::StepKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("`{}` exited with non-success code ({}).", .program, .status)]
    SubProcessExit { program: String, status: ExitStatus },

    #[error("Error spawning sub process `{}`: {}", .program, .original)]
    Spawn {
        program: String,
        original: std::io::Error,
    },

    #[error("Error {} {} file at `{}`: {}", .action, .description, .path, .original)]
    Yaml {
        action: String,
        description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("IO error with {} at path `{}`: {}", .description, .path, .original)]
    Io {
        description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("Base folder `{}` exists but is not a directory.", .0)]
    NotADirectory(String),

    #[error("Could not determine the home directory to expand `{}`.", .0)]
    HomeNotFound(String),

    #[error("Path `{}` is not valid UTF-8.", .0)]
    NonUtf8Path(String),

    #[error("Error parsing placeholder string: {}", .0)]
    Parse(#[from] ParseError),

    #[error("Error rendering placeholder template string: {}", .0)]
    Render(#[from] RenderError),

    #[error("No command is configured for the {} step.", .step)]
    EmptyCommand { step: StepKind },

    #[error("Unknown placeholder `{{{}}}` in the {} step command.", .token, .step)]
    UnknownPlaceholder { step: StepKind, token: String },

    #[error("Could not run `{} --version`: {}. Is it installed?", .command, .original)]
    RuntimeNotFound {
        command: String,
        original: std::io::Error,
    },

    #[error("Could not read a version number from `{}`.", .0)]
    UnparsableVersion(String),

    #[error("{} {} is installed, but {} or newer is required.", .command, .found, .required)]
    RuntimeTooOld {
        command: String,
        found: Version,
        required: Version,
    },

    #[error("Editor command `{}` was not found on PATH.", .0)]
    EditorNotFound(String),

    #[error("Provisioning failed at the {} step: {}", .step, .message)]
    Provisioning { step: StepKind, message: String },

    #[error("Misc error: {}", .0)]
    Misc(String),

    #[error("STDIO error: {}", .0)]
    Stdio(#[from] std::io::Error),
}

impl Error {
    pub fn yaml_error(
        action: String,
        description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            description,
            path,
            original,
        }
    }

    pub fn io_error(description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            description,
            path,
            original,
        }
    }
}
