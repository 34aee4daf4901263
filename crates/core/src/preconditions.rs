//! Checks that run before any side effect: host runtime version and editor presence.

use std::fmt::{Display, Formatter};
use std::process::{Command, Stdio};
use std::str::FromStr;

use log::{debug, info};

use crate::config::RuntimeConfig;
use crate::error::{Error, Result};

/// A `major.minor.patch` version number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Display for Version {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = Error;

    /// Parses the first version-looking word, so `v20.11.1` and `node 18` both work.
    /// Missing minor or patch components are treated as zero.
    fn from_str(text: &str) -> Result<Self> {
        let unparsable = || Error::UnparsableVersion(text.trim().to_string());

        let word = text
            .split_whitespace()
            .map(|word| word.trim_start_matches(['v', 'V']))
            .find(|word| word.starts_with(|c: char| c.is_ascii_digit()))
            .ok_or_else(unparsable)?;

        let mut components = word.split('.').map(|component| {
            // Drop pre-release and build suffixes such as `0-rc.1`
            let digits: String = component
                .chars()
                .take_while(char::is_ascii_digit)
                .collect();
            digits.parse::<u64>()
        });

        let major = components
            .next()
            .ok_or_else(unparsable)?
            .map_err(|_| unparsable())?;
        let minor = components.next().transpose().map_err(|_| unparsable())?;
        let patch = components.next().transpose().map_err(|_| unparsable())?;

        Ok(Self {
            major,
            minor: minor.unwrap_or(0),
            patch: patch.unwrap_or(0),
        })
    }
}

/// Fails unless the version reported by `found_output` is at least `required`.
///
/// # Errors
///
/// Returns [`Error::UnparsableVersion`] or [`Error::RuntimeTooOld`].
pub fn check_version(command: &str, found_output: &str, required: &str) -> Result<Version> {
    let required: Version = required.parse()?;
    let found: Version = found_output.parse()?;

    if found < required {
        return Err(Error::RuntimeTooOld {
            command: command.to_string(),
            found,
            required,
        });
    }

    Ok(found)
}

/// Runs `{runtime} --version` and compares the result with the configured minimum.
///
/// # Errors
///
/// Returns [`Error::RuntimeNotFound`] if the runtime cannot be started, and the
/// errors of [`check_version`] otherwise.
pub fn check_runtime(runtime: &RuntimeConfig) -> Result<Version> {
    let output = Command::new(&runtime.command)
        .arg("--version")
        .stdin(Stdio::null())
        .output()
        .map_err(|original| Error::RuntimeNotFound {
            command: runtime.command.clone(),
            original,
        })?;

    let reported = String::from_utf8_lossy(&output.stdout);
    debug!("`{} --version` reported `{}`", runtime.command, reported.trim());

    let found = check_version(&runtime.command, &reported, &runtime.minimum_version)?;
    info!("Using {} {found}", runtime.command);
    Ok(found)
}

/// Fails unless the editor launcher can be found on `PATH`.
///
/// # Errors
///
/// Returns [`Error::EditorNotFound`].
pub fn check_editor(editor: &str) -> Result<()> {
    match which::which(editor) {
        Ok(path) => {
            debug!("Editor `{editor}` found at `{}`", path.display());
            Ok(())
        }
        Err(_) => Err(Error::EditorNotFound(editor.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(major: u64, minor: u64, patch: u64) -> Version {
        Version {
            major,
            minor,
            patch,
        }
    }

    #[test]
    fn test_parse_node_style_version() {
        assert_eq!("v18.17.1\n".parse::<Version>().unwrap(), version(18, 17, 1));
    }

    #[test]
    fn test_parse_partial_and_prefixed_versions() {
        assert_eq!("20".parse::<Version>().unwrap(), version(20, 0, 0));
        assert_eq!("node 21.4".parse::<Version>().unwrap(), version(21, 4, 0));
        assert_eq!("22.0.0-rc.1".parse::<Version>().unwrap(), version(22, 0, 0));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(
            "not a version".parse::<Version>(),
            Err(Error::UnparsableVersion(_))
        ));
        assert!("".parse::<Version>().is_err());
    }

    #[test]
    fn test_ordering() {
        assert!(version(18, 17, 1) > version(18, 0, 0));
        assert!(version(16, 20, 0) < version(18, 0, 0));
        assert!(version(18, 0, 1) > version(18, 0, 0));
    }

    #[test]
    fn test_check_version_accepts_newer() {
        let found = check_version("node", "v18.17.1", "18.0.0").unwrap();
        assert_eq!(found, version(18, 17, 1));
        assert!(check_version("node", "v18.0.0", "18.0.0").is_ok());
    }

    #[test]
    fn test_check_version_rejects_older() {
        let result = check_version("node", "v16.20.0", "18.0.0");
        match result {
            Err(Error::RuntimeTooOld {
                found, required, ..
            }) => {
                assert_eq!(found, version(16, 20, 0));
                assert_eq!(required, version(18, 0, 0));
            }
            _ => panic!("Expected RuntimeTooOld"),
        }
    }

    #[test]
    fn test_missing_runtime() {
        let runtime = RuntimeConfig {
            command: "sprout-definitely-not-installed".to_string(),
            minimum_version: "1.0.0".to_string(),
        };
        let result = check_runtime(&runtime);
        assert!(matches!(result, Err(Error::RuntimeNotFound { .. })));
    }

    #[test]
    fn test_missing_editor() {
        let result = check_editor("sprout-definitely-not-an-editor");
        assert!(matches!(result, Err(Error::EditorNotFound(_))));
    }
}
