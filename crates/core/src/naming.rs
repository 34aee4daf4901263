//! Allocation of unique project directory names.
//!
//! Names have the form `{prefix}_{n}` with `n` counting up from 1; the first
//! candidate with no filesystem entry under the base folder wins. Nothing is
//! reserved between the check and the clone that later creates the directory, so
//! two processes allocating in the same folder at the same time can pick the same
//! name.

use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};

/// The directory a new project will be provisioned into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectTarget {
    base_folder: PathBuf,
    candidate_name: String,
    full_path: PathBuf,
}

impl ProjectTarget {
    #[must_use]
    pub fn base_folder(&self) -> &Path {
        &self.base_folder
    }

    #[must_use]
    pub fn candidate_name(&self) -> &str {
        &self.candidate_name
    }

    #[must_use]
    pub fn full_path(&self) -> &Path {
        &self.full_path
    }
}

impl Display for ProjectTarget {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.full_path.display())
    }
}

/// Finds the first free `{prefix}_{n}` directory under `base_folder`.
///
/// The base folder and any missing parents are created first.
///
/// # Errors
///
/// Returns an error if the base folder cannot be created, exists but is not a
/// directory, or a candidate's existence cannot be determined.
///
/// # Examples
///
/// ```
/// use sprout_core::naming::allocate;
///
/// let dir = tempfile::tempdir()?;
/// std::fs::create_dir(dir.path().join("test_1"))?;
///
/// let target = allocate(dir.path(), "test")?;
/// assert_eq!(target.candidate_name(), "test_2");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn allocate(base_folder: &Path, prefix: &str) -> Result<ProjectTarget> {
    let display_path = base_folder.display().to_string();

    fs::create_dir_all(base_folder)
        .map_err(|e| Error::io_error("base folder".to_string(), display_path.clone(), e))?;

    if !base_folder.is_dir() {
        return Err(Error::NotADirectory(display_path));
    }

    let mut n: u64 = 1;
    loop {
        let candidate_name = format!("{prefix}_{n}");
        let full_path = base_folder.join(&candidate_name);

        // symlink_metadata so that dangling links still count as taken
        match fs::symlink_metadata(&full_path) {
            Ok(_) => {
                debug!("`{}` is taken", full_path.display());
                n += 1;
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Allocated `{}`", full_path.display());
                return Ok(ProjectTarget {
                    base_folder: base_folder.to_path_buf(),
                    candidate_name,
                    full_path,
                });
            }
            Err(e) => {
                return Err(Error::io_error(
                    "project directory".to_string(),
                    full_path.display().to_string(),
                    e,
                ))
            }
        }
    }
}
