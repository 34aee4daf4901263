use std::fmt::{Display, Formatter};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::{debug, info};

use crate::error::{Error, Result};

/// A fully rendered external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub working_directory: Option<PathBuf>,
}

impl Invocation {
    /// Splits a rendered command line into program and arguments.
    ///
    /// Returns `None` for an empty command line.
    #[must_use]
    pub fn from_command_line(
        command_line: Vec<String>,
        working_directory: Option<PathBuf>,
    ) -> Option<Self> {
        let mut parts = command_line.into_iter();
        let program = parts.next()?;

        Some(Self {
            program,
            args: parts.collect(),
            working_directory,
        })
    }

    fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(working_directory) = &self.working_directory {
            command.current_dir(working_directory);
        }
        command
    }
}

impl Display for Invocation {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.program)?;
        for arg in &self.args {
            write!(formatter, " {arg}")?;
        }
        if let Some(working_directory) = &self.working_directory {
            write!(formatter, " (in {})", working_directory.display())?;
        }
        Ok(())
    }
}

/// Everything the provisioning sequence does to the outside world goes through here.
pub trait CommandRunner {
    /// Runs the invocation to completion with inherited stdio.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exits unsuccessfully.
    fn run(&mut self, invocation: &Invocation) -> Result<()>;

    /// Runs the invocation silently and reports whether it succeeded.
    fn probe(&mut self, invocation: &Invocation) -> bool;

    /// Removes a directory tree. A missing directory is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory exists but cannot be removed.
    fn remove_directory(&mut self, path: &Path) -> Result<()>;
}

/// Executes a command, inheriting stdin, stdout and stderr.
///
/// # Errors
///
/// Returns an error if command execution fails or exits with non-zero status.
pub fn execute_command(mut command: Command) -> Result<()> {
    let program = command.get_program().to_string_lossy().to_string();

    let status = command
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|original| Error::Spawn {
            program: program.clone(),
            original,
        })?
        .wait()?;

    if status.success() {
        Ok(())
    } else {
        Err(Error::SubProcessExit { program, status })
    }
}

/// Runs commands for real.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<()> {
        debug!("Running `{invocation}`");
        execute_command(invocation.to_command())
    }

    fn probe(&mut self, invocation: &Invocation) -> bool {
        debug!("Probing `{invocation}`");
        invocation
            .to_command()
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok_and(|status| status.success())
    }

    fn remove_directory(&mut self, path: &Path) -> Result<()> {
        debug!("Removing `{}`", path.display());
        match fs::remove_dir_all(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::io_error(
                "directory".to_string(),
                path.display().to_string(),
                e,
            )),
        }
    }
}

/// Prints what would happen without doing any of it. Probes always succeed.
#[derive(Debug, Default)]
pub struct DryRunRunner {
    pub actions: Vec<String>,
}

impl DryRunRunner {
    fn record(&mut self, action: String) {
        info!("Dry run: {action}");
        println!("  would run: {action}");
        self.actions.push(action);
    }
}

impl CommandRunner for DryRunRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<()> {
        self.record(invocation.to_string());
        Ok(())
    }

    fn probe(&mut self, invocation: &Invocation) -> bool {
        self.record(format!("{invocation} (probe)"));
        true
    }

    fn remove_directory(&mut self, path: &Path) -> Result<()> {
        self.record(format!("remove {}", path.display()));
        Ok(())
    }
}
