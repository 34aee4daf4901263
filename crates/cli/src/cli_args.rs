//! Command-line argument parsing.
//!
//! This module defines the command-line interface structure using the `clap` crate.

use clap::{Parser, ValueEnum};
use sprout_core::config::Destination;

/// Where to create the project, when given on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DestinationArg {
    /// The current working directory
    Current,
    /// The configured alternate folder (`~/typescript_test` by default)
    Alternate,
}

impl From<DestinationArg> for Destination {
    fn from(value: DestinationArg) -> Self {
        match value {
            DestinationArg::Current => Destination::CurrentDirectory,
            DestinationArg::Alternate => Destination::AlternateFolder,
        }
    }
}

/// Command-line arguments for the sprout CLI tool.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use sprout_cli::cli_args::Args;
///
/// let args = Args::parse_from(["sprout", "--to", "current"]);
/// assert!(args.destination.is_some());
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Path to the sprout config file YAML.
    ///
    /// If not provided, defaults to `~/.sprout/config.yml`, and built-in defaults
    /// are used when that file does not exist.
    #[arg(long, short = 'c')]
    pub config_path: Option<String>,

    /// Create the project here instead of asking.
    #[arg(long = "to", short = 't', value_enum)]
    pub destination: Option<DestinationArg>,

    /// Perform a dry run, which prints every step but does not execute it.
    ///
    /// The base folder is still created so a name can be allocated.
    #[arg(long, short = 'd', action)]
    pub dry_run: bool,

    /// Skip the runtime version and editor checks.
    #[arg(long, short = 's', action)]
    pub skip_checks: bool,
}
