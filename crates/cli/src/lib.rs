//! Sprout CLI Library
//!
//! This crate provides the command-line interface for sprout. It handles
//! argument parsing, the interactive destination menu, console narration of the
//! provisioning steps and the mapping of failures to exit codes.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`destination_selection`]: Interactive menu for choosing where the project goes
//! - [`narration`]: Step-by-step console output
//! - [`workflow`]: Validation, checks, allocation and provisioning in order
//!
//! # Examples
//!
//! ```bash
//! # Ask where to create the project, then provision it
//! sprout
//!
//! # Create it under the alternate folder without asking
//! sprout --to alternate
//!
//! # Show what would run without running it
//! sprout --to current --dry-run
//! ```

use sprout_core::error::Error;

pub mod cli_args;
pub mod destination_selection;
pub mod narration;
pub mod workflow;

/// Exit code for failures detected before anything was changed on disk.
pub const PRECONDITION_EXIT_CODE: u8 = 1;
/// Exit code when a provisioning step failed part way through.
pub const PROVISIONING_EXIT_CODE: u8 = 2;

/// Maps an error to the process exit code.
#[must_use]
pub fn exit_code_for(error: &Error) -> u8 {
    match error {
        Error::Provisioning { .. } => PROVISIONING_EXIT_CODE,
        _ => PRECONDITION_EXIT_CODE,
    }
}

/// Maps a command line parsing failure to the process exit code.
///
/// `--help` and `--version` also arrive as errors; those exit successfully.
#[must_use]
pub fn exit_code_for_usage(error: &clap::Error) -> u8 {
    if error.use_stderr() {
        PRECONDITION_EXIT_CODE
    } else {
        0
    }
}
