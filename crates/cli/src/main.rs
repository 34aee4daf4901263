use std::env;
use std::process::ExitCode;

use clap::Parser;
use log::debug;
use sprout_core::config::{self, Config, Locations};
use sprout_core::error::Result;
use sprout_core::execution::{DryRunRunner, SystemRunner};
use sprout_core::file_handling;

use sprout_cli::cli_args::Args;
use sprout_cli::workflow::scaffold;
use sprout_cli::{exit_code_for, exit_code_for_usage};

/// Load the config file; only an explicitly given path has to exist
fn initialize_config(args: &Args) -> Result<Config> {
    let config_path = config::get_config_path(&args.config_path);
    debug!("Config path: `{}`", config_path);

    file_handling::get_config(&config_path, args.config_path.is_some())
}

fn execute(args: &Args) -> Result<()> {
    let config = initialize_config(args)?;
    let locations = Locations {
        current_directory: env::current_dir()?,
        home: dirs::home_dir(),
    };

    let report = if args.dry_run {
        scaffold(args, &config, &locations, &mut DryRunRunner::default())?
    } else {
        scaffold(args, &config, &locations, &mut SystemRunner)?
    };

    match report {
        Some(report) => report.into_result().map(|_| ()),
        None => Ok(()),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(exit_code_for_usage(&e));
        }
    };

    match execute(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(exit_code_for(&e))
        }
    }
}
