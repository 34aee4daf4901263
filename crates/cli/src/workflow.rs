//! The scaffolding workflow behind the `sprout` binary.
//!
//! Order matters: templates are validated, then the runtime and editor are checked,
//! then the destination is chosen, and only then is the base folder touched.

use log::{debug, info};
use sprout_core::config::{Config, Destination, Locations};
use sprout_core::error::Result;
use sprout_core::execution::CommandRunner;
use sprout_core::naming;
use sprout_core::preconditions;
use sprout_core::provisioning::{ProvisioningReport, ProvisioningSequence};

use crate::cli_args::Args;
use crate::destination_selection::{prompt_for_destination, DestinationChoice};
use crate::narration;

fn check_preconditions(args: &Args, config: &Config) -> Result<()> {
    if args.skip_checks {
        info!("Skipping runtime and editor checks");
        return Ok(());
    }

    preconditions::check_runtime(&config.runtime)?;
    preconditions::check_editor(&config.editor)
}

fn determine_destination(args: &Args, config: &Config) -> Result<Option<Destination>> {
    if let Some(destination) = args.destination {
        return Ok(Some(destination.into()));
    }

    match prompt_for_destination(&config.alternate_folder)? {
        DestinationChoice::Selected(destination) => Ok(Some(destination)),
        DestinationChoice::Quit => Ok(None),
    }
}

/// Runs one scaffolding session with `runner` doing the external work.
///
/// Returns `Ok(None)` when the user quits the destination menu. A failed step is
/// not an error here; it is reported through the returned [`ProvisioningReport`].
///
/// # Errors
///
/// Returns an error for invalid step templates, failed precondition checks, an
/// unresolvable base folder or a failed allocation.
pub fn scaffold<R: CommandRunner>(
    args: &Args,
    config: &Config,
    locations: &Locations,
    runner: &mut R,
) -> Result<Option<ProvisioningReport>> {
    let sequence = ProvisioningSequence::new(config);
    sequence.validate()?;

    check_preconditions(args, config)?;

    let Some(destination) = determine_destination(args, config)? else {
        return Ok(None);
    };

    let base_folder = config.base_folder(destination, locations)?;
    debug!("Base folder: `{}`", base_folder.display());

    let target = naming::allocate(&base_folder, &config.project_prefix)?;
    narration::print_target(&target);

    if args.dry_run {
        println!(
            "Dry run is specified, nothing will be executed ({}).",
            narration::step_overview()
        );
    }

    let report = sequence.run_observed(&target, runner, narration::print_step_event);
    narration::print_summary(&report);

    Ok(Some(report))
}
