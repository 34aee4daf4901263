//! Console narration of the provisioning sequence.

use crossterm::style::Stylize;
use itertools::Itertools;
use sprout_core::naming::ProjectTarget;
use sprout_core::provisioning::{ProvisioningReport, StepEvent};
use sprout_core::steps::{StepKind, StepOutcome, StepRecord};

fn step_number(step: StepKind) -> usize {
    StepKind::ALL
        .iter()
        .position(|candidate| *candidate == step)
        .map_or(0, |index| index + 1)
}

/// The `[n/6]` counter shown in front of each step.
#[must_use]
pub fn step_counter(step: StepKind) -> String {
    format!("[{}/{}]", step_number(step), StepKind::ALL.len())
}

/// One-line overview of the steps, in order.
#[must_use]
pub fn step_overview() -> String {
    StepKind::ALL.iter().map(|step| step.name()).join(" -> ")
}

fn finished_line(record: &StepRecord) -> String {
    match (&record.outcome, &record.note) {
        (StepOutcome::Ok, Some(note)) => format!("done ({note})"),
        (StepOutcome::Ok, None) => "done".to_string(),
        (StepOutcome::Failed { .. }, _) => "failed".to_string(),
    }
}

/// Prints progress for a single step event.
pub fn print_step_event(event: StepEvent<'_>) {
    match event {
        StepEvent::Started(step) => {
            println!("{} {}...", step_counter(step).dark_blue(), step.description());
        }
        StepEvent::Finished(record) => {
            let line = finished_line(record);
            match record.outcome {
                StepOutcome::Ok => println!("      {}", line.dark_green()),
                StepOutcome::Failed { .. } => println!("      {}", line.red()),
            }
        }
    }
}

pub fn print_target(target: &ProjectTarget) {
    println!(
        "Creating `{}` in {}",
        target.candidate_name().bold(),
        target.base_folder().display()
    );
}

pub fn print_summary(report: &ProvisioningReport) {
    if report.is_success() {
        println!(
            "{} Project ready at {}",
            "Success!".dark_green().bold(),
            report.target()
        );
    } else {
        println!(
            "{} Stopped after {} of {} steps; {} was left in place.",
            "Failed.".red().bold(),
            report.log().len(),
            StepKind::ALL.len(),
            report.target()
        );
    }
}
