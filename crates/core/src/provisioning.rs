//! The ordered provisioning sequence.
//!
//! A new project goes through clone, detach, reinitialize, package manager,
//! install dependencies and open editor, strictly in that order. The first failing
//! step stops the sequence. Nothing is rolled back: whatever earlier steps left on
//! disk stays there for the operator to inspect.

use std::collections::HashMap;
use std::path::PathBuf;

use log::{debug, error, info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::execution::{CommandRunner, Invocation};
use crate::interpolation::{get_templates, get_tokens, render_command};
use crate::naming::ProjectTarget;
use crate::steps::{ProvisioningState, StepKind, StepOutcome, StepRecord};

/// Placeholders available to step command templates.
pub const PLACEHOLDERS: [&str; 4] = ["repository", "target", "package_manager", "editor"];

const VCS_METADATA_DIRECTORY: &str = ".git";

/// Progress notifications for callers that narrate the sequence.
#[derive(Debug)]
pub enum StepEvent<'a> {
    Started(StepKind),
    Finished(&'a StepRecord),
}

/// The result of a provisioning run: where it ended up and what happened on the way.
#[derive(Debug, Clone)]
pub struct ProvisioningReport {
    target: ProjectTarget,
    state: ProvisioningState,
    log: Vec<StepRecord>,
}

impl ProvisioningReport {
    fn new(target: ProjectTarget) -> Self {
        Self {
            target,
            state: ProvisioningState::Pending,
            log: Vec::new(),
        }
    }

    fn record(&mut self, record: StepRecord) {
        self.state = self.state.advance(&record.outcome);
        self.log.push(record);
    }

    #[must_use]
    pub fn target(&self) -> &ProjectTarget {
        &self.target
    }

    #[must_use]
    pub fn state(&self) -> ProvisioningState {
        self.state
    }

    #[must_use]
    pub fn log(&self) -> &[StepRecord] {
        &self.log
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.state == ProvisioningState::EditorOpened
    }

    /// The failing step and its message, if the sequence stopped early.
    #[must_use]
    pub fn failure(&self) -> Option<(StepKind, &str)> {
        self.log.iter().find_map(|record| match &record.outcome {
            StepOutcome::Failed { step, message } => Some((*step, message.as_str())),
            StepOutcome::Ok => None,
        })
    }

    /// Converts a failed report into [`Error::Provisioning`].
    ///
    /// # Errors
    ///
    /// Returns the failure of the step that stopped the sequence.
    pub fn into_result(self) -> Result<Self> {
        if let Some((step, message)) = self.failure() {
            return Err(Error::Provisioning {
                step,
                message: message.to_string(),
            });
        }
        Ok(self)
    }
}

pub struct ProvisioningSequence<'a> {
    config: &'a Config,
}

impl<'a> ProvisioningSequence<'a> {
    #[must_use]
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    fn command_lines(&self, step: StepKind) -> Vec<&'a [String]> {
        let config: &'a Config = self.config;
        let commands = &config.commands;
        match step {
            StepKind::Clone => vec![commands.clone.as_slice()],
            StepKind::Detach => vec![],
            StepKind::Reinitialize => vec![commands.reinitialize.as_slice()],
            StepKind::PackageManager => vec![
                commands.package_manager_probe.as_slice(),
                commands.package_manager_install.as_slice(),
            ],
            StepKind::InstallDependencies => vec![commands.install_dependencies.as_slice()],
            StepKind::OpenEditor => vec![commands.open_editor.as_slice()],
        }
    }

    /// Checks every configured command line before anything is run.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty command line, a malformed template or a
    /// placeholder outside of [`PLACEHOLDERS`].
    pub fn validate(&self) -> Result<()> {
        for step in StepKind::ALL {
            for command_line in self.command_lines(step) {
                if command_line.is_empty() {
                    return Err(Error::EmptyCommand { step });
                }

                let templates = get_templates(command_line)?;
                let mut unknown: Vec<String> = get_tokens(&templates)
                    .into_iter()
                    .filter(|token| !PLACEHOLDERS.contains(&token.as_str()))
                    .collect();
                unknown.sort();

                if let Some(token) = unknown.into_iter().next() {
                    return Err(Error::UnknownPlaceholder { step, token });
                }
            }
        }

        Ok(())
    }

    /// Runs every step in order, stopping at the first failure.
    pub fn run<R: CommandRunner>(
        &self,
        target: &ProjectTarget,
        runner: &mut R,
    ) -> ProvisioningReport {
        self.run_observed(target, runner, |_| {})
    }

    /// Like [`ProvisioningSequence::run`], calling `observer` before and after each step.
    pub fn run_observed<R, F>(
        &self,
        target: &ProjectTarget,
        runner: &mut R,
        mut observer: F,
    ) -> ProvisioningReport
    where
        R: CommandRunner,
        F: FnMut(StepEvent<'_>),
    {
        let mut report = ProvisioningReport::new(target.clone());

        while let Some(step) = report.state().next_step() {
            info!("{} ({})", step.description(), target);
            observer(StepEvent::Started(step));

            let outcome = self
                .context(target)
                .and_then(|context| self.perform(step, target, &context, runner));
            let record = match outcome {
                Ok(note) => StepRecord {
                    step,
                    outcome: StepOutcome::Ok,
                    note,
                },
                Err(e) => {
                    error!("The {step} step failed: {e}");
                    StepRecord {
                        step,
                        outcome: StepOutcome::Failed {
                            step,
                            message: e.to_string(),
                        },
                        note: None,
                    }
                }
            };

            report.record(record);
            if let Some(last) = report.log().last() {
                observer(StepEvent::Finished(last));
            }
            debug!("Provisioning state is now `{}`", report.state());
        }

        report
    }

    /// Values for the command placeholders. The target path goes into command lines
    /// verbatim, so it has to be valid UTF-8.
    fn context(&self, target: &ProjectTarget) -> Result<HashMap<String, String>> {
        let full_path = target.full_path();
        let Some(full_path) = full_path.to_str() else {
            return Err(Error::NonUtf8Path(full_path.display().to_string()));
        };

        Ok(HashMap::from([
            (
                "repository".to_string(),
                self.config.template_repository.clone(),
            ),
            ("target".to_string(), full_path.to_string()),
            (
                "package_manager".to_string(),
                self.config.package_manager.clone(),
            ),
            ("editor".to_string(), self.config.editor.clone()),
        ]))
    }

    fn invocation(
        step: StepKind,
        command_line: &[String],
        context: &HashMap<String, String>,
        working_directory: Option<PathBuf>,
    ) -> Result<Invocation> {
        let rendered = render_command(context, command_line)?;
        Invocation::from_command_line(rendered, working_directory)
            .ok_or(Error::EmptyCommand { step })
    }

    fn perform<R: CommandRunner>(
        &self,
        step: StepKind,
        target: &ProjectTarget,
        context: &HashMap<String, String>,
        runner: &mut R,
    ) -> Result<Option<String>> {
        let commands = &self.config.commands;
        let project_directory = Some(target.full_path().to_path_buf());

        match step {
            StepKind::Clone => {
                runner.run(&Self::invocation(step, &commands.clone, context, None)?)?;
            }
            StepKind::Detach => {
                runner.remove_directory(&target.full_path().join(VCS_METADATA_DIRECTORY))?;
            }
            StepKind::Reinitialize => {
                runner.run(&Self::invocation(
                    step,
                    &commands.reinitialize,
                    context,
                    project_directory,
                )?)?;
            }
            StepKind::PackageManager => {
                let probe =
                    Self::invocation(step, &commands.package_manager_probe, context, None)?;
                if runner.probe(&probe) {
                    debug!("`{probe}` succeeded");
                    return Ok(None);
                }

                warn!(
                    "`{}` is not available, installing it",
                    self.config.package_manager
                );
                runner.run(&Self::invocation(
                    step,
                    &commands.package_manager_install,
                    context,
                    None,
                )?)?;
                return Ok(Some(format!("installed {}", self.config.package_manager)));
            }
            StepKind::InstallDependencies => {
                runner.run(&Self::invocation(
                    step,
                    &commands.install_dependencies,
                    context,
                    project_directory,
                )?)?;
            }
            StepKind::OpenEditor => {
                runner.run(&Self::invocation(
                    step,
                    &commands.open_editor,
                    context,
                    project_directory,
                )?)?;
            }
        }

        Ok(None)
    }
}
