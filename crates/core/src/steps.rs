//! The provisioning steps and the state machine they drive.

use std::fmt::{Display, Formatter};

/// One external action of the provisioning sequence, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    Clone,
    Detach,
    Reinitialize,
    PackageManager,
    InstallDependencies,
    OpenEditor,
}

impl StepKind {
    pub const ALL: [StepKind; 6] = [
        StepKind::Clone,
        StepKind::Detach,
        StepKind::Reinitialize,
        StepKind::PackageManager,
        StepKind::InstallDependencies,
        StepKind::OpenEditor,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            StepKind::Clone => "clone",
            StepKind::Detach => "detach",
            StepKind::Reinitialize => "reinitialize",
            StepKind::PackageManager => "package manager",
            StepKind::InstallDependencies => "install dependencies",
            StepKind::OpenEditor => "open editor",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            StepKind::Clone => "Cloning the template repository",
            StepKind::Detach => "Removing the template's git history",
            StepKind::Reinitialize => "Initializing a fresh git repository",
            StepKind::PackageManager => "Checking for the package manager",
            StepKind::InstallDependencies => "Installing dependencies",
            StepKind::OpenEditor => "Opening the project in the editor",
        }
    }

    /// The state reached once this step has succeeded.
    #[must_use]
    pub fn completed_state(self) -> ProvisioningState {
        match self {
            StepKind::Clone => ProvisioningState::Cloned,
            StepKind::Detach => ProvisioningState::Detached,
            StepKind::Reinitialize => ProvisioningState::Reinitialized,
            StepKind::PackageManager => ProvisioningState::PackageManagerReady,
            StepKind::InstallDependencies => ProvisioningState::DependenciesInstalled,
            StepKind::OpenEditor => ProvisioningState::EditorOpened,
        }
    }
}

impl Display for StepKind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisioningState {
    Pending,
    Cloned,
    Detached,
    Reinitialized,
    PackageManagerReady,
    DependenciesInstalled,
    EditorOpened,
    Failed(StepKind),
}

impl ProvisioningState {
    /// The step to attempt from this state; `None` once terminal.
    #[must_use]
    pub fn next_step(self) -> Option<StepKind> {
        match self {
            ProvisioningState::Pending => Some(StepKind::Clone),
            ProvisioningState::Cloned => Some(StepKind::Detach),
            ProvisioningState::Detached => Some(StepKind::Reinitialize),
            ProvisioningState::Reinitialized => Some(StepKind::PackageManager),
            ProvisioningState::PackageManagerReady => Some(StepKind::InstallDependencies),
            ProvisioningState::DependenciesInstalled => Some(StepKind::OpenEditor),
            ProvisioningState::EditorOpened | ProvisioningState::Failed(_) => None,
        }
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        self.next_step().is_none()
    }

    /// Applies the outcome of the next step.
    ///
    /// Terminal states absorb every outcome.
    #[must_use]
    pub fn advance(self, outcome: &StepOutcome) -> ProvisioningState {
        let Some(step) = self.next_step() else {
            return self;
        };

        match outcome {
            StepOutcome::Ok => step.completed_state(),
            StepOutcome::Failed { .. } => ProvisioningState::Failed(step),
        }
    }
}

impl Display for ProvisioningState {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ProvisioningState::Pending => formatter.write_str("pending"),
            ProvisioningState::Cloned => formatter.write_str("cloned"),
            ProvisioningState::Detached => formatter.write_str("detached"),
            ProvisioningState::Reinitialized => formatter.write_str("reinitialized"),
            ProvisioningState::PackageManagerReady => formatter.write_str("package manager ready"),
            ProvisioningState::DependenciesInstalled => formatter.write_str("dependencies installed"),
            ProvisioningState::EditorOpened => formatter.write_str("editor opened"),
            ProvisioningState::Failed(step) => write!(formatter, "failed at {step}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Ok,
    Failed { step: StepKind, message: String },
}

/// One entry of the step log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub step: StepKind,
    pub outcome: StepOutcome,
    /// Extra detail worth showing, such as the package manager having been installed.
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_visits_every_state_in_order() {
        let mut state = ProvisioningState::Pending;
        let mut visited = vec![];

        while let Some(step) = state.next_step() {
            visited.push(step);
            state = state.advance(&StepOutcome::Ok);
        }

        assert_eq!(visited, StepKind::ALL.to_vec());
        assert_eq!(state, ProvisioningState::EditorOpened);
    }

    #[test]
    fn test_failure_is_terminal() {
        let failed = ProvisioningState::Reinitialized.advance(&StepOutcome::Failed {
            step: StepKind::PackageManager,
            message: "nope".to_string(),
        });

        assert_eq!(failed, ProvisioningState::Failed(StepKind::PackageManager));
        assert!(failed.is_terminal());
        assert_eq!(failed.advance(&StepOutcome::Ok), failed);
    }

    #[test]
    fn test_completed_is_terminal() {
        assert!(ProvisioningState::EditorOpened.is_terminal());
        assert!(!ProvisioningState::Pending.is_terminal());
    }
}
