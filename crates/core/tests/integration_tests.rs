//! Integration tests for sprout-core
//!
//! These tests verify that the core functionality works together correctly
//! by testing complete workflows end-to-end.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use sprout_core::{
    config::{Config, Destination, Locations},
    error::{Error, Result},
    execution::{CommandRunner, DryRunRunner, Invocation},
    file_handling::get_config,
    naming::allocate,
    provisioning::ProvisioningSequence,
    steps::{ProvisioningState, StepKind},
};
use tempfile::NamedTempFile;

/// Stands in for git and the package manager by creating the files they would.
#[derive(Default)]
struct FakeTools {
    invocations: Vec<Invocation>,
    failing_program: Option<(String, String)>,
    package_manager_installed: bool,
}

impl FakeTools {
    fn ran(&self, program: &str, first_arg: &str) -> bool {
        self.invocations.iter().any(|i| {
            i.program == program && i.args.first().map(String::as_str) == Some(first_arg)
        })
    }
}

impl CommandRunner for FakeTools {
    fn run(&mut self, invocation: &Invocation) -> Result<()> {
        self.invocations.push(invocation.clone());

        if let Some((program, message)) = &self.failing_program {
            if invocation.program == *program {
                return Err(Error::Misc(message.clone()));
            }
        }

        let first_arg = invocation.args.first().map(String::as_str);
        match (invocation.program.as_str(), first_arg) {
            ("git", Some("clone")) => {
                let target = PathBuf::from(invocation.args.last().unwrap());
                fs::create_dir_all(target.join(".git")).unwrap();
                fs::write(target.join("package.json"), "{}").unwrap();
            }
            ("git", Some("init")) => {
                let directory = invocation.working_directory.as_ref().unwrap();
                fs::create_dir(directory.join(".git")).unwrap();
                fs::write(directory.join(".git").join("fresh"), "").unwrap();
            }
            ("npm", Some("install")) => self.package_manager_installed = true,
            _ => {}
        }

        Ok(())
    }

    fn probe(&mut self, _invocation: &Invocation) -> bool {
        self.package_manager_installed
    }

    fn remove_directory(&mut self, path: &Path) -> Result<()> {
        fs::remove_dir_all(path).map_err(|e| {
            Error::io_error("directory".to_string(), path.display().to_string(), e)
        })
    }
}

/// Base folder holding test_1 and test_2 gets test_3
#[test]
fn test_allocation_after_existing_projects() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("test_1")).unwrap();
    fs::create_dir(dir.path().join("test_2")).unwrap();

    let target = allocate(dir.path(), "test").unwrap();

    assert!(target.full_path().ends_with("test_3"));
    assert!(!target.full_path().exists());
}

/// Empty base folder gets test_1
#[test]
fn test_allocation_in_empty_folder() {
    let dir = tempfile::tempdir().unwrap();

    let target = allocate(dir.path(), "test").unwrap();

    assert!(target.full_path().ends_with("test_1"));
}

/// The alternate destination resolves under the home override and is created on demand
#[test]
fn test_alternate_destination_workflow() {
    let home = tempfile::tempdir().unwrap();
    let config = Config {
        home_override: Some(home.path().display().to_string()),
        ..Config::default()
    };
    let locations = Locations {
        current_directory: PathBuf::from("/unused"),
        home: None,
    };

    let base = config
        .base_folder(Destination::AlternateFolder, &locations)
        .unwrap();
    assert!(!base.exists());

    let target = allocate(&base, &config.project_prefix).unwrap();

    assert!(base.is_dir());
    assert_eq!(
        target.full_path(),
        home.path().join("typescript_test").join("test_1")
    );
}

/// A successful run leaves a project with only the fresh repository's metadata
#[test]
fn test_complete_provisioning_workflow() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::default();
    let target = allocate(dir.path(), &config.project_prefix).unwrap();
    let mut tools = FakeTools::default();

    let report = ProvisioningSequence::new(&config)
        .run(&target, &mut tools)
        .into_result()
        .unwrap();

    assert_eq!(report.state(), ProvisioningState::EditorOpened);
    assert!(target.full_path().join("package.json").exists());
    assert!(target.full_path().join(".git").join("fresh").exists());

    // Missing package manager was installed before dependencies
    let programs: Vec<&str> = tools
        .invocations
        .iter()
        .map(|i| i.program.as_str())
        .collect();
    assert_eq!(programs, vec!["git", "git", "npm", "pnpm", "code"]);
}

/// Clone failure is reported with the underlying message and nothing else runs
#[test]
fn test_clone_failure_workflow() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::default();
    let target = allocate(dir.path(), &config.project_prefix).unwrap();
    let mut tools = FakeTools {
        failing_program: Some((
            "git".to_string(),
            "fatal: repository not found".to_string(),
        )),
        ..FakeTools::default()
    };

    let report = ProvisioningSequence::new(&config).run(&target, &mut tools);

    assert_eq!(report.state(), ProvisioningState::Failed(StepKind::Clone));
    assert!(!tools.ran("git", "init"));
    assert_eq!(tools.invocations.len(), 1);

    let error = report.into_result().unwrap_err();
    assert!(error.to_string().contains("fatal: repository not found"));
}

/// A failing step leaves earlier work in place
#[test]
fn test_failure_does_not_roll_back() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::default();
    let target = allocate(dir.path(), &config.project_prefix).unwrap();
    let mut tools = FakeTools {
        failing_program: Some(("pnpm".to_string(), "ERR_PNPM_FETCH_404".to_string())),
        package_manager_installed: true,
        ..FakeTools::default()
    };

    let report = ProvisioningSequence::new(&config).run(&target, &mut tools);

    assert_eq!(
        report.state(),
        ProvisioningState::Failed(StepKind::InstallDependencies)
    );
    assert!(target.full_path().join("package.json").exists());
    assert!(!tools.invocations.iter().any(|i| i.program == "code"));
}

/// Dry runs walk every step without touching the filesystem
#[test]
fn test_dry_run_workflow() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::default();
    let target = allocate(dir.path(), &config.project_prefix).unwrap();
    let mut runner = DryRunRunner::default();

    let report = ProvisioningSequence::new(&config).run(&target, &mut runner);

    assert!(report.is_success());
    assert!(!target.full_path().exists());
    assert_eq!(runner.actions.len(), 6);
}

/// Loading a configuration file and running with its custom commands
#[test]
fn test_configuration_file_workflow() {
    let yaml_content = r#"
project_prefix: demo
package_manager: yarn
editor: subl
commands:
  package_manager_install: ["corepack", "enable"]
"#;

    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{yaml_content}").unwrap();
    let config = get_config(temp_file.path().to_str().unwrap(), true).unwrap();

    assert_eq!(config.project_prefix, "demo");
    assert_eq!(config.runtime.command, "node");

    let sequence = ProvisioningSequence::new(&config);
    sequence.validate().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let target = allocate(dir.path(), &config.project_prefix).unwrap();
    assert_eq!(target.candidate_name(), "demo_1");

    let mut runner = DryRunRunner::default();
    let report = sequence.run(&target, &mut runner);

    assert!(report.is_success());
    assert!(runner.actions.iter().any(|a| a == "yarn --version (probe)"));
    assert!(runner
        .actions
        .iter()
        .any(|a| a.starts_with(&format!("subl {}", target.full_path().display()))));
}
