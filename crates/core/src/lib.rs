//! Sprout Core Library
//!
//! This crate provides the core functionality for sprout, a scaffolding tool that
//! creates a new project from a template repository: it picks a free directory
//! name, clones the template, replaces its git history with a fresh repository,
//! makes sure the package manager is installed, installs dependencies and opens
//! the result in an editor.
//!
//! # Key Features
//!
//! - **Name Allocation**: First free `{prefix}_{n}` directory under a base folder
//! - **Provisioning Sequence**: Ordered, fail-fast external steps with a step log
//! - **Preconditions**: Runtime version and editor presence checks
//! - **Configuration**: Optional YAML file with templated step commands
//! - **Error Handling**: One error type for all failure modes
//!
//! # Examples
//!
//! Allocating a directory and provisioning it without touching anything:
//!
//! ```no_run
//! use sprout_core::config::Config;
//! use sprout_core::execution::DryRunRunner;
//! use sprout_core::naming::allocate;
//! use sprout_core::provisioning::ProvisioningSequence;
//!
//! let config = Config::default();
//! let target = allocate(std::path::Path::new("."), &config.project_prefix)?;
//! let report = ProvisioningSequence::new(&config).run(&target, &mut DryRunRunner::default());
//! assert!(report.is_success());
//! # Ok::<(), sprout_core::error::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod execution;
pub mod file_handling;
pub mod interpolation;
pub mod naming;
pub mod preconditions;
pub mod provisioning;
pub mod steps;
