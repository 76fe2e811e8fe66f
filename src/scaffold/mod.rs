//! Turning a resolved template into a project directory.
//!
//! The pipeline depends on two capabilities that are injected so it can run
//! without a real git binary or a terminal:
//! - [`GitClient`] for `clone` and `init`
//! - [`PackageManagerChooser`] for the package manager question

pub mod git;
pub mod manifest;
pub mod package_manager;
pub mod pipeline;

pub use git::{GitClient, SystemGit};
pub use manifest::rename_package;
pub use package_manager::{
    detect, options_for, Detected, FixedChooser, PackageManager, PackageManagerChoice,
    PackageManagerChooser, PromptChooser,
};
pub use pipeline::{
    project_name, GitStrategy, ScaffoldOutcome, ScaffoldReport, ScaffoldStep, Scaffolder,
};
