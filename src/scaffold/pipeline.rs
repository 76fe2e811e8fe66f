//! The scaffold pipeline.
//!
//! Steps run strictly in order and any fatal failure stops the pipeline.
//! Nothing is rolled back: a partially populated destination is left on disk
//! for the caller to report. The outcome says which step failed and what had
//! already completed.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::git::GitClient;
use super::manifest::rename_package;
use super::package_manager::{
    detect, options_for, Detected, PackageManagerChoice, PackageManagerChooser,
};
use crate::error::{Result, ScaffoldorError};
use crate::registry::Template;

/// How cloned version-control history is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GitStrategy {
    /// Drop the template's history and start a new, empty repository
    #[default]
    Fresh,
    /// Keep the template's history
    Keep,
    /// Drop the template's history and do not create a repository
    Remove,
}

impl GitStrategy {
    /// Every strategy in menu order.
    pub const ALL: [GitStrategy; 3] = [GitStrategy::Fresh, GitStrategy::Keep, GitStrategy::Remove];

    pub fn as_str(&self) -> &'static str {
        match self {
            GitStrategy::Fresh => "fresh",
            GitStrategy::Keep => "keep",
            GitStrategy::Remove => "remove",
        }
    }

    /// Menu label.
    pub fn description(&self) -> &'static str {
        match self {
            GitStrategy::Fresh => "Fresh start (new empty repository)",
            GitStrategy::Keep => "Keep original git history",
            GitStrategy::Remove => "No git (remove .git entirely)",
        }
    }
}

impl fmt::Display for GitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GitStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        GitStrategy::ALL
            .iter()
            .copied()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| format!("unknown git strategy '{}'", s))
    }
}

/// Pipeline steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaffoldStep {
    Preflight,
    Clone,
    StripHistory,
    RenameManifest,
    DetectPackageManager,
    ReconcilePackageManager,
    InitHistory,
}

impl fmt::Display for ScaffoldStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScaffoldStep::Preflight => "preflight",
            ScaffoldStep::Clone => "clone",
            ScaffoldStep::StripHistory => "strip history",
            ScaffoldStep::RenameManifest => "rename manifest",
            ScaffoldStep::DetectPackageManager => "detect package manager",
            ScaffoldStep::ReconcilePackageManager => "reconcile package manager",
            ScaffoldStep::InitHistory => "init history",
        };
        f.write_str(name)
    }
}

/// What the pipeline did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScaffoldReport {
    pub destination: PathBuf,
    /// Steps that ran to completion, in order.
    pub completed: Vec<ScaffoldStep>,
    /// Best-effort failures that did not stop the pipeline.
    pub warnings: Vec<String>,
    /// Project name written to the manifest, if one was present.
    pub renamed_to: Option<String>,
    pub detected: Option<Detected>,
    pub chosen: Option<PackageManagerChoice>,
    /// Lockfile removed after switching package manager.
    pub removed_lockfile: Option<PathBuf>,
}

impl ScaffoldReport {
    fn warn(&mut self, message: String) {
        tracing::warn!("{}", message);
        self.warnings.push(message);
    }
}

/// Result of running the pipeline.
#[derive(Debug)]
pub enum ScaffoldOutcome {
    Completed(ScaffoldReport),
    Aborted {
        step: ScaffoldStep,
        error: ScaffoldorError,
        report: ScaffoldReport,
    },
}

impl ScaffoldOutcome {
    /// Check if every step ran.
    pub fn is_completed(&self) -> bool {
        matches!(self, ScaffoldOutcome::Completed(_))
    }

    /// The report, whether or not the pipeline completed.
    pub fn report(&self) -> &ScaffoldReport {
        match self {
            ScaffoldOutcome::Completed(report) => report,
            ScaffoldOutcome::Aborted { report, .. } => report,
        }
    }

    /// Convert into a plain result, discarding the partial report on failure.
    pub fn into_result(self) -> Result<ScaffoldReport> {
        match self {
            ScaffoldOutcome::Completed(report) => Ok(report),
            ScaffoldOutcome::Aborted { error, .. } => Err(error),
        }
    }
}

/// Builds a project directory from a template.
pub struct Scaffolder<G: GitClient> {
    git: G,
}

impl<G: GitClient> Scaffolder<G> {
    pub fn new(git: G) -> Self {
        Self { git }
    }

    /// The git client.
    pub fn git(&self) -> &G {
        &self.git
    }

    /// Run the pipeline into `dest`.
    pub fn run(
        &self,
        template: &Template,
        dest: &Path,
        strategy: GitStrategy,
        chooser: &mut dyn PackageManagerChooser,
    ) -> ScaffoldOutcome {
        let mut report = ScaffoldReport {
            destination: dest.to_path_buf(),
            ..ScaffoldReport::default()
        };

        match self.execute(template, dest, strategy, chooser, &mut report) {
            Ok(()) => ScaffoldOutcome::Completed(report),
            Err((step, error)) => {
                tracing::debug!("Scaffold aborted at {}: {}", step, error);
                ScaffoldOutcome::Aborted {
                    step,
                    error,
                    report,
                }
            }
        }
    }

    fn execute(
        &self,
        template: &Template,
        dest: &Path,
        strategy: GitStrategy,
        chooser: &mut dyn PackageManagerChooser,
        report: &mut ScaffoldReport,
    ) -> std::result::Result<(), (ScaffoldStep, ScaffoldorError)> {
        let fail = |step: ScaffoldStep| move |error: ScaffoldorError| (step, error);

        // Preflight: nothing on disk is touched before this passes.
        if dest.exists() {
            return Err((
                ScaffoldStep::Preflight,
                ScaffoldorError::DestinationExists {
                    path: dest.to_path_buf(),
                },
            ));
        }
        report.completed.push(ScaffoldStep::Preflight);

        tracing::debug!("Cloning {} into {}", template.url, dest.display());
        self.git
            .clone_repo(&template.url, dest)
            .map_err(fail(ScaffoldStep::Clone))?;
        report.completed.push(ScaffoldStep::Clone);

        if strategy == GitStrategy::Remove {
            remove_history(dest).map_err(fail(ScaffoldStep::StripHistory))?;
            report.completed.push(ScaffoldStep::StripHistory);
        }

        let project_name = project_name(dest);
        match rename_package(dest, &project_name) {
            Ok(true) => report.renamed_to = Some(project_name),
            Ok(false) => {}
            Err(e) => report.warn(format!("Failed to update package.json name: {:#}", e)),
        }
        report.completed.push(ScaffoldStep::RenameManifest);

        report.detected = detect(dest);
        report.completed.push(ScaffoldStep::DetectPackageManager);

        if let Some(detected) = report.detected {
            let options = options_for(detected.manager);
            let choice = chooser
                .choose(&detected, &options)
                .map_err(fail(ScaffoldStep::ReconcilePackageManager))?;
            report.chosen = Some(choice);

            if choice.switches_from(detected.manager) {
                let lockfile = dest.join(detected.lockfile);
                match fs::remove_file(&lockfile) {
                    Ok(()) => report.removed_lockfile = Some(lockfile),
                    Err(e) => report.warn(format!(
                        "Failed to remove {}: {}",
                        lockfile.display(),
                        e
                    )),
                }
            }
            report.completed.push(ScaffoldStep::ReconcilePackageManager);
        }

        if strategy == GitStrategy::Fresh {
            remove_history(dest).map_err(fail(ScaffoldStep::InitHistory))?;
            self.git
                .init(dest)
                .map_err(fail(ScaffoldStep::InitHistory))?;
            report.completed.push(ScaffoldStep::InitHistory);
        }

        Ok(())
    }
}

/// Base name of the destination, used as the new project name.
pub fn project_name(dest: &Path) -> String {
    dest.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "app".to_string())
}

fn remove_history(dir: &Path) -> Result<()> {
    let git_dir = dir.join(".git");
    if git_dir.exists() {
        fs::remove_dir_all(&git_dir)?;
    }
    Ok(())
}
