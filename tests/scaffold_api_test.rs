//! Integration tests for the scaffold pipeline public API.

use scaffoldor::registry::{Template, TemplateDraft};
use scaffoldor::scaffold::{
    detect, FixedChooser, GitClient, GitStrategy, PackageManager, PackageManagerChoice,
    ScaffoldOutcome, ScaffoldStep, Scaffolder, SystemGit,
};
use scaffoldor::ScaffoldorError;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Git double that lays out a small Node project.
struct NodeProjectGit {
    lockfile: &'static str,
    manifest: &'static str,
}

impl GitClient for NodeProjectGit {
    fn clone_repo(&self, _url: &str, dest: &Path) -> scaffoldor::Result<()> {
        fs::create_dir_all(dest.join(".git"))?;
        fs::write(dest.join("package.json"), self.manifest)?;
        fs::write(dest.join(self.lockfile), "")?;
        Ok(())
    }

    fn init(&self, dir: &Path) -> scaffoldor::Result<()> {
        fs::create_dir_all(dir.join(".git").join("refs"))?;
        Ok(())
    }
}

fn template(url: &str) -> Template {
    TemplateDraft::new("starter", url).build().template
}

#[test]
fn fresh_scaffold_switches_package_manager() {
    let temp = TempDir::new().unwrap();
    let dest = temp.path().join("shop");
    let git = NodeProjectGit {
        lockfile: "yarn.lock",
        manifest: "{\n  \"name\": \"starter\",\n  \"private\": true\n}\n",
    };
    let scaffolder = Scaffolder::new(git);
    let mut chooser = FixedChooser(PackageManagerChoice::Use(PackageManager::Npm));

    let report = scaffolder
        .run(&template("https://github.com/acme/starter"), &dest, GitStrategy::Fresh, &mut chooser)
        .into_result()
        .unwrap();

    assert_eq!(report.renamed_to.as_deref(), Some("shop"));
    assert_eq!(report.detected.map(|d| d.manager), Some(PackageManager::Yarn));
    assert_eq!(report.removed_lockfile, Some(dest.join("yarn.lock")));
    assert!(detect(&dest).is_none());
    assert!(dest.join(".git").join("refs").exists());
    assert_eq!(report.completed.last(), Some(&ScaffoldStep::InitHistory));

    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dest.join("package.json")).unwrap()).unwrap();
    assert_eq!(manifest["name"], "shop");
    assert_eq!(manifest["private"], true);
}

#[test]
fn malformed_manifest_is_only_a_warning() {
    let temp = TempDir::new().unwrap();
    let dest = temp.path().join("app");
    let git = NodeProjectGit {
        lockfile: "bun.lockb",
        manifest: "{ broken",
    };
    let scaffolder = Scaffolder::new(git);
    let mut chooser = FixedChooser(PackageManagerChoice::KeepOriginal);

    let outcome = scaffolder.run(
        &template("https://github.com/acme/starter"),
        &dest,
        GitStrategy::Keep,
        &mut chooser,
    );

    assert!(outcome.is_completed());
    let report = outcome.report();
    assert_eq!(report.warnings.len(), 1);
    assert!(report.renamed_to.is_none());
    assert!(dest.join("bun.lockb").exists());
    assert_eq!(fs::read_to_string(dest.join("package.json")).unwrap(), "{ broken");
}

#[test]
fn system_git_failure_aborts_at_clone() {
    let temp = TempDir::new().unwrap();
    let dest = temp.path().join("app");
    let scaffolder = Scaffolder::new(SystemGit::with_program("scaffoldor-no-such-git"));
    let mut chooser = FixedChooser(PackageManagerChoice::KeepOriginal);

    let outcome = scaffolder.run(
        &template("https://github.com/acme/starter"),
        &dest,
        GitStrategy::Fresh,
        &mut chooser,
    );

    match outcome {
        ScaffoldOutcome::Aborted { step, error, report } => {
            assert_eq!(step, ScaffoldStep::Clone);
            assert!(matches!(error, ScaffoldorError::GitFailed { .. }));
            assert_eq!(report.completed, vec![ScaffoldStep::Preflight]);
        }
        other => panic!("expected abort, got {:?}", other),
    }
}

#[test]
fn system_git_clones_local_repository() {
    let git = SystemGit::new();
    if !git.is_available() {
        return;
    }

    let temp = TempDir::new().unwrap();
    let origin = temp.path().join("origin");
    fs::create_dir_all(&origin).unwrap();
    fs::write(origin.join("package.json"), "{\"name\":\"starter\"}").unwrap();
    fs::write(origin.join("pnpm-lock.yaml"), "lockfileVersion: 9\n").unwrap();
    for args in [
        vec!["init", "--quiet"],
        vec!["add", "."],
        vec!["-c", "user.name=Test", "-c", "user.email=test@example.com", "commit", "--quiet", "-m", "init"],
    ] {
        let status = Command::new("git").args(&args).current_dir(&origin).status().unwrap();
        assert!(status.success());
    }

    let dest = temp.path().join("clone");
    let url = format!("file://{}", origin.display());
    let mut chooser = FixedChooser(PackageManagerChoice::KeepOriginal);

    let report = Scaffolder::new(git)
        .run(&template(&url), &dest, GitStrategy::Fresh, &mut chooser)
        .into_result()
        .unwrap();

    assert_eq!(report.detected.map(|d| d.manager), Some(PackageManager::Pnpm));
    assert!(dest.join("pnpm-lock.yaml").exists());
    assert!(dest.join(".git").exists());

    // Fresh history: the new repository has no commits
    let log = Command::new("git")
        .args(["log", "--oneline"])
        .current_dir(&dest)
        .output()
        .unwrap();
    assert!(!log.status.success() || log.stdout.is_empty());
}
