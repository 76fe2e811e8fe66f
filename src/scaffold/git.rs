//! External Git client used by the scaffold pipeline.

use std::path::Path;
use std::process::Command;

use crate::error::{Result, ScaffoldorError};

/// Git operations the scaffold pipeline depends on.
pub trait GitClient {
    /// Clone `url` into `dest` (which must not exist yet).
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<()>;

    /// Initialize an empty repository in `dir`.
    fn init(&self, dir: &Path) -> Result<()>;
}

impl<T: GitClient + ?Sized> GitClient for &T {
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<()> {
        (**self).clone_repo(url, dest)
    }

    fn init(&self, dir: &Path) -> Result<()> {
        (**self).init(dir)
    }
}

/// Runs the `git` binary on `PATH`.
#[derive(Debug, Clone)]
pub struct SystemGit {
    program: String,
}

impl Default for SystemGit {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemGit {
    /// Use `git` from `PATH`.
    pub fn new() -> Self {
        Self::with_program("git")
    }

    /// Use a specific git executable.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Check whether the git executable can be run.
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn run(&self, args: &[&str], cwd: Option<&Path>) -> Result<()> {
        let display = format!("git {}", args.first().copied().unwrap_or_default());
        tracing::debug!("Running git {:?}", args);

        let mut command = Command::new(&self.program);
        command.args(args);
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }

        let output = command.output().map_err(|e| ScaffoldorError::GitFailed {
            command: display.clone(),
            message: e.to_string(),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ScaffoldorError::GitFailed {
                command: display,
                message: stderr.trim().to_string(),
            });
        }

        Ok(())
    }
}

impl GitClient for SystemGit {
    fn clone_repo(&self, url: &str, dest: &Path) -> Result<()> {
        let dest = dest.to_string_lossy();
        self.run(&["clone", "--quiet", url, &dest], None)
    }

    fn init(&self, dir: &Path) -> Result<()> {
        self.run(&["init", "--quiet"], Some(dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_runs_git_from_path() {
        assert_eq!(SystemGit::default().program, SystemGit::new().program);
        assert_eq!(SystemGit::default().program, "git");
    }

    #[test]
    fn missing_binary_is_git_failure() {
        let git = SystemGit::with_program("scaffoldor-no-such-git-binary");
        let temp = TempDir::new().unwrap();

        let err = git.init(temp.path()).unwrap_err();

        match err {
            ScaffoldorError::GitFailed { command, .. } => assert_eq!(command, "git init"),
            other => panic!("expected GitFailed, got {:?}", other),
        }
        assert!(!git.is_available());
    }

    #[test]
    fn clone_of_missing_repository_carries_stderr() {
        let git = SystemGit::new();
        if !git.is_available() {
            return;
        }
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("does-not-exist");

        let err = git
            .clone_repo(&source.to_string_lossy(), &temp.path().join("dest"))
            .unwrap_err();

        match err {
            ScaffoldorError::GitFailed { command, message } => {
                assert_eq!(command, "git clone");
                assert!(!message.is_empty());
            }
            other => panic!("expected GitFailed, got {:?}", other),
        }
    }

    #[test]
    fn init_creates_repository() {
        let git = SystemGit::new();
        if !git.is_available() {
            return;
        }
        let temp = TempDir::new().unwrap();

        git.init(temp.path()).unwrap();

        assert!(temp.path().join(".git").is_dir());
    }
}
