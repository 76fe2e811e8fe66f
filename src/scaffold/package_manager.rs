//! JavaScript package manager detection and selection.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Result, ScaffoldorError};
use crate::ui::{SelectMenu, UserInterface};

/// Supported package managers, in detection priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManager {
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

impl PackageManager {
    /// Every manager in priority order.
    pub const ALL: [PackageManager; 4] = [
        PackageManager::Npm,
        PackageManager::Pnpm,
        PackageManager::Yarn,
        PackageManager::Bun,
    ];

    /// Command name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
            PackageManager::Bun => "bun",
        }
    }

    /// Command that installs a project's dependencies.
    pub fn install_command(&self) -> String {
        format!("{} install", self.as_str())
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lockfiles in the order they are checked.
const LOCKFILES: &[(&str, PackageManager)] = &[
    ("package-lock.json", PackageManager::Npm),
    ("pnpm-lock.yaml", PackageManager::Pnpm),
    ("yarn.lock", PackageManager::Yarn),
    ("bun.lockb", PackageManager::Bun),
    ("bun.lock", PackageManager::Bun),
];

/// A package manager found at a project root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detected {
    pub manager: PackageManager,
    /// Lockfile that triggered the detection.
    pub lockfile: &'static str,
}

/// Detect the package manager from the lockfiles at `dir`.
pub fn detect(dir: &Path) -> Option<Detected> {
    LOCKFILES
        .iter()
        .find(|(lockfile, _)| dir.join(lockfile).is_file())
        .map(|&(lockfile, manager)| Detected { manager, lockfile })
}

/// What the user wants to do about the detected package manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManagerChoice {
    Use(PackageManager),
    KeepOriginal,
}

impl PackageManagerChoice {
    /// Value used in prompts and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageManagerChoice::Use(pm) => pm.as_str(),
            PackageManagerChoice::KeepOriginal => "keep",
        }
    }

    fn label(&self) -> String {
        match self {
            PackageManagerChoice::Use(pm) => pm.as_str().to_string(),
            PackageManagerChoice::KeepOriginal => "keep original".to_string(),
        }
    }

    /// Check whether this choice switches away from `detected`.
    pub fn switches_from(&self, detected: PackageManager) -> bool {
        matches!(self, PackageManagerChoice::Use(pm) if *pm != detected)
    }
}

impl fmt::Display for PackageManagerChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageManagerChoice {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s == "keep" || s == "keep original" {
            return Ok(PackageManagerChoice::KeepOriginal);
        }
        PackageManager::ALL
            .iter()
            .find(|pm| pm.as_str() == s)
            .map(|pm| PackageManagerChoice::Use(*pm))
            .ok_or_else(|| format!("unknown package manager '{}' (expected npm, pnpm, yarn, bun or keep)", s))
    }
}

/// Options offered for a detected manager: the detected one, the first two
/// others in priority order, then "keep original".
pub fn options_for(detected: PackageManager) -> Vec<PackageManagerChoice> {
    let mut options = vec![PackageManagerChoice::Use(detected)];
    options.extend(
        PackageManager::ALL
            .iter()
            .filter(|pm| **pm != detected)
            .take(2)
            .map(|pm| PackageManagerChoice::Use(*pm)),
    );
    options.push(PackageManagerChoice::KeepOriginal);
    options
}

/// Picks a package manager when one was detected in the template.
pub trait PackageManagerChooser {
    fn choose(
        &mut self,
        detected: &Detected,
        options: &[PackageManagerChoice],
    ) -> Result<PackageManagerChoice>;
}

/// Asks the user through the UI. The default is the detected manager.
pub struct PromptChooser<'a> {
    ui: &'a mut dyn UserInterface,
}

impl<'a> PromptChooser<'a> {
    pub fn new(ui: &'a mut dyn UserInterface) -> Self {
        Self { ui }
    }
}

impl PackageManagerChooser for PromptChooser<'_> {
    fn choose(
        &mut self,
        detected: &Detected,
        options: &[PackageManagerChoice],
    ) -> Result<PackageManagerChoice> {
        let menu = SelectMenu::new(
            "package_manager",
            format!(
                "Detected {} in template. Which package manager do you want to use?",
                detected.manager
            ),
            options.iter().map(|choice| (choice.label(), choice.as_str())),
        )
        .with_default(detected.manager.as_str());

        let answer = self.ui.select(&menu)?;
        answer
            .parse()
            .map_err(|e: String| ScaffoldorError::Other(anyhow::anyhow!(e)))
    }
}

/// Always answers with the same choice.
#[derive(Debug, Clone, Copy)]
pub struct FixedChooser(pub PackageManagerChoice);

impl PackageManagerChooser for FixedChooser {
    fn choose(
        &mut self,
        _detected: &Detected,
        _options: &[PackageManagerChoice],
    ) -> Result<PackageManagerChoice> {
        Ok(self.0)
    }
}
