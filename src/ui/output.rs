//! Output verbosity.

/// Output verbosity mode, from `-v`/`-q`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Also show per-step pipeline detail.
    Verbose,
    #[default]
    Normal,
    /// Drop hints and next-step tips.
    Quiet,
}

impl OutputMode {
    pub fn shows_detail(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Check if this mode shows informational messages and hints.
    pub fn shows_info(&self) -> bool {
        !matches!(self, Self::Quiet)
    }
}
