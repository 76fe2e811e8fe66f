//! Visual theme and styling.

use console::Style;

/// Scaffoldor's visual theme.
#[derive(Debug, Clone)]
pub struct ScaffoldorTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (yellow).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for headers (cyan).
    pub header: Style,
    /// Style for template references (cyan bold).
    pub reference: Style,
    /// Style for tags (magenta).
    pub tag: Style,
    /// Style for the free tier badge (green).
    pub free: Style,
    /// Style for the premium tier badge (yellow).
    pub premium: Style,
    /// Style for the framework badge (blue).
    pub framework: Style,
}

impl Default for ScaffoldorTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl ScaffoldorTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            header: Style::new().cyan(),
            reference: Style::new().cyan().bold(),
            tag: Style::new().magenta(),
            free: Style::new().green(),
            premium: Style::new().yellow(),
            framework: Style::new().blue(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            header: Style::new(),
            reference: Style::new(),
            tag: Style::new(),
            free: Style::new(),
            premium: Style::new(),
            framework: Style::new(),
        }
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message (icon + text in yellow).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a header.
    pub fn format_header(&self, title: &str) -> String {
        format!("{}", self.header.apply_to(title))
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}
