//! Interactive user interface components.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for CI/headless environments
//! - [`MockUI`] for tests
//!
//! # Example
//!
//! ```
//! use scaffoldor::ui::{create_ui, OutputMode};
//!
//! // Use non-interactive mode for testability
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.show_header("Available Templates");
//! ui.success("Registry synced");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod prompts;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use prompts::select_on;
pub use spinner::ProgressSpinner;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, ScaffoldorTheme};

use crate::error::Result;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Display secondary (dimmed) text such as tips and next steps.
    fn show_hint(&mut self, hint: &str);

    /// Write machine-readable output (e.g. JSON). Never suppressed.
    fn output(&mut self, text: &str);

    /// Ask the user to pick one option and return its value.
    fn select(&mut self, menu: &SelectMenu) -> Result<String>;

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Mark the operation as failed.
    fn finish_error(&mut self, msg: &str);

    /// Stop the spinner without a status line.
    fn finish_clear(&mut self);
}

/// A single-choice menu.
#[derive(Debug, Clone)]
pub struct SelectMenu {
    /// Stable key, used to answer the menu from env vars and in tests.
    pub key: String,
    pub question: String,
    pub options: Vec<MenuOption>,
    /// Value preselected when the user just presses enter.
    pub default: Option<String>,
}

/// One entry of a [`SelectMenu`].
#[derive(Debug, Clone)]
pub struct MenuOption {
    pub label: String,
    pub value: String,
}

impl SelectMenu {
    /// Build a menu from `(label, value)` pairs.
    pub fn new<I, L, V>(key: &str, question: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = (L, V)>,
        L: Into<String>,
        V: Into<String>,
    {
        Self {
            key: key.to_string(),
            question: question.into(),
            options: options
                .into_iter()
                .map(|(label, value)| MenuOption {
                    label: label.into(),
                    value: value.into(),
                })
                .collect(),
            default: None,
        }
    }

    /// Preselect the option with this value.
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Index of the default option, or 0 when there is none or it is not listed.
    pub fn default_index(&self) -> usize {
        self.default
            .as_ref()
            .and_then(|d| self.options.iter().position(|o| o.value == *d))
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn git_menu() -> SelectMenu {
        SelectMenu::new(
            "git_strategy",
            "How would you like to handle git?",
            [("Fresh start", "fresh"), ("Keep history", "keep")],
        )
    }

    #[test]
    fn menu_keeps_option_order() {
        let menu = git_menu();
        assert_eq!(menu.options.len(), 2);
        assert_eq!(menu.options[1].value, "keep");
        assert_eq!(menu.options[1].label, "Keep history");
    }

    #[test]
    fn default_index_matches_value() {
        assert_eq!(git_menu().with_default("keep").default_index(), 1);
    }

    #[test]
    fn default_index_falls_back_to_first() {
        assert_eq!(git_menu().with_default("remove").default_index(), 0);
        assert_eq!(git_menu().default_index(), 0);
    }
}
