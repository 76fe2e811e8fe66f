//! Non-interactive UI for CI/headless environments.
//!
//! Menus are answered from `SCAFFOLDOR_PROMPT_<KEY>` environment variables
//! when set, otherwise from the menu's default.

use std::collections::HashMap;

use crate::error::{Result, ScaffoldorError};

use super::{OutputMode, SelectMenu, SpinnerHandle, UserInterface};

/// Prefix of environment variables that answer menus.
pub const PROMPT_ENV_PREFIX: &str = "SCAFFOLDOR_PROMPT_";

/// UI implementation for non-interactive mode.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self {
            mode,
            env_overrides,
        }
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn success(&mut self, msg: &str) {
        println!("✓ {}", msg);
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("⚠ {}", msg);
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn show_hint(&mut self, hint: &str) {
        if self.mode.shows_info() {
            println!("{}", hint);
        }
    }

    fn output(&mut self, text: &str) {
        println!("{}", text);
    }

    fn select(&mut self, menu: &SelectMenu) -> Result<String> {
        let env_key = format!("{}{}", PROMPT_ENV_PREFIX, menu.key.to_uppercase());
        self.env_overrides
            .get(&env_key)
            .or(menu.default.as_ref())
            .cloned()
            .ok_or_else(|| {
                ScaffoldorError::Other(anyhow::anyhow!(
                    "Cannot ask '{}' in non-interactive mode (no default value)",
                    menu.key
                ))
            })
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        println!("{}", message);
        Box::new(StatusLine)
    }

    fn show_header(&mut self, title: &str) {
        println!("\n{}\n", title);
    }
}

/// Spinner stand-in that prints only the final status line.
struct StatusLine;

impl SpinnerHandle for StatusLine {
    fn finish_success(&mut self, msg: &str) {
        println!("✓ {}", msg);
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn finish_clear(&mut self) {}
}
