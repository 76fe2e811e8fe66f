//! Sync command implementation.
//!
//! The `scaffoldor sync` command replaces the local registry with the remote
//! registry document.

use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The sync command implementation.
pub struct SyncCommand<'a> {
    context: &'a CommandContext,
}

impl<'a> SyncCommand<'a> {
    /// Create a new sync command.
    pub fn new(context: &'a CommandContext) -> Self {
        Self { context }
    }
}

impl Command for SyncCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut spinner = ui.start_spinner("Syncing registry...");

        match self.context.writer().sync(self.context.remote.as_ref()) {
            Ok(true) => {
                spinner.finish_success("Registry synced successfully!");
                if ui.output_mode().shows_detail() {
                    ui.message(&format!(
                        "Saved to {}",
                        self.context.cache.path().display()
                    ));
                }
                Ok(CommandResult::success())
            }
            Ok(false) => {
                spinner.finish_error("Failed to sync registry. Check your internet connection.");
                Ok(CommandResult::failure(1))
            }
            Err(e) => {
                spinner.finish_error("Failed to write local registry");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::registry::{LocalCache, Offline, Registry, RemoteSource, TemplateDraft};
    use crate::ui::MockUI;
    use tempfile::TempDir;

    struct FixedRemote(Registry);

    impl RemoteSource for FixedRemote {
        fn fetch(&self) -> Option<Registry> {
            Some(self.0.clone())
        }
    }

    #[test]
    fn sync_writes_remote_document() {
        let temp = TempDir::new().unwrap();
        let mut remote = Registry::empty();
        let mut draft = TemplateDraft::new("api", "https://github.com/alice/api");
        draft.author_handle = Some("alice".to_string());
        remote
            .templates
            .insert("alice".to_string(), vec![draft.build().template]);
        let context = CommandContext::new(
            Settings::default(),
            LocalCache::new(temp.path().join("registry.json")),
            Box::new(FixedRemote(remote)),
        );
        let mut ui = MockUI::new();

        let result = SyncCommand::new(&context).execute(&mut ui).unwrap();

        assert!(result.success);
        assert_eq!(ui.spinner_results(), vec!["✓ Registry synced successfully!".to_string()]);
        let local = context.cache.read().unwrap();
        assert_eq!(local.template_count(), 1);
        assert!(local.bucket("alice").is_some());
    }

    #[test]
    fn offline_sync_fails_and_keeps_cache() {
        let temp = TempDir::new().unwrap();
        let context = CommandContext::new(
            Settings::default(),
            LocalCache::new(temp.path().join("registry.json")),
            Box::new(Offline),
        );
        let mut ui = MockUI::new();

        let result = SyncCommand::new(&context).execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_spinner_result("Check your internet connection"));
        assert!(!context.cache.exists());
    }
}
