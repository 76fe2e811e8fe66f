//! Add command implementation.
//!
//! The `scaffoldor add <slug> <url>` command files a template under the
//! author's bucket in the local registry, replacing any record with the same
//! slug.

use crate::cli::args::AddArgs;
use crate::error::{Result, ScaffoldorError};
use crate::registry::{split_list, TemplateDraft, UpsertAction};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The add command implementation.
pub struct AddCommand<'a> {
    context: &'a CommandContext,
    args: AddArgs,
}

impl<'a> AddCommand<'a> {
    /// Create a new add command.
    pub fn new(context: &'a CommandContext, args: AddArgs) -> Self {
        Self { context, args }
    }

    fn draft(&self) -> TemplateDraft {
        let args = &self.args;
        TemplateDraft {
            slug: args.slug.clone(),
            url: args.url.clone(),
            template_type: Some(args.template_type.clone()),
            framework: Some(args.framework.clone()),
            description: args.description.clone(),
            tags: args.tags.as_deref().map(split_list).unwrap_or_default(),
            features: args.features.as_deref().map(split_list).unwrap_or_default(),
            author_handle: args.author.clone(),
        }
    }
}

impl Command for AddCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let built = self.draft().build();
        for warning in &built.warnings {
            ui.warning(warning);
        }

        let reference = format!("{}/{}", built.template.bucket_key(), built.template.slug);

        match self.context.writer().upsert(built.template) {
            Ok(action) => {
                ui.success(&format!("Template @{} added to local registry.", reference));
                if action == UpsertAction::Replaced {
                    ui.show_hint("Replaced the existing record with the same slug");
                }
                ui.show_hint(&format!("Scaffold it with: scaffoldor {}", reference));
                Ok(CommandResult::success())
            }
            Err(ScaffoldorError::Validation(errors)) => {
                ui.error("Invalid template metadata:");
                for issue in errors.issues() {
                    ui.error(&format!("  - {}", issue));
                }
                Ok(CommandResult::failure(1))
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::registry::{Framework, LocalCache, Offline, TemplateType};
    use crate::ui::MockUI;
    use tempfile::TempDir;

    fn context(temp: &TempDir) -> CommandContext {
        CommandContext::new(
            Settings::default(),
            LocalCache::new(temp.path().join("registry.json")),
            Box::new(Offline),
        )
    }

    fn args(slug: &str) -> AddArgs {
        AddArgs {
            slug: slug.to_string(),
            url: format!("https://github.com/alice/{slug}"),
            template_type: "backend".to_string(),
            framework: "express".to_string(),
            description: Some("REST API".to_string()),
            tags: Some("rest, , api".to_string()),
            features: None,
            author: Some("@alice".to_string()),
        }
    }

    #[test]
    fn adds_under_author_bucket() {
        let temp = TempDir::new().unwrap();
        let context = context(&temp);
        let mut ui = MockUI::new();

        let result = AddCommand::new(&context, args("my-api")).execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_success("Template @alice/my-api added to local registry."));
        let registry = context.cache.read().unwrap();
        let bucket = registry.bucket("alice").unwrap();
        assert_eq!(bucket[0].name, "My Api");
        assert_eq!(bucket[0].template_type, TemplateType::Backend);
        assert_eq!(bucket[0].framework, Framework::Express);
        assert_eq!(bucket[0].tags, vec!["rest", "api"]);
    }

    #[test]
    fn unknown_type_downgrades_with_warning() {
        let temp = TempDir::new().unwrap();
        let context = context(&temp);
        let mut add_args = args("desk");
        add_args.template_type = "desktop".to_string();
        let mut ui = MockUI::new();

        AddCommand::new(&context, add_args).execute(&mut ui).unwrap();

        assert!(ui.has_warning("Invalid type \"desktop\". Using \"other\"."));
        let registry = context.cache.read().unwrap();
        assert_eq!(registry.bucket("alice").unwrap()[0].template_type, TemplateType::Other);
    }

    #[test]
    fn re_adding_replaces_in_place() {
        let temp = TempDir::new().unwrap();
        let context = context(&temp);
        AddCommand::new(&context, args("one")).execute(&mut MockUI::new()).unwrap();
        AddCommand::new(&context, args("two")).execute(&mut MockUI::new()).unwrap();
        let mut changed = args("one");
        changed.description = Some("Updated".to_string());
        let mut ui = MockUI::new();

        AddCommand::new(&context, changed).execute(&mut ui).unwrap();

        assert!(ui.has_hint("Replaced"));
        let registry = context.cache.read().unwrap();
        let bucket = registry.bucket("alice").unwrap();
        assert_eq!(bucket.len(), 2);
        assert_eq!(bucket[0].slug, "one");
        assert_eq!(bucket[0].description.as_deref(), Some("Updated"));
    }

    #[test]
    fn invalid_slug_is_rejected_without_writing() {
        let temp = TempDir::new().unwrap();
        let context = context(&temp);
        let mut ui = MockUI::new();

        let result = AddCommand::new(&context, args("My_App")).execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("slug"));
        assert!(!context.cache.exists());
    }

    #[test]
    fn missing_author_files_under_local() {
        let temp = TempDir::new().unwrap();
        let context = context(&temp);
        let mut add_args = args("solo");
        add_args.author = None;
        let mut ui = MockUI::new();

        AddCommand::new(&context, add_args).execute(&mut ui).unwrap();

        assert!(ui.has_success("@local/solo"));
        assert!(context.cache.read().unwrap().bucket("local").is_some());
    }
}
