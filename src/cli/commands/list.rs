//! List command implementation.
//!
//! The `scaffoldor list` command lists templates in the local registry, or
//! the merged local and remote registries with `--remote`.

use crate::cli::args::{FilterArgs, ListArgs};
use crate::error::Result;
use crate::registry::{strip_at, SearchFilter, TemplateEntry};
use crate::ui::terminal::current_theme;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};
use super::display::{show_template_json, show_template_list};

/// The list command implementation.
pub struct ListCommand<'a> {
    context: &'a CommandContext,
    args: ListArgs,
}

impl<'a> ListCommand<'a> {
    /// Create a new list command.
    pub fn new(context: &'a CommandContext, args: ListArgs) -> Self {
        Self { context, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ListArgs {
        &self.args
    }

    fn collect(&self) -> Result<Vec<TemplateEntry>> {
        let resolver = self.context.resolver();
        let filter = filter_from(&self.args.filters);

        if self.args.remote {
            return resolver.search(&filter);
        }

        match &self.args.filters.author {
            Some(author) => Ok(resolver
                .author_templates(author)?
                .into_iter()
                .filter(|entry| filter.matches(entry))
                .collect()),
            None => resolver.local_templates(&filter),
        }
    }
}

/// Translate CLI filter flags into a search filter.
pub(super) fn filter_from(args: &FilterArgs) -> SearchFilter {
    SearchFilter {
        template_type: args.template_type,
        framework: args.framework,
        author: args.author.clone(),
        tag: args.tag.clone(),
        query: None,
    }
}

impl Command for ListCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        // JSON goes to stdout, so no spinner line in front of it
        let entries = if self.args.remote && !self.args.filters.json {
            let mut spinner = ui.start_spinner("Fetching remote registry...");
            let entries = self.collect();
            spinner.finish_clear();
            entries?
        } else {
            self.collect()?
        };

        if self.args.filters.json {
            show_template_json(ui, &entries)?;
            return Ok(CommandResult::success());
        }

        if entries.is_empty() {
            match &self.args.filters.author {
                Some(author) => {
                    ui.warning(&format!("No templates found for user '{}'.", strip_at(author)))
                }
                None => ui.warning("No templates found."),
            }
            if !self.args.remote {
                ui.show_hint("Use --remote to search the community registry");
            }
            return Ok(CommandResult::success());
        }

        show_template_list(ui, "Available Templates:", &entries, &current_theme());
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::registry::{
        LocalCache, Offline, Registry, RegistryWriter, RemoteSource, TemplateDraft, TemplateType,
    };
    use crate::ui::MockUI;
    use tempfile::TempDir;

    struct FixedRemote(Registry);

    impl RemoteSource for FixedRemote {
        fn fetch(&self) -> Option<Registry> {
            Some(self.0.clone())
        }
    }

    fn context_with(temp: &TempDir, remote: Box<dyn RemoteSource>) -> CommandContext {
        CommandContext::new(
            Settings::default(),
            LocalCache::new(temp.path().join("registry.json")),
            remote,
        )
    }

    fn add(context: &CommandContext, slug: &str, author: &str, template_type: &str) {
        let mut draft = TemplateDraft::new(slug, format!("https://github.com/{author}/{slug}"));
        draft.author_handle = Some(author.to_string());
        draft.template_type = Some(template_type.to_string());
        RegistryWriter::new(context.cache.clone())
            .upsert(draft.build().template)
            .unwrap();
    }

    fn remote_registry(slug: &str, author: &str) -> Registry {
        let mut registry = Registry::empty();
        let mut draft = TemplateDraft::new(slug, format!("https://github.com/{author}/{slug}"));
        draft.author_handle = Some(author.to_string());
        registry
            .templates
            .insert(author.to_string(), vec![draft.build().template]);
        registry
    }

    #[test]
    fn empty_local_registry_suggests_remote() {
        let temp = TempDir::new().unwrap();
        let context = context_with(&temp, Box::new(Offline));
        let cmd = ListCommand::new(&context, ListArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_warning("No templates found."));
        assert!(ui.has_hint("--remote"));
    }

    #[test]
    fn lists_local_templates_with_total() {
        let temp = TempDir::new().unwrap();
        let context = context_with(&temp, Box::new(Offline));
        add(&context, "api", "alice", "backend");
        add(&context, "web", "bob", "frontend");
        let cmd = ListCommand::new(&context, ListArgs::default());
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        assert!(ui.has_message("@alice/api"));
        assert!(ui.has_message("@bob/web"));
        assert!(ui.has_message("Total: 2 template(s)"));
    }

    #[test]
    fn filters_by_type() {
        let temp = TempDir::new().unwrap();
        let context = context_with(&temp, Box::new(Offline));
        add(&context, "api", "alice", "backend");
        add(&context, "web", "bob", "frontend");
        let mut args = ListArgs::default();
        args.filters.template_type = Some(TemplateType::Frontend);
        let cmd = ListCommand::new(&context, args);
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        assert!(!ui.has_message("@alice/api"));
        assert!(ui.has_message("Total: 1 template(s)"));
    }

    #[test]
    fn unknown_author_reports_handle() {
        let temp = TempDir::new().unwrap();
        let context = context_with(&temp, Box::new(Offline));
        add(&context, "api", "alice", "backend");
        let mut args = ListArgs::default();
        args.filters.author = Some("@carol".to_string());
        let cmd = ListCommand::new(&context, args);
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        assert!(ui.has_warning("No templates found for user 'carol'."));
    }

    #[test]
    fn remote_flag_merges_remote_entries() {
        let temp = TempDir::new().unwrap();
        let context = context_with(&temp, Box::new(FixedRemote(remote_registry("cli-kit", "dave"))));
        add(&context, "api", "alice", "backend");
        let mut args = ListArgs::default();
        args.remote = true;
        let cmd = ListCommand::new(&context, args);
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        assert!(ui.has_message("@alice/api"));
        assert!(ui.has_message("@dave/cli-kit"));
        assert_eq!(ui.spinners().len(), 1);
    }

    #[test]
    fn json_output_lists_records() {
        let temp = TempDir::new().unwrap();
        let context = context_with(&temp, Box::new(Offline));
        add(&context, "api", "alice", "backend");
        let mut args = ListArgs::default();
        args.filters.json = true;
        let cmd = ListCommand::new(&context, args);
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        let value: serde_json::Value = serde_json::from_str(&ui.output_text()).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
        assert_eq!(value[0]["type"], "backend");
    }
}
