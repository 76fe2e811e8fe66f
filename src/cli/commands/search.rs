//! Search command implementation.
//!
//! The `scaffoldor search <query>` command searches the merged local and
//! remote registries. Local records shadow remote records with the same slug.

use crate::cli::args::SearchArgs;
use crate::error::Result;
use crate::ui::terminal::current_theme;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};
use super::display::{show_template_json, show_template_list};
use super::list::filter_from;

/// The search command implementation.
pub struct SearchCommand<'a> {
    context: &'a CommandContext,
    args: SearchArgs,
}

impl<'a> SearchCommand<'a> {
    /// Create a new search command.
    pub fn new(context: &'a CommandContext, args: SearchArgs) -> Self {
        Self { context, args }
    }
}

impl Command for SearchCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let filter = filter_from(&self.args.filters).with_query(self.args.query.clone());

        if self.args.filters.json {
            let results = self.context.resolver().search(&filter)?;
            show_template_json(ui, &results)?;
            return Ok(CommandResult::success());
        }

        let mut spinner = ui.start_spinner(&format!("Searching for \"{}\"...", self.args.query));
        let results = self.context.resolver().search(&filter);
        spinner.finish_clear();
        let results = results?;

        if results.is_empty() {
            ui.warning(&format!("No templates found matching \"{}\".", self.args.query));
            ui.show_hint("Run 'scaffoldor sync' to refresh your local registry");
            return Ok(CommandResult::success());
        }

        show_template_list(
            ui,
            &format!("Found {} template(s):", results.len()),
            &results,
            &current_theme(),
        );
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::registry::{
        LocalCache, Offline, Registry, RegistryWriter, RemoteSource, TemplateDraft,
    };
    use crate::ui::MockUI;
    use tempfile::TempDir;

    struct FixedRemote(Registry);

    impl RemoteSource for FixedRemote {
        fn fetch(&self) -> Option<Registry> {
            Some(self.0.clone())
        }
    }

    fn draft(slug: &str, author: &str, tags: &str) -> TemplateDraft {
        let mut draft = TemplateDraft::new(slug, format!("https://github.com/{author}/{slug}"));
        draft.author_handle = Some(author.to_string());
        draft.tags = crate::registry::split_list(tags);
        draft
    }

    fn search(context: &CommandContext, query: &str) -> MockUI {
        let args = SearchArgs {
            query: query.to_string(),
            ..SearchArgs::default()
        };
        let mut ui = MockUI::new();
        SearchCommand::new(context, args).execute(&mut ui).unwrap();
        ui
    }

    #[test]
    fn finds_by_tag_text() {
        let temp = TempDir::new().unwrap();
        let context = CommandContext::new(
            Settings::default(),
            LocalCache::new(temp.path().join("registry.json")),
            Box::new(Offline),
        );
        let writer = RegistryWriter::new(context.cache.clone());
        writer.upsert(draft("api", "alice", "rest, postgres").build().template).unwrap();
        writer.upsert(draft("web", "alice", "spa").build().template).unwrap();

        let ui = search(&context, "POSTGRES");

        assert_eq!(ui.headers(), &["Found 1 template(s):"]);
        assert!(ui.has_message("@alice/api"));
        assert!(!ui.has_message("@alice/web"));
        assert_eq!(ui.spinners(), &["Searching for \"POSTGRES\"..."]);
    }

    #[test]
    fn local_shadows_remote_slug() {
        let temp = TempDir::new().unwrap();
        let mut remote = Registry::empty();
        remote
            .templates
            .insert("bob".to_string(), vec![draft("api", "bob", "").build().template]);
        let context = CommandContext::new(
            Settings::default(),
            LocalCache::new(temp.path().join("registry.json")),
            Box::new(FixedRemote(remote)),
        );
        RegistryWriter::new(context.cache.clone())
            .upsert(draft("api", "alice", "").build().template)
            .unwrap();

        let ui = search(&context, "api");

        assert!(ui.has_message("@alice/api"));
        assert!(!ui.has_message("@bob/api"));
    }

    #[test]
    fn no_results_warns() {
        let temp = TempDir::new().unwrap();
        let context = CommandContext::new(
            Settings::default(),
            LocalCache::new(temp.path().join("registry.json")),
            Box::new(Offline),
        );

        let ui = search(&context, "graphql");

        assert!(ui.has_warning("No templates found matching \"graphql\"."));
        assert!(ui.has_hint("scaffoldor sync"));
    }
}
