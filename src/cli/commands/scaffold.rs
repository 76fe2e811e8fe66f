//! Scaffold command implementation.
//!
//! `scaffoldor <template> [dest]` resolves the template reference, asks how
//! to handle git history and which package manager to use, then runs the
//! scaffold pipeline into the destination.

use std::path::{Path, PathBuf};

use crate::cli::args::ScaffoldArgs;
use crate::error::{Result, ScaffoldorError};
use crate::registry::{RemoteSource, Resolver, SlugRef, TemplateEntry};
use crate::scaffold::{
    FixedChooser, GitClient, GitStrategy, PackageManager, PackageManagerChoice, PromptChooser,
    ScaffoldOutcome, ScaffoldReport, ScaffoldStep, Scaffolder,
};
use crate::ui::terminal::current_theme;
use crate::ui::{SelectMenu, UserInterface};

use super::dispatcher::{Command, CommandContext, CommandResult, EXIT_USAGE};

/// The scaffold command implementation.
pub struct ScaffoldCommand<'a, G: GitClient> {
    context: &'a CommandContext,
    args: ScaffoldArgs,
    git: G,
}

impl<'a, G: GitClient> ScaffoldCommand<'a, G> {
    /// Create a new scaffold command.
    pub fn new(context: &'a CommandContext, args: ScaffoldArgs, git: G) -> Self {
        Self { context, args, git }
    }

    /// Resolve a reference to a template that can be scaffolded.
    fn resolve(&self, reference: &str) -> Result<TemplateEntry> {
        let entry = self
            .context
            .resolver()
            .find_by_slug(reference)?
            .ok_or_else(|| ScaffoldorError::TemplateNotFound {
                reference: reference.to_string(),
            })?;

        if entry.template.is_premium() {
            return Err(ScaffoldorError::PremiumTemplate {
                reference: entry.reference(),
                purchase_url: entry
                    .template
                    .pricing
                    .as_ref()
                    .and_then(|p| p.purchase_url.clone()),
            });
        }

        Ok(entry)
    }

    fn git_strategy(&self, ui: &mut dyn UserInterface) -> Result<GitStrategy> {
        if let Some(strategy) = self.args.git {
            return Ok(strategy);
        }

        let default = self.context.settings.git_strategy;
        if self.args.yes {
            return Ok(default);
        }

        let menu = SelectMenu::new(
            "git_strategy",
            "How do you want to handle git history?",
            GitStrategy::ALL
                .iter()
                .map(|strategy| (strategy.description(), strategy.as_str())),
        )
        .with_default(default.as_str());

        ui.select(&menu)?
            .parse()
            .map_err(|e: String| ScaffoldorError::Other(anyhow::anyhow!(e)))
    }

    /// Package manager answer that needs no prompt, if any.
    fn fixed_choice(&self) -> Option<PackageManagerChoice> {
        match self.args.package_manager {
            Some(choice) => Some(choice),
            // Keeping the original is the same as accepting the detected manager
            None if self.args.yes => Some(PackageManagerChoice::KeepOriginal),
            None => None,
        }
    }
}

impl<G: GitClient> Command for ScaffoldCommand<'_, G> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(reference) = self.args.template.as_deref() else {
            ui.error("No template specified.");
            ui.show_hint("Usage: scaffoldor <template> [dest]. Run 'scaffoldor list' to see templates.");
            return Ok(CommandResult::failure(EXIT_USAGE));
        };

        let mut spinner = ui.start_spinner(&format!("Looking up {}...", reference));
        let resolved = self.resolve(reference);
        spinner.finish_clear();

        let entry = match resolved {
            Ok(entry) => entry,
            Err(ScaffoldorError::TemplateNotFound { reference }) => {
                report_not_found(ui, &self.context.resolver(), &reference)?;
                return Ok(CommandResult::failure(EXIT_USAGE));
            }
            Err(ScaffoldorError::PremiumTemplate {
                reference,
                purchase_url,
            }) => {
                ui.warning(&format!("@{} is a premium template!", reference));
                ui.message("Premium templates are coming soon.");
                if let Some(url) = purchase_url {
                    ui.message(&format!("Learn more: {}", url));
                }
                return Ok(CommandResult::success());
            }
            Err(e) => return Err(e),
        };

        let template = &entry.template;
        let theme = current_theme();
        ui.message(&format!(
            "Scaffolding {}",
            theme.reference.apply_to(format!("@{}", entry.reference()))
        ));
        ui.message(&format!("  Name: {}", template.name));
        ui.message(&format!("  Type: {}", template.template_type));
        ui.message(&format!("  Framework: {}", template.framework));

        let dest = self
            .args
            .dest
            .clone()
            .unwrap_or_else(|| PathBuf::from(&template.slug));
        if dest.exists() {
            ui.error(&ScaffoldorError::DestinationExists { path: dest }.to_string());
            return Ok(CommandResult::failure(1));
        }
        let strategy = self.git_strategy(ui)?;

        ui.message(&format!("Cloning {}...", template.url));
        let scaffolder = Scaffolder::new(&self.git);
        let outcome = match self.fixed_choice() {
            Some(choice) => scaffolder.run(template, &dest, strategy, &mut FixedChooser(choice)),
            None => scaffolder.run(template, &dest, strategy, &mut PromptChooser::new(ui)),
        };

        match outcome {
            ScaffoldOutcome::Completed(report) => {
                show_success(ui, &entry, &report);
                Ok(CommandResult::success())
            }
            ScaffoldOutcome::Aborted {
                step,
                error,
                report,
            } => {
                for warning in &report.warnings {
                    ui.warning(warning);
                }
                ui.error(&format!("Scaffold failed during {}: {}", step, error));
                if report.completed.contains(&ScaffoldStep::Clone) {
                    ui.show_hint(&format!(
                        "Partially scaffolded files were left in {}",
                        dest.display()
                    ));
                }
                Ok(CommandResult::failure(1))
            }
        }
    }
}

/// Explain why a reference did not resolve.
fn report_not_found(
    ui: &mut dyn UserInterface,
    resolver: &Resolver<&dyn RemoteSource>,
    reference: &str,
) -> Result<()> {
    let slug_ref = SlugRef::parse(reference);

    match slug_ref.author() {
        Some(author) if resolver.author_exists(author)? => {
            ui.error(&format!(
                "Template '{}' not found for user @{}.",
                slug_ref.slug(),
                author
            ));
            ui.message(&format!("Available templates from @{}:", author));
            for entry in resolver.author_templates(author)? {
                ui.message(&format!("  - {}", entry.template.slug));
            }
        }
        Some(author) => ui.error(&format!("User @{} not found in registry.", author)),
        None => ui.error(&format!("Template '{}' not found.", reference)),
    }

    ui.show_hint("Use 'scaffoldor sync' to update your registry or 'scaffoldor search' to find templates");
    Ok(())
}

/// Package manager to suggest in the next steps.
fn install_manager(report: &ScaffoldReport) -> Option<PackageManager> {
    match report.chosen {
        Some(PackageManagerChoice::Use(pm)) => Some(pm),
        _ => report
            .detected
            .map(|d| d.manager)
            .or_else(|| report.renamed_to.as_ref().map(|_| PackageManager::Npm)),
    }
}

fn show_success(ui: &mut dyn UserInterface, entry: &TemplateEntry, report: &ScaffoldReport) {
    for warning in &report.warnings {
        ui.warning(warning);
    }

    if ui.output_mode().shows_detail() {
        for step in &report.completed {
            ui.message(&format!("  done: {}", step));
        }
        if let Some(lockfile) = &report.removed_lockfile {
            ui.message(&format!("  removed {}", lockfile.display()));
        }
    }

    ui.success(&format!(
        "Successfully scaffolded @{} into {}",
        entry.reference(),
        report.destination.display()
    ));

    ui.message("");
    ui.message("Next steps:");
    ui.message(&format!("  cd {}", display_dest(&report.destination)));
    if let Some(pm) = install_manager(report) {
        ui.message(&format!("  {}", pm.install_command()));
    }
    ui.message("");
    ui.show_hint(&format!(
        "If you like this template, give it a star: {}",
        entry.template.url
    ));
}

fn display_dest(dest: &Path) -> String {
    let shown = dest.display().to_string();
    if shown.contains(' ') {
        format!("\"{}\"", shown)
    } else {
        shown
    }
}
