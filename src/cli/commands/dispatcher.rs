//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandContext`] for the settings, cache and remote every command shares
//! - [`CommandDispatcher`] for routing CLI subcommands

use crate::cli::args::{Cli, Commands};
use crate::config::Settings;
use crate::error::Result;
use crate::registry::{LocalCache, RegistryWriter, RemoteFetcher, RemoteSource, Resolver};
use crate::scaffold::SystemGit;
use crate::ui::UserInterface;

/// Exit code for usage errors and unresolved templates.
pub const EXIT_USAGE: i32 = 2;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Shared state handed to every command.
pub struct CommandContext {
    pub settings: Settings,
    pub cache: LocalCache,
    pub remote: Box<dyn RemoteSource>,
}

impl CommandContext {
    /// Build the context from settings, using the default cache location and
    /// an HTTP fetcher for the configured registry URL.
    pub fn from_settings(settings: Settings) -> Self {
        let remote = RemoteFetcher::with_timeout(settings.registry_url.clone(), settings.timeout());
        Self {
            settings,
            cache: LocalCache::at_default_location(),
            remote: Box::new(remote),
        }
    }

    /// Build a context from explicit parts.
    pub fn new(settings: Settings, cache: LocalCache, remote: Box<dyn RemoteSource>) -> Self {
        Self {
            settings,
            cache,
            remote,
        }
    }

    /// Resolver over the cache and remote source.
    pub fn resolver(&self) -> Resolver<&dyn RemoteSource> {
        Resolver::new(self.cache.clone(), self.remote.as_ref())
    }

    /// Writer over the cache.
    pub fn writer(&self) -> RegistryWriter {
        RegistryWriter::new(self.cache.clone())
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    context: CommandContext,
}

impl CommandDispatcher {
    /// Create a new dispatcher.
    pub fn new(context: CommandContext) -> Self {
        Self { context }
    }

    /// Get the shared command context.
    pub fn context(&self) -> &CommandContext {
        &self.context
    }

    /// Dispatch and execute a command.
    ///
    /// With no subcommand, the positional template reference is scaffolded.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::List(args)) => {
                let cmd = super::list::ListCommand::new(&self.context, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Search(args)) => {
                let cmd = super::search::SearchCommand::new(&self.context, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Sync) => {
                let cmd = super::sync::SyncCommand::new(&self.context);
                cmd.execute(ui)
            }
            Some(Commands::Add(args)) => {
                let cmd = super::add::AddCommand::new(&self.context, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
            None => {
                let cmd = super::scaffold::ScaffoldCommand::new(
                    &self.context,
                    cli.scaffold.clone(),
                    SystemGit::new(),
                );
                cmd.execute(ui)
            }
        }
    }
}
