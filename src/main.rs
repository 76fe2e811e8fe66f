//! Scaffoldor CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use scaffoldor::cli::{Cli, CommandContext, CommandDispatcher};
use scaffoldor::config::Settings;
use scaffoldor::ui::terminal::is_ci;
use scaffoldor::ui::{create_ui, OutputMode};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is ERROR, since the UI reports everything the user needs
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("scaffoldor=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("scaffoldor=error"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("Scaffoldor starting with args: {:?}", cli);

    // Determine output mode
    let output_mode = if cli.quiet {
        OutputMode::Quiet
    } else if cli.verbose {
        OutputMode::Verbose
    } else {
        OutputMode::Normal
    };

    // Handle --no-color
    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let is_interactive = !cli.scaffold.yes && !is_ci();
    let mut ui = create_ui(is_interactive, output_mode);

    let settings = match Settings::load() {
        Ok(settings) => settings.with_registry_url(cli.registry_url.as_deref()),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            return ExitCode::from(1);
        }
    };

    let dispatcher = CommandDispatcher::new(CommandContext::from_settings(settings));

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
