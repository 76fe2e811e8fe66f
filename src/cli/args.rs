//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::REGISTRY_URL_ENV;
use crate::registry::{Framework, TemplateType};
use crate::scaffold::{GitStrategy, PackageManagerChoice};

/// Scaffoldor - Discover community templates and scaffold new projects.
#[derive(Debug, Parser)]
#[command(name = "scaffoldor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(flatten)]
    pub scaffold: ScaffoldArgs,

    /// Remote registry URL
    #[arg(long, global = true, env = REGISTRY_URL_ENV, value_name = "URL")]
    pub registry_url: Option<String>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List available templates
    List(ListArgs),

    /// Search templates by name, description, tags or features
    Search(SearchArgs),

    /// Replace the local registry with the remote registry
    Sync,

    /// Add a template to your local registry
    Add(AddArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for scaffolding a template (the default action).
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ScaffoldArgs {
    /// Template to scaffold: `slug`, `author/slug` or `@author/slug`
    pub template: Option<String>,

    /// Destination directory (defaults to ./<slug>)
    pub dest: Option<PathBuf>,

    /// How to handle the template's git history
    #[arg(long, value_enum, value_name = "STRATEGY")]
    pub git: Option<GitStrategy>,

    /// Package manager to use: npm, pnpm, yarn, bun or keep
    #[arg(long, value_name = "PM")]
    pub package_manager: Option<PackageManagerChoice>,

    /// Accept defaults instead of prompting
    #[arg(short, long)]
    pub yes: bool,
}

/// Template filters shared by `list` and `search`.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct FilterArgs {
    /// Filter by type (frontend, backend, fullstack, mobile, cli, library, other)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub template_type: Option<TemplateType>,

    /// Filter by framework
    #[arg(short, long)]
    pub framework: Option<Framework>,

    /// Filter by author handle (with or without @)
    #[arg(short, long)]
    pub author: Option<String>,

    /// Filter by tag
    #[arg(long)]
    pub tag: Option<String>,

    /// Print matches as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Include templates from the remote registry
    #[arg(short, long)]
    pub remote: bool,

    #[command(flatten)]
    pub filters: FilterArgs,
}

/// Arguments for the `search` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SearchArgs {
    /// Text to look for
    pub query: String,

    #[command(flatten)]
    pub filters: FilterArgs,
}

/// Arguments for the `add` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct AddArgs {
    /// Template slug (lowercase letters, digits and hyphens)
    pub slug: String,

    /// Git repository URL
    pub url: String,

    /// Template type
    #[arg(short = 't', long = "type", value_name = "TYPE", default_value = "other")]
    pub template_type: String,

    /// Template framework
    #[arg(short, long, default_value = "other")]
    pub framework: String,

    /// Template description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Comma-separated tags
    #[arg(long)]
    pub tags: Option<String>,

    /// Comma-separated features
    #[arg(long)]
    pub features: Option<String>,

    /// Your GitHub handle (files the template under your name)
    #[arg(long)]
    pub author: Option<String>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
