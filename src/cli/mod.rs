//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - install: Install command arguments
//! - uninstall: Uninstall command arguments
//! - list: List command arguments
//! - build: Build command arguments (experimental stub)
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod build;
pub mod completions;
pub mod install;
pub mod list;
pub mod uninstall;

pub use build::BuildArgs;
pub use completions::CompletionsArgs;
pub use install::InstallArgs;
pub use list::ListArgs;
pub use uninstall::UninstallArgs;

/// Deckhand - application bundle installer
///
/// Install packaged applications onto container orchestrators and track
/// their lifecycle.
#[derive(Parser, Debug)]
#[command(
    name = "deckhand",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Install packaged applications onto container orchestrators",
    long_about = "Deckhand installs application bundles onto a target container orchestrator \
                  (Swarm or Kubernetes) and keeps a durable record of every installation, so \
                  re-installs, failure recovery and uninstalls stay safe and idempotent.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  deckhand install myapp.json --name myinstallation       \x1b[90m# Install a packed bundle\x1b[0m\n   \
                  deckhand install myrepo/myapp:mytag --pull              \x1b[90m# Install from a registry reference\x1b[0m\n   \
                  deckhand install ./myapp --credential-set staging       \x1b[90m# Install an unpacked app directory\x1b[0m\n   \
                  deckhand list                                          \x1b[90m# List installations\x1b[0m\n   \
                  deckhand uninstall myinstallation                      \x1b[90m# Remove an installation\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Deckhand home directory holding the installation, bundle and
    /// credential stores (defaults to the platform data directory)
    #[arg(long, global = true, env = "DECKHAND_HOME", value_name = "DIR")]
    pub home: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install an application
    Install(InstallArgs),

    /// Remove an installation
    Uninstall(UninstallArgs),

    /// List installations
    List(ListArgs),

    /// Compile an app package from locally available data (experimental)
    #[command(hide = true)]
    Build(BuildArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
