//! Deckhand - application bundle installer
//!
//! A command line tool that installs packaged applications (bundles) onto a
//! target container orchestrator and keeps a durable record of every
//! installation, so re-installs, failure recovery and uninstalls stay safe
//! and idempotent.

use clap::Parser;

mod bundle;
mod claim;
mod cli;
mod commands;
mod credentials;
mod driver;
mod error;
mod params;
mod resolver;
mod store;
mod target;
mod ui;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Install(args) => commands::install::run(cli.home, args),
        Commands::Uninstall(args) => commands::uninstall::run(cli.home, args),
        Commands::List(args) => commands::list::run(cli.home, args),
        Commands::Build(args) => commands::build::run(args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
