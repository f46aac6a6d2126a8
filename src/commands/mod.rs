//! Command implementations for the deckhand CLI

pub mod build;
pub mod completions;
pub mod install;
pub mod list;
pub mod uninstall;
pub mod version;
