//! Persistent stores under the deckhand home directory
//!
//! Layout:
//! - `installations/` — one JSON claim per installation name
//! - `bundles/` — local cache of pulled bundles, keyed by registry reference
//! - `credentials/` — named credential set files (YAML)
//!
//! The home directory comes from `--home` / `DECKHAND_HOME`, falling back to
//! the platform data directory.

use std::path::{Path, PathBuf};

use crate::error::{DeckhandError, Result};

pub mod bundles;
pub mod credentials;
pub mod installations;

pub use bundles::{BundleStore, Registry, UnconfiguredRegistry};
pub use credentials::CredentialStore;
pub use installations::InstallationStore;

/// Root directory all stores live under
#[derive(Debug, Clone)]
pub struct Home {
    root: PathBuf,
}

impl Home {
    /// Resolve the home directory from the CLI flag (which clap also feeds
    /// from `DECKHAND_HOME`) or the platform data directory
    pub fn resolve(flag: Option<PathBuf>) -> Result<Self> {
        let root = match flag {
            Some(path) => path,
            None => dirs::data_dir()
                .map(|d| d.join("deckhand"))
                .ok_or_else(|| DeckhandError::IoError {
                    message: "cannot determine a data directory; set DECKHAND_HOME".to_string(),
                })?,
        };
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create (if needed) and return a store subdirectory
    fn subdir(&self, name: &str) -> Result<PathBuf> {
        let dir = self.root.join(name);
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}
