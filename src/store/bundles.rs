//! Local bundle cache and the registry pull boundary
//!
//! Pulled bundles are cached as JSON keyed by their full registry reference so
//! later installs of the same reference resolve without touching the network.
//! The registry client itself is an external collaborator behind the
//! [`Registry`] trait.

use std::path::PathBuf;

use crate::bundle::{Bundle, Reference};
use crate::error::{DeckhandError, Result};
use crate::store::Home;

/// Remote registry client boundary
pub trait Registry {
    /// Pull the bundle for a reference from the remote registry
    fn pull(&self, reference: &Reference) -> Result<Bundle>;
}

/// Placeholder used when no registry client is wired in
///
/// Installs still work from paths, directories, and the local cache; only
/// remote pulls fail.
pub struct UnconfiguredRegistry;

impl Registry for UnconfiguredRegistry {
    fn pull(&self, reference: &Reference) -> Result<Bundle> {
        Err(DeckhandError::ResolutionFailed {
            reference: reference.to_string(),
            reason: "no registry client is configured for remote pulls".to_string(),
        })
    }
}

pub struct BundleStore {
    dir: PathBuf,
}

impl BundleStore {
    pub fn open(home: &Home) -> Result<Self> {
        Ok(Self {
            dir: home.subdir("bundles")?,
        })
    }

    /// Cache file for a reference; `/` and `:` are not filename-safe
    fn cache_path(&self, reference: &Reference) -> PathBuf {
        let key = reference.to_string().replace(['/', ':'], "_");
        self.dir.join(format!("{key}.json"))
    }

    /// Look up a reference in the local cache by exact match
    pub fn lookup_local(&self, reference: &Reference) -> Result<Option<Bundle>> {
        let path = self.cache_path(reference);
        if !path.is_file() {
            return Ok(None);
        }
        let content =
            std::fs::read_to_string(&path).map_err(|e| DeckhandError::StoreReadFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        let bundle = serde_json::from_str(&content).map_err(|e| DeckhandError::StoreReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Some(bundle))
    }

    /// Write a pulled bundle through to the cache
    pub fn cache(&self, reference: &Reference, bundle: &Bundle) -> Result<()> {
        let json = serde_json::to_string_pretty(bundle)?;
        std::fs::write(self.cache_path(reference), json)?;
        Ok(())
    }
}
