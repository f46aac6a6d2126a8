//! Application reference resolution
//!
//! Turns the free-form APP_NAME argument into a concrete bundle:
//! - empty → unpacked definition in the current directory
//! - existing file → packed bundle definition
//! - existing directory → unpacked application definition
//! - anything else → registry reference, served from the local bundle cache
//!   before falling back to a remote pull (when pulling is enabled)

use std::path::{Path, PathBuf};

use crate::bundle::{Bundle, Reference};
use crate::error::{DeckhandError, Result};
use crate::store::{BundleStore, Registry};

/// Classified form of the user-supplied application name
#[derive(Debug, Clone, PartialEq)]
pub enum ReferenceKind {
    CurrentDir,
    File(PathBuf),
    Dir(PathBuf),
    Registry(Reference),
}

fn is_path_like(input: &str) -> bool {
    input.starts_with('.')
        || input.starts_with('/')
        || input.starts_with('~')
        || input.contains('\\')
}

/// Classify an application name without touching the network
pub fn classify(input: &str) -> Result<ReferenceKind> {
    if input.trim().is_empty() {
        return Ok(ReferenceKind::CurrentDir);
    }

    let path = Path::new(input);
    if path.is_file() {
        return Ok(ReferenceKind::File(path.to_path_buf()));
    }
    if path.is_dir() {
        return Ok(ReferenceKind::Dir(path.to_path_buf()));
    }
    if is_path_like(input) {
        return Err(DeckhandError::ResolutionFailed {
            reference: input.to_string(),
            reason: "path does not exist or is not readable".to_string(),
        });
    }

    Reference::parse(input).map(ReferenceKind::Registry)
}

/// Resolve an application name to a bundle definition
///
/// For registry references the local bundle cache is consulted first; a miss
/// falls back to the registry collaborator only when `pull` is set, and a
/// successful pull is written through to the cache.
pub fn resolve_bundle(
    store: &BundleStore,
    registry: &dyn Registry,
    app_name: &str,
    pull: bool,
) -> Result<Bundle> {
    match classify(app_name)? {
        ReferenceKind::CurrentDir => {
            let cwd = std::env::current_dir()?;
            Bundle::load_dir(&cwd)
        }
        ReferenceKind::File(path) => Bundle::load_file(&path),
        ReferenceKind::Dir(path) => Bundle::load_dir(&path),
        ReferenceKind::Registry(reference) => {
            if let Some(bundle) = store.lookup_local(&reference)? {
                return Ok(bundle);
            }
            if !pull {
                return Err(DeckhandError::ResolutionFailed {
                    reference: reference.to_string(),
                    reason: "not found in the local bundle store (pass --pull to fetch it)"
                        .to_string(),
                });
            }
            let bundle = registry.pull(&reference)?;
            store.cache(&reference, &bundle)?;
            Ok(bundle)
        }
    }
}
