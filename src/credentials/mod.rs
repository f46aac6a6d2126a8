//! Credential sets and their resolution against bundle requirements
//!
//! A credential set is a named mapping from credential name to a value source
//! (literal, environment variable, or file). Resolution walks the bundle's
//! declared requirements across the supplied sets and reports every missing
//! credential at once, so one run shows the complete gap.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::bundle::CredentialRequirement;
use crate::error::{DeckhandError, Result};

/// Where a credential value comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CredentialSource {
    Value { value: String },
    Env { env: String },
    Path { path: PathBuf },
}

/// One entry in a credential set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialEntry {
    pub name: String,
    #[serde(flatten)]
    pub source: CredentialSource,
}

/// A named collection of credential entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialSet {
    pub name: String,
    #[serde(default)]
    pub credentials: Vec<CredentialEntry>,
}

impl CredentialEntry {
    /// Resolve this entry's source to a concrete value
    fn resolve(&self) -> Result<String> {
        match &self.source {
            CredentialSource::Value { value } => Ok(value.clone()),
            CredentialSource::Env { env } => {
                std::env::var(env).map_err(|_| DeckhandError::CredentialResolveFailed {
                    name: self.name.clone(),
                    reason: format!("environment variable '{env}' is not set"),
                })
            }
            CredentialSource::Path { path } => std::fs::read_to_string(path)
                .map(|s| s.trim_end_matches('\n').to_string())
                .map_err(|e| DeckhandError::CredentialResolveFailed {
                    name: self.name.clone(),
                    reason: format!("{}: {e}", path.display()),
                }),
        }
    }
}

/// Resolve every credential the bundle requires from the supplied sets
///
/// Sets are searched in order; the first entry matching a requirement's name
/// wins. Missing requirements are aggregated into a single error naming all
/// of them rather than failing on the first.
pub fn resolve(
    sets: &[CredentialSet],
    requirements: &[CredentialRequirement],
) -> Result<BTreeMap<String, String>> {
    let mut resolved = BTreeMap::new();
    let mut missing = Vec::new();

    for requirement in requirements {
        let entry = sets
            .iter()
            .flat_map(|set| &set.credentials)
            .find(|entry| entry.name == requirement.name);
        match entry {
            Some(entry) => {
                resolved.insert(requirement.name.clone(), entry.resolve()?);
            }
            None => missing.push(requirement.name.clone()),
        }
    }

    if missing.is_empty() {
        Ok(resolved)
    } else {
        Err(DeckhandError::MissingCredentials {
            names: missing.join(", "),
        })
    }
}
