//! Installation records ("claims")
//!
//! A claim is the durable record of one installation: the bundle it was
//! created from, the merged parameter values, and the outcome of the last
//! attempted action. One claim exists per installation name; the installation
//! store owns the persisted copy and the orchestration flow only ever holds a
//! transient in-memory one during a single attempt.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bundle::{Bundle, ParameterValue};
use crate::error::{DeckhandError, Result};

/// Outcome of the last attempted action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// No action has completed yet, or the process died mid-attempt
    #[default]
    Unknown,
    Success,
    Failure,
}

/// Result of the last action run against this installation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClaimResult {
    /// Name of the action that produced this result
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub action: String,

    pub status: Status,

    /// Diagnostic text captured from a failed action
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

impl ClaimResult {
    pub fn success(action: &str) -> Self {
        Self {
            action: action.to_string(),
            status: Status::Success,
            message: String::new(),
        }
    }

    pub fn failure(action: &str, message: String) -> Self {
        Self {
            action: action.to_string(),
            status: Status::Failure,
            message,
        }
    }
}

/// Durable record of one installation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub name: String,
    pub bundle: Bundle,

    /// Final merged parameter set for the last attempt
    #[serde(default)]
    pub parameters: BTreeMap<String, ParameterValue>,

    #[serde(default)]
    pub result: ClaimResult,

    /// Advanced on every persisted attempt
    #[serde(default)]
    pub revision: u64,

    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Claim {
    /// Create a fresh claim bound to a resolved bundle
    ///
    /// Bundle defaults are applied as the initial parameter layer; the merge
    /// pipeline overlays everything else afterwards.
    pub fn new(name: &str, bundle: Bundle) -> Result<Self> {
        validate_name(name)?;
        let now = Utc::now();
        let parameters = bundle.defaults();
        Ok(Self {
            name: name.to_string(),
            bundle,
            parameters,
            result: ClaimResult::default(),
            revision: 0,
            created: now,
            modified: now,
        })
    }

    /// Advance the revision marker before a persist attempt
    pub fn touch(&mut self) {
        self.revision += 1;
        self.modified = Utc::now();
    }
}

/// Validate an installation name
///
/// Names end up as orchestrator stack names and store file names, so the
/// character set is restricted the same way stack names are.
pub fn validate_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || "-_.".contains(c))
        && !name.starts_with('.');
    if valid {
        Ok(())
    } else {
        Err(DeckhandError::InvalidInstallationName {
            name: name.to_string(),
        })
    }
}
