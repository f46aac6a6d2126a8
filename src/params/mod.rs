//! Parameter overlay pipeline
//!
//! The final parameter set is built by applying an ordered list of pure merge
//! steps over the claim's initial set (the bundle defaults), each step taking
//! the evolving map and returning the next one. Precedence, low to high:
//! defaults < parameter files < command-line overrides < orchestrator-derived
//! values < registry-auth forwarding.
//!
//! User-supplied steps (files, overrides) must target declared parameters;
//! orchestrator-derived steps only fill their reserved keys when the bundle
//! declares them.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::bundle::{Bundle, ParameterValue};
use crate::claim::Claim;
use crate::error::{DeckhandError, Result};
use crate::target::Target;

/// Reserved parameter carrying the orchestrator name
pub const ORCHESTRATOR_PARAM: &str = "deckhand.orchestrator";

/// Reserved parameter carrying the Kubernetes namespace
pub const NAMESPACE_PARAM: &str = "deckhand.kubernetes-namespace";

/// Reserved parameter telling the action to forward registry credentials
pub const REGISTRY_AUTH_PARAM: &str = "deckhand.share-registry-creds";

pub type ParameterMap = BTreeMap<String, ParameterValue>;

/// One step of the overlay pipeline
pub type MergeStep<'a> = Box<dyn Fn(&Bundle, ParameterMap) -> Result<ParameterMap> + 'a>;

/// Apply the merge steps in order, then check the result against the bundle's
/// required-parameter constraints
pub fn merge_parameters(claim: &mut Claim, steps: Vec<MergeStep<'_>>) -> Result<()> {
    let mut current = claim.parameters.clone();
    for step in steps {
        current = step(&claim.bundle, current)?;
    }
    check_required(&claim.bundle, &current)?;
    claim.parameters = current;
    Ok(())
}

fn check_required(bundle: &Bundle, set: &ParameterMap) -> Result<()> {
    let missing: Vec<&str> = bundle
        .parameters
        .iter()
        .filter(|(name, definition)| definition.required && !set.contains_key(*name))
        .map(|(name, _)| name.as_str())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(DeckhandError::MissingParameters {
            names: missing.join(", "),
        })
    }
}

/// Values supplied through `--parameters-file`, applied in file order
pub fn with_file_parameters(files: &[PathBuf]) -> MergeStep<'_> {
    Box::new(move |bundle, mut current| {
        for file in files {
            let content =
                std::fs::read_to_string(file).map_err(|e| DeckhandError::IoError {
                    message: format!("failed to read {}: {e}", file.display()),
                })?;
            let values: BTreeMap<String, ParameterValue> = serde_yaml::from_str(&content)
                .map_err(|e| DeckhandError::ConfigParseFailed {
                    path: file.display().to_string(),
                    reason: e.to_string(),
                })?;
            for (name, value) in values {
                let definition = bundle.parameters.get(&name).ok_or_else(|| {
                    DeckhandError::UnknownParameter { name: name.clone() }
                })?;
                let value = definition.check(&name, value)?;
                current.insert(name, value);
            }
        }
        Ok(current)
    })
}

/// `--set KEY=VALUE` command-line overrides
pub fn with_command_line_overrides(overrides: &[String]) -> MergeStep<'_> {
    Box::new(move |bundle, mut current| {
        for raw in overrides {
            let (name, value) =
                raw.split_once('=')
                    .ok_or_else(|| DeckhandError::InvalidParameterValue {
                        name: raw.clone(),
                        reason: "expected KEY=VALUE".to_string(),
                    })?;
            let definition = bundle.parameters.get(name).ok_or_else(|| {
                DeckhandError::UnknownParameter {
                    name: name.to_string(),
                }
            })?;
            current.insert(name.to_string(), definition.coerce_str(name, value)?);
        }
        Ok(current)
    })
}

/// Orchestrator-derived values, filled only for declared reserved parameters
pub fn with_orchestrator_parameters(target: &Target) -> MergeStep<'_> {
    Box::new(move |bundle, mut current| {
        set_if_declared(
            bundle,
            &mut current,
            ORCHESTRATOR_PARAM,
            ParameterValue::String(target.orchestrator.to_string()),
        )?;
        set_if_declared(
            bundle,
            &mut current,
            NAMESPACE_PARAM,
            ParameterValue::String(target.namespace.clone()),
        )?;
        Ok(current)
    })
}

/// Registry-auth forwarding flag, highest precedence
pub fn with_registry_auth(send: bool) -> MergeStep<'static> {
    Box::new(move |bundle, mut current| {
        set_if_declared(
            bundle,
            &mut current,
            REGISTRY_AUTH_PARAM,
            ParameterValue::Boolean(send),
        )?;
        Ok(current)
    })
}

fn set_if_declared(
    bundle: &Bundle,
    current: &mut ParameterMap,
    name: &str,
    value: ParameterValue,
) -> Result<()> {
    if let Some(definition) = bundle.parameters.get(name) {
        current.insert(name.to_string(), definition.check(name, value)?);
    }
    Ok(())
}
