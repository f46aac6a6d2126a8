//! Execution target resolution
//!
//! A target names the runtime an installation applies to: a context name plus
//! the orchestrator (and namespace for Kubernetes). Defaults are applied here
//! so the orchestration flow always works with a fully resolved target.

use std::fmt;
use std::str::FromStr;

use crate::error::{DeckhandError, Result};

/// Default context when neither the flag nor DECKHAND_TARGET_CONTEXT is set
pub const DEFAULT_CONTEXT: &str = "default";

/// Default Kubernetes namespace
pub const DEFAULT_NAMESPACE: &str = "default";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orchestrator {
    Swarm,
    Kubernetes,
}

impl fmt::Display for Orchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orchestrator::Swarm => write!(f, "swarm"),
            Orchestrator::Kubernetes => write!(f, "kubernetes"),
        }
    }
}

impl FromStr for Orchestrator {
    type Err = DeckhandError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "swarm" => Ok(Orchestrator::Swarm),
            "kubernetes" => Ok(Orchestrator::Kubernetes),
            other => Err(DeckhandError::TargetUnusable {
                reason: format!("unknown orchestrator '{other}'"),
            }),
        }
    }
}

/// Fully resolved execution target
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub context: String,
    pub orchestrator: Orchestrator,
    pub namespace: String,
}

/// Resolve a target from CLI inputs, applying defaults where unset
pub fn resolve(
    context: Option<String>,
    orchestrator: Option<String>,
    namespace: String,
) -> Result<Target> {
    let context = context.unwrap_or_else(|| DEFAULT_CONTEXT.to_string());
    if context.trim().is_empty() {
        return Err(DeckhandError::TargetUnusable {
            reason: "target context is empty".to_string(),
        });
    }

    let orchestrator = match orchestrator {
        Some(name) => name.parse()?,
        None => Orchestrator::Swarm,
    };

    if orchestrator == Orchestrator::Kubernetes && namespace.trim().is_empty() {
        return Err(DeckhandError::TargetUnusable {
            reason: "kubernetes namespace is empty".to_string(),
        });
    }

    Ok(Target {
        context,
        orchestrator,
        namespace,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let target = resolve(None, None, DEFAULT_NAMESPACE.to_string()).unwrap();
        assert_eq!(target.context, "default");
        assert_eq!(target.orchestrator, Orchestrator::Swarm);
    }

    #[test]
    fn test_explicit_kubernetes() {
        let target = resolve(
            Some("prod".to_string()),
            Some("kubernetes".to_string()),
            "apps".to_string(),
        )
        .unwrap();
        assert_eq!(target.orchestrator, Orchestrator::Kubernetes);
        assert_eq!(target.namespace, "apps");
    }

    #[test]
    fn test_unknown_orchestrator_is_target_error() {
        let err = resolve(None, Some("nomad".to_string()), String::new()).unwrap_err();
        assert!(matches!(err, DeckhandError::TargetUnusable { .. }));
    }

    #[test]
    fn test_blank_context_is_target_error() {
        let err = resolve(Some("  ".to_string()), None, String::new()).unwrap_err();
        assert!(matches!(err, DeckhandError::TargetUnusable { .. }));
    }

    #[test]
    fn test_kubernetes_requires_namespace() {
        let err = resolve(None, Some("kubernetes".to_string()), "  ".to_string()).unwrap_err();
        assert!(matches!(err, DeckhandError::TargetUnusable { .. }));
    }
}
