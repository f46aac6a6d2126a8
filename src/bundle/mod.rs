//! Bundle definition model
//!
//! A bundle is the immutable definition of a packaged application: its name,
//! declared parameters, credential requirements, and the actions a driver can
//! execute against a target orchestrator. Bundles are loaded from a packed
//! file (`.json` or YAML), an unpacked application directory, or the local
//! bundle cache, and are never mutated after load.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DeckhandError, Result};

pub mod reference;

pub use reference::Reference;

/// File name of an unpacked application definition
pub const DEFINITION_FILE: &str = "deckhand.yaml";

/// Action executed by `deckhand install`
pub const ACTION_INSTALL: &str = "install";

/// Action executed by `deckhand uninstall`
pub const ACTION_UNINSTALL: &str = "uninstall";

/// Declared type of a bundle parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    #[default]
    String,
    Integer,
    Boolean,
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterType::String => write!(f, "string"),
            ParameterType::Integer => write!(f, "integer"),
            ParameterType::Boolean => write!(f, "boolean"),
        }
    }
}

/// A concrete parameter value, typed per the bundle's declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Boolean(bool),
    Integer(i64),
    String(String),
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Boolean(b) => write!(f, "{b}"),
            ParameterValue::Integer(i) => write!(f, "{i}"),
            ParameterValue::String(s) => write!(f, "{s}"),
        }
    }
}

/// Declaration of a single bundle parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDefinition {
    /// Value type; defaults to string
    #[serde(rename = "type", default)]
    pub param_type: ParameterType,

    /// Default value applied when nothing else supplies one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ParameterValue>,

    /// Whether the final parameter set must contain a value
    #[serde(default)]
    pub required: bool,
}

impl ParameterDefinition {
    /// Coerce a raw command-line string into this parameter's declared type
    pub fn coerce_str(&self, name: &str, raw: &str) -> Result<ParameterValue> {
        match self.param_type {
            ParameterType::String => Ok(ParameterValue::String(raw.to_string())),
            ParameterType::Integer => {
                raw.parse::<i64>()
                    .map(ParameterValue::Integer)
                    .map_err(|_| DeckhandError::InvalidParameterValue {
                        name: name.to_string(),
                        reason: format!("'{raw}' is not an integer"),
                    })
            }
            ParameterType::Boolean => match raw {
                "true" => Ok(ParameterValue::Boolean(true)),
                "false" => Ok(ParameterValue::Boolean(false)),
                _ => Err(DeckhandError::InvalidParameterValue {
                    name: name.to_string(),
                    reason: format!("'{raw}' is not a boolean (expected 'true' or 'false')"),
                }),
            },
        }
    }

    /// Check a structured value (e.g. from a parameters file) against the
    /// declared type, coercing strings where the file format is ambiguous
    pub fn check(&self, name: &str, value: ParameterValue) -> Result<ParameterValue> {
        match (self.param_type, &value) {
            (ParameterType::String, ParameterValue::String(_))
            | (ParameterType::Integer, ParameterValue::Integer(_))
            | (ParameterType::Boolean, ParameterValue::Boolean(_)) => Ok(value),
            (_, ParameterValue::String(raw)) => self.coerce_str(name, raw),
            (expected, got) => Err(DeckhandError::InvalidParameterValue {
                name: name.to_string(),
                reason: format!("expected {expected}, got '{got}'"),
            }),
        }
    }
}

/// A credential the bundle requires, with its destination inside the action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialRequirement {
    pub name: String,

    /// Environment variable the resolved value is exposed as
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,

    /// File path the resolved value is written to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// A named action the execution driver can carry out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDefinition {
    /// Command argv the driver executes
    pub command: Vec<String>,
}

/// Immutable definition of a packaged application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    pub name: String,
    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub parameters: BTreeMap<String, ParameterDefinition>,

    #[serde(default)]
    pub credentials: Vec<CredentialRequirement>,

    #[serde(default)]
    pub actions: BTreeMap<String, ActionDefinition>,
}

impl Bundle {
    /// Load a packed bundle definition from a file
    ///
    /// `.json` files are parsed as JSON; anything else is parsed as YAML.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| DeckhandError::ResolutionFailed {
                reference: path.display().to_string(),
                reason: e.to_string(),
            })?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        let bundle = if is_json {
            serde_json::from_str(&content).map_err(|e| DeckhandError::ResolutionFailed {
                reference: path.display().to_string(),
                reason: e.to_string(),
            })?
        } else {
            serde_yaml::from_str(&content).map_err(|e| DeckhandError::ResolutionFailed {
                reference: path.display().to_string(),
                reason: e.to_string(),
            })?
        };

        Ok(bundle)
    }

    /// Load an unpacked application definition from a directory
    pub fn load_dir(path: &Path) -> Result<Self> {
        let definition = path.join(DEFINITION_FILE);
        if !definition.is_file() {
            return Err(DeckhandError::ResolutionFailed {
                reference: path.display().to_string(),
                reason: format!("no {DEFINITION_FILE} found in directory"),
            });
        }
        Self::load_file(&definition)
    }

    /// Structural validation, run once after load and before any use
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return self.invalid("bundle name is empty");
        }
        if self.version.trim().is_empty() {
            return self.invalid("bundle version is empty");
        }
        if !self.actions.contains_key(ACTION_INSTALL) {
            return self.invalid("bundle declares no install action");
        }
        for (name, action) in &self.actions {
            if action.command.is_empty() {
                return self.invalid(&format!("action '{name}' has an empty command"));
            }
        }
        for (name, definition) in &self.parameters {
            if name.trim().is_empty() {
                return self.invalid("parameter with empty name");
            }
            if definition.required && definition.default.is_some() {
                return self.invalid(&format!(
                    "parameter '{name}' is required but declares a default"
                ));
            }
        }
        for requirement in &self.credentials {
            if requirement.name.trim().is_empty() {
                return self.invalid("credential requirement with empty name");
            }
            if requirement.env.is_none() && requirement.path.is_none() {
                return self.invalid(&format!(
                    "credential '{}' declares no destination (env or path)",
                    requirement.name
                ));
            }
        }
        Ok(())
    }

    fn invalid(&self, reason: &str) -> Result<()> {
        Err(DeckhandError::ValidationFailed {
            name: self.name.clone(),
            reason: reason.to_string(),
        })
    }

    /// Declared defaults, the lowest-precedence layer of the parameter overlay
    pub fn defaults(&self) -> BTreeMap<String, ParameterValue> {
        self.parameters
            .iter()
            .filter_map(|(name, definition)| {
                definition
                    .default
                    .clone()
                    .map(|value| (name.clone(), value))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn minimal_bundle() -> Bundle {
        serde_yaml::from_str(
            r"
            name: myapp
            version: 0.1.0
            actions:
              install:
                command: ['/bin/true']
            ",
        )
        .unwrap()
    }

    #[test]
    fn test_parse_full_definition() {
        let bundle: Bundle = serde_yaml::from_str(
            r"
            name: myapp
            version: 1.2.0
            description: demo application
            parameters:
              replicas:
                type: integer
                default: 2
              tag:
                default: latest
              debug:
                type: boolean
                default: false
              api-key:
                required: true
            credentials:
              - name: registry-token
                env: REGISTRY_TOKEN
            actions:
              install:
                command: ['/bin/sh', '-c', 'echo install']
              uninstall:
                command: ['/bin/sh', '-c', 'echo uninstall']
            ",
        )
        .unwrap();

        assert_eq!(bundle.name, "myapp");
        assert_eq!(
            bundle.parameters["replicas"].default,
            Some(ParameterValue::Integer(2))
        );
        assert_eq!(bundle.parameters["tag"].param_type, ParameterType::String);
        assert!(bundle.parameters["api-key"].required);
        assert_eq!(bundle.credentials[0].env.as_deref(), Some("REGISTRY_TOKEN"));
        bundle.validate().unwrap();
    }

    #[test]
    fn test_validate_requires_install_action() {
        let mut bundle = minimal_bundle();
        bundle.actions.clear();
        let err = bundle.validate().unwrap_err();
        assert!(matches!(err, DeckhandError::ValidationFailed { .. }));
        assert!(err.to_string().contains("install action"));
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let mut bundle = minimal_bundle();
        bundle.name = "  ".to_string();
        assert!(bundle.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_required_with_default() {
        let mut bundle = minimal_bundle();
        bundle.parameters.insert(
            "port".to_string(),
            ParameterDefinition {
                param_type: ParameterType::Integer,
                default: Some(ParameterValue::Integer(8080)),
                required: true,
            },
        );
        let err = bundle.validate().unwrap_err();
        assert!(err.to_string().contains("port"));
    }

    #[test]
    fn test_validate_rejects_credential_without_destination() {
        let mut bundle = minimal_bundle();
        bundle.credentials.push(CredentialRequirement {
            name: "token".to_string(),
            env: None,
            path: None,
        });
        let err = bundle.validate().unwrap_err();
        assert!(err.to_string().contains("destination"));
    }

    #[test]
    fn test_coerce_str_integer() {
        let definition = ParameterDefinition {
            param_type: ParameterType::Integer,
            default: None,
            required: false,
        };
        assert_eq!(
            definition.coerce_str("replicas", "3").unwrap(),
            ParameterValue::Integer(3)
        );
        assert!(definition.coerce_str("replicas", "many").is_err());
    }

    #[test]
    fn test_coerce_str_boolean() {
        let definition = ParameterDefinition {
            param_type: ParameterType::Boolean,
            default: None,
            required: false,
        };
        assert_eq!(
            definition.coerce_str("debug", "true").unwrap(),
            ParameterValue::Boolean(true)
        );
        assert!(definition.coerce_str("debug", "yes").is_err());
    }

    #[test]
    fn test_check_rejects_type_mismatch() {
        let definition = ParameterDefinition {
            param_type: ParameterType::Integer,
            default: None,
            required: false,
        };
        let err = definition
            .check("replicas", ParameterValue::Boolean(true))
            .unwrap_err();
        assert!(matches!(err, DeckhandError::InvalidParameterValue { .. }));
    }

    #[test]
    fn test_load_file_json_and_yaml() {
        let temp = TempDir::new().unwrap();
        let yaml_path = temp.path().join("bundle.yaml");
        std::fs::write(
            &yaml_path,
            "name: a\nversion: '1'\nactions:\n  install:\n    command: ['/bin/true']\n",
        )
        .unwrap();
        let json_path = temp.path().join("bundle.json");
        std::fs::write(
            &json_path,
            r#"{"name":"a","version":"1","actions":{"install":{"command":["/bin/true"]}}}"#,
        )
        .unwrap();

        assert_eq!(
            Bundle::load_file(&yaml_path).unwrap(),
            Bundle::load_file(&json_path).unwrap()
        );
    }

    #[test]
    fn test_load_dir_requires_definition_file() {
        let temp = TempDir::new().unwrap();
        let err = Bundle::load_dir(temp.path()).unwrap_err();
        assert!(matches!(err, DeckhandError::ResolutionFailed { .. }));
    }

    #[test]
    fn test_defaults_skips_parameters_without_default() {
        let bundle: Bundle = serde_yaml::from_str(
            r"
            name: myapp
            version: '1'
            parameters:
              tag:
                default: latest
              api-key:
                required: true
            actions:
              install:
                command: ['/bin/true']
            ",
        )
        .unwrap();

        let defaults = bundle.defaults();
        assert_eq!(
            defaults.get("tag"),
            Some(&ParameterValue::String("latest".to_string()))
        );
        assert!(!defaults.contains_key("api-key"));
    }
}
