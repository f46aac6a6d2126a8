//! Action execution boundary
//!
//! The [`Driver`] trait is where deckhand hands an operation to whatever
//! actually carries it out against the target orchestrator. The default
//! [`CommandDriver`] executes the action's declared command as a subprocess
//! with parameters and credentials delivered through the environment and
//! declared file destinations; orchestrator-API drivers plug in behind the
//! same trait.
//!
//! The runner never retries; retries are an operator concern.

use std::collections::BTreeMap;
use std::io::Write;
use std::process::Command;

use crate::claim::Claim;
use crate::error::{DeckhandError, Result};
use crate::target::Target;

/// A single action invocation against a target
pub struct Operation<'a> {
    pub action: &'a str,
    pub claim: &'a Claim,
    pub credentials: &'a BTreeMap<String, String>,
    pub target: &'a Target,
}

/// Execution driver boundary
pub trait Driver {
    /// Carry out the operation, streaming normal output into `sink`
    ///
    /// A failure returns `ActionFailed` carrying the captured diagnostics.
    fn run(&self, op: &Operation<'_>, sink: &mut dyn Write) -> Result<()>;
}

/// Runs a named bundle action through a driver
pub struct ActionRunner<'a> {
    driver: &'a dyn Driver,
}

impl<'a> ActionRunner<'a> {
    pub fn new(driver: &'a dyn Driver) -> Self {
        Self { driver }
    }

    pub fn run(
        &self,
        action: &str,
        claim: &Claim,
        credentials: &BTreeMap<String, String>,
        target: &Target,
        sink: &mut dyn Write,
    ) -> Result<()> {
        if !claim.bundle.actions.contains_key(action) {
            return Err(DeckhandError::ActionNotDeclared {
                bundle: claim.bundle.name.clone(),
                action: action.to_string(),
            });
        }
        self.driver.run(
            &Operation {
                action,
                claim,
                credentials,
                target,
            },
            sink,
        )
    }
}

/// Environment variable name for a parameter (`tag` -> `DECKHAND_PARAM_TAG`)
fn param_env_key(name: &str) -> String {
    let upper: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("DECKHAND_PARAM_{upper}")
}

/// Default driver: runs the action command as a subprocess
#[derive(Default)]
pub struct CommandDriver;

impl CommandDriver {
    fn deliver_credentials(op: &Operation<'_>, command: &mut Command) -> Result<()> {
        for requirement in &op.claim.bundle.credentials {
            let Some(value) = op.credentials.get(&requirement.name) else {
                // Validation ran before execution; an absent entry here is a bug
                return Err(DeckhandError::MissingCredentials {
                    names: requirement.name.clone(),
                });
            };
            if let Some(env) = &requirement.env {
                command.env(env, value);
            }
            if let Some(path) = &requirement.path {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(path, value)?;
            }
        }
        Ok(())
    }
}

impl Driver for CommandDriver {
    fn run(&self, op: &Operation<'_>, sink: &mut dyn Write) -> Result<()> {
        let action_failed = |output: String| DeckhandError::ActionFailed {
            action: op.action.to_string(),
            output,
        };

        // Declared-action check happens in the runner
        let definition = &op.claim.bundle.actions[op.action];
        let (program, args) = definition
            .command
            .split_first()
            .ok_or_else(|| action_failed("action command is empty".to_string()))?;

        let mut command = Command::new(program);
        command.args(args);
        command.env("DECKHAND_INSTALLATION", &op.claim.name);
        command.env("DECKHAND_ACTION", op.action);
        command.env("DECKHAND_TARGET_CONTEXT", &op.target.context);
        command.env("DECKHAND_ORCHESTRATOR", op.target.orchestrator.to_string());
        command.env("DECKHAND_NAMESPACE", &op.target.namespace);
        for (name, value) in &op.claim.parameters {
            command.env(param_env_key(name), value.to_string());
        }
        Self::deliver_credentials(op, &mut command)?;

        let output = command
            .output()
            .map_err(|e| action_failed(format!("failed to execute '{program}': {e}")))?;

        sink.write_all(&output.stdout)?;
        if output.status.success() {
            Ok(())
        } else {
            let mut diagnostics = String::from_utf8_lossy(&output.stderr).trim_end().to_string();
            if diagnostics.is_empty() {
                diagnostics = format!("exited with {}", output.status);
            }
            Err(action_failed(diagnostics))
        }
    }
}
