//! Install command implementation
//!
//! The orchestration flow:
//! 1. Resolve the target context and orchestrator (defaults applied)
//! 2. Resolve and validate the bundle; nothing is recorded yet
//! 3. Guard against an existing installation: a prior failure can be
//!    overridden with a warning, anything else is rejected
//! 4. Create the claim and merge parameters and credentials
//! 5. Run the install action through the driver
//! 6. Persist the claim whether the action succeeded or failed
//!
//! Step 6 is the load-bearing one: every attempt leaves a durable record,
//! which is what makes overriding a failed install and a later uninstall
//! possible. A persistence failure after a successful action is surfaced as
//! the operation's error, since an unrecorded successful install is worse
//! than a loud complaint.

use std::path::PathBuf;

use crate::bundle::ACTION_INSTALL;
use crate::claim::{Claim, ClaimResult, Status};
use crate::cli::InstallArgs;
use crate::credentials::{self, CredentialSet};
use crate::driver::{ActionRunner, CommandDriver};
use crate::error::{DeckhandError, Result};
use crate::store::{BundleStore, CredentialStore, Home, InstallationStore, UnconfiguredRegistry};
use crate::{params, resolver, target, ui};

/// Run the install command
pub fn run(home_flag: Option<PathBuf>, args: InstallArgs) -> Result<()> {
    // Quiet install-time chatter so driver output dominates; the guard
    // releases the mode on every exit path
    let quiet = ui::QuietMode::acquire();

    let target = target::resolve(
        args.target_context.clone(),
        args.orchestrator.clone(),
        args.kubernetes_namespace.clone(),
    )?;

    let home = Home::resolve(home_flag)?;
    let bundle_store = BundleStore::open(&home)?;
    let installations = InstallationStore::open(&home)?;
    let credential_store = CredentialStore::open(&home)?;

    let bundle = resolver::resolve_bundle(
        &bundle_store,
        &UnconfiguredRegistry,
        args.app_name.as_deref().unwrap_or(""),
        args.pull,
    )?;
    bundle.validate()?;

    let installation_name = args.name.clone().unwrap_or_else(|| bundle.name.clone());

    // A failed installation can be overridden, but with a warning; anything
    // else that exists (including an indeterminate in-progress record) means
    // there may be a working installation to protect
    if let Some(existing) = installations.read(&installation_name)? {
        if existing.result.status == Status::Failure {
            ui::warn(format!(
                "installing over previously failed installation '{installation_name}'"
            ));
        } else {
            return Err(DeckhandError::InstallationExists {
                name: installation_name,
            });
        }
    }

    let mut claim = Claim::new(&installation_name, bundle)?;

    params::merge_parameters(
        &mut claim,
        vec![
            params::with_file_parameters(&args.parameters_files),
            params::with_command_line_overrides(&args.overrides),
            params::with_orchestrator_parameters(&target),
            params::with_registry_auth(args.with_registry_auth),
        ],
    )?;

    let sets = load_credential_sets(&credential_store, &args.credential_sets)?;
    let resolved_credentials = credentials::resolve(&sets, &claim.bundle.credentials)?;

    let driver = CommandDriver;
    let runner = ActionRunner::new(&driver);
    let action_result = runner.run(
        ACTION_INSTALL,
        &claim,
        &resolved_credentials,
        &target,
        &mut std::io::stdout(),
    );

    claim.result = match &action_result {
        Ok(()) => ClaimResult::success(ACTION_INSTALL),
        Err(err) => ClaimResult::failure(ACTION_INSTALL, err.to_string()),
    };

    // Persisted regardless of the action outcome; even a failed installation
    // needs a record for recovery and a clean uninstallation
    let persisted = installations.store(&mut claim);

    if let Err(action_err) = action_result {
        // The action failure stays the primary error; a persistence failure
        // on top of it is surfaced without masking it
        if let Err(persist_err) = persisted {
            ui::warn(persist_err.to_string());
        }
        return Err(action_err);
    }
    persisted?;

    drop(quiet);
    ui::info(format!(
        "Application '{}' installed as '{}' on {} ({})",
        claim.bundle.name, claim.name, target.orchestrator, target.context
    ));
    Ok(())
}

/// Load every `--credential-set` argument, by store name or file path
pub(crate) fn load_credential_sets(
    store: &CredentialStore,
    names: &[String],
) -> Result<Vec<CredentialSet>> {
    names.iter().map(|name| store.load(name)).collect()
}
