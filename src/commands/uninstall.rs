//! Uninstall command implementation
//!
//! Uninstall is the other half of the lifecycle the installation store exists
//! for: every install attempt left a record, so every record can be cleaned
//! up. When the bundle declares an uninstall action it runs first; the record
//! is only removed after the action succeeds, unless `--force` is given.

use std::path::PathBuf;

use crate::bundle::ACTION_UNINSTALL;
use crate::claim::ClaimResult;
use crate::cli::UninstallArgs;
use crate::commands::install::load_credential_sets;
use crate::credentials;
use crate::driver::{ActionRunner, CommandDriver};
use crate::error::{DeckhandError, Result};
use crate::store::{CredentialStore, Home, InstallationStore};
use crate::{target, ui};

/// Run the uninstall command
pub fn run(home_flag: Option<PathBuf>, args: UninstallArgs) -> Result<()> {
    let target = target::resolve(
        args.target_context.clone(),
        args.orchestrator.clone(),
        args.kubernetes_namespace.clone(),
    )?;

    let home = Home::resolve(home_flag)?;
    let installations = InstallationStore::open(&home)?;
    let credential_store = CredentialStore::open(&home)?;

    let Some(mut claim) = installations.read(&args.name)? else {
        return Err(DeckhandError::InstallationNotFound {
            name: args.name.clone(),
        });
    };

    if claim.bundle.actions.contains_key(ACTION_UNINSTALL) {
        let sets = load_credential_sets(&credential_store, &args.credential_sets)?;
        let resolved_credentials = credentials::resolve(&sets, &claim.bundle.credentials)?;

        let driver = CommandDriver;
        let runner = ActionRunner::new(&driver);
        if let Err(err) = runner.run(
            ACTION_UNINSTALL,
            &claim,
            &resolved_credentials,
            &target,
            &mut std::io::stdout(),
        ) {
            if args.force {
                ui::warn(format!(
                    "removing installation '{}' despite a failed uninstall action",
                    args.name
                ));
            } else {
                // Keep the record around with the failed outcome so the
                // operator can retry or force
                claim.result = ClaimResult::failure(ACTION_UNINSTALL, err.to_string());
                installations.store(&mut claim)?;
                return Err(err);
            }
        }
    }

    installations.delete(&args.name)?;
    ui::info(format!("Installation '{}' removed", args.name));
    Ok(())
}
