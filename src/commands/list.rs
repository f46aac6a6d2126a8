//! List command implementation

use std::path::PathBuf;

use console::Style;

use crate::claim::Status;
use crate::cli::ListArgs;
use crate::error::Result;
use crate::store::{Home, InstallationStore};

fn status_label(status: Status) -> &'static str {
    match status {
        Status::Unknown => "unknown",
        Status::Success => "success",
        Status::Failure => "failure",
    }
}

/// Run the list command
pub fn run(home_flag: Option<PathBuf>, args: ListArgs) -> Result<()> {
    let home = Home::resolve(home_flag)?;
    let installations = InstallationStore::open(&home)?;
    let claims = installations.list()?;

    if args.quiet {
        for claim in claims {
            println!("{}", claim.name);
        }
        return Ok(());
    }

    if claims.is_empty() {
        println!("No installations found");
        return Ok(());
    }

    let header = format!(
        "{:<28} {:<28} {:<10} {}",
        "INSTALLATION", "BUNDLE", "STATUS", "LAST MODIFIED"
    );
    println!("{}", Style::new().bold().apply_to(header));
    for claim in claims {
        println!(
            "{:<28} {:<28} {:<10} {}",
            claim.name,
            format!("{} ({})", claim.bundle.name, claim.bundle.version),
            status_label(claim.result.status),
            claim.modified.format("%Y-%m-%d %H:%M:%S UTC")
        );
    }
    Ok(())
}
