//! Build command stub
//!
//! Compiling an app package from local data is not part of this tool yet.
//! The command stays hidden and gated on an explicit experimental switch
//! checked at dispatch time rather than baked in at registration.

use crate::cli::BuildArgs;
use crate::error::{DeckhandError, Result};

fn experimental_enabled() -> bool {
    std::env::var("DECKHAND_EXPERIMENTAL").is_ok_and(|v| v == "on")
}

/// Run the build command
pub fn run(args: BuildArgs) -> Result<()> {
    if !experimental_enabled() {
        return Err(DeckhandError::ExperimentalDisabled {
            feature: "build".to_string(),
        });
    }
    let app = args.app_name.as_deref().unwrap_or(".");
    println!("build called for '{app}'; building packages is not implemented yet");
    Ok(())
}
