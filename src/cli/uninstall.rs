use clap::Parser;

/// Arguments for the uninstall command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Uninstall an installation:\n    deckhand uninstall myinstallation\n\n\
                   Remove the record even when the uninstall action fails:\n    deckhand uninstall myinstallation --force")]
pub struct UninstallArgs {
    /// Installation name
    pub name: String,

    /// Remove the installation record even if the uninstall action fails
    #[arg(long, short = 'f')]
    pub force: bool,

    /// Orchestrator the installation targets (swarm, kubernetes)
    #[arg(long, value_name = "ORCHESTRATOR")]
    pub orchestrator: Option<String>,

    /// Kubernetes namespace of the installation
    #[arg(long = "kubernetes-namespace", value_name = "NS", default_value = "default")]
    pub kubernetes_namespace: String,

    /// Context of the target runtime
    #[arg(long = "target-context", value_name = "CTX", env = "DECKHAND_TARGET_CONTEXT")]
    pub target_context: Option<String>,

    /// Credential set name from the store, or a path to a credential set
    /// file (repeatable)
    #[arg(long = "credential-set", value_name = "NAME_OR_FILE")]
    pub credential_sets: Vec<String>,
}
