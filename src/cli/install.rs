use clap::Parser;
use std::path::PathBuf;

/// Arguments for the install command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Install the definition in the current directory:\n    deckhand install\n\n\
                   Install a packed bundle:\n    deckhand install myapp.json --name myinstallation --target-context prod\n\n\
                   Install from a registry reference:\n    deckhand install myrepo/myapp:mytag --pull\n\n\
                   Install with credentials and overrides:\n    deckhand install bundle.json --credential-set staging --set tag=2.0")]
pub struct InstallArgs {
    /// Application to install: empty for the current directory, a path to a
    /// bundle definition or application directory, or a registry reference
    /// (repo/name:tag)
    pub app_name: Option<String>,

    /// Installation name (defaults to the bundle name)
    #[arg(long)]
    pub name: Option<String>,

    /// Orchestrator to install on (swarm, kubernetes)
    #[arg(long, value_name = "ORCHESTRATOR")]
    pub orchestrator: Option<String>,

    /// Kubernetes namespace to install into
    #[arg(long = "kubernetes-namespace", value_name = "NS", default_value = "default")]
    pub kubernetes_namespace: String,

    /// Context of the target runtime
    #[arg(long = "target-context", value_name = "CTX", env = "DECKHAND_TARGET_CONTEXT")]
    pub target_context: Option<String>,

    /// YAML file with parameter values (repeatable, later files win)
    #[arg(long = "parameters-file", value_name = "FILE")]
    pub parameters_files: Vec<PathBuf>,

    /// Override a parameter value (repeatable)
    #[arg(long = "set", short = 's', value_name = "KEY=VALUE")]
    pub overrides: Vec<String>,

    /// Credential set name from the store, or a path to a credential set
    /// file (repeatable, earlier sets win)
    #[arg(long = "credential-set", value_name = "NAME_OR_FILE")]
    pub credential_sets: Vec<String>,

    /// Pull the bundle from the registry when it is not in the local store
    #[arg(long)]
    pub pull: bool,

    /// Forward registry credentials to the install action
    #[arg(long = "with-registry-auth")]
    pub with_registry_auth: bool,
}
