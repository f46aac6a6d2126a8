//! Error types and handling for deckhand
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//! Every failure the orchestration engine can surface lives in one enum so the
//! CLI exit path stays uniform.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for deckhand operations
#[derive(Error, Diagnostic, Debug)]
pub enum DeckhandError {
    // Bundle resolution and validation
    #[error("Failed to resolve application '{reference}': {reason}")]
    #[diagnostic(
        code(deckhand::bundle::resolution_failed),
        help(
            "The application can be a path to a bundle definition, a directory, or a registry reference (repo/name:tag)"
        )
    )]
    ResolutionFailed { reference: String, reason: String },

    #[error("Bundle '{name}' failed validation: {reason}")]
    #[diagnostic(code(deckhand::bundle::validation_failed))]
    ValidationFailed { name: String, reason: String },

    // Installation lifecycle
    #[error("Installation '{name}' already exists")]
    #[diagnostic(
        code(deckhand::install::already_exists),
        help(
            "Use the upgrade path to change an existing installation instead of installing over it"
        )
    )]
    InstallationExists { name: String },

    #[error("Installation '{name}' not found")]
    #[diagnostic(
        code(deckhand::install::not_found),
        help("Run 'deckhand list' to see existing installations")
    )]
    InstallationNotFound { name: String },

    #[error("Invalid installation name: {name}")]
    #[diagnostic(
        code(deckhand::install::invalid_name),
        help("Installation names use lowercase letters, digits, '-', '_' and '.'")
    )]
    InvalidInstallationName { name: String },

    // Parameters
    #[error("Unknown parameter '{name}'")]
    #[diagnostic(
        code(deckhand::params::unknown),
        help(
            "The bundle does not declare this parameter; check the bundle definition for valid names"
        )
    )]
    UnknownParameter { name: String },

    #[error("Invalid value for parameter '{name}': {reason}")]
    #[diagnostic(code(deckhand::params::invalid_value))]
    InvalidParameterValue { name: String, reason: String },

    #[error("Missing required parameters: {names}")]
    #[diagnostic(
        code(deckhand::params::missing),
        help("Supply the missing parameters with --set or a parameters file")
    )]
    MissingParameters { names: String },

    // Credentials
    #[error("Missing credentials: {names}")]
    #[diagnostic(
        code(deckhand::credentials::missing),
        help("Supply a credential set with --credential-set that provides the missing names")
    )]
    MissingCredentials { names: String },

    #[error("Failed to resolve credential '{name}': {reason}")]
    #[diagnostic(code(deckhand::credentials::resolve_failed))]
    CredentialResolveFailed { name: String, reason: String },

    #[error("Credential set '{name}' not found")]
    #[diagnostic(
        code(deckhand::credentials::set_not_found),
        help("Pass either a credential set name from the store or a path to a credential set file")
    )]
    CredentialSetNotFound { name: String },

    // Target resolution
    #[error("No usable execution target: {reason}")]
    #[diagnostic(
        code(deckhand::target::unusable),
        help("Supported orchestrators: swarm, kubernetes")
    )]
    TargetUnusable { reason: String },

    // Action execution
    #[error("{action} failed: {output}")]
    #[diagnostic(code(deckhand::action::failed))]
    ActionFailed { action: String, output: String },

    #[error("Bundle '{bundle}' does not declare a '{action}' action")]
    #[diagnostic(code(deckhand::action::not_declared))]
    ActionNotDeclared { bundle: String, action: String },

    // Store failures
    #[error("Failed to persist installation '{name}': {reason}")]
    #[diagnostic(
        code(deckhand::store::persistence_failed),
        help(
            "The installation may have run without its record being saved; check the store directory"
        )
    )]
    PersistenceFailed { name: String, reason: String },

    #[error("Failed to read from store: {path}: {reason}")]
    #[diagnostic(code(deckhand::store::read_failed))]
    StoreReadFailed { path: String, reason: String },

    // Configuration
    #[error("Failed to parse {path}: {reason}")]
    #[diagnostic(code(deckhand::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("'{feature}' is an experimental feature")]
    #[diagnostic(
        code(deckhand::experimental_disabled),
        help("Set DECKHAND_EXPERIMENTAL=on to enable experimental commands")
    )]
    ExperimentalDisabled { feature: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(deckhand::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for DeckhandError {
    fn from(err: std::io::Error) -> Self {
        DeckhandError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for DeckhandError {
    fn from(err: serde_yaml::Error) -> Self {
        DeckhandError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for DeckhandError {
    fn from(err: serde_json::Error) -> Self {
        DeckhandError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, DeckhandError>;
