//! # Framework Errors
//!
//! Every failure the framework can report is structural: a bad name, a bad
//! option value, or a reference to something the scope does not own. Nothing
//! here happens at deploy time, so there is no retry or recovery path.

use crate::resource::ResourceType;

/// Errors raised while declaring or wiring resources in a [`Scope`](crate::Scope).
#[derive(Debug, thiserror::Error)]
pub enum ConstructError {
    #[error("Logical name must not be empty")]
    EmptyName,
    #[error("Name conflict in scope '{scope}': '{name}' is already registered")]
    NameConflict { scope: String, name: String },
    #[error("Unknown resource '{name}' in scope '{scope}'")]
    UnknownResource { scope: String, name: String },
    #[error("Handle '{name}' belongs to scope '{scope}'")]
    ForeignHandle { name: String, scope: String },
    #[error("Resource '{name}' is a {found}, expected {expected}")]
    KindMismatch {
        name: String,
        expected: ResourceType,
        found: ResourceType,
    },
    #[error("Invalid options for '{name}': {reason}")]
    InvalidOption { name: String, reason: String },
    #[error("Invalid wiring on '{name}': {reason}")]
    InvalidWiring { name: String, reason: String },
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),
    #[error("Duplicate wiring on '{name}': {detail}")]
    DuplicateWiring { name: String, detail: String },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
