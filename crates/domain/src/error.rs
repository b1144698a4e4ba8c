//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`SwitchboardError`] via `#[from]`. None of them are fatal: the remote
//! stays usable after reporting any of these to its caller.

/// Top-level error returned by remote operations.
#[derive(Debug, thiserror::Error)]
pub enum SwitchboardError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// No command is registered under the pressed name.
    #[error("unknown command '{name}'")]
    UnknownCommand { name: String },

    /// `undo_all` was requested while the history was empty.
    #[error("nothing to undo")]
    NothingToUndo,
}

/// Domain invariant violations detected at construction time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("a device named '{name}' already exists")]
    DuplicateDevice { name: String },
}

/// A referenced item does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}
