//! # switchboard-app
//!
//! Application layer — the remote control and its **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the `DeviceStore` port that adapters implement
//! - Provide the [`Remote`](remote::Remote): a registry of named commands
//!   that executes them on press and records reversible ones in a
//!   [`History`](history::History) for `undo_all`
//! - Decide how an undo behaves when the paired press was a no-op
//!   ([`UndoPolicy`](remote::UndoPolicy))
//!
//! ## Dependency rule
//! Depends on `switchboard-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod history;
pub mod ports;
pub mod remote;
