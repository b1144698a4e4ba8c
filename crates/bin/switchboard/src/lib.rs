//! # switchboard
//!
//! Composition root and interactive front-end for the remote.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars) — see [`config`]
//! - Build the devices and register their buttons on a [`Remote`](switchboard_app::remote::Remote) — see [`setup`]
//! - Run the numbered menu over any reader/writer pair — see [`session`]
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

pub mod config;
pub mod session;
pub mod setup;
