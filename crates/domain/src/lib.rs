//! # switchboard-domain
//!
//! Pure domain model for the switchboard remote control.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Devices** (named things holding a binary on/off state)
//! - Define **Commands** (a forward [`DeviceAction`](command::DeviceAction) and,
//!   for reversible commands, its explicit inverse)
//! - Report state changes as [`Transition`](device::Transition)s so callers can
//!   tell an effective change from a no-op
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or IO crates.

pub mod error;
pub mod id;
pub mod time;

pub mod command;
pub mod device;
pub mod power;
