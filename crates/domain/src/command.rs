//! Command — a unit of work bound to a device.
//!
//! Commands are plain data: the forward [`DeviceAction`] and, for reversible
//! commands, the inverse one. The inverse is never derived; whoever builds a
//! [`Command::Reversible`] is responsible for pairing two actions that truly
//! cancel each other out. [`Command::turn_on`] and [`Command::turn_off`]
//! build the usual pairs.

use serde::{Deserialize, Serialize};

use crate::id::DeviceId;
use crate::power::PowerState;

/// An elementary operation on a single device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceAction {
    TurnOn,
    TurnOff,
}

impl DeviceAction {
    /// State the device is in once the action ran.
    #[must_use]
    pub fn target_state(self) -> PowerState {
        match self {
            Self::TurnOn => PowerState::On,
            Self::TurnOff => PowerState::Off,
        }
    }

    /// The action that cancels this one.
    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            Self::TurnOn => Self::TurnOff,
            Self::TurnOff => Self::TurnOn,
        }
    }
}

impl std::fmt::Display for DeviceAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TurnOn => f.write_str("turn_on"),
            Self::TurnOff => f.write_str("turn_off"),
        }
    }
}

/// A command the remote can execute, and possibly undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Runs one action on one device, with no way back.
    Direct {
        device_id: DeviceId,
        action: DeviceAction,
    },
    /// Runs `forward` on execute and `inverse` on undo.
    Reversible {
        device_id: DeviceId,
        forward: DeviceAction,
        inverse: DeviceAction,
    },
}

impl Command {
    #[must_use]
    pub fn direct(device_id: DeviceId, action: DeviceAction) -> Self {
        Self::Direct { device_id, action }
    }

    #[must_use]
    pub fn reversible(device_id: DeviceId, forward: DeviceAction, inverse: DeviceAction) -> Self {
        Self::Reversible {
            device_id,
            forward,
            inverse,
        }
    }

    /// Reversible command switching the device on, undone by switching it off.
    #[must_use]
    pub fn turn_on(device_id: DeviceId) -> Self {
        Self::reversible(device_id, DeviceAction::TurnOn, DeviceAction::TurnOff)
    }

    /// Reversible command switching the device off, undone by switching it on.
    #[must_use]
    pub fn turn_off(device_id: DeviceId) -> Self {
        Self::reversible(device_id, DeviceAction::TurnOff, DeviceAction::TurnOn)
    }

    #[must_use]
    pub fn device_id(&self) -> DeviceId {
        match self {
            Self::Direct { device_id, .. } | Self::Reversible { device_id, .. } => *device_id,
        }
    }

    /// Action run by `execute`.
    #[must_use]
    pub fn forward(&self) -> DeviceAction {
        match self {
            Self::Direct { action, .. } => *action,
            Self::Reversible { forward, .. } => *forward,
        }
    }

    /// Action run by `undo`, if any.
    #[must_use]
    pub fn undo_action(&self) -> Option<DeviceAction> {
        match self {
            Self::Direct { .. } => None,
            Self::Reversible { inverse, .. } => Some(*inverse),
        }
    }

    #[must_use]
    pub fn is_reversible(&self) -> bool {
        self.undo_action().is_some()
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Direct { device_id, action } => write!(f, "{action}({device_id})"),
            Self::Reversible {
                device_id,
                forward,
                inverse,
            } => write!(f, "{forward}({device_id}) undo {inverse}"),
        }
    }
}
