//! Device — a named thing holding a binary on/off state.
//!
//! The state only moves through [`Device::turn_on`] and [`Device::turn_off`].
//! Asking for the state a device is already in is not an error: it returns
//! [`Transition::Unchanged`] so the caller can report the no-op.

use serde::{Deserialize, Serialize};

use crate::command::DeviceAction;
use crate::error::{SwitchboardError, ValidationError};
use crate::id::DeviceId;
use crate::power::PowerState;

/// Outcome of asking a device to move to a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The device moved from one state to the other.
    Changed { from: PowerState, to: PowerState },
    /// The device was already in the requested state.
    Unchanged { state: PowerState },
}

impl Transition {
    #[must_use]
    pub fn is_changed(self) -> bool {
        matches!(self, Self::Changed { .. })
    }

    /// State of the device once the transition was applied.
    #[must_use]
    pub fn state(self) -> PowerState {
        match self {
            Self::Changed { to, .. } => to,
            Self::Unchanged { state } => state,
        }
    }
}

/// A controllable device with a fixed name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    state: PowerState,
}

impl Device {
    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SwitchboardError::Validation`] when `name` is empty.
    pub fn validate(&self) -> Result<(), SwitchboardError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }

    /// Switch the device on.
    pub fn turn_on(&mut self) -> Transition {
        self.switch_to(PowerState::On)
    }

    /// Switch the device off.
    pub fn turn_off(&mut self) -> Transition {
        self.switch_to(PowerState::Off)
    }

    /// Run a single [`DeviceAction`] against this device.
    pub fn apply(&mut self, action: DeviceAction) -> Transition {
        match action {
            DeviceAction::TurnOn => self.turn_on(),
            DeviceAction::TurnOff => self.turn_off(),
        }
    }

    #[must_use]
    pub fn status(&self) -> PowerState {
        self.state
    }

    fn switch_to(&mut self, target: PowerState) -> Transition {
        if self.state == target {
            return Transition::Unchanged { state: target };
        }
        let from = std::mem::replace(&mut self.state, target);
        Transition::Changed { from, to: target }
    }
}

/// Step-by-step builder for [`Device`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    id: Option<DeviceId>,
    name: Option<String>,
    state: Option<PowerState>,
}

impl DeviceBuilder {
    #[must_use]
    pub fn id(mut self, id: DeviceId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Initial state, `Off` when not provided.
    #[must_use]
    pub fn state(mut self, state: PowerState) -> Self {
        self.state = Some(state);
        self
    }

    /// Consume the builder, validate, and return a [`Device`].
    ///
    /// # Errors
    ///
    /// Returns [`SwitchboardError::Validation`] if `name` is missing or empty.
    pub fn build(self) -> Result<Device, SwitchboardError> {
        let device = Device {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            state: self.state.unwrap_or_default(),
        };
        device.validate()?;
        Ok(device)
    }
}
