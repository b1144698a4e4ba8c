//! Remote — the named-command registry with its undo history.
//!
//! A press looks the command up by name, runs its forward action on the
//! target device and, when the command is reversible, records it. `undo_all`
//! then drains that record in reverse execution order.

use std::collections::HashMap;

use serde::Deserialize;
use switchboard_domain::command::Command;
use switchboard_domain::device::{Device, Transition};
use switchboard_domain::error::{NotFoundError, SwitchboardError};
use switchboard_domain::id::DeviceId;
use switchboard_domain::power::PowerState;

use crate::history::{History, HistoryEntry};
use crate::ports::DeviceStore;

/// How `undo_all` treats a command whose press did not change its device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UndoPolicy {
    /// Apply the inverse only if the press changed the device, so every
    /// device ends up exactly as it was before the press.
    #[default]
    Restore,
    /// Always apply the inverse. A press that was a no-op (device already in
    /// the target state) gets "undone" into the opposite state.
    Replay,
}

impl UndoPolicy {
    /// Parse the lowercase policy name used in configuration.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "restore" => Some(Self::Restore),
            "replay" => Some(Self::Replay),
            _ => None,
        }
    }
}

/// Result of a successful press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Press {
    pub device_id: DeviceId,
    pub transition: Transition,
    /// Whether the command went into the history.
    pub recorded: bool,
}

/// What undoing a single history entry did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoOutcome {
    /// The inverse action ran.
    Applied(Transition),
    /// Nothing to revert: the press was a no-op, or the device is gone.
    Skipped,
}

/// One entry drained by `undo_all`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Undone {
    pub name: String,
    pub device_id: DeviceId,
    pub outcome: UndoOutcome,
}

/// Command registry bound to a device store.
pub struct Remote<S> {
    store: S,
    commands: HashMap<String, Command>,
    history: History,
    policy: UndoPolicy,
}

impl<S: DeviceStore> Remote<S> {
    /// Create a remote using the default [`UndoPolicy::Restore`].
    pub fn new(store: S) -> Self {
        Self::with_policy(store, UndoPolicy::default())
    }

    pub fn with_policy(store: S, policy: UndoPolicy) -> Self {
        Self {
            store,
            commands: HashMap::new(),
            history: History::default(),
            policy,
        }
    }

    /// Hand a device over to the remote's store.
    ///
    /// # Errors
    ///
    /// Returns [`SwitchboardError::Validation`] if the device is invalid or
    /// its name is already taken.
    #[tracing::instrument(skip(self, device), fields(device = %device.name))]
    pub fn add_device(&mut self, device: Device) -> Result<DeviceId, SwitchboardError> {
        device.validate()?;
        self.store.insert(device)
    }

    /// Bind `command` to `name`, replacing any previous binding.
    pub fn register(&mut self, name: impl Into<String>, command: Command) {
        let name = name.into();
        if let Some(previous) = self.commands.insert(name.clone(), command) {
            tracing::debug!(command = %name, %previous, "overwrote command binding");
        }
    }

    /// Execute the command bound to `name`.
    ///
    /// # Errors
    ///
    /// Returns [`SwitchboardError::UnknownCommand`] when nothing is bound to
    /// `name`, or [`SwitchboardError::NotFound`] when the target device is
    /// not in the store. In both cases nothing is executed or recorded.
    #[tracing::instrument(skip(self))]
    pub fn press(&mut self, name: &str) -> Result<Press, SwitchboardError> {
        let Some(command) = self.commands.get(name).copied() else {
            tracing::warn!(command = name, "unknown command");
            return Err(SwitchboardError::UnknownCommand {
                name: name.to_string(),
            });
        };

        let device_id = command.device_id();
        let device = self.store.get_mut(device_id).ok_or_else(|| NotFoundError {
            entity: "Device",
            id: device_id.to_string(),
        })?;
        let transition = device.apply(command.forward());
        tracing::debug!(
            command = name,
            device = %device.name,
            action = %command.forward(),
            changed = transition.is_changed(),
            "command executed"
        );

        let recorded = command.is_reversible();
        if recorded {
            self.history
                .push(HistoryEntry::new(name, command, transition));
        }

        Ok(Press {
            device_id,
            transition,
            recorded,
        })
    }

    /// Undo every recorded command, most recent first, until the history is empty.
    ///
    /// # Errors
    ///
    /// Returns [`SwitchboardError::NothingToUndo`] when the history is
    /// already empty. Calling it again changes nothing.
    #[tracing::instrument(skip(self), fields(pending = self.history.len()))]
    pub fn undo_all(&mut self) -> Result<Vec<Undone>, SwitchboardError> {
        if self.history.is_empty() {
            tracing::debug!("nothing to undo");
            return Err(SwitchboardError::NothingToUndo);
        }

        let mut undone = Vec::with_capacity(self.history.len());
        while let Some(entry) = self.history.pop() {
            undone.push(self.undo_entry(entry));
        }
        tracing::info!(count = undone.len(), "history unwound");
        Ok(undone)
    }

    fn undo_entry(&mut self, entry: HistoryEntry) -> Undone {
        let device_id = entry.command.device_id();
        let outcome = match entry.command.undo_action() {
            Some(_) if self.policy == UndoPolicy::Restore && !entry.transition.is_changed() => {
                UndoOutcome::Skipped
            }
            Some(inverse) => match self.store.get_mut(device_id) {
                Some(device) => {
                    let transition = device.apply(inverse);
                    tracing::debug!(
                        command = %entry.name,
                        device = %device.name,
                        action = %inverse,
                        changed = transition.is_changed(),
                        "command undone"
                    );
                    UndoOutcome::Applied(transition)
                }
                None => {
                    tracing::warn!(command = %entry.name, %device_id, "device vanished before undo");
                    UndoOutcome::Skipped
                }
            },
            None => UndoOutcome::Skipped,
        };

        Undone {
            name: entry.name,
            device_id,
            outcome,
        }
    }

    #[must_use]
    pub fn policy(&self) -> UndoPolicy {
        self.policy
    }

    #[must_use]
    pub fn device(&self, id: DeviceId) -> Option<&Device> {
        self.store.get(id)
    }

    #[must_use]
    pub fn find_device(&self, name: &str) -> Option<&Device> {
        self.store.find_by_name(name)
    }

    /// Devices in the order they were added.
    #[must_use]
    pub fn devices(&self) -> Vec<&Device> {
        self.store.list()
    }

    #[must_use]
    pub fn status(&self, id: DeviceId) -> Option<PowerState> {
        self.store.get(id).map(Device::status)
    }

    #[must_use]
    pub fn command(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    /// Registered command names, sorted.
    #[must_use]
    pub fn command_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use switchboard_domain::command::DeviceAction;
    use switchboard_domain::error::ValidationError;

    #[derive(Default)]
    struct VecDeviceStore {
        devices: Vec<Device>,
    }

    impl DeviceStore for VecDeviceStore {
        fn insert(&mut self, device: Device) -> Result<DeviceId, SwitchboardError> {
            if self.devices.iter().any(|d| d.name == device.name) {
                return Err(ValidationError::DuplicateDevice { name: device.name }.into());
            }
            let id = device.id;
            self.devices.push(device);
            Ok(id)
        }

        fn get(&self, id: DeviceId) -> Option<&Device> {
            self.devices.iter().find(|d| d.id == id)
        }

        fn get_mut(&mut self, id: DeviceId) -> Option<&mut Device> {
            self.devices.iter_mut().find(|d| d.id == id)
        }

        fn find_by_name(&self, name: &str) -> Option<&Device> {
            self.devices.iter().find(|d| d.name == name)
        }

        fn list(&self) -> Vec<&Device> {
            self.devices.iter().collect()
        }
    }

    fn device(name: &str, state: PowerState) -> Device {
        Device::builder().name(name).state(state).build().unwrap()
    }

    /// Remote with a single lamp and its two reversible commands.
    fn lamp_remote(policy: UndoPolicy, initial: PowerState) -> (Remote<VecDeviceStore>, DeviceId) {
        let mut remote = Remote::with_policy(VecDeviceStore::default(), policy);
        let lamp = remote.add_device(device("Lamp", initial)).unwrap();
        remote.register("Lamp-On", Command::turn_on(lamp));
        remote.register("Lamp-Off", Command::turn_off(lamp));
        (remote, lamp)
    }

    #[test]
    fn should_run_lamp_scenario_and_unwind_in_reverse_order() {
        let (mut remote, lamp) = lamp_remote(UndoPolicy::Restore, PowerState::Off);

        remote.press("Lamp-On").unwrap();
        assert_eq!(remote.status(lamp), Some(PowerState::On));
        assert_eq!(remote.history().len(), 1);

        remote.press("Lamp-Off").unwrap();
        assert_eq!(remote.status(lamp), Some(PowerState::Off));
        assert_eq!(remote.history().len(), 2);

        let undone = remote.undo_all().unwrap();
        assert_eq!(undone.len(), 2);
        assert_eq!(undone[0].name, "Lamp-Off");
        assert_eq!(
            undone[0].outcome,
            UndoOutcome::Applied(Transition::Changed {
                from: PowerState::Off,
                to: PowerState::On
            })
        );
        assert_eq!(undone[1].name, "Lamp-On");
        assert_eq!(
            undone[1].outcome,
            UndoOutcome::Applied(Transition::Changed {
                from: PowerState::On,
                to: PowerState::Off
            })
        );
        assert_eq!(remote.status(lamp), Some(PowerState::Off));
        assert!(remote.history().is_empty());
    }

    #[test]
    fn should_restore_pre_press_state_for_every_starting_state() {
        for initial in [PowerState::On, PowerState::Off] {
            for name in ["Lamp-On", "Lamp-Off"] {
                let (mut remote, lamp) = lamp_remote(UndoPolicy::Restore, initial);
                remote.press(name).unwrap();
                remote.undo_all().unwrap();
                assert_eq!(
                    remote.status(lamp),
                    Some(initial),
                    "{name} starting {initial}"
                );
            }
        }
    }

    #[test]
    fn should_restore_every_device_after_a_sequence_of_presses() {
        let mut remote = Remote::new(VecDeviceStore::default());
        let lamp = remote.add_device(device("Lamp", PowerState::Off)).unwrap();
        let fan = remote.add_device(device("Fan", PowerState::On)).unwrap();
        remote.register("Lamp-On", Command::turn_on(lamp));
        remote.register("Lamp-Off", Command::turn_off(lamp));
        remote.register("Fan-On", Command::turn_on(fan));
        remote.register("Fan-Off", Command::turn_off(fan));

        for name in ["Lamp-On", "Fan-Off", "Fan-Off", "Lamp-On", "Fan-On", "Lamp-Off"] {
            remote.press(name).unwrap();
        }
        assert_eq!(remote.history().len(), 6);

        remote.undo_all().unwrap();
        assert_eq!(remote.status(lamp), Some(PowerState::Off));
        assert_eq!(remote.status(fan), Some(PowerState::On));
        assert!(remote.history().is_empty());
    }

    #[test]
    fn should_skip_inverse_when_press_was_a_noop_under_restore_policy() {
        let (mut remote, lamp) = lamp_remote(UndoPolicy::Restore, PowerState::On);

        let press = remote.press("Lamp-On").unwrap();
        assert!(!press.transition.is_changed());
        assert!(press.recorded);

        let undone = remote.undo_all().unwrap();
        assert_eq!(undone[0].outcome, UndoOutcome::Skipped);
        assert_eq!(remote.status(lamp), Some(PowerState::On));
    }

    /// Replay keeps the unconditional inverse: undoing a no-op press flips
    /// the device away from the state it had before the press.
    #[test]
    fn should_apply_inverse_after_noop_press_under_replay_policy() {
        let (mut remote, lamp) = lamp_remote(UndoPolicy::Replay, PowerState::On);

        remote.press("Lamp-On").unwrap();
        let undone = remote.undo_all().unwrap();

        assert!(matches!(undone[0].outcome, UndoOutcome::Applied(t) if t.is_changed()));
        assert_eq!(remote.status(lamp), Some(PowerState::Off));
    }

    #[test]
    fn should_report_nothing_to_undo_repeatedly_without_side_effects() {
        let (mut remote, lamp) = lamp_remote(UndoPolicy::Restore, PowerState::On);
        for _ in 0..3 {
            assert!(matches!(
                remote.undo_all(),
                Err(SwitchboardError::NothingToUndo)
            ));
            assert_eq!(remote.status(lamp), Some(PowerState::On));
            assert!(remote.history().is_empty());
        }
    }

    #[test]
    fn should_report_nothing_to_undo_after_history_was_drained() {
        let (mut remote, _) = lamp_remote(UndoPolicy::Restore, PowerState::Off);
        remote.press("Lamp-On").unwrap();
        remote.undo_all().unwrap();
        assert!(matches!(
            remote.undo_all(),
            Err(SwitchboardError::NothingToUndo)
        ));
    }

    #[test]
    fn should_leave_state_unchanged_when_pressing_unknown_command() {
        let (mut remote, lamp) = lamp_remote(UndoPolicy::Restore, PowerState::Off);
        remote.press("Lamp-On").unwrap();

        let result = remote.press("Garage-On");
        assert!(
            matches!(result, Err(SwitchboardError::UnknownCommand { ref name }) if name == "Garage-On")
        );
        assert_eq!(remote.history().len(), 1);
        assert_eq!(remote.command_names(), ["Lamp-Off", "Lamp-On"]);
        assert_eq!(remote.status(lamp), Some(PowerState::On));

        // still usable afterwards
        remote.press("Lamp-Off").unwrap();
        assert_eq!(remote.history().len(), 2);
    }

    #[test]
    fn should_overwrite_binding_when_registering_same_name() {
        let (mut remote, lamp) = lamp_remote(UndoPolicy::Restore, PowerState::Off);
        remote.register("Lamp-On", Command::turn_off(lamp));

        assert_eq!(remote.command_names().len(), 2);
        assert_eq!(remote.command("Lamp-On"), Some(&Command::turn_off(lamp)));
    }

    #[test]
    fn should_execute_direct_command_without_recording_it() {
        let (mut remote, lamp) = lamp_remote(UndoPolicy::Restore, PowerState::Off);
        remote.register("Lamp-Force-On", Command::direct(lamp, DeviceAction::TurnOn));

        let press = remote.press("Lamp-Force-On").unwrap();
        assert!(!press.recorded);
        assert_eq!(remote.status(lamp), Some(PowerState::On));
        assert!(remote.history().is_empty());
    }

    #[test]
    fn should_return_not_found_when_target_device_is_missing() {
        let mut remote = Remote::new(VecDeviceStore::default());
        remote.register("Ghost-On", Command::turn_on(DeviceId::new()));

        let result = remote.press("Ghost-On");
        assert!(matches!(result, Err(SwitchboardError::NotFound(_))));
        assert!(remote.history().is_empty());
    }

    #[test]
    fn should_reject_duplicate_device_name() {
        let mut remote = Remote::new(VecDeviceStore::default());
        remote.add_device(device("Lamp", PowerState::Off)).unwrap();
        let result = remote.add_device(device("Lamp", PowerState::On));
        assert!(matches!(
            result,
            Err(SwitchboardError::Validation(
                ValidationError::DuplicateDevice { .. }
            ))
        ));
    }

    #[test]
    fn should_parse_policy_names() {
        assert_eq!(UndoPolicy::from_name("restore"), Some(UndoPolicy::Restore));
        assert_eq!(UndoPolicy::from_name(" Replay "), Some(UndoPolicy::Replay));
        assert_eq!(UndoPolicy::from_name("toggle"), None);
    }
}
