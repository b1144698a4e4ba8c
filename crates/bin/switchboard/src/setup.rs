//! Wiring — builds the devices and binds their commands on a fresh remote.
//!
//! Every device gets two reversible buttons, `"<name> - Ligar"` and
//! `"<name> - Desligar"`. The names are derived from the device itself so a
//! menu selection always resolves to a registered command.

use switchboard_adapter_memory::InMemoryDeviceStore;
use switchboard_app::remote::Remote;
use switchboard_domain::command::{Command, DeviceAction};
use switchboard_domain::device::Device;
use switchboard_domain::error::SwitchboardError;
use switchboard_domain::power::PowerState;

use crate::config::Config;

/// Menu label of an action, also used as the command name suffix.
#[must_use]
pub fn action_label(action: DeviceAction) -> &'static str {
    match action {
        DeviceAction::TurnOn => "Ligar",
        DeviceAction::TurnOff => "Desligar",
    }
}

/// Name of the button running `action` on the device called `device_name`.
#[must_use]
pub fn command_name(device_name: &str, action: DeviceAction) -> String {
    format!("{device_name} - {}", action_label(action))
}

/// Build a remote holding the configured devices and their buttons.
///
/// # Errors
///
/// Returns [`SwitchboardError::Validation`] if a device name is empty or
/// declared twice.
pub fn build_remote(config: &Config) -> Result<Remote<InMemoryDeviceStore>, SwitchboardError> {
    let mut remote = Remote::with_policy(InMemoryDeviceStore::new(), config.remote.undo_policy);

    for entry in &config.devices {
        let device = Device::builder()
            .name(entry.name.as_str())
            .state(PowerState::from(entry.on))
            .build()?;
        let id = remote.add_device(device)?;

        remote.register(
            command_name(&entry.name, DeviceAction::TurnOn),
            Command::turn_on(id),
        );
        remote.register(
            command_name(&entry.name, DeviceAction::TurnOff),
            Command::turn_off(id),
        );
    }

    tracing::debug!(
        devices = config.devices.len(),
        commands = remote.command_names().len(),
        "remote wired"
    );
    Ok(remote)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeviceConfig;
    use switchboard_app::remote::UndoPolicy;

    #[test]
    fn should_format_command_names() {
        assert_eq!(
            command_name("Som", DeviceAction::TurnOn),
            "Som - Ligar"
        );
        assert_eq!(
            command_name("Som", DeviceAction::TurnOff),
            "Som - Desligar"
        );
    }

    #[test]
    fn should_register_two_commands_per_default_device() {
        let remote = build_remote(&Config::default()).unwrap();
        assert_eq!(remote.devices().len(), 5);
        assert_eq!(remote.command_names().len(), 10);
        assert!(remote
            .command("Ventilador de teto da sala - Ligar")
            .is_some());
    }

    #[test]
    fn should_bind_commands_to_their_own_device() {
        let remote = build_remote(&Config::default()).unwrap();
        for device in remote.devices() {
            let on = remote
                .command(&command_name(&device.name, DeviceAction::TurnOn))
                .unwrap();
            let off = remote
                .command(&command_name(&device.name, DeviceAction::TurnOff))
                .unwrap();
            assert_eq!(*on, Command::turn_on(device.id));
            assert_eq!(*off, Command::turn_off(device.id));
        }
    }

    #[test]
    fn should_honour_initial_state_and_policy() {
        let config = Config {
            devices: vec![DeviceConfig {
                name: "Heater".to_string(),
                on: true,
            }],
            remote: crate::config::RemoteConfig {
                undo_policy: UndoPolicy::Replay,
            },
            ..Config::default()
        };
        let remote = build_remote(&config).unwrap();
        let heater = remote.find_device("Heater").unwrap();
        assert_eq!(heater.status(), PowerState::On);
        assert_eq!(remote.policy(), UndoPolicy::Replay);
    }

    #[test]
    fn should_fail_on_duplicate_device() {
        let mut config = Config::default();
        config.devices.push(DeviceConfig {
            name: "Som".to_string(),
            on: false,
        });
        assert!(matches!(
            build_remote(&config),
            Err(SwitchboardError::Validation(_))
        ));
    }
}
