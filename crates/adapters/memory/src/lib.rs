//! # switchboard-adapter-memory
//!
//! In-process [`DeviceStore`] implementation. Nothing is persisted: devices
//! live as long as the store does.
//!
//! ## Dependency rule
//! Depends on `switchboard-app` (for the port trait) and `switchboard-domain`.

use switchboard_app::ports::DeviceStore;
use switchboard_domain::device::Device;
use switchboard_domain::error::{SwitchboardError, ValidationError};
use switchboard_domain::id::DeviceId;

/// Device store backed by a `Vec`, preserving insertion order.
#[derive(Debug, Default)]
pub struct InMemoryDeviceStore {
    devices: Vec<Device>,
}

impl InMemoryDeviceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

impl DeviceStore for InMemoryDeviceStore {
    fn insert(&mut self, device: Device) -> Result<DeviceId, SwitchboardError> {
        if self.find_by_name(&device.name).is_some() {
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
