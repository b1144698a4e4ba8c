//! Device store port — where the remote keeps the devices its commands target.
//!
//! Commands only carry a [`DeviceId`]; the store owns the devices and hands
//! out mutable access while a command executes or is undone.

use switchboard_domain::device::Device;
use switchboard_domain::error::SwitchboardError;
use switchboard_domain::id::DeviceId;

/// Owns the set of controllable devices.
pub trait DeviceStore {
    /// Add a device to the store.
    ///
    /// # Errors
    ///
    /// Returns [`SwitchboardError::Validation`] if another device already
    /// uses the same name.
    fn insert(&mut self, device: Device) -> Result<DeviceId, SwitchboardError>;

    fn get(&self, id: DeviceId) -> Option<&Device>;

    fn get_mut(&mut self, id: DeviceId) -> Option<&mut Device>;

    fn find_by_name(&self, name: &str) -> Option<&Device>;

    /// All devices, in insertion order.
    fn list(&self) -> Vec<&Device>;
}
