//! Port definitions — traits that adapters implement.

pub mod device_store;

pub use device_store::DeviceStore;
