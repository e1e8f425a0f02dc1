//! Device-facing side of layout generation
//!
//! A device is known through its [`DeviceDescription`] and talked to through
//! [`DeviceCommands`]. The [`LayoutResolver`] ties the two together: it acquires the
//! device's descriptor, caches it on the description, and registers a generic layout.
mod config;
mod device_id;
mod device_name;
mod resolver;

pub use config::*;
pub use device_id::*;
pub use device_name::*;
pub use resolver::*;

use crate::TransportError;

/// Runtime handle of an attached device
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeviceHandle(pub u32);

/// What the host knows about a device before its descriptor has been read
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DeviceDescription {
    pub interface_name: String,
    pub manufacturer: Option<String>,
    pub product: Option<String>,
    /// Cached [`DeviceDescriptor`](crate::DeviceDescriptor) as JSON
    ///
    /// May hold a partial descriptor (ids and report sizes only) before resolution.
    pub capabilities: Option<String>,
}

impl DeviceDescription {
    pub fn new(interface_name: impl Into<String>) -> Self {
        DeviceDescription {
            interface_name: interface_name.into(),
            ..Default::default()
        }
    }

    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    pub fn with_product(mut self, product: impl Into<String>) -> Self {
        self.product = Some(product.into());
        self
    }

    pub fn with_capabilities(mut self, capabilities: impl Into<String>) -> Self {
        self.capabilities = Some(capabilities.into());
        self
    }

    pub fn device_name(&self) -> Option<DeviceName> {
        DeviceName::from_strings(self.manufacturer.as_deref(), self.product.as_deref())
    }
}

/// Descriptor queries a device transport answers
pub trait DeviceCommands {
    /// Size in bytes of the binary report descriptor, 0 if it can't be provided
    fn query_report_descriptor_size(&mut self, device: DeviceHandle)
        -> Result<i64, TransportError>;

    /// Copy the binary report descriptor into `buffer`, returning the number of bytes written
    fn query_report_descriptor(
        &mut self,
        device: DeviceHandle,
        buffer: &mut [u8],
    ) -> Result<usize, TransportError>;

    /// Copy a pre-parsed descriptor as UTF-8 JSON into `buffer`
    ///
    /// Returns the number of bytes written, negative on failure.
    fn query_parsed_report_descriptor(
        &mut self,
        device: DeviceHandle,
        buffer: &mut [u8],
    ) -> Result<i64, TransportError>;
}

impl<T: DeviceCommands + ?Sized> DeviceCommands for &mut T {
    fn query_report_descriptor_size(
        &mut self,
        device: DeviceHandle,
    ) -> Result<i64, TransportError> {
        (**self).query_report_descriptor_size(device)
    }

    fn query_report_descriptor(
        &mut self,
        device: DeviceHandle,
        buffer: &mut [u8],
    ) -> Result<usize, TransportError> {
        (**self).query_report_descriptor(device, buffer)
    }

    fn query_parsed_report_descriptor(
        &mut self,
        device: DeviceHandle,
        buffer: &mut [u8],
    ) -> Result<i64, TransportError> {
        (**self).query_parsed_report_descriptor(device, buffer)
    }
}

#[cfg(test)]
mod tests;
