//! HID descriptor parsing and generic layout inference
//!
//! Turns a device's binary HID Report Descriptor into a [`DeviceDescriptor`], and from that
//! synthesizes a [`LayoutSpec`] describing the device's buttons and axes as generic controls.
//!
//! Transports are not part of this crate. Descriptor bytes are requested through the
//! [`DeviceCommands`] trait, and layouts are handed to whatever implements
//! [`LayoutRegistry`].
//!
//! Parsed descriptors are cached as JSON on the [`DeviceDescription`] so a device only has
//! to be queried once.

pub mod descriptor;
pub mod devices;
pub mod layout;
pub mod report;

mod error;

#[cfg(test)]
mod fixtures;

pub use descriptor::*;
pub use devices::*;
pub use error::*;
pub use layout::*;
pub use report::parse_report_descriptor;
