//! Structured result of parsing a HID Report Descriptor
//!
//! The [`DeviceDescriptor`] is what gets cached on a device's description, so its serialized
//! shape is the wire format shared with platforms that hand out pre-parsed descriptors.
mod collection;
mod element;

pub use collection::*;
pub use element::*;

use serde::{Deserialize, Serialize};

use crate::{report::global_state::UsagePage, DecodeError};

// Collection index fields left out of a cached blob point outside any collection
fn no_collection() -> i32 {
    -1
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeviceDescriptor {
    pub vendor_id: u16,
    pub product_id: u16,
    pub usage: u16,
    pub usage_page: u16,
    /// Largest input report in bytes, report id included
    pub input_report_size: u32,
    pub output_report_size: u32,
    pub feature_report_size: u32,
    pub elements: Vec<Element>,
    pub collections: Vec<Collection>,
}

impl DeviceDescriptor {
    pub fn from_json(json: &str) -> Result<Self, DecodeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode a descriptor from UTF-8 JSON bytes
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        DeviceDescriptor::from_json(std::str::from_utf8(bytes)?)
    }

    pub fn to_json(&self) -> Result<String, DecodeError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn top_level_usage_page(&self) -> UsagePage {
        UsagePage::from(self.usage_page)
    }

    /// Carry over identity a platform already knew about the device
    ///
    /// Report sizes are only taken when the platform reported them.
    pub fn with_identity_of(mut self, known: &DeviceDescriptor) -> Self {
        self.vendor_id = known.vendor_id;
        self.product_id = known.product_id;

        if known.input_report_size != 0 {
            self.input_report_size = known.input_report_size;
        }

        if known.output_report_size != 0 {
            self.output_report_size = known.output_report_size;
        }

        if known.feature_report_size != 0 {
            self.feature_report_size = known.feature_report_size;
        }

        self
    }
}
