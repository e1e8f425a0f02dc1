use serde::{Deserialize, Serialize};

use crate::report::{
    local_state::Usage,
    report_descriptor::{ElementFlags, ReportType},
};

/// One field within one report
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Element {
    pub usage: u16,
    pub usage_page: u16,
    pub unit: u32,
    pub unit_exponent: i32,
    pub logical_min: i32,
    pub logical_max: i32,
    pub physical_min: i32,
    pub physical_max: i32,
    pub report_type: ReportType,
    /// Index of the owning collection, -1 outside any collection
    #[serde(default = "super::no_collection")]
    pub collection_index: i32,
    /// 0 when the report carries no report id
    pub report_id: u8,
    pub report_size_in_bits: u32,
    pub report_offset_in_bits: u32,
    pub flags: ElementFlags,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_min: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_max: Option<u16>,
}

impl Element {
    /// Usage resolved against the element's usage page
    pub fn semantic_usage(&self) -> Usage {
        Usage::new(self.usage_page, self.usage)
    }

    pub fn is_array(&self) -> bool {
        !self.flags.is_variable()
    }

    pub fn is_signed(&self) -> bool {
        self.logical_min < 0
    }
}
