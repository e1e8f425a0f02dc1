//! HID Global State
mod usage_page;

pub use usage_page::*;

use crate::report::report_descriptor::tags::ItemValue;

/// Global parse state table
///
/// Global state applies to all following main items (Input / Output / Feature) encountered in
/// a report descriptor, until overwritten or popped.
#[derive(Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct GlobalState {
    pub usage_page: Option<u16>,
    pub logical_minimum: Option<ItemValue>,
    pub logical_maximum: Option<ItemValue>,
    pub physical_minimum: Option<ItemValue>,
    pub physical_maximum: Option<ItemValue>,
    pub unit_exponent: Option<i32>,
    pub unit: Option<u32>,
    pub report_size: Option<u32>,
    pub report_id: Option<u8>,
    pub report_count: Option<u32>,
}

impl GlobalState {
    /// Logical minimum and maximum, with the maximum read unsigned when the minimum is
    /// non-negative
    pub fn logical_range(&self) -> (i32, i32) {
        resolve_range(self.logical_minimum, self.logical_maximum)
    }

    /// Physical minimum and maximum, falling back to the logical range when both are
    /// undefined or zero
    pub fn physical_range(&self) -> (i32, i32) {
        if self.physical_minimum.is_none() && self.physical_maximum.is_none() {
            return self.logical_range();
        }

        match resolve_range(self.physical_minimum, self.physical_maximum) {
            (0, 0) => self.logical_range(),
            range => range,
        }
    }
}

fn resolve_range(minimum: Option<ItemValue>, maximum: Option<ItemValue>) -> (i32, i32) {
    let minimum = minimum.map(|v| v.signed()).unwrap_or_default();
    let maximum = maximum
        .map(|v| {
            if minimum >= 0 {
                i32::try_from(v.unsigned()).unwrap_or_else(|_| v.signed())
            } else {
                v.signed()
            }
        })
        .unwrap_or_default();

    (minimum, maximum)
}

impl std::fmt::Debug for GlobalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("GlobalState");

        if let Some(usage_page) = self.usage_page {
            s.field("usage_page", &usage_page);
        }

        if let Some(logical_minimum) = self.logical_minimum {
            s.field("logical_minimum", &logical_minimum.signed());
        }

        if let Some(logical_maximum) = self.logical_maximum {
            s.field("logical_maximum", &logical_maximum.signed());
        }

        if let Some(physical_minimum) = self.physical_minimum {
            s.field("physical_minimum", &physical_minimum.signed());
        }

        if let Some(physical_maximum) = self.physical_maximum {
            s.field("physical_maximum", &physical_maximum.signed());
        }

        if let Some(unit_exponent) = self.unit_exponent {
            s.field("unit_exponent", &unit_exponent);
        }

        if let Some(unit) = self.unit {
            s.field("unit", &unit);
        }

        if let Some(report_size) = self.report_size {
            s.field("report_size", &report_size);
        }

        if let Some(report_id) = self.report_id {
            s.field("report_id", &report_id);
        }

        if let Some(report_count) = self.report_count {
            s.field("report_count", &report_count);
        }

        s.finish()
    }
}
