//! Per-element inference of control name, kind, format, usages and normalization

use super::{ControlKind, Normalization, StorageFormat, UsageTag};
use crate::{
    report::{local_state::GenericDesktopUsage, local_state::Usage, report_descriptor::ReportType},
    Element,
};

const PRIMARY_USAGES: &[UsageTag] = &[UsageTag::PrimaryTrigger, UsageTag::PrimaryAction];
const SECONDARY_USAGES: &[UsageTag] = &[UsageTag::SecondaryTrigger, UsageTag::SecondaryAction];

/// Positional, rotational and slider usages, all of which map to axes
fn is_axis_usage(usage: GenericDesktopUsage) -> bool {
    use GenericDesktopUsage::*;
    matches!(
        usage,
        X | Y | Z | Rx | Ry | Rz | Vx | Vy | Vz | Vbrx | Vbry | Vbrz | Slider | Dial | Wheel
    )
}

fn is_button_usage(usage: GenericDesktopUsage) -> bool {
    use GenericDesktopUsage::*;
    matches!(usage, Select | Start | DpadUp | DpadDown | DpadRight | DpadLeft)
}

// Below the smallest normal f32, so one logical step of a 32-bit range still counts
fn approximately_zero(v: f32) -> bool {
    v.abs() < f32::MIN_POSITIVE
}

impl Element {
    /// Stable control name
    ///
    /// Device string descriptors are deliberately not used; they are unreliable and not
    /// unique across controls in practice.
    pub fn control_name(&self) -> String {
        let fallback = || format!("UsagePage({:X}) Usage({:X})", self.usage_page, self.usage);

        match self.semantic_usage() {
            Usage::Button(id) => format!("button{}", id),
            Usage::GenericDesktop(usage) => usage.name().map(str::to_string).unwrap_or_else(fallback),
            Usage::Other { .. } => fallback(),
        }
    }

    /// Kind of control this element maps to, `None` if it is not represented in a layout
    ///
    /// Constant fields are padding, and sizes without a storage format can't be read back.
    pub fn control_kind(&self) -> Option<ControlKind> {
        if self.report_type != ReportType::Input
            || self.is_array()
            || self.flags.is_constant()
            || self.storage_format().is_none()
        {
            return None;
        }

        match self.semantic_usage() {
            Usage::Button(_) => Some(ControlKind::Button),
            Usage::GenericDesktop(usage) if is_axis_usage(usage) => Some(ControlKind::Axis),
            Usage::GenericDesktop(usage) if is_button_usage(usage) => Some(ControlKind::Button),
            Usage::GenericDesktop(_) | Usage::Other { .. } => None,
        }
    }

    pub fn storage_format(&self) -> Option<StorageFormat> {
        let signed = self.is_signed();
        match self.report_size_in_bits {
            1 => Some(StorageFormat::Bit),
            8 if signed => Some(StorageFormat::SByte),
            8 => Some(StorageFormat::Byte),
            16 if signed => Some(StorageFormat::Short),
            16 => Some(StorageFormat::UShort),
            32 if signed => Some(StorageFormat::Int),
            32 => Some(StorageFormat::UInt),
            _ => None,
        }
    }

    /// Whether the element becomes a control of the generic layout
    pub fn is_usable(&self) -> bool {
        self.control_kind().is_some() && self.storage_format().is_some()
    }

    pub fn usage_tags(&self) -> &'static [UsageTag] {
        match self.semantic_usage() {
            Usage::Button(0) => PRIMARY_USAGES,
            Usage::Button(1) => SECONDARY_USAGES,
            _ => &[],
        }
    }

    fn to_float(&self, v: f64) -> f32 {
        let divisor = match (self.report_size_in_bits, self.is_signed()) {
            (8, true) => 128.0,
            (8, false) => 255.0,
            (16, true) => 32768.0,
            (16, false) => 65536.0,
            (32, true) => 2147483648.0,
            (32, false) => 4294967296.0,
            _ => return 0.0,
        };
        (v / divisor) as f32
    }

    /// Logical minimum mapped into `[-1, 1]` (signed) or `[0, 1]` (unsigned)
    pub fn min_float_value(&self) -> f32 {
        self.to_float(self.logical_min as f64)
    }

    /// Logical maximum mapped into `[-1, 1]` (signed) or `[0, 1]` (unsigned)
    pub fn max_float_value(&self) -> f32 {
        if self.is_signed() {
            self.to_float(self.logical_max as f64)
        } else {
            // Unsigned 32-bit maxima past i32::MAX are stored wrapped
            self.to_float(self.logical_max as u32 as f64)
        }
    }

    /// Normalization for axis-class usages
    ///
    /// The zero point is the middle of the range. The resting value of an unknown axis
    /// can't be assumed to be its logical zero: triggers rest at their minimum, sticks at
    /// their center.
    pub fn normalization(&self) -> Option<Normalization> {
        match self.semantic_usage() {
            Usage::GenericDesktop(usage) if is_axis_usage(usage) => (),
            _ => return None,
        }

        if self.logical_min == 0 && self.logical_max == 0 {
            return None;
        }

        let min = self.min_float_value();
        let max = self.max_float_value();
        if approximately_zero(min) && approximately_zero(max) {
            return None;
        }

        Some(Normalization {
            min,
            max,
            zero: min + (max - min) / 2.0,
        })
    }

    /// Logical units per physical unit
    ///
    /// Informational only. The physical range stands in for the logical range when
    /// physical minimum and maximum are both zero.
    pub fn resolution(&self) -> Option<f64> {
        let logical_range = self.logical_max as f64 - self.logical_min as f64;
        let range = if self.physical_min == 0 && self.physical_max == 0 {
            logical_range
        } else {
            self.physical_max as f64 - self.physical_min as f64
        };

        let divisor = range * 10f64.powi(self.unit_exponent);
        if divisor == 0.0 {
            None
        } else {
            Some(logical_range / divisor)
        }
    }
}
