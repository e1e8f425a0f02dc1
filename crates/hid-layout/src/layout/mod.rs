//! Generic control layouts inferred from a [`DeviceDescriptor`](crate::DeviceDescriptor)
//!
//! Construction is two-phase: [`build_layout_spec`] is a pure function of the descriptor,
//! and [`LayoutBuilder`] defers that call until a registry actually needs the layout.
mod builder;
mod inference;
mod registry;

pub use builder::*;
pub use registry::*;

use serde::Serialize;

/// Four-character tag identifying the state memory of every generic HID layout
pub const HID_STATE_FORMAT: &str = "HID";

/// Control schema a runtime binds input reports against
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSpec {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub base_layout: String,
    pub state_format: &'static str,
    pub controls: Vec<ControlSpec>,
}

impl LayoutSpec {
    pub fn control(&self, name: &str) -> Option<&ControlSpec> {
        self.controls.iter().find(|control| control.name == name)
    }
}

/// One control of a [`LayoutSpec`], located within the input report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlSpec {
    pub name: String,
    pub kind: ControlKind,
    pub byte_offset: u32,
    /// Bit offset within the byte at `byte_offset`
    pub bit_offset: u32,
    pub size_in_bits: u32,
    pub format: StorageFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalization: Option<Normalization>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub usages: Vec<UsageTag>,
}

impl ControlSpec {
    /// Processor parameters for the control, as understood by the control runtime
    pub fn parameters(&self) -> Option<String> {
        self.normalization.map(|normalization| normalization.to_string())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum ControlKind {
    Button,
    Axis,
}

/// Storage format of a control's state
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum StorageFormat {
    Bit,
    Byte,
    SByte,
    UShort,
    Short,
    UInt,
    Int,
}

impl StorageFormat {
    pub fn size_in_bits(&self) -> u32 {
        match self {
            StorageFormat::Bit => 1,
            StorageFormat::Byte | StorageFormat::SByte => 8,
            StorageFormat::UShort | StorageFormat::Short => 16,
            StorageFormat::UInt | StorageFormat::Int => 32,
        }
    }

    pub fn is_signed(&self) -> bool {
        matches!(
            self,
            StorageFormat::SByte | StorageFormat::Short | StorageFormat::Int
        )
    }
}

/// Semantic tags a runtime uses to find controls by role
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum UsageTag {
    PrimaryTrigger,
    PrimaryAction,
    SecondaryTrigger,
    SecondaryAction,
}

/// Maps an axis' raw value onto a normalized range
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Normalization {
    pub min: f32,
    pub max: f32,
    /// Value treated as the axis' resting position
    pub zero: f32,
}

impl std::fmt::Display for Normalization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "normalize,normalizeMin={},normalizeMax={},normalizeZero={}",
            self.min, self.max, self.zero
        )
    }
}
