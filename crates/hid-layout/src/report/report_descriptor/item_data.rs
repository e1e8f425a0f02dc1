//! Metadata describing Input / Output / Feature report data

use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags::bitflags! {
    /// Input / Output / Feature item data
    ///
    /// Bit positions match the main item data of the HID specification, so the raw
    /// value of an Input item can be carried over verbatim.
    #[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct ElementFlags: u32 {
        /// Constant (padding or read-only) as opposed to data
        const CONSTANT = 1 << 0;
        /// Variable as opposed to array
        const VARIABLE = 1 << 1;
        const RELATIVE = 1 << 2;
        const WRAP = 1 << 3;
        const NON_LINEAR = 1 << 4;
        const NO_PREFERRED = 1 << 5;
        const NULL_STATE = 1 << 6;
        const VOLATILE = 1 << 7;
        const BUFFERED_BYTES = 1 << 8;
    }
}

impl ElementFlags {
    /// Decode the flags carried in a main item's data
    pub fn from_item_data(v: u32) -> Self {
        ElementFlags::from_bits_truncate(v)
    }

    pub fn is_constant(&self) -> bool {
        self.contains(ElementFlags::CONSTANT)
    }

    pub fn is_variable(&self) -> bool {
        self.contains(ElementFlags::VARIABLE)
    }
}

// Cached descriptors carry the flags as their numeric HID value
impl Serialize for ElementFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.bits())
    }
}

impl<'de> Deserialize<'de> for ElementFlags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u32::deserialize(deserializer).map(ElementFlags::from_bits_truncate)
    }
}
