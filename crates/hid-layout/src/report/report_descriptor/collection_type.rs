use serde::{Deserialize, Serialize};

/// HID Collection Type
#[derive(
    Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(from = "u8", into = "u8")]
pub enum CollectionType {
    #[default]
    Physical,
    Application,
    Logical,
    Report,
    NamedArray,
    UsageSwitch,
    UsageModifier,
    Reserved(u8),
    VendorDefined(u8),
}

impl From<u8> for CollectionType {
    fn from(v: u8) -> Self {
        match v {
            0x00 => CollectionType::Physical,
            0x01 => CollectionType::Application,
            0x02 => CollectionType::Logical,
            0x03 => CollectionType::Report,
            0x04 => CollectionType::NamedArray,
            0x05 => CollectionType::UsageSwitch,
            0x06 => CollectionType::UsageModifier,
            0x07..=0x7F => CollectionType::Reserved(v),
            0x80..=0xFF => CollectionType::VendorDefined(v),
        }
    }
}

impl From<CollectionType> for u8 {
    fn from(v: CollectionType) -> Self {
        match v {
            CollectionType::Physical => 0x00,
            CollectionType::Application => 0x01,
            CollectionType::Logical => 0x02,
            CollectionType::Report => 0x03,
            CollectionType::NamedArray => 0x04,
            CollectionType::UsageSwitch => 0x05,
            CollectionType::UsageModifier => 0x06,
            CollectionType::Reserved(v) | CollectionType::VendorDefined(v) => v,
        }
    }
}
