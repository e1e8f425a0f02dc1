//! Intermediate representation for report descriptor items
//! Used to tokenize byte arrays into rust types, which are then parsed into a
//! [`DeviceDescriptor`](crate::DeviceDescriptor)

use crate::{
    report::{
        local_state::LocalUsage,
        report_descriptor::{CollectionType, ElementFlags},
    },
    ParseError, ParseErrorKind,
};

/// Header byte announcing a long item
pub const LONG_ITEM_HEADER: u8 = 0xFE;

/// Raw item data, kept alongside its encoded width so it can be read signed or unsigned
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ItemValue {
    raw: u32,
    size: u8,
}

impl ItemValue {
    pub fn new(data: &[u8]) -> Self {
        let raw = data
            .iter()
            .take(4)
            .rev()
            .fold(0u32, |acc, byte| (acc << 8) | *byte as u32);

        ItemValue {
            raw,
            size: data.len().min(4) as u8,
        }
    }

    /// Number of data bytes the value was encoded with
    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn unsigned(&self) -> u32 {
        self.raw
    }

    /// Two's complement interpretation at the encoded width
    pub fn signed(&self) -> i32 {
        match self.size {
            0 => 0,
            1 => self.raw as u8 as i8 as i32,
            2 => self.raw as u16 as i16 as i32,
            _ => self.raw as i32,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MainTag {
    Input(ElementFlags),
    Output(ElementFlags),
    Feature(ElementFlags),
    Collection(CollectionType),
    EndCollection,
    Reserved(u8),
}

impl MainTag {
    pub fn new(v: u8, data: ItemValue) -> Self {
        match v {
            8 => MainTag::Input(ElementFlags::from_item_data(data.unsigned())),
            9 => MainTag::Output(ElementFlags::from_item_data(data.unsigned())),
            10 => MainTag::Collection(CollectionType::from(data.unsigned() as u8)),
            11 => MainTag::Feature(ElementFlags::from_item_data(data.unsigned())),
            12 => MainTag::EndCollection,
            v => MainTag::Reserved(v),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GlobalTag {
    UsagePage(u16),
    LogicalMinimum(ItemValue),
    LogicalMaximum(ItemValue),
    PhysicalMinimum(ItemValue),
    PhysicalMaximum(ItemValue),
    UnitExponent(i32),
    Unit(u32),
    ReportSize(u32),
    ReportId(u8),
    ReportCount(u32),
    Push,
    Pop,
    Reserved(u8),
}

impl GlobalTag {
    pub fn new(v: u8, data: ItemValue) -> Self {
        match v {
            0 => GlobalTag::UsagePage(data.unsigned() as u16),
            1 => GlobalTag::LogicalMinimum(data),
            2 => GlobalTag::LogicalMaximum(data),
            3 => GlobalTag::PhysicalMinimum(data),
            4 => GlobalTag::PhysicalMaximum(data),
            5 => GlobalTag::UnitExponent(unit_exponent(data)),
            6 => GlobalTag::Unit(data.unsigned()),
            7 => GlobalTag::ReportSize(data.unsigned()),
            8 => GlobalTag::ReportId(data.unsigned() as u8),
            9 => GlobalTag::ReportCount(data.unsigned()),
            10 => GlobalTag::Push,
            11 => GlobalTag::Pop,
            v => GlobalTag::Reserved(v),
        }
    }
}

/// Unit exponents are a 4-bit two's complement value in practice (0x0D = -3),
/// wider encodings are read as ordinary signed data
fn unit_exponent(data: ItemValue) -> i32 {
    let v = data.unsigned();
    if data.size() <= 1 && v <= 0xF {
        if v & 0x8 != 0 {
            v as i32 - 0x10
        } else {
            v as i32
        }
    } else {
        data.signed()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LocalTag {
    Usage(LocalUsage),
    UsageMinimum(LocalUsage),
    UsageMaximum(LocalUsage),
    DesignatorIndex(u32),
    DesignatorMinimum(u32),
    DesignatorMaximum(u32),
    StringIndex(u32),
    StringMinimum(u32),
    StringMaximum(u32),
    Delimiter(u32),
    Reserved(u8),
}

impl LocalTag {
    pub fn new(v: u8, data: ItemValue) -> Self {
        match v {
            0 => LocalTag::Usage(LocalUsage::from_item(data)),
            1 => LocalTag::UsageMinimum(LocalUsage::from_item(data)),
            2 => LocalTag::UsageMaximum(LocalUsage::from_item(data)),
            3 => LocalTag::DesignatorIndex(data.unsigned()),
            4 => LocalTag::DesignatorMinimum(data.unsigned()),
            5 => LocalTag::DesignatorMaximum(data.unsigned()),
            7 => LocalTag::StringIndex(data.unsigned()),
            8 => LocalTag::StringMinimum(data.unsigned()),
            9 => LocalTag::StringMaximum(data.unsigned()),
            10 => LocalTag::Delimiter(data.unsigned()),
            v => LocalTag::Reserved(v),
        }
    }
}

/// An item parsed from a report descriptor
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ItemTag {
    Main(MainTag),
    Global(GlobalTag),
    Local(LocalTag),
    /// Long items have no defined use; only their tag and payload length are kept
    Long { tag: u8, len: usize },
    Reserved,
}

/// ItemTag variants
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ItemType {
    Main,
    Global,
    Local,
    Reserved,
}

impl From<u8> for ItemType {
    fn from(v: u8) -> Self {
        match v & 0b11 {
            0 => ItemType::Main,
            1 => ItemType::Global,
            2 => ItemType::Local,
            _ => ItemType::Reserved,
        }
    }
}

/// Iterator over the items of a report descriptor, yielding each item with the offset of its
/// header byte
///
/// Iteration stops after the first error.
#[derive(Debug, Clone)]
pub struct ItemTags<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> ItemTags<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        ItemTags { bytes, position: 0 }
    }

    fn take(&mut self, header: usize, start: usize, len: usize) -> Result<&'a [u8], ParseError> {
        let data = start
            .checked_add(len)
            .and_then(|end| self.bytes.get(start..end))
            .ok_or_else(|| ParseError::new(ParseErrorKind::Truncated, header))?;

        self.position = start + len;
        Ok(data)
    }

    fn read_item(&mut self, offset: usize, header: u8) -> Result<ItemTag, ParseError> {
        if header == LONG_ITEM_HEADER {
            let prefix = self.take(offset, offset + 1, 2)?;
            let (len, tag) = (prefix[0] as usize, prefix[1]);
            self.take(offset, offset + 3, len)?;
            return Ok(ItemTag::Long { tag, len });
        }

        let size = match header & 0b00000011 {
            0 => 0,
            1 => 1,
            2 => 2,
            _ => 4,
        };
        let item_type = ItemType::from(header >> 2);
        let tag = header >> 4;

        let data = ItemValue::new(self.take(offset, offset + 1, size)?);

        Ok(match item_type {
            ItemType::Main => ItemTag::Main(MainTag::new(tag, data)),
            ItemType::Global => ItemTag::Global(GlobalTag::new(tag, data)),
            ItemType::Local => ItemTag::Local(LocalTag::new(tag, data)),
            ItemType::Reserved => ItemTag::Reserved,
        })
    }
}

impl<'a> Iterator for ItemTags<'a> {
    type Item = Result<(usize, ItemTag), ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        let offset = self.position;
        let header = *self.bytes.get(offset)?;

        let item = self.read_item(offset, header);
        if item.is_err() {
            self.position = self.bytes.len();
        }

        Some(item.map(|item| (offset, item)))
    }
}
