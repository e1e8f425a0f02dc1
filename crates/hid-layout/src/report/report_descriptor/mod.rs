//! HID Report Descriptor
pub mod item_data;
pub mod tags;

mod collection_type;
mod item;

pub use collection_type::*;
pub use item::*;
pub use item_data::*;

use std::collections::BTreeMap;

use tags::*;

use super::{global_state::GlobalState, local_state::LocalState};
use crate::{Collection, DeviceDescriptor, Element, ParseError, ParseErrorKind};

/// Upper bound on the number of elements a single descriptor may declare
pub const MAX_ELEMENTS: usize = 1 << 16;

/// Parse a binary HID Report Descriptor into a [`DeviceDescriptor`]
///
/// Vendor and product ids are left at zero; the descriptor does not carry them.
#[profiling::function]
pub fn parse_report_descriptor(bytes: &[u8]) -> Result<DeviceDescriptor, ParseError> {
    let mut parser = ReportDescriptorParser::default();

    for item in ItemTags::new(bytes) {
        let (offset, item) = item?;
        parser.parse_item(offset, item)?;
    }

    Ok(parser.finish())
}

/// Parse state for a single descriptor
///
/// The format is stateful by design: global items persist until overwritten, local items
/// apply to the next main item only, and collections nest.
#[derive(Debug)]
struct ReportDescriptorParser {
    global_state_stack: Vec<GlobalState>,
    local_state: LocalState,
    collection_stack: Vec<usize>,
    /// Running bit offset per report
    report_offsets: BTreeMap<(ReportType, u8), u32>,
    elements: Vec<Element>,
    collections: Vec<Collection>,
}

impl Default for ReportDescriptorParser {
    fn default() -> Self {
        ReportDescriptorParser {
            global_state_stack: vec![GlobalState::default()],
            local_state: LocalState::default(),
            collection_stack: vec![],
            report_offsets: BTreeMap::new(),
            elements: vec![],
            collections: vec![],
        }
    }
}

impl ReportDescriptorParser {
    fn global_state(&self) -> &GlobalState {
        // The stack is never popped below its root entry
        &self.global_state_stack[self.global_state_stack.len() - 1]
    }

    fn global_state_mut(&mut self) -> &mut GlobalState {
        let top = self.global_state_stack.len() - 1;
        &mut self.global_state_stack[top]
    }

    fn parse_item(&mut self, offset: usize, item: ItemTag) -> Result<(), ParseError> {
        match item {
            ItemTag::Main(main) => {
                self.parse_main(offset, main)?;
                self.local_state.reset();
            }
            ItemTag::Global(global) => self.parse_global(offset, global)?,
            ItemTag::Local(local) => self.parse_local(local),
            ItemTag::Long { tag, len } => {
                log::trace!("Skipping long item {:#04x} ({} bytes) at {}", tag, len, offset)
            }
            ItemTag::Reserved => log::trace!("Skipping reserved item at {}", offset),
        }

        Ok(())
    }

    fn parse_main(&mut self, offset: usize, main: MainTag) -> Result<(), ParseError> {
        match main {
            MainTag::Input(flags) => self.add_elements(offset, ReportType::Input, flags),
            MainTag::Output(flags) => self.add_elements(offset, ReportType::Output, flags),
            MainTag::Feature(flags) => self.add_elements(offset, ReportType::Feature, flags),
            MainTag::Collection(collection_type) => {
                let usage = self.local_state.usage(0);
                let usage_page = self
                    .local_state
                    .usage_page(0, self.global_state().usage_page);

                let parent = self.owning_collection();

                self.collection_stack.push(self.collections.len());
                self.collections.push(Collection {
                    collection_type,
                    usage: usage.id,
                    usage_page,
                    parent,
                    child_count: 0,
                    first_child: self.elements.len() as u32,
                });
                Ok(())
            }
            MainTag::EndCollection => {
                let index = self.collection_stack.pop().ok_or_else(|| {
                    ParseError::new(ParseErrorKind::UnbalancedEndCollection, offset)
                })?;

                let collection = &mut self.collections[index];
                collection.child_count = self.elements.len() as u32 - collection.first_child;
                Ok(())
            }
            MainTag::Reserved(tag) => {
                log::trace!("Skipping reserved main item {:#x} at {}", tag, offset);
                Ok(())
            }
        }
    }

    /// Index of the innermost open collection, -1 at top level
    fn owning_collection(&self) -> i32 {
        self.collection_stack
            .last()
            .map(|index| *index as i32)
            .unwrap_or(-1)
    }

    fn add_elements(
        &mut self,
        offset: usize,
        report_type: ReportType,
        flags: ElementFlags,
    ) -> Result<(), ParseError> {
        let gs = *self.global_state();

        let report_size = gs
            .report_size
            .ok_or_else(|| ParseError::new(ParseErrorKind::MissingReportSize, offset))?;
        let report_count = gs
            .report_count
            .ok_or_else(|| ParseError::new(ParseErrorKind::MissingReportCount, offset))?;

        let report_id = gs.report_id.unwrap_or_default();
        let (logical_min, logical_max) = gs.logical_range();
        let (physical_min, physical_max) = gs.physical_range();
        let usage_range = self.local_state.usage_range();
        let collection_index = self.owning_collection();

        // Reports with an id start after the id byte
        let start = if report_id != 0 { 8 } else { 0 };
        let mut report_offset = *self
            .report_offsets
            .entry((report_type, report_id))
            .or_insert(start);

        let report_end = report_offset as u64 + report_size as u64 * report_count as u64;
        if report_end > u32::MAX as u64 {
            return Err(ParseError::new(ParseErrorKind::ReportTooLarge, offset));
        }

        if self.elements.len() + report_count as usize > MAX_ELEMENTS {
            return Err(ParseError::new(ParseErrorKind::TooManyElements, offset));
        }

        for i in 0..report_count {
            let usage = self.local_state.usage(i);

            self.elements.push(Element {
                usage: usage.id,
                usage_page: self.local_state.usage_page(i, gs.usage_page),
                unit: gs.unit.unwrap_or_default(),
                unit_exponent: gs.unit_exponent.unwrap_or_default(),
                logical_min,
                logical_max,
                physical_min,
                physical_max,
                report_type,
                collection_index,
                report_id,
                report_size_in_bits: report_size,
                report_offset_in_bits: report_offset,
                flags,
                usage_min: usage_range.map(|(minimum, _)| minimum.id),
                usage_max: usage_range.map(|(_, maximum)| maximum.id),
            });

            report_offset += report_size;
        }

        self.report_offsets
            .insert((report_type, report_id), report_offset);

        Ok(())
    }

    fn parse_global(&mut self, offset: usize, global: GlobalTag) -> Result<(), ParseError> {
        match global {
            GlobalTag::Push => {
                let top = *self.global_state();
                self.global_state_stack.push(top);
                return Ok(());
            }
            GlobalTag::Pop => {
                if self.global_state_stack.len() < 2 {
                    return Err(ParseError::new(
                        ParseErrorKind::GlobalStackUnderflow,
                        offset,
                    ));
                }
                self.global_state_stack.pop();
                return Ok(());
            }
            _ => (),
        }

        let gs = self.global_state_mut();
        match global {
            GlobalTag::UsagePage(v) => gs.usage_page = Some(v),
            GlobalTag::LogicalMinimum(v) => gs.logical_minimum = Some(v),
            GlobalTag::LogicalMaximum(v) => gs.logical_maximum = Some(v),
            GlobalTag::PhysicalMinimum(v) => gs.physical_minimum = Some(v),
            GlobalTag::PhysicalMaximum(v) => gs.physical_maximum = Some(v),
            GlobalTag::UnitExponent(v) => gs.unit_exponent = Some(v),
            GlobalTag::Unit(v) => gs.unit = Some(v),
            GlobalTag::ReportSize(v) => gs.report_size = Some(v),
            GlobalTag::ReportId(v) => gs.report_id = Some(v),
            GlobalTag::ReportCount(v) => gs.report_count = Some(v),
            GlobalTag::Push | GlobalTag::Pop => (),
            GlobalTag::Reserved(tag) => {
                log::trace!("Skipping reserved global item {:#x} at {}", tag, offset)
            }
        }

        Ok(())
    }

    fn parse_local(&mut self, local: LocalTag) {
        match local {
            LocalTag::Usage(usage) => self.local_state.usages.push(usage),
            LocalTag::UsageMinimum(usage_min) => self.local_state.usage_minimum = Some(usage_min),
            LocalTag::UsageMaximum(usage_max) => self.local_state.usage_maximum = Some(usage_max),
            // Designators, strings and delimiters carry nothing a layout can use
            LocalTag::DesignatorIndex(_)
            | LocalTag::DesignatorMinimum(_)
            | LocalTag::DesignatorMaximum(_)
            | LocalTag::StringIndex(_)
            | LocalTag::StringMinimum(_)
            | LocalTag::StringMaximum(_)
            | LocalTag::Delimiter(_)
            | LocalTag::Reserved(_) => (),
        }
    }

    fn finish(self) -> DeviceDescriptor {
        if !self.collection_stack.is_empty() {
            log::debug!(
                "Report descriptor ended with {} open collection(s)",
                self.collection_stack.len()
            );
        }

        let mut report_sizes = [0u32; 3];
        for ((report_type, _), bits) in &self.report_offsets {
            let slot = match report_type {
                ReportType::Input => 0,
                ReportType::Output => 1,
                ReportType::Feature => 2,
                ReportType::Unknown => continue,
            };
            report_sizes[slot] = report_sizes[slot].max(((*bits as u64 + 7) / 8) as u32);
        }

        let (usage, usage_page) = self
            .collections
            .iter()
            .find(|collection| {
                collection.is_top_level()
                    && collection.collection_type == CollectionType::Application
            })
            .map(|collection| (collection.usage, collection.usage_page))
            .unwrap_or_default();

        DeviceDescriptor {
            vendor_id: 0,
            product_id: 0,
            usage,
            usage_page,
            input_report_size: report_sizes[0],
            output_report_size: report_sizes[1],
            feature_report_size: report_sizes[2],
            elements: self.elements,
            collections: self.collections,
        }
    }
}
