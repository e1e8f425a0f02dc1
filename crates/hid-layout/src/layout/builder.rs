use std::collections::BTreeSet;

use super::{ControlSpec, LayoutSpec, HID_STATE_FORMAT};
use crate::DeviceDescriptor;

/// Build the generic layout of a device from its descriptor
///
/// Elements that don't map to a control are skipped. Control order follows element order.
#[profiling::function]
pub fn build_layout_spec(
    descriptor: &DeviceDescriptor,
    name: &str,
    display_name: Option<&str>,
    base_layout: &str,
) -> LayoutSpec {
    let mut names = ControlNames::default();

    let controls = descriptor
        .elements
        .iter()
        .filter_map(|element| {
            let kind = element.control_kind()?;
            let format = element.storage_format()?;

            Some(ControlSpec {
                name: names.unique(element.control_name()),
                kind,
                byte_offset: element.report_offset_in_bits / 8,
                bit_offset: element.report_offset_in_bits % 8,
                size_in_bits: element.report_size_in_bits,
                format,
                normalization: element.normalization(),
                usages: element.usage_tags().to_vec(),
            })
        })
        .collect::<Vec<_>>();

    log::debug!("Built layout {} with {} controls", name, controls.len());

    LayoutSpec {
        name: name.to_string(),
        display_name: display_name.map(str::to_string),
        base_layout: base_layout.to_string(),
        state_format: HID_STATE_FORMAT,
        controls,
    }
}

/// Control names taken so far, compared case-insensitively
#[derive(Debug, Default)]
struct ControlNames(BTreeSet<String>);

impl ControlNames {
    fn unique(&mut self, name: String) -> String {
        if self.0.insert(name.to_lowercase()) {
            return name;
        }

        let mut suffix = 1;
        loop {
            let candidate = format!("{}{}", name, suffix);
            if self.0.insert(candidate.to_lowercase()) {
                return candidate;
            }
            suffix += 1;
        }
    }
}
