//! HID Local State
mod usage;

pub use usage::*;

/// Local parse state table
///
/// Local state applies to the next main item (Input / Output / Feature / Collection)
/// encountered in a report descriptor, and is reset afterwards.
///
/// Usages are special-case: If multiple usages are present,
/// they apply sequentially to the fields the main item declares, repeating the last usage
/// if more fields than usages are declared.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct LocalState {
    pub usages: Vec<LocalUsage>,
    pub usage_minimum: Option<LocalUsage>,
    pub usage_maximum: Option<LocalUsage>,
}

impl LocalState {
    pub fn reset(&mut self) {
        self.usages.clear();
        self.usage_minimum = None;
        self.usage_maximum = None;
    }

    /// Declared usage range, if both ends were given
    pub fn usage_range(&self) -> Option<(LocalUsage, LocalUsage)> {
        self.usage_minimum.zip(self.usage_maximum)
    }

    /// Usage of the `index`-th field declared by the next main item
    pub fn usage(&self, index: u32) -> LocalUsage {
        if let Some((minimum, maximum)) = self.usage_range() {
            if maximum.id < minimum.id {
                return minimum;
            }

            let id = (minimum.id as u32 + index).min(maximum.id as u32) as u16;
            return LocalUsage { id, ..minimum };
        }

        match self.usages.len() {
            0 => LocalUsage::default(),
            len => self.usages[(index as usize).min(len - 1)],
        }
    }

    /// Usage page of the `index`-th field, preferring an extended usage's own page
    pub fn usage_page(&self, index: u32, global_usage_page: Option<u16>) -> u16 {
        self.usage(index)
            .page
            .or(global_usage_page)
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for LocalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("LocalState");

        if !self.usages.is_empty() {
            s.field("usages", &self.usages);
        }

        if let Some(usage_minimum) = self.usage_minimum {
            s.field("usage_minimum", &usage_minimum);
        }

        if let Some(usage_maximum) = self.usage_maximum {
            s.field("usage_maximum", &usage_maximum);
        }

        s.finish()
    }
}
