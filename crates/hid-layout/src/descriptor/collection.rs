use serde::{Deserialize, Serialize};

use crate::report::report_descriptor::CollectionType;

/// A structural grouping of elements
///
/// Collections form a tree flattened into [`DeviceDescriptor::collections`](super::DeviceDescriptor),
/// linked by index so the whole descriptor stays relocatable.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Collection {
    #[serde(rename = "type")]
    pub collection_type: CollectionType,
    pub usage: u16,
    pub usage_page: u16,
    /// Index of the parent collection, -1 for top-level collections
    #[serde(default = "super::no_collection")]
    pub parent: i32,
    /// Number of elements declared inside this collection, nested collections included
    pub child_count: u32,
    /// Index of the first element declared inside this collection
    pub first_child: u32,
}

impl Collection {
    pub fn is_top_level(&self) -> bool {
        self.parent < 0
    }

    /// Range of element indices declared inside this collection
    pub fn children(&self) -> std::ops::Range<usize> {
        let first = self.first_child as usize;
        first..first + self.child_count as usize
    }
}
