use serde::{Deserialize, Serialize};

/// Scratch buffer size for pre-parsed descriptors; the size isn't known before the query
pub const DEFAULT_PARSED_DESCRIPTOR_BUFFER_SIZE: usize = 2 * 1024 * 1024;

/// A top-level usage page / usage pair
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageUsage {
    pub usage_page: u16,
    pub usage: u16,
}

impl PageUsage {
    pub fn new(usage_page: u16, usage: u16) -> Self {
        PageUsage { usage_page, usage }
    }
}

/// Settings for [`LayoutResolver`](super::LayoutResolver)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolverConfig {
    /// Interface name a device description must carry to be handled
    pub interface_name: String,
    /// Prefix of generated layout names
    pub layout_namespace: String,
    pub base_layout: String,
    pub parsed_descriptor_buffer_size: usize,
    /// Top-level usages to generate layouts for, empty for all
    pub supported_usages: Vec<PageUsage>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            interface_name: "HID".to_string(),
            layout_namespace: "HID".to_string(),
            base_layout: "HID".to_string(),
            parsed_descriptor_buffer_size: DEFAULT_PARSED_DESCRIPTOR_BUFFER_SIZE,
            supported_usages: vec![],
        }
    }
}

impl ResolverConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn supports(&self, usage_page: u16, usage: u16) -> bool {
        self.supported_usages.is_empty()
            || self
                .supported_usages
                .contains(&PageUsage::new(usage_page, usage))
    }
}
