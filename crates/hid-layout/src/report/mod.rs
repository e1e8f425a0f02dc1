//! HID Report Descriptor parsing
pub mod global_state;
pub mod local_state;
pub mod report_descriptor;

pub use report_descriptor::parse_report_descriptor;
