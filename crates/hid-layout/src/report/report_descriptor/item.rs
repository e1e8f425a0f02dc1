use serde::{Deserialize, Serialize};

/// Data item variant
///
/// Serialized as its numeric code; `0` is kept for elements of unknown origin.
#[derive(
    Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(from = "u8", into = "u8")]
pub enum ReportType {
    #[default]
    Unknown,
    Input,
    Output,
    Feature,
}

impl From<u8> for ReportType {
    fn from(v: u8) -> Self {
        match v {
            1 => ReportType::Input,
            2 => ReportType::Output,
            3 => ReportType::Feature,
            _ => ReportType::Unknown,
        }
    }
}

impl From<ReportType> for u8 {
    fn from(v: ReportType) -> Self {
        match v {
            ReportType::Unknown => 0,
            ReportType::Input => 1,
            ReportType::Output => 2,
            ReportType::Feature => 3,
        }
    }
}
