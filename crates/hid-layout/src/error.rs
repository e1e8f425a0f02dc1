use thiserror::Error;

/// Reason a binary report descriptor was rejected
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("item data runs past the end of the descriptor")]
    Truncated,
    #[error("End Collection without a matching Collection")]
    UnbalancedEndCollection,
    #[error("Pop without a matching Push")]
    GlobalStackUnderflow,
    #[error("main item declared before any Report Size")]
    MissingReportSize,
    #[error("main item declared before any Report Count")]
    MissingReportCount,
    #[error("report exceeds the addressable bit range")]
    ReportTooLarge,
    #[error("descriptor declares more elements than supported")]
    TooManyElements,
}

/// A malformed binary report descriptor
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("{kind} (byte {byte_offset})")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Offset of the offending item's header byte
    pub byte_offset: usize,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, byte_offset: usize) -> Self {
        ParseError { kind, byte_offset }
    }
}

/// A cached or pre-parsed descriptor that could not be decoded from its text form
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("descriptor text is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("descriptor text is not a valid descriptor: {0}")]
    Json(#[from] serde_json::Error),
}

/// A device command that failed or returned something unusable
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("device command {command} failed: {reason}")]
    CommandFailed {
        command: &'static str,
        reason: String,
    },
    #[error("device command {command} returned {actual} bytes, expected {expected}")]
    UnexpectedSize {
        command: &'static str,
        expected: usize,
        actual: i64,
    },
}

/// Why no generic layout could be produced for a device
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("device has no runtime handle to query a descriptor through")]
    NoDeviceHandle,
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("top-level usage {usage_page:#x}:{usage:#x} is not supported")]
    UnsupportedUsage { usage_page: u16, usage: u16 },
    #[error("descriptor has no elements that map to a control")]
    NoUsableElements,
    #[error("device has neither a vendor id nor manufacturer and product strings")]
    IdentityError,
}
