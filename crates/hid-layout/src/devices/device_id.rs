use std::fmt::Display;

use crate::DeviceDescriptor;

/// VID / PID Pair
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeviceId {
    vid: u16,
    pid: u16,
}

impl DeviceId {
    pub fn new(vid: u16, pid: u16) -> Self {
        DeviceId { vid, pid }
    }

    pub fn vid(&self) -> u16 {
        self.vid
    }

    pub fn pid(&self) -> u16 {
        self.pid
    }
}

impl From<&DeviceDescriptor> for DeviceId {
    fn from(descriptor: &DeviceDescriptor) -> Self {
        DeviceId::new(descriptor.vendor_id, descriptor.product_id)
    }
}

/// Uppercase hex without padding, as used in layout names
impl Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:X}-{:X}", self.vid, self.pid)
    }
}
