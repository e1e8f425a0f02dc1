//! Report descriptors stored on disk
//!
//! Binary dumps are named after the device they were read from (`VID_044f_PID_b10a.hrd`),
//! cached descriptors are the JSON form a [`DeviceDescriptor`] serializes to.
use std::path::{Path, PathBuf};

use hid_layout::{
    DeviceCommands, DeviceDescription, DeviceDescriptor, DeviceHandle, DeviceId, TransportError,
};

use crate::Error;

pub const BINARY_EXTENSION: &str = "hrd";
pub const PARSED_EXTENSION: &str = "json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DumpData {
    /// Raw report descriptor bytes
    Binary(Vec<u8>),
    /// UTF-8 JSON descriptor
    Parsed(Vec<u8>),
}

/// One device's descriptor, as loaded from disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dump {
    pub path: PathBuf,
    pub device_id: Option<DeviceId>,
    pub data: DumpData,
}

impl Dump {
    /// Interpret file contents according to the file's name
    pub fn from_bytes(path: &Path, bytes: Vec<u8>) -> Result<Self, Error> {
        let data = match path.extension().and_then(|extension| extension.to_str()) {
            Some(BINARY_EXTENSION) => DumpData::Binary(bytes),
            Some(PARSED_EXTENSION) => DumpData::Parsed(bytes),
            _ => return Err(format!("Unrecognized dump file {}", path.display()).into()),
        };

        let device_id = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .and_then(parse_device_id);

        Ok(Dump {
            path: path.to_path_buf(),
            device_id,
            data,
        })
    }

    /// Description of the dumped device, as a host would report it before resolution
    pub fn description(&self, interface_name: &str) -> Result<DeviceDescription, Error> {
        let mut description = DeviceDescription::new(interface_name);

        if let (DumpData::Binary(_), Some(device_id)) = (&self.data, self.device_id) {
            let partial = DeviceDescriptor {
                vendor_id: device_id.vid(),
                product_id: device_id.pid(),
                ..Default::default()
            };
            description.capabilities = Some(serde_json::to_string(&partial)?);
        }

        Ok(description)
    }
}

/// Parse a `VID_xxxx_PID_xxxx` file stem
pub fn parse_device_id(stem: &str) -> Option<DeviceId> {
    let mut parts = stem.split('_');

    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(vid_tag), Some(vid), Some(pid_tag), Some(pid))
            if vid_tag.eq_ignore_ascii_case("VID") && pid_tag.eq_ignore_ascii_case("PID") =>
        {
            let vid = u16::from_str_radix(vid, 16).ok()?;
            let pid = u16::from_str_radix(pid, 16).ok()?;
            Some(DeviceId::new(vid, pid))
        }
        _ => None,
    }
}

/// Load a dump file, or every binary dump in a directory
pub fn load(path: &Path) -> Result<Vec<Dump>, Error> {
    if !path.is_dir() {
        return Ok(vec![Dump::from_bytes(path, std::fs::read(path)?)?]);
    }

    let mut paths = std::fs::read_dir(path)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<_>, _>>()?;
    paths.sort();

    paths
        .into_iter()
        .filter(|path| {
            path.extension().and_then(|extension| extension.to_str()) == Some(BINARY_EXTENSION)
        })
        .map(|path| {
            let bytes = std::fs::read(&path)?;
            Dump::from_bytes(&path, bytes)
        })
        .collect()
}

/// [`DeviceCommands`] answering from a single [`Dump`]
///
/// Binary dumps are served through the report descriptor queries, cached descriptors
/// through the pre-parsed query.
#[derive(Debug, Copy, Clone)]
pub struct DumpTransport<'a> {
    dump: &'a Dump,
}

impl<'a> DumpTransport<'a> {
    pub fn new(dump: &'a Dump) -> Self {
        DumpTransport { dump }
    }
}

impl DeviceCommands for DumpTransport<'_> {
    fn query_report_descriptor_size(&mut self, _: DeviceHandle) -> Result<i64, TransportError> {
        Ok(match &self.dump.data {
            DumpData::Binary(bytes) => bytes.len() as i64,
            DumpData::Parsed(_) => 0,
        })
    }

    fn query_report_descriptor(
        &mut self,
        _: DeviceHandle,
        buffer: &mut [u8],
    ) -> Result<usize, TransportError> {
        match &self.dump.data {
            DumpData::Binary(bytes) => {
                let len = bytes.len().min(buffer.len());
                buffer[..len].copy_from_slice(&bytes[..len]);
                Ok(len)
            }
            DumpData::Parsed(_) => Err(TransportError::CommandFailed {
                command: "query_report_descriptor",
                reason: "dump holds no binary descriptor".to_string(),
            }),
        }
    }

    fn query_parsed_report_descriptor(
        &mut self,
        _: DeviceHandle,
        buffer: &mut [u8],
    ) -> Result<i64, TransportError> {
        match &self.dump.data {
            DumpData::Parsed(bytes) if bytes.len() <= buffer.len() => {
                buffer[..bytes.len()].copy_from_slice(bytes);
                Ok(bytes.len() as i64)
            }
            // Report the full size so the caller can tell the buffer was too small
            DumpData::Parsed(bytes) => Ok(bytes.len() as i64),
            DumpData::Binary(_) => Ok(-1),
        }
    }
}
