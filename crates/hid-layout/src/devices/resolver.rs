use super::{DeviceCommands, DeviceDescription, DeviceHandle, DeviceId, ResolverConfig};
use crate::{
    build_layout_spec, parse_report_descriptor, DeviceDescriptor, DeviceMatcher, LayoutBuilder,
    LayoutRegistration, LayoutRegistry, ResolveError, TransportError,
};

/// Produces and registers generic layouts for HID devices no specific layout matched
#[derive(Debug, Default)]
pub struct LayoutResolver<R> {
    config: ResolverConfig,
    registry: R,
}

impl<R> LayoutResolver<R>
where
    R: LayoutRegistry,
{
    pub fn new(config: ResolverConfig, registry: R) -> Self {
        LayoutResolver { config, registry }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Name of the generic layout registered for `description`, if one could be produced
    ///
    /// Failures are logged. See [`try_resolve_layout`](Self::try_resolve_layout).
    pub fn resolve_layout(
        &self,
        device: Option<DeviceHandle>,
        description: &mut DeviceDescription,
        matched_layout: Option<&str>,
        commands: &mut impl DeviceCommands,
    ) -> Option<String> {
        match self.try_resolve_layout(device, description, matched_layout, commands) {
            Ok(name) => name,
            Err(
                e @ (ResolveError::NoDeviceHandle
                | ResolveError::UnsupportedUsage { .. }
                | ResolveError::NoUsableElements),
            ) => {
                log::debug!("No generic layout for {:?}: {}", description.product, e);
                None
            }
            Err(e) => {
                log::error!(
                    "Failed to create generic layout for {:?}: {}",
                    description.product,
                    e
                );
                None
            }
        }
    }

    /// Like [`resolve_layout`](Self::resolve_layout), with the reason a device got no layout
    ///
    /// `Ok(None)` means the device isn't handled here at all: it already has a layout, or
    /// isn't a HID device.
    #[profiling::function]
    pub fn try_resolve_layout(
        &self,
        device: Option<DeviceHandle>,
        description: &mut DeviceDescription,
        matched_layout: Option<&str>,
        commands: &mut impl DeviceCommands,
    ) -> Result<Option<String>, ResolveError> {
        if let Some(layout) = matched_layout {
            log::trace!("Device already matched layout {}", layout);
            return Ok(None);
        }

        if description.interface_name != self.config.interface_name {
            return Ok(None);
        }

        let partial = cached_descriptor(description);

        let descriptor = if !partial.elements.is_empty() {
            log::trace!("Using cached descriptor");
            partial
        } else {
            let device = device.ok_or(ResolveError::NoDeviceHandle)?;
            let descriptor = self.fetch_descriptor(device, &partial, commands)?;
            description.capabilities = Some(descriptor.to_json()?);
            descriptor
        };

        if !self
            .config
            .supports(descriptor.usage_page, descriptor.usage)
        {
            return Err(ResolveError::UnsupportedUsage {
                usage_page: descriptor.usage_page,
                usage: descriptor.usage,
            });
        }

        if !descriptor.elements.iter().any(|element| element.is_usable()) {
            return Err(ResolveError::NoUsableElements);
        }

        let matcher = DeviceMatcher::default().with_interface(self.config.interface_name.clone());

        let (name, matcher) = match description.device_name() {
            Some(device_name) => (
                format!("{}::{}", self.config.layout_namespace, device_name),
                matcher
                    .with_manufacturer(device_name.manufacturer())
                    .with_product(device_name.product()),
            ),
            None => {
                if descriptor.vendor_id == 0 {
                    return Err(ResolveError::IdentityError);
                }

                let device_id = DeviceId::from(&descriptor);
                (
                    format!("{}::{}", self.config.layout_namespace, device_id),
                    matcher.with_device_id(device_id),
                )
            }
        };

        let builder = {
            let name = name.clone();
            let display_name = description.product.clone();
            let base_layout = self.config.base_layout.clone();
            LayoutBuilder::new(move || {
                build_layout_spec(&descriptor, &name, display_name.as_deref(), &base_layout)
            })
        };

        self.registry.register_layout_builder(LayoutRegistration {
            name: name.clone(),
            base_layout: self.config.base_layout.clone(),
            matcher,
            builder,
        });

        Ok(Some(name))
    }

    /// Read the descriptor from the device, binary first, pre-parsed second
    fn fetch_descriptor(
        &self,
        device: DeviceHandle,
        partial: &DeviceDescriptor,
        commands: &mut impl DeviceCommands,
    ) -> Result<DeviceDescriptor, ResolveError> {
        const SIZE_QUERY: &str = "query_report_descriptor_size";
        const DESCRIPTOR_QUERY: &str = "query_report_descriptor";
        const PARSED_QUERY: &str = "query_parsed_report_descriptor";

        let size = commands.query_report_descriptor_size(device)?;
        if size > 0 {
            let expected = usize::try_from(size).map_err(|_| TransportError::CommandFailed {
                command: SIZE_QUERY,
                reason: format!("size {} is not addressable", size),
            })?;

            let mut buffer = vec![0u8; expected];
            let actual = commands.query_report_descriptor(device, &mut buffer)?;
            if actual != expected {
                return Err(TransportError::UnexpectedSize {
                    command: DESCRIPTOR_QUERY,
                    expected,
                    actual: actual as i64,
                }
                .into());
            }

            log::debug!("Read {} byte report descriptor", expected);
            let descriptor = parse_report_descriptor(&buffer)?;
            return Ok(descriptor.with_identity_of(partial));
        }

        let mut buffer = vec![0u8; self.config.parsed_descriptor_buffer_size];
        let count = commands.query_parsed_report_descriptor(device, &mut buffer)?;
        if count < 0 {
            return Err(TransportError::CommandFailed {
                command: PARSED_QUERY,
                reason: format!("returned {}", count),
            }
            .into());
        }

        if count as u64 > buffer.len() as u64 {
            return Err(TransportError::UnexpectedSize {
                command: PARSED_QUERY,
                expected: buffer.len(),
                actual: count,
            }
            .into());
        }

        log::debug!("Read {} byte pre-parsed descriptor", count);
        Ok(DeviceDescriptor::from_json_bytes(&buffer[..count as usize])?)
    }
}

/// Descriptor cached on the description, default if absent or undecodable
fn cached_descriptor(description: &DeviceDescription) -> DeviceDescriptor {
    let capabilities = match description.capabilities.as_deref() {
        Some(capabilities) if !capabilities.is_empty() => capabilities,
        _ => return DeviceDescriptor::default(),
    };

    DeviceDescriptor::from_json(capabilities).unwrap_or_else(|e| {
        log::warn!("Ignoring undecodable cached descriptor: {}", e);
        DeviceDescriptor::default()
    })
}
