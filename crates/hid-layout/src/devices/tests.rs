use super::{
    DeviceCommands, DeviceDescription, DeviceHandle, DeviceId, DeviceName, LayoutResolver,
    PageUsage, ResolverConfig, DEFAULT_PARSED_DESCRIPTOR_BUFFER_SIZE,
};
use crate::{
    fixtures::{GAMEPAD_REPORT, JOYSTICK_REPORT},
    parse_report_descriptor, DeviceDescriptor, Layouts, ParseErrorKind, ResolveError,
    TransportError,
};

const DEVICE: DeviceHandle = DeviceHandle(7);
const IDENTITY: &str = r#"{"vendorId":4660,"productId":22136}"#;

/// Transport serving canned descriptors
#[derive(Debug, Default)]
struct MockCommands {
    report_descriptor: Vec<u8>,
    parsed_descriptor: Option<Vec<u8>>,
    short_read: bool,
    parsed_count: Option<i64>,
    calls: Vec<&'static str>,
}

impl MockCommands {
    fn binary(report_descriptor: &[u8]) -> Self {
        MockCommands {
            report_descriptor: report_descriptor.to_vec(),
            ..Default::default()
        }
    }

    fn parsed(descriptor: &DeviceDescriptor) -> Self {
        MockCommands {
            parsed_descriptor: Some(
                descriptor
                    .to_json()
                    .expect("Failed to serialize")
                    .into_bytes(),
            ),
            ..Default::default()
        }
    }
}

impl DeviceCommands for MockCommands {
    fn query_report_descriptor_size(
        &mut self,
        device: DeviceHandle,
    ) -> Result<i64, TransportError> {
        assert_eq!(device, DEVICE);
        self.calls.push("size");
        Ok(self.report_descriptor.len() as i64)
    }

    fn query_report_descriptor(
        &mut self,
        _: DeviceHandle,
        buffer: &mut [u8],
    ) -> Result<usize, TransportError> {
        self.calls.push("descriptor");
        let len = if self.short_read {
            buffer.len() - 1
        } else {
            buffer.len()
        };
        buffer[..len].copy_from_slice(&self.report_descriptor[..len]);
        Ok(len)
    }

    fn query_parsed_report_descriptor(
        &mut self,
        _: DeviceHandle,
        buffer: &mut [u8],
    ) -> Result<i64, TransportError> {
        self.calls.push("parsed");

        if let Some(count) = self.parsed_count {
            return Ok(count);
        }

        let parsed = self
            .parsed_descriptor
            .as_ref()
            .ok_or_else(|| TransportError::CommandFailed {
                command: "query_parsed_report_descriptor",
                reason: "unsupported".to_string(),
            })?;

        buffer[..parsed.len()].copy_from_slice(parsed);
        Ok(parsed.len() as i64)
    }
}

fn resolver() -> LayoutResolver<Layouts> {
    LayoutResolver::new(ResolverConfig::default(), Layouts::new())
}

fn cached(description: &DeviceDescription) -> DeviceDescriptor {
    DeviceDescriptor::from_json(
        description
            .capabilities
            .as_deref()
            .expect("No cached descriptor"),
    )
    .expect("Invalid cached descriptor")
}

#[test]
fn test_binary_descriptor_id_name() {
    let resolver = resolver();
    let mut commands = MockCommands::binary(JOYSTICK_REPORT);
    let mut description = DeviceDescription::new("HID").with_capabilities(IDENTITY);

    let name = resolver
        .try_resolve_layout(Some(DEVICE), &mut description, None, &mut commands)
        .expect("Failed to resolve");

    assert_eq!(name.as_deref(), Some("HID::1234-5678"));
    assert_eq!(commands.calls, vec!["size", "descriptor"]);

    let descriptor = cached(&description);
    assert_eq!(descriptor.elements.len(), 22);
    assert_eq!(descriptor.vendor_id, 0x1234);
    assert_eq!(descriptor.product_id, 0x5678);
    assert_eq!(descriptor.input_report_size, 9);

    let layout = resolver
        .registry()
        .build("HID::1234-5678")
        .expect("Layout not registered");
    assert_eq!(layout.base_layout, "HID");
    assert_eq!(layout.display_name, None);
    assert_eq!(layout.controls.len(), 20);

    assert_eq!(
        resolver.registry().find_matching(&description).as_deref(),
        Some("HID::1234-5678")
    );
}

#[test]
fn test_string_name() {
    let resolver = resolver();
    let mut commands = MockCommands::binary(JOYSTICK_REPORT);
    let mut description = DeviceDescription::new("HID")
        .with_manufacturer("Acme")
        .with_product("Pad");

    let name = resolver.resolve_layout(Some(DEVICE), &mut description, None, &mut commands);
    assert_eq!(name.as_deref(), Some("HID::Acme Pad"));

    let layout = resolver
        .registry()
        .build("HID::Acme Pad")
        .expect("Layout not registered");
    assert_eq!(layout.display_name.as_deref(), Some("Pad"));

    let other = DeviceDescription::new("HID")
        .with_manufacturer("Acme")
        .with_product("Wheel");
    assert_eq!(resolver.registry().find_matching(&other), None);
}

#[test]
fn test_empty_strings_fall_back_to_ids() {
    let resolver = resolver();
    let mut commands = MockCommands::binary(JOYSTICK_REPORT);
    let mut description = DeviceDescription::new("HID")
        .with_manufacturer("")
        .with_product("Pad")
        .with_capabilities(IDENTITY);

    let name = resolver.resolve_layout(Some(DEVICE), &mut description, None, &mut commands);
    assert_eq!(name.as_deref(), Some("HID::1234-5678"));
}

#[test]
fn test_cached_descriptor_skips_fetch() {
    let resolver = resolver();
    let mut description = DeviceDescription::new("HID").with_capabilities(IDENTITY);

    let mut commands = MockCommands::binary(JOYSTICK_REPORT);
    resolver.resolve_layout(Some(DEVICE), &mut description, None, &mut commands);

    let mut commands = MockCommands::default();
    let name = resolver
        .try_resolve_layout(None, &mut description, None, &mut commands)
        .expect("Failed to resolve");

    assert_eq!(name.as_deref(), Some("HID::1234-5678"));
    assert!(commands.calls.is_empty());
    assert_eq!(resolver.registry().len(), 1);
}

#[test]
fn test_parsed_descriptor() {
    let resolver = resolver();

    let parsed = parse_report_descriptor(GAMEPAD_REPORT)
        .expect("Invalid descriptor")
        .with_identity_of(&DeviceDescriptor {
            vendor_id: 0x045E,
            product_id: 0x028E,
            ..Default::default()
        });

    let mut commands = MockCommands::parsed(&parsed);
    let mut description = DeviceDescription::new("HID");

    let name = resolver
        .try_resolve_layout(Some(DEVICE), &mut description, None, &mut commands)
        .expect("Failed to resolve");

    assert_eq!(name.as_deref(), Some("HID::45E-28E"));
    assert_eq!(commands.calls, vec!["size", "parsed"]);
    assert_eq!(cached(&description), parsed);

    let layout = resolver
        .registry()
        .build("HID::45E-28E")
        .expect("Layout not registered");
    assert_eq!(layout.controls.len(), 9);

    let x = layout.control("X").expect("No X control");
    assert_eq!(x.byte_offset, 1);
}

#[test]
fn test_parsed_descriptor_failures() {
    let config = ResolverConfig {
        parsed_descriptor_buffer_size: 16,
        ..Default::default()
    };
    let resolver = LayoutResolver::new(config, Layouts::new());

    let mut commands = MockCommands {
        parsed_count: Some(-1),
        ..Default::default()
    };
    let result = resolver.try_resolve_layout(
        Some(DEVICE),
        &mut DeviceDescription::new("HID"),
        None,
        &mut commands,
    );
    assert!(matches!(
        result,
        Err(ResolveError::Transport(TransportError::CommandFailed { .. }))
    ));

    let mut commands = MockCommands {
        parsed_count: Some(17),
        ..Default::default()
    };
    let result = resolver.try_resolve_layout(
        Some(DEVICE),
        &mut DeviceDescription::new("HID"),
        None,
        &mut commands,
    );
    assert!(matches!(
        result,
        Err(ResolveError::Transport(TransportError::UnexpectedSize {
            expected: 16,
            actual: 17,
            ..
        }))
    ));

    let mut commands = MockCommands {
        parsed_descriptor: Some(b"not json".to_vec()),
        ..Default::default()
    };
    let result = resolver.try_resolve_layout(
        Some(DEVICE),
        &mut DeviceDescription::new("HID"),
        None,
        &mut commands,
    );
    assert!(matches!(result, Err(ResolveError::Decode(_))));
}

#[test]
fn test_short_read() {
    let resolver = resolver();
    let mut commands = MockCommands {
        short_read: true,
        ..MockCommands::binary(JOYSTICK_REPORT)
    };
    let mut description = DeviceDescription::new("HID").with_capabilities(IDENTITY);

    let result = resolver.try_resolve_layout(Some(DEVICE), &mut description, None, &mut commands);

    assert!(matches!(
        result,
        Err(ResolveError::Transport(TransportError::UnexpectedSize { .. }))
    ));
    assert_eq!(description.capabilities.as_deref(), Some(IDENTITY));
    assert!(resolver.registry().is_empty());
}

#[test]
fn test_parse_error() {
    let resolver = resolver();
    let mut commands = MockCommands::binary(&[0x05, 0x01, 0x26, 0xFF]);

    let result = resolver.try_resolve_layout(
        Some(DEVICE),
        &mut DeviceDescription::new("HID").with_capabilities(IDENTITY),
        None,
        &mut commands,
    );

    match result {
        Err(ResolveError::Parse(e)) => {
            assert_eq!(e.kind, ParseErrorKind::Truncated);
            assert_eq!(e.byte_offset, 2);
        }
        other => panic!("Expected parse error, got {:?}", other),
    }
}

#[test]
fn test_skipped_devices() {
    let resolver = resolver();
    let mut commands = MockCommands::binary(JOYSTICK_REPORT);

    let mut not_hid = DeviceDescription::new("XInput").with_capabilities(IDENTITY);
    let name = resolver
        .try_resolve_layout(Some(DEVICE), &mut not_hid, None, &mut commands)
        .expect("Failed to resolve");
    assert_eq!(name, None);

    let mut matched = DeviceDescription::new("HID").with_capabilities(IDENTITY);
    let name = resolver
        .try_resolve_layout(Some(DEVICE), &mut matched, Some("Gamepad"), &mut commands)
        .expect("Failed to resolve");
    assert_eq!(name, None);

    assert!(commands.calls.is_empty());
    assert_eq!(matched.capabilities.as_deref(), Some(IDENTITY));
}

#[test]
fn test_no_device_handle() {
    let resolver = resolver();
    let mut commands = MockCommands::binary(JOYSTICK_REPORT);
    let mut description = DeviceDescription::new("HID").with_capabilities(IDENTITY);

    let result = resolver.try_resolve_layout(None, &mut description, None, &mut commands);
    assert!(matches!(result, Err(ResolveError::NoDeviceHandle)));

    assert_eq!(
        resolver.resolve_layout(None, &mut description, None, &mut commands),
        None
    );
}

#[test]
fn test_identity_error() {
    let resolver = resolver();
    let mut commands = MockCommands::binary(JOYSTICK_REPORT);
    let mut description = DeviceDescription::new("HID");

    let result = resolver.try_resolve_layout(Some(DEVICE), &mut description, None, &mut commands);
    assert!(matches!(result, Err(ResolveError::IdentityError)));
    assert!(resolver.registry().is_empty());
}

#[test]
fn test_no_usable_elements() {
    const HAT_ONLY: [u8; 10] = [
        0x05, 0x01, // Usage Page (Generic Desktop)
        0x09, 0x39, // Usage (Hat Switch)
        0x75, 0x08, // Report Size (8)
        0x95, 0x01, // Report Count (1)
        0x81, 0x02, // Input (Data, Var, Abs)
    ];

    let resolver = resolver();
    let mut commands = MockCommands::binary(&HAT_ONLY);
    let mut description = DeviceDescription::new("HID").with_capabilities(IDENTITY);

    let result = resolver.try_resolve_layout(Some(DEVICE), &mut description, None, &mut commands);
    assert!(matches!(result, Err(ResolveError::NoUsableElements)));

    assert_eq!(cached(&description).elements.len(), 1);
}

#[test]
fn test_supported_usages() {
    let config = ResolverConfig {
        supported_usages: vec![PageUsage::new(0x01, 0x05)],
        ..Default::default()
    };
    let resolver = LayoutResolver::new(config, Layouts::new());

    let mut commands = MockCommands::binary(JOYSTICK_REPORT);
    let result = resolver.try_resolve_layout(
        Some(DEVICE),
        &mut DeviceDescription::new("HID").with_capabilities(IDENTITY),
        None,
        &mut commands,
    );
    assert!(matches!(
        result,
        Err(ResolveError::UnsupportedUsage {
            usage_page: 0x01,
            usage: 0x04
        })
    ));

    let mut commands = MockCommands::binary(GAMEPAD_REPORT);
    let result = resolver.try_resolve_layout(
        Some(DEVICE),
        &mut DeviceDescription::new("HID").with_capabilities(IDENTITY),
        None,
        &mut commands,
    );
    assert!(matches!(result, Ok(Some(_))));
}

#[test]
fn test_undecodable_capabilities() {
    let resolver = resolver();
    let mut commands = MockCommands::binary(JOYSTICK_REPORT);
    let mut description = DeviceDescription::new("HID")
        .with_manufacturer("Acme")
        .with_product("Pad")
        .with_capabilities("{not json");

    let name = resolver.resolve_layout(Some(DEVICE), &mut description, None, &mut commands);

    assert_eq!(name.as_deref(), Some("HID::Acme Pad"));
    assert_eq!(cached(&description).elements.len(), 22);
}

#[test]
fn test_registration_idempotent() {
    let resolver = resolver();

    for _ in 0..2 {
        let mut commands = MockCommands::binary(JOYSTICK_REPORT);
        let mut description = DeviceDescription::new("HID").with_capabilities(IDENTITY);
        let name = resolver.resolve_layout(Some(DEVICE), &mut description, None, &mut commands);
        assert_eq!(name.as_deref(), Some("HID::1234-5678"));
    }

    assert_eq!(resolver.registry().len(), 1);
}

#[test]
fn test_device_id_display() {
    assert_eq!(DeviceId::new(0x1234, 0x5678).to_string(), "1234-5678");
    assert_eq!(DeviceId::new(0x45E, 0xE).to_string(), "45E-E");
}

#[test]
fn test_device_name() {
    let name = DeviceName::from_strings(Some("Acme"), Some("Pad")).expect("No device name");
    assert_eq!(name.to_string(), "Acme Pad");

    assert_eq!(DeviceName::from_strings(Some("Acme"), None), None);
    assert_eq!(DeviceName::from_strings(Some(""), Some("Pad")), None);
}

#[test]
fn test_config_defaults() {
    let config = ResolverConfig::from_json("{}").expect("Invalid config");
    assert_eq!(config, ResolverConfig::default());
    assert_eq!(config.interface_name, "HID");
    assert_eq!(
        config.parsed_descriptor_buffer_size,
        DEFAULT_PARSED_DESCRIPTOR_BUFFER_SIZE
    );
    assert!(config.supports(0xFF00, 0x01));

    let config = ResolverConfig::from_json(
        r#"{"layoutNamespace":"Generic","supportedUsages":[{"usagePage":1,"usage":4}]}"#,
    )
    .expect("Invalid config");
    assert_eq!(config.layout_namespace, "Generic");
    assert!(config.supports(0x01, 0x04));
    assert!(!config.supports(0x01, 0x05));
}
