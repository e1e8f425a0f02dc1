//! Report descriptors shared between tests

/// Flight stick: 16 buttons, hat switch, 14-bit X / Y, 8-bit twist and throttle
pub const JOYSTICK_REPORT: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x04, // Usage (Joystick)
    0xA1, 0x01, // Collection (Application)
    0x09, 0x01, //   Usage (Pointer)
    0xA1, 0x00, //   Collection (Physical)
    0x05, 0x09, //     Usage Page (Button)
    0x19, 0x01, //     Usage Minimum (1)
    0x29, 0x10, //     Usage Maximum (16)
    0x15, 0x00, //     Logical Minimum (0)
    0x25, 0x01, //     Logical Maximum (1)
    0x75, 0x01, //     Report Size (1)
    0x95, 0x10, //     Report Count (16)
    0x81, 0x02, //     Input (Data, Var, Abs)
    0x05, 0x01, //     Usage Page (Generic Desktop)
    0x09, 0x39, //     Usage (Hat Switch)
    0x15, 0x00, //     Logical Minimum (0)
    0x25, 0x07, //     Logical Maximum (7)
    0x35, 0x00, //     Physical Minimum (0)
    0x46, 0x3B, 0x01, //     Physical Maximum (315)
    0x65, 0x14, //     Unit (Degrees)
    0x75, 0x04, //     Report Size (4)
    0x95, 0x01, //     Report Count (1)
    0x81, 0x42, //     Input (Data, Var, Abs, Null)
    0x65, 0x00, //     Unit (None)
    0x81, 0x03, //     Input (Const, Var, Abs)
    0x09, 0x30, //     Usage (X)
    0x09, 0x31, //     Usage (Y)
    0x26, 0xFF, 0x3F, //     Logical Maximum (16383)
    0x46, 0xFF, 0x3F, //     Physical Maximum (16383)
    0x75, 0x10, //     Report Size (16)
    0x95, 0x02, //     Report Count (2)
    0x81, 0x02, //     Input (Data, Var, Abs)
    0xC0, //   End Collection
    0x09, 0x35, //   Usage (Rz)
    0x09, 0x36, //   Usage (Slider)
    0x26, 0xFF, 0x00, //   Logical Maximum (255)
    0x46, 0xFF, 0x00, //   Physical Maximum (255)
    0x75, 0x08, //   Report Size (8)
    0x95, 0x02, //   Report Count (2)
    0x81, 0x02, //   Input (Data, Var, Abs)
    0xC0, // End Collection
];

/// Gamepad split across two numbered reports, with a rumble output
pub const GAMEPAD_REPORT: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x05, // Usage (Gamepad)
    0xA1, 0x01, // Collection (Application)
    0x85, 0x01, //   Report ID (1)
    0x05, 0x09, //   Usage Page (Button)
    0x19, 0x01, //   Usage Minimum (1)
    0x29, 0x08, //   Usage Maximum (8)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x75, 0x01, //   Report Size (1)
    0x95, 0x08, //   Report Count (8)
    0x81, 0x02, //   Input (Data, Var, Abs)
    0x85, 0x02, //   Report ID (2)
    0x05, 0x01, //   Usage Page (Generic Desktop)
    0x09, 0x30, //   Usage (X)
    0x15, 0x81, //   Logical Minimum (-127)
    0x25, 0x7F, //   Logical Maximum (127)
    0x75, 0x08, //   Report Size (8)
    0x95, 0x01, //   Report Count (1)
    0x81, 0x02, //   Input (Data, Var, Abs)
    0x06, 0x00, 0xFF, //   Usage Page (Vendor Defined 0xFF00)
    0x09, 0x01, //   Usage (0x01)
    0x91, 0x02, //   Output (Data, Var, Abs)
    0xC0, // End Collection
];
