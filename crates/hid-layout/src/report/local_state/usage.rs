use crate::report::{global_state::UsagePage, report_descriptor::tags::ItemValue};

/// A usage as declared by a local item
///
/// Four-byte usages carry their own usage page in the upper 16 bits, overriding the
/// global usage page for that usage only.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalUsage {
    pub page: Option<u16>,
    pub id: u16,
}

impl LocalUsage {
    pub fn from_item(data: ItemValue) -> Self {
        let v = data.unsigned();
        if data.size() == 4 {
            LocalUsage {
                page: Some((v >> 16) as u16),
                id: v as u16,
            }
        } else {
            LocalUsage {
                page: None,
                id: v as u16,
            }
        }
    }
}

/// Semantic usage of an element, resolved against its usage page
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Usage {
    GenericDesktop(GenericDesktopUsage),
    Button(u16),
    Other { page: u16, id: u16 },
}

impl Usage {
    pub fn new(page: u16, id: u16) -> Self {
        match UsagePage::from(page) {
            UsagePage::GenericDesktop => Usage::GenericDesktop(GenericDesktopUsage::from(id)),
            UsagePage::Button => Usage::Button(id),
            _ => Usage::Other { page, id },
        }
    }
}

/// Generic Desktop page usages
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GenericDesktopUsage {
    Pointer,
    Mouse,
    Joystick,
    Gamepad,
    Keyboard,
    Keypad,
    MultiAxisController,
    TabletPcControls,
    X,
    Y,
    Z,
    Rx,
    Ry,
    Rz,
    Slider,
    Dial,
    Wheel,
    HatSwitch,
    CountedBuffer,
    ByteCount,
    MotionWakeup,
    Start,
    Select,
    Vx,
    Vy,
    Vz,
    Vbrx,
    Vbry,
    Vbrz,
    Vno,
    FeatureNotification,
    ResolutionMultiplier,
    SystemControl,
    SystemPowerDown,
    SystemSleep,
    SystemWakeUp,
    SystemContextMenu,
    SystemMainMenu,
    SystemAppMenu,
    SystemMenuHelp,
    SystemMenuExit,
    SystemMenuSelect,
    SystemMenuRight,
    SystemMenuLeft,
    SystemMenuUp,
    SystemMenuDown,
    DpadUp,
    DpadDown,
    DpadRight,
    DpadLeft,
    Reserved(u16),
}

impl GenericDesktopUsage {
    /// Symbolic name from the usage tables, `None` for reserved usages
    pub fn name(&self) -> Option<&'static str> {
        use GenericDesktopUsage::*;
        Some(match self {
            Pointer => "Pointer",
            Mouse => "Mouse",
            Joystick => "Joystick",
            Gamepad => "Gamepad",
            Keyboard => "Keyboard",
            Keypad => "Keypad",
            MultiAxisController => "MultiAxisController",
            TabletPcControls => "TabletPcControls",
            X => "X",
            Y => "Y",
            Z => "Z",
            Rx => "Rx",
            Ry => "Ry",
            Rz => "Rz",
            Slider => "Slider",
            Dial => "Dial",
            Wheel => "Wheel",
            HatSwitch => "HatSwitch",
            CountedBuffer => "CountedBuffer",
            ByteCount => "ByteCount",
            MotionWakeup => "MotionWakeup",
            Start => "Start",
            Select => "Select",
            Vx => "Vx",
            Vy => "Vy",
            Vz => "Vz",
            Vbrx => "Vbrx",
            Vbry => "Vbry",
            Vbrz => "Vbrz",
            Vno => "Vno",
            FeatureNotification => "FeatureNotification",
            ResolutionMultiplier => "ResolutionMultiplier",
            SystemControl => "SystemControl",
            SystemPowerDown => "SystemPowerDown",
            SystemSleep => "SystemSleep",
            SystemWakeUp => "SystemWakeUp",
            SystemContextMenu => "SystemContextMenu",
            SystemMainMenu => "SystemMainMenu",
            SystemAppMenu => "SystemAppMenu",
            SystemMenuHelp => "SystemMenuHelp",
            SystemMenuExit => "SystemMenuExit",
            SystemMenuSelect => "SystemMenuSelect",
            SystemMenuRight => "SystemMenuRight",
            SystemMenuLeft => "SystemMenuLeft",
            SystemMenuUp => "SystemMenuUp",
            SystemMenuDown => "SystemMenuDown",
            DpadUp => "DpadUp",
            DpadDown => "DpadDown",
            DpadRight => "DpadRight",
            DpadLeft => "DpadLeft",
            Reserved(_) => return None,
        })
    }
}

impl From<u16> for GenericDesktopUsage {
    fn from(v: u16) -> Self {
        use GenericDesktopUsage::*;
        match v {
            0x01 => Pointer,
            0x02 => Mouse,
            0x04 => Joystick,
            0x05 => Gamepad,
            0x06 => Keyboard,
            0x07 => Keypad,
            0x08 => MultiAxisController,
            0x09 => TabletPcControls,
            0x30 => X,
            0x31 => Y,
            0x32 => Z,
            0x33 => Rx,
            0x34 => Ry,
            0x35 => Rz,
            0x36 => Slider,
            0x37 => Dial,
            0x38 => Wheel,
            0x39 => HatSwitch,
            0x3A => CountedBuffer,
            0x3B => ByteCount,
            0x3C => MotionWakeup,
            0x3D => Start,
            0x3E => Select,
            0x40 => Vx,
            0x41 => Vy,
            0x42 => Vz,
            0x43 => Vbrx,
            0x44 => Vbry,
            0x45 => Vbrz,
            0x46 => Vno,
            0x47 => FeatureNotification,
            0x48 => ResolutionMultiplier,
            0x80 => SystemControl,
            0x81 => SystemPowerDown,
            0x82 => SystemSleep,
            0x83 => SystemWakeUp,
            0x84 => SystemContextMenu,
            0x85 => SystemMainMenu,
            0x86 => SystemAppMenu,
            0x87 => SystemMenuHelp,
            0x88 => SystemMenuExit,
            0x89 => SystemMenuSelect,
            0x8A => SystemMenuRight,
            0x8B => SystemMenuLeft,
            0x8C => SystemMenuUp,
            0x8D => SystemMenuDown,
            0x90 => DpadUp,
            0x91 => DpadDown,
            0x92 => DpadRight,
            0x93 => DpadLeft,
            v => Reserved(v),
        }
    }
}
