/// Top-level category defining the usage of a report descriptor main item
///
/// Numeric values follow the HID Usage Tables. Ranges that share a meaning keep their exact
/// page so descriptors round-trip bit-for-bit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UsagePage {
    Undefined,
    GenericDesktop,
    SimulationControls,
    VRControls,
    SportsControls,
    GameControls,
    GenericDeviceControls,
    KeyboardKeypad,
    Led,
    Button,
    Ordinal,
    TelephonyDevice,
    Consumer,
    Digitizers,
    Haptics,
    PhysicalInputDevice,
    Unicode,
    AlphanumericDisplay,
    Sensors,
    MedicalInstrument,
    Monitor(u16),
    Power(u16),
    BarCodeScanner,
    Scale,
    MagneticStripeReadingDevices,
    ReservedPointOfSale,
    CameraControl,
    Arcade,
    VendorDefined(u16),
    Reserved(u16),
}

impl From<u16> for UsagePage {
    fn from(v: u16) -> Self {
        match v {
            0x00 => UsagePage::Undefined,
            0x01 => UsagePage::GenericDesktop,
            0x02 => UsagePage::SimulationControls,
            0x03 => UsagePage::VRControls,
            0x04 => UsagePage::SportsControls,
            0x05 => UsagePage::GameControls,
            0x06 => UsagePage::GenericDeviceControls,
            0x07 => UsagePage::KeyboardKeypad,
            0x08 => UsagePage::Led,
            0x09 => UsagePage::Button,
            0x0A => UsagePage::Ordinal,
            0x0B => UsagePage::TelephonyDevice,
            0x0C => UsagePage::Consumer,
            0x0D => UsagePage::Digitizers,
            0x0E => UsagePage::Haptics,
            0x0F => UsagePage::PhysicalInputDevice,
            0x10 => UsagePage::Unicode,
            0x14 => UsagePage::AlphanumericDisplay,
            0x20 => UsagePage::Sensors,
            0x40 => UsagePage::MedicalInstrument,
            0x80..=0x83 => UsagePage::Monitor(v),
            0x84..=0x87 => UsagePage::Power(v),
            0x8C => UsagePage::BarCodeScanner,
            0x8D => UsagePage::Scale,
            0x8E => UsagePage::MagneticStripeReadingDevices,
            0x8F => UsagePage::ReservedPointOfSale,
            0x90 => UsagePage::CameraControl,
            0x91 => UsagePage::Arcade,
            0xFF00..=0xFFFF => UsagePage::VendorDefined(v),
            usage_page => UsagePage::Reserved(usage_page),
        }
    }
}
