use crate::gap::constants::*;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BdAddr {
    pub bytes: [u8; 6],
}

impl BdAddr {
    /// The all-zero address, which the stack uses to mean "no device"
    pub const NULL: BdAddr = BdAddr { bytes: [0; 6] };

    pub fn new(bytes: [u8; 6]) -> Self {
        Self { bytes }
    }

    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if slice.len() >= 6 {
            let mut bytes = [0u8; 6];
            bytes.copy_from_slice(&slice[0..6]);
            Some(Self { bytes })
        } else {
            None
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn is_null(&self) -> bool {
        self.bytes == [0; 6]
    }
}

impl fmt::Display for BdAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "0x{:02X}{:02X}{:02X}{:02X}{:02X}{:02X}",
            self.bytes[5],
            self.bytes[4],
            self.bytes[3],
            self.bytes[2],
            self.bytes[1],
            self.bytes[0]
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoverabilityMode {
    NonDiscoverable,
    LimitedDiscoverable,
    GeneralDiscoverable,
}

impl DiscoverabilityMode {
    /// Maps the console value (0 = Non, 1 = Limited, 2 = General)
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(DiscoverabilityMode::NonDiscoverable),
            1 => Some(DiscoverabilityMode::LimitedDiscoverable),
            2 => Some(DiscoverabilityMode::GeneralDiscoverable),
            _ => None,
        }
    }

    /// Discoverable timeout in seconds; zero means no timeout
    pub fn timeout(&self) -> u32 {
        match self {
            DiscoverabilityMode::LimitedDiscoverable => LIMITED_DISCOVERABLE_TIMEOUT_SECS,
            _ => 0,
        }
    }
}

impl fmt::Display for DiscoverabilityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscoverabilityMode::NonDiscoverable => write!(f, "Non"),
            DiscoverabilityMode::LimitedDiscoverable => write!(f, "Limited"),
            DiscoverabilityMode::GeneralDiscoverable => write!(f, "General"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectabilityMode {
    NonConnectable,
    Connectable,
}

impl ConnectabilityMode {
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(ConnectabilityMode::NonConnectable),
            1 => Some(ConnectabilityMode::Connectable),
            _ => None,
        }
    }
}

impl fmt::Display for ConnectabilityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectabilityMode::NonConnectable => write!(f, "Non Connectable"),
            ConnectabilityMode::Connectable => write!(f, "Connectable"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairabilityMode {
    NonPairable,
    Pairable,
    PairableSecureSimplePairing,
}

impl PairabilityMode {
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(PairabilityMode::NonPairable),
            1 => Some(PairabilityMode::Pairable),
            2 => Some(PairabilityMode::PairableSecureSimplePairing),
            _ => None,
        }
    }
}

impl fmt::Display for PairabilityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PairabilityMode::NonPairable => write!(f, "Non Pairable"),
            PairabilityMode::Pairable => write!(f, "Pairable"),
            PairabilityMode::PairableSecureSimplePairing => {
                write!(f, "Pairable (Secure Simple Pairing)")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BondingType {
    Dedicated,
    General,
}

impl fmt::Display for BondingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BondingType::Dedicated => write!(f, "Dedicated"),
            BondingType::General => write!(f, "General"),
        }
    }
}

/// IO Capability used for Secure Simple Pairing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoCapability {
    DisplayOnly,
    DisplayYesNo,
    KeyboardOnly,
    NoInputNoOutput,
}

impl IoCapability {
    pub fn to_u8(&self) -> u8 {
        match self {
            IoCapability::DisplayOnly => IO_CAPABILITY_DISPLAY_ONLY,
            IoCapability::DisplayYesNo => IO_CAPABILITY_DISPLAY_YES_NO,
            IoCapability::KeyboardOnly => IO_CAPABILITY_KEYBOARD_ONLY,
            IoCapability::NoInputNoOutput => IO_CAPABILITY_NO_INPUT_NO_OUTPUT,
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            IO_CAPABILITY_DISPLAY_ONLY => Some(IoCapability::DisplayOnly),
            IO_CAPABILITY_DISPLAY_YES_NO => Some(IoCapability::DisplayYesNo),
            IO_CAPABILITY_KEYBOARD_ONLY => Some(IoCapability::KeyboardOnly),
            IO_CAPABILITY_NO_INPUT_NO_OUTPUT => Some(IoCapability::NoInputNoOutput),
            _ => None,
        }
    }
}

impl fmt::Display for IoCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoCapability::DisplayOnly => write!(f, "Display Only"),
            IoCapability::DisplayYesNo => write!(f, "Display Yes/No"),
            IoCapability::KeyboardOnly => write!(f, "Keyboard Only"),
            IoCapability::NoInputNoOutput => write!(f, "No Input/Output"),
        }
    }
}

/// Secure Simple Pairing parameters answered on an IO capability request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairingPolicy {
    pub io_capability: IoCapability,
    pub mitm_protection: bool,
    pub oob_data_present: bool,
}

impl Default for PairingPolicy {
    fn default() -> Self {
        Self {
            io_capability: IoCapability::NoInputNoOutput,
            mitm_protection: false,
            oob_data_present: false,
        }
    }
}

/// 24-bit Class of Device value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClassOfDevice(u32);

impl ClassOfDevice {
    /// Keeps the low 24 bits of `value`
    pub fn new(value: u32) -> Self {
        Self(value & 0x00FF_FFFF)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn major_device_class(&self) -> u8 {
        ((self.0 & COD_MAJOR_DEVICE_CLASS_MASK) >> 8) as u8
    }

    pub fn minor_device_class(&self) -> u8 {
        ((self.0 & COD_MINOR_DEVICE_CLASS_MASK) >> 2) as u8
    }

    pub fn set_major_device_class(&mut self, major: u8) {
        self.0 = (self.0 & !COD_MAJOR_DEVICE_CLASS_MASK)
            | ((u32::from(major) << 8) & COD_MAJOR_DEVICE_CLASS_MASK);
    }

    pub fn set_minor_device_class(&mut self, minor: u8) {
        self.0 = (self.0 & !COD_MINOR_DEVICE_CLASS_MASK)
            | ((u32::from(minor) << 2) & COD_MINOR_DEVICE_CLASS_MASK);
    }
}

impl fmt::Display for ClassOfDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:06X}", self.0)
    }
}

/// BR/EDR link key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinkKey(pub [u8; 16]);

impl fmt::Display for LinkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode_upper(self.0))
    }
}

/// Legacy PIN code, 1 to 16 bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinCode(Vec<u8>);

impl PinCode {
    pub fn new(pin: &str) -> Option<Self> {
        let bytes = pin.as_bytes();
        if bytes.is_empty() || bytes.len() > MAX_PIN_CODE_LENGTH {
            None
        } else {
            Some(Self(bytes.to_vec()))
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Data handed back to the stack to answer an authentication event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationResponse {
    /// `None` tells the stack no key is stored for the device
    LinkKey(Option<LinkKey>),
    PinCode(PinCode),
    Passkey(u32),
    UserConfirmation(bool),
    IoCapabilities(PairingPolicy),
    /// Out of band data is never supplied
    OutOfBandData,
}

/// Chipset HCI version reported at stack open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HciVersion(pub u8);

impl fmt::Display for HciVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = HCI_VERSION_NAMES
            .get(self.0 as usize)
            .copied()
            .unwrap_or("Unknown (greater 4.0)");
        write!(f, "{}", name)
    }
}

/// Parameters of a general inquiry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InquiryParameters {
    pub minimum_period: u32,
    pub maximum_period: u32,
    pub length: u32,
    pub max_responses: usize,
}

impl Default for InquiryParameters {
    fn default() -> Self {
        Self {
            minimum_period: 0,
            maximum_period: 0,
            length: INQUIRY_LENGTH,
            max_responses: crate::config::MAX_INQUIRY_RESULTS,
        }
    }
}
