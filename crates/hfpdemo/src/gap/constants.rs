// IO capability values
pub const IO_CAPABILITY_DISPLAY_ONLY: u8 = 0x00;
pub const IO_CAPABILITY_DISPLAY_YES_NO: u8 = 0x01;
pub const IO_CAPABILITY_KEYBOARD_ONLY: u8 = 0x02;
pub const IO_CAPABILITY_NO_INPUT_NO_OUTPUT: u8 = 0x03;

// Class of Device fields
pub const COD_MAJOR_DEVICE_CLASS_MASK: u32 = 0x0000_1F00;
pub const COD_MINOR_DEVICE_CLASS_MASK: u32 = 0x0000_00FC;
pub const COD_MAJOR_AUDIO_VIDEO: u8 = 0x04;
pub const COD_MINOR_AUDIO_VIDEO_HANDS_FREE: u8 = 0x02;

// Inquiry
pub const INQUIRY_LENGTH: u32 = 10; // 1.28 s units

// Discoverability
pub const LIMITED_DISCOVERABLE_TIMEOUT_SECS: u32 = 60;

// Authentication
pub const MAX_PIN_CODE_LENGTH: usize = 16;
pub const MAX_PASSKEY_DIGITS: usize = 6;
pub const MAX_PASSKEY_VALUE: u32 = 999_999;

pub const HCI_VERSION_NAMES: [&str; 7] = ["1.0b", "1.1", "1.2", "2.0", "2.1", "3.0", "4.0"];
