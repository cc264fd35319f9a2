use bitflags::bitflags;
use std::fmt;

/// Handle of an open hands-free port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortId(pub u32);

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}

/// Handle of a registered SDP service record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SdpHandle(pub u32);

/// Audio codecs a hands-free connection can negotiate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecId {
    /// Narrowband, 8 kHz
    Cvsd,
    /// Wideband speech, 16 kHz
    Msbc,
}

impl CodecId {
    pub const CVSD_ID: u8 = 0x01;
    pub const MSBC_ID: u8 = 0x02;

    pub fn to_u8(&self) -> u8 {
        match self {
            CodecId::Cvsd => Self::CVSD_ID,
            CodecId::Msbc => Self::MSBC_ID,
        }
    }

    /// Anything that is not mSBC is treated as CVSD
    pub fn normalize(value: u8) -> Self {
        if value == Self::MSBC_ID {
            CodecId::Msbc
        } else {
            CodecId::Cvsd
        }
    }
}

impl fmt::Display for CodecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecId::Cvsd => write!(f, "CVSD"),
            CodecId::Msbc => write!(f, "mSBC"),
        }
    }
}

bitflags! {
    /// Hands-free unit features advertised when the server opens
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct HandsFreeFeatures: u32 {
        const SOUND_ENHANCEMENT = 0x0001;
        const CALL_WAITING_THREE_WAY = 0x0002;
        const CLI_PRESENTATION = 0x0004;
        const VOICE_RECOGNITION = 0x0008;
        const REMOTE_VOLUME_CONTROL = 0x0010;
        const ENHANCED_CALL_STATUS = 0x0020;
        const ENHANCED_CALL_CONTROL = 0x0040;
        const CODEC_NEGOTIATION = 0x0080;
    }
}

impl HandsFreeFeatures {
    /// Feature set this demo advertises
    pub fn supported() -> Self {
        HandsFreeFeatures::CLI_PRESENTATION
            | HandsFreeFeatures::ENHANCED_CALL_STATUS
            | HandsFreeFeatures::SOUND_ENHANCEMENT
            | HandsFreeFeatures::VOICE_RECOGNITION
            | HandsFreeFeatures::CODEC_NEGOTIATION
    }
}

bitflags! {
    /// Optional stack features
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct StackFeatures: u32 {
        const BLUETOOTH_LOW_ENERGY = 0x0001;
        const WIDE_BAND_SPEECH = 0x0002;
    }
}

bitflags! {
    /// HCI default link policy settings
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LinkPolicy: u16 {
        const ENABLE_MASTER_SLAVE_SWITCH = 0x0001;
        const ENABLE_HOLD_MODE = 0x0002;
        const ENABLE_SNIFF_MODE = 0x0004;
        const ENABLE_PARK_MODE = 0x0008;
    }
}

/// How the link layer answers role switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkConnectConfig {
    pub allow_role_switch_on_request: bool,
    pub maintain_current_role_on_response: bool,
}

/// Value of an indicator reported by the audio gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndicatorValue {
    Boolean(bool),
    Range(u32),
}

impl fmt::Display for IndicatorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorValue::Boolean(true) => write!(f, "TRUE"),
            IndicatorValue::Boolean(false) => write!(f, "FALSE"),
            IndicatorValue::Range(v) => write!(f, "{}", v),
        }
    }
}
