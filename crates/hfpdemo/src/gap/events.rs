//! Events delivered by the GAP layer of the stack

use crate::gap::types::{BdAddr, LinkKey, PairingPolicy};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GapEvent {
    /// Inquiry completed; carries every device found
    InquiryResult { devices: Vec<BdAddr> },
    /// A single device seen while an inquiry is running
    InquiryEntryResult { address: BdAddr },
    Authentication {
        remote_device: BdAddr,
        event: AuthenticationEvent,
    },
    RemoteNameResult {
        remote_device: BdAddr,
        name: Option<String>,
    },
    /// Event type this application has no handler for
    Unhandled(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationEvent {
    LinkKeyRequest,
    PinCodeRequest,
    AuthenticationStatus { status: u8 },
    LinkKeyCreation { link_key: LinkKey },
    IoCapabilityRequest,
    IoCapabilityResponse { remote: PairingPolicy },
    UserConfirmationRequest { numeric_value: u32 },
    PasskeyRequest,
    RemoteOutOfBandDataRequest,
    PasskeyNotification { passkey: u32 },
    KeypressNotification { keypress: u8 },
    Unhandled(u32),
}
