//! Events delivered by the hands-free profile layer of the stack

use crate::gap::BdAddr;
use crate::hfre::types::{IndicatorValue, PortId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HfreEvent {
    OpenPortIndication {
        port_id: PortId,
        remote_device: BdAddr,
    },
    OpenServiceLevelConnectionIndication {
        port_id: PortId,
        remote_supported_features: Option<u32>,
        remote_call_hold_multiparty_support: u32,
    },
    ControlIndicatorStatusIndication {
        port_id: PortId,
        description: String,
        value: IndicatorValue,
    },
    ControlIndicatorStatusConfirmation {
        port_id: PortId,
        description: String,
        value: IndicatorValue,
    },
    CallHoldMultipartySupportConfirmation {
        port_id: PortId,
        support_mask: u32,
    },
    CallWaitingNotificationIndication {
        port_id: PortId,
        phone_number: Option<String>,
    },
    CallLineIdentificationNotificationIndication {
        port_id: PortId,
        phone_number: String,
    },
    RingIndication {
        port_id: PortId,
    },
    InBandRingToneSettingIndication {
        port_id: PortId,
        enabled: bool,
    },
    VoiceTagRequestIndication {
        port_id: PortId,
    },
    /// `None` means the audio gateway rejected the request
    VoiceTagRequestConfirmation {
        port_id: PortId,
        phone_number: Option<String>,
    },
    ClosePortIndication {
        port_id: PortId,
        close_status: u32,
    },
    AudioConnectionIndication {
        port_id: PortId,
        open_status: u32,
    },
    AudioDisconnectionIndication {
        port_id: PortId,
    },
    SubscriberNumberInformationIndication {
        port_id: PortId,
    },
    SubscriberNumberInformationConfirmation {
        port_id: PortId,
        service_type: u32,
        number_format: u32,
        phone_number: String,
    },
    ResponseHoldStatusConfirmation {
        port_id: PortId,
        call_state: u32,
    },
    IncomingCallStateIndication {
        port_id: PortId,
        call_state: u32,
    },
    IncomingCallStateConfirmation {
        port_id: PortId,
        call_state: u32,
    },
    CommandResult {
        port_id: PortId,
        result_type: u32,
        result_value: u32,
    },
    /// The audio gateway asks which codec to use; `codec_id` is the raw id
    CodecSelectRequestIndication {
        port_id: PortId,
        codec_id: u8,
    },
    Unhandled(u32),
}
