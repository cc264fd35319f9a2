//! Interface to the Bluetooth protocol stack
//!
//! The stack itself is an external component. The application drives it
//! through the synchronous calls of [`BluetoothStack`] and receives its
//! asynchronous notifications as [`StackEvent`]s on the channel handed over
//! at initialization.

pub mod recording;

use crate::config::{HciDriverConfig, PlatformConfig};
use crate::error::StackResult;
use crate::gap::{
    AuthenticationResponse, BdAddr, BondingType, ClassOfDevice, ConnectabilityMode,
    DiscoverabilityMode, GapEvent, HciVersion, InquiryParameters, PairabilityMode,
};
use crate::hfre::{
    CodecId, HandsFreeFeatures, HfreEvent, LinkConnectConfig, LinkPolicy, PortId, SdpHandle,
    StackFeatures,
};
use std::sync::mpsc;

pub use recording::{RecordingStack, StackCall};

/// Notification raised by the stack. A `None` payload is an event that
/// arrived without its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackEvent {
    Gap(Option<GapEvent>),
    Hfre(Option<HfreEvent>),
}

pub type EventSender = mpsc::Sender<StackEvent>;
pub type EventReceiver = mpsc::Receiver<StackEvent>;

/// Creates the channel the stack delivers its events on
pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::channel()
}

/// Synchronous call surface of the Bluetooth stack
pub trait BluetoothStack {
    /// Brings up the platform layer and the stack; returns the stack id
    fn initialize(
        &mut self,
        driver: &HciDriverConfig,
        platform: &PlatformConfig,
        events: EventSender,
    ) -> StackResult<u32>;

    fn shutdown(&mut self);

    // Controller and vendor features
    fn enable_feature(&mut self, feature: StackFeatures) -> StackResult<()>;
    fn query_active_features(&mut self) -> StackResult<StackFeatures>;
    fn hci_version(&mut self) -> StackResult<HciVersion>;
    fn set_link_connect_config(&mut self, config: LinkConnectConfig) -> StackResult<()>;
    fn write_default_link_policy_supported(&mut self) -> bool;
    fn write_default_link_policy(&mut self, policy: LinkPolicy) -> StackResult<()>;
    /// Deletes the key of one device, or every stored key for `None`.
    /// Returns the number of keys deleted.
    fn delete_stored_link_keys(&mut self, address: Option<BdAddr>) -> StackResult<u16>;
    fn enable_wideband_speech(&mut self, connection_handle: u16) -> StackResult<()>;
    fn disable_wideband_speech(&mut self) -> StackResult<()>;

    // GAP
    fn local_address(&mut self) -> StackResult<BdAddr>;
    fn set_class_of_device(&mut self, class_of_device: ClassOfDevice) -> StackResult<()>;
    fn class_of_device(&mut self) -> StackResult<ClassOfDevice>;
    fn set_local_name(&mut self, name: &str) -> StackResult<()>;
    fn local_name(&mut self) -> StackResult<String>;
    fn set_discoverability_mode(
        &mut self,
        mode: DiscoverabilityMode,
        timeout_secs: u32,
    ) -> StackResult<()>;
    fn set_connectability_mode(&mut self, mode: ConnectabilityMode) -> StackResult<()>;
    fn set_pairability_mode(&mut self, mode: PairabilityMode) -> StackResult<()>;
    fn register_remote_authentication(&mut self) -> StackResult<()>;
    fn perform_inquiry(&mut self, parameters: InquiryParameters) -> StackResult<()>;
    fn initiate_bonding(&mut self, address: BdAddr, bonding_type: BondingType) -> StackResult<()>;
    fn end_bonding(&mut self, address: BdAddr) -> StackResult<()>;
    fn authentication_response(
        &mut self,
        address: BdAddr,
        response: &AuthenticationResponse,
    ) -> StackResult<()>;
    fn query_remote_name(&mut self, address: BdAddr) -> StackResult<()>;
    fn query_connection_handle(&mut self, address: BdAddr) -> StackResult<u16>;

    // Hands-free profile
    fn open_handsfree_server(
        &mut self,
        server_port: u32,
        features: HandsFreeFeatures,
    ) -> StackResult<PortId>;
    fn register_handsfree_sdp_record(
        &mut self,
        port_id: PortId,
        service_name: &str,
    ) -> StackResult<SdpHandle>;
    fn unregister_sdp_record(&mut self, port_id: PortId, handle: SdpHandle) -> StackResult<()>;
    fn close_server_port(&mut self, port_id: PortId) -> StackResult<()>;
    fn close_port(&mut self, port_id: PortId) -> StackResult<()>;
    fn setup_audio_connection(&mut self, port_id: PortId) -> StackResult<()>;
    fn release_audio_connection(&mut self, port_id: PortId) -> StackResult<()>;
    fn answer_incoming_call(&mut self, port_id: PortId) -> StackResult<()>;
    fn hang_up_call(&mut self, port_id: PortId) -> StackResult<()>;
    fn enable_caller_id_notification(&mut self, port_id: PortId, enable: bool)
        -> StackResult<()>;
    fn send_available_codecs(&mut self, port_id: PortId, codecs: &[CodecId]) -> StackResult<()>;
    fn send_select_codec(&mut self, port_id: PortId, codec: CodecId) -> StackResult<()>;
}
