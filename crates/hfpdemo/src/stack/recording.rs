//! In-memory stack that records every call
//!
//! Used as the loopback backend of the command line tool and as the test
//! double of the library. Local identity (name, class of device, features)
//! is kept so that getters observe earlier setters, and any call can be made
//! to fail with a chosen status.

use super::{BluetoothStack, EventSender, StackEvent};
use crate::config::{HciDriverConfig, PlatformConfig};
use crate::error::{StackError, StackResult};
use crate::gap::{
    AuthenticationResponse, BdAddr, BondingType, ClassOfDevice, ConnectabilityMode,
    DiscoverabilityMode, GapEvent, HciVersion, InquiryParameters, PairabilityMode,
};
use crate::hfre::{
    CodecId, HandsFreeFeatures, HfreEvent, LinkConnectConfig, LinkPolicy, PortId, SdpHandle,
    StackFeatures,
};
use log::debug;
use std::collections::HashMap;

/// One call made into the stack, with its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackCall {
    Initialize,
    Shutdown,
    EnableFeature(StackFeatures),
    QueryActiveFeatures,
    HciVersion,
    SetLinkConnectConfig(LinkConnectConfig),
    WriteDefaultLinkPolicy(LinkPolicy),
    DeleteStoredLinkKeys(Option<BdAddr>),
    EnableWidebandSpeech(u16),
    DisableWidebandSpeech,
    LocalAddress,
    SetClassOfDevice(ClassOfDevice),
    ClassOfDevice,
    SetLocalName(String),
    LocalName,
    SetDiscoverabilityMode(DiscoverabilityMode, u32),
    SetConnectabilityMode(ConnectabilityMode),
    SetPairabilityMode(PairabilityMode),
    RegisterRemoteAuthentication,
    PerformInquiry(InquiryParameters),
    InitiateBonding(BdAddr, BondingType),
    EndBonding(BdAddr),
    AuthenticationResponse(BdAddr, AuthenticationResponse),
    QueryRemoteName(BdAddr),
    QueryConnectionHandle(BdAddr),
    OpenHandsFreeServer(u32, HandsFreeFeatures),
    RegisterHandsFreeSdpRecord(PortId, String),
    UnregisterSdpRecord(PortId, SdpHandle),
    CloseServerPort(PortId),
    ClosePort(PortId),
    SetupAudioConnection(PortId),
    ReleaseAudioConnection(PortId),
    AnswerIncomingCall(PortId),
    HangUpCall(PortId),
    EnableCallerIdNotification(PortId, bool),
    SendAvailableCodecs(PortId, Vec<CodecId>),
    SendSelectCodec(PortId, CodecId),
}

impl StackCall {
    /// Name of the call, as used by [`RecordingStack::fail`]
    pub fn name(&self) -> &'static str {
        match self {
            StackCall::Initialize => "initialize",
            StackCall::Shutdown => "shutdown",
            StackCall::EnableFeature(_) => "enable_feature",
            StackCall::QueryActiveFeatures => "query_active_features",
            StackCall::HciVersion => "hci_version",
            StackCall::SetLinkConnectConfig(_) => "set_link_connect_config",
            StackCall::WriteDefaultLinkPolicy(_) => "write_default_link_policy",
            StackCall::DeleteStoredLinkKeys(_) => "delete_stored_link_keys",
            StackCall::EnableWidebandSpeech(_) => "enable_wideband_speech",
            StackCall::DisableWidebandSpeech => "disable_wideband_speech",
            StackCall::LocalAddress => "local_address",
            StackCall::SetClassOfDevice(_) => "set_class_of_device",
            StackCall::ClassOfDevice => "class_of_device",
            StackCall::SetLocalName(_) => "set_local_name",
            StackCall::LocalName => "local_name",
            StackCall::SetDiscoverabilityMode(..) => "set_discoverability_mode",
            StackCall::SetConnectabilityMode(_) => "set_connectability_mode",
            StackCall::SetPairabilityMode(_) => "set_pairability_mode",
            StackCall::RegisterRemoteAuthentication => "register_remote_authentication",
            StackCall::PerformInquiry(_) => "perform_inquiry",
            StackCall::InitiateBonding(..) => "initiate_bonding",
            StackCall::EndBonding(_) => "end_bonding",
            StackCall::AuthenticationResponse(..) => "authentication_response",
            StackCall::QueryRemoteName(_) => "query_remote_name",
            StackCall::QueryConnectionHandle(_) => "query_connection_handle",
            StackCall::OpenHandsFreeServer(..) => "open_handsfree_server",
            StackCall::RegisterHandsFreeSdpRecord(..) => "register_handsfree_sdp_record",
            StackCall::UnregisterSdpRecord(..) => "unregister_sdp_record",
            StackCall::CloseServerPort(_) => "close_server_port",
            StackCall::ClosePort(_) => "close_port",
            StackCall::SetupAudioConnection(_) => "setup_audio_connection",
            StackCall::ReleaseAudioConnection(_) => "release_audio_connection",
            StackCall::AnswerIncomingCall(_) => "answer_incoming_call",
            StackCall::HangUpCall(_) => "hang_up_call",
            StackCall::EnableCallerIdNotification(..) => "enable_caller_id_notification",
            StackCall::SendAvailableCodecs(..) => "send_available_codecs",
            StackCall::SendSelectCodec(..) => "send_select_codec",
        }
    }
}

/// Stack double that answers from local state
pub struct RecordingStack {
    calls: Vec<StackCall>,
    failures: HashMap<&'static str, i32>,
    events: Option<EventSender>,
    stack_id: u32,
    address: BdAddr,
    name: String,
    class_of_device: ClassOfDevice,
    hci_version: HciVersion,
    features: StackFeatures,
    link_policy_supported: bool,
    connection_handle: u16,
    next_port_id: u32,
    next_sdp_handle: u32,
}

impl RecordingStack {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            failures: HashMap::new(),
            events: None,
            stack_id: 1,
            address: BdAddr::new([0x66, 0x55, 0x44, 0x33, 0x22, 0x11]),
            name: String::new(),
            class_of_device: ClassOfDevice::default(),
            hci_version: HciVersion(6),
            features: StackFeatures::empty(),
            link_policy_supported: true,
            connection_handle: 0x0040,
            next_port_id: 1,
            next_sdp_handle: 0x0001_0000,
        }
    }

    /// Makes every later call named `call` fail with `status`
    pub fn fail(&mut self, call: &'static str, status: i32) {
        self.failures.insert(call, status);
    }

    pub fn succeed(&mut self, call: &'static str) {
        self.failures.remove(call);
    }

    pub fn calls(&self) -> &[StackCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Whether a call named `call` was made
    pub fn called(&self, call: &str) -> bool {
        self.calls.iter().any(|c| c.name() == call)
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls.iter().filter(|c| c.name() == call).count()
    }

    pub fn set_address(&mut self, address: BdAddr) {
        self.address = address;
    }

    pub fn set_hci_version(&mut self, version: HciVersion) {
        self.hci_version = version;
    }

    pub fn set_link_policy_supported(&mut self, supported: bool) {
        self.link_policy_supported = supported;
    }

    pub fn set_connection_handle(&mut self, handle: u16) {
        self.connection_handle = handle;
    }

    /// Overrides the active feature set, e.g. to drop wideband speech
    pub fn set_active_features(&mut self, features: StackFeatures) {
        self.features = features;
    }

    pub fn is_initialized(&self) -> bool {
        self.events.is_some()
    }

    /// Delivers a GAP event on the channel given at initialization
    pub fn emit_gap(&self, event: Option<GapEvent>) -> bool {
        self.emit(StackEvent::Gap(event))
    }

    /// Delivers an HFRE event on the channel given at initialization
    pub fn emit_hfre(&self, event: Option<HfreEvent>) -> bool {
        self.emit(StackEvent::Hfre(event))
    }

    fn emit(&self, event: StackEvent) -> bool {
        match &self.events {
            Some(sender) => sender.send(event).is_ok(),
            None => false,
        }
    }

    fn record(&mut self, call: StackCall) -> StackResult<()> {
        debug!("stack call: {:?}", call);
        let name = call.name();
        self.calls.push(call);
        match self.failures.get(name) {
            Some(&status) => Err(StackError::new(status)),
            None => Ok(()),
        }
    }
}

impl Default for RecordingStack {
    fn default() -> Self {
        Self::new()
    }
}

impl BluetoothStack for RecordingStack {
    fn initialize(
        &mut self,
        driver: &HciDriverConfig,
        platform: &PlatformConfig,
        events: EventSender,
    ) -> StackResult<u32> {
        debug!("initializing over {:?} with {:?}", driver, platform);
        self.record(StackCall::Initialize)?;
        self.events = Some(events);
        Ok(self.stack_id)
    }

    fn shutdown(&mut self) {
        let _ = self.record(StackCall::Shutdown);
        self.events = None;
        self.features = StackFeatures::empty();
    }

    fn enable_feature(&mut self, feature: StackFeatures) -> StackResult<()> {
        self.record(StackCall::EnableFeature(feature))?;
        self.features |= feature;
        Ok(())
    }

    fn query_active_features(&mut self) -> StackResult<StackFeatures> {
        self.record(StackCall::QueryActiveFeatures)?;
        Ok(self.features)
    }

    fn hci_version(&mut self) -> StackResult<HciVersion> {
        self.record(StackCall::HciVersion)?;
        Ok(self.hci_version)
    }

    fn set_link_connect_config(&mut self, config: LinkConnectConfig) -> StackResult<()> {
        self.record(StackCall::SetLinkConnectConfig(config))
    }

    fn write_default_link_policy_supported(&mut self) -> bool {
        self.link_policy_supported
    }

    fn write_default_link_policy(&mut self, policy: LinkPolicy) -> StackResult<()> {
        self.record(StackCall::WriteDefaultLinkPolicy(policy))
    }

    fn delete_stored_link_keys(&mut self, address: Option<BdAddr>) -> StackResult<u16> {
        self.record(StackCall::DeleteStoredLinkKeys(address))?;
        Ok(0)
    }

    fn enable_wideband_speech(&mut self, connection_handle: u16) -> StackResult<()> {
        self.record(StackCall::EnableWidebandSpeech(connection_handle))
    }

    fn disable_wideband_speech(&mut self) -> StackResult<()> {
        self.record(StackCall::DisableWidebandSpeech)
    }

    fn local_address(&mut self) -> StackResult<BdAddr> {
        self.record(StackCall::LocalAddress)?;
        Ok(self.address)
    }

    fn set_class_of_device(&mut self, class_of_device: ClassOfDevice) -> StackResult<()> {
        self.record(StackCall::SetClassOfDevice(class_of_device))?;
        self.class_of_device = class_of_device;
        Ok(())
    }

    fn class_of_device(&mut self) -> StackResult<ClassOfDevice> {
        self.record(StackCall::ClassOfDevice)?;
        Ok(self.class_of_device)
    }

    fn set_local_name(&mut self, name: &str) -> StackResult<()> {
        self.record(StackCall::SetLocalName(name.to_string()))?;
        self.name = name.to_string();
        Ok(())
    }

    fn local_name(&mut self) -> StackResult<String> {
        self.record(StackCall::LocalName)?;
        Ok(self.name.clone())
    }

    fn set_discoverability_mode(
        &mut self,
        mode: DiscoverabilityMode,
        timeout_secs: u32,
    ) -> StackResult<()> {
        self.record(StackCall::SetDiscoverabilityMode(mode, timeout_secs))
    }

    fn set_connectability_mode(&mut self, mode: ConnectabilityMode) -> StackResult<()> {
        self.record(StackCall::SetConnectabilityMode(mode))
    }

    fn set_pairability_mode(&mut self, mode: PairabilityMode) -> StackResult<()> {
        self.record(StackCall::SetPairabilityMode(mode))
    }

    fn register_remote_authentication(&mut self) -> StackResult<()> {
        self.record(StackCall::RegisterRemoteAuthentication)
    }

    fn perform_inquiry(&mut self, parameters: InquiryParameters) -> StackResult<()> {
        self.record(StackCall::PerformInquiry(parameters))
    }

    fn initiate_bonding(&mut self, address: BdAddr, bonding_type: BondingType) -> StackResult<()> {
        self.record(StackCall::InitiateBonding(address, bonding_type))
    }

    fn end_bonding(&mut self, address: BdAddr) -> StackResult<()> {
        self.record(StackCall::EndBonding(address))
    }

    fn authentication_response(
        &mut self,
        address: BdAddr,
        response: &AuthenticationResponse,
    ) -> StackResult<()> {
        self.record(StackCall::AuthenticationResponse(address, response.clone()))
    }

    fn query_remote_name(&mut self, address: BdAddr) -> StackResult<()> {
        self.record(StackCall::QueryRemoteName(address))
    }

    fn query_connection_handle(&mut self, address: BdAddr) -> StackResult<u16> {
        self.record(StackCall::QueryConnectionHandle(address))?;
        Ok(self.connection_handle)
    }

    fn open_handsfree_server(
        &mut self,
        server_port: u32,
        features: HandsFreeFeatures,
    ) -> StackResult<PortId> {
        self.record(StackCall::OpenHandsFreeServer(server_port, features))?;
        let port_id = PortId(self.next_port_id);
        self.next_port_id += 1;
        Ok(port_id)
    }

    fn register_handsfree_sdp_record(
        &mut self,
        port_id: PortId,
        service_name: &str,
    ) -> StackResult<SdpHandle> {
        self.record(StackCall::RegisterHandsFreeSdpRecord(
            port_id,
            service_name.to_string(),
        ))?;
        let handle = SdpHandle(self.next_sdp_handle);
        self.next_sdp_handle += 1;
        Ok(handle)
    }

    fn unregister_sdp_record(&mut self, port_id: PortId, handle: SdpHandle) -> StackResult<()> {
        self.record(StackCall::UnregisterSdpRecord(port_id, handle))
    }

    fn close_server_port(&mut self, port_id: PortId) -> StackResult<()> {
        self.record(StackCall::CloseServerPort(port_id))
    }

    fn close_port(&mut self, port_id: PortId) -> StackResult<()> {
        self.record(StackCall::ClosePort(port_id))
    }

    fn setup_audio_connection(&mut self, port_id: PortId) -> StackResult<()> {
        self.record(StackCall::SetupAudioConnection(port_id))
    }

    fn release_audio_connection(&mut self, port_id: PortId) -> StackResult<()> {
        self.record(StackCall::ReleaseAudioConnection(port_id))
    }

    fn answer_incoming_call(&mut self, port_id: PortId) -> StackResult<()> {
        self.record(StackCall::AnswerIncomingCall(port_id))
    }

    fn hang_up_call(&mut self, port_id: PortId) -> StackResult<()> {
        self.record(StackCall::HangUpCall(port_id))
    }

    fn enable_caller_id_notification(
        &mut self,
        port_id: PortId,
        enable: bool,
    ) -> StackResult<()> {
        self.record(StackCall::EnableCallerIdNotification(port_id, enable))
    }

    fn send_available_codecs(&mut self, port_id: PortId, codecs: &[CodecId]) -> StackResult<()> {
        self.record(StackCall::SendAvailableCodecs(port_id, codecs.to_vec()))
    }

    fn send_select_codec(&mut self, port_id: PortId, codec: CodecId) -> StackResult<()> {
        self.record(StackCall::SendSelectCodec(port_id, codec))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::event_channel;

    #[test]
    fn test_failure_injection() {
        let mut stack = RecordingStack::new();
        stack.fail("set_local_name", -12);
        assert_eq!(stack.set_local_name("x"), Err(StackError::new(-12)));
        stack.succeed("set_local_name");
        assert!(stack.set_local_name("y").is_ok());
        assert_eq!(stack.local_name().unwrap(), "y");
        assert_eq!(stack.count("set_local_name"), 2);
    }

    #[test]
    fn test_events_flow_after_initialize() {
        let mut stack = RecordingStack::new();
        let (tx, rx) = event_channel();
        assert!(!stack.emit_gap(None));
        let id = stack
            .initialize(&HciDriverConfig::Usb, &PlatformConfig::default(), tx)
            .unwrap();
        assert_eq!(id, 1);
        assert!(stack.emit_hfre(None));
        assert_eq!(rx.try_recv().unwrap(), StackEvent::Hfre(None));
        stack.shutdown();
        assert!(!stack.is_initialized());
    }

    #[test]
    fn test_enable_feature_is_reported_active() {
        let mut stack = RecordingStack::new();
        stack.enable_feature(StackFeatures::WIDE_BAND_SPEECH).unwrap();
        assert!(stack
            .query_active_features()
            .unwrap()
            .contains(StackFeatures::WIDE_BAND_SPEECH));
    }
}
