//! Handling of hands-free profile events and audio codec negotiation

use super::Session;
use crate::hfre::{CodecId, HfreEvent, PortId, StackFeatures};
use crate::stack::BluetoothStack;
use log::{debug, info, warn};
use std::fmt;

/// Why a wideband request ended on narrowband
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecFallback {
    /// No audio gateway is connected
    NotConnected,
    /// The connection handle of the gateway could not be queried
    ConnectionHandle(i32),
    /// The active stack features could not be queried
    FeatureQuery(i32),
    /// The stack reports wideband speech as inactive
    WidebandInactive,
    /// Enabling wideband speech on the connection failed
    EnableWideband(i32),
}

impl fmt::Display for CodecFallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecFallback::NotConnected => write!(f, "no audio gateway connected"),
            CodecFallback::ConnectionHandle(status) => {
                write!(f, "connection handle query failed ({})", status)
            }
            CodecFallback::FeatureQuery(status) => {
                write!(f, "active feature query failed ({})", status)
            }
            CodecFallback::WidebandInactive => write!(f, "WBS feature is not enabled"),
            CodecFallback::EnableWideband(status) => {
                write!(f, "enabling WBS failed ({})", status)
            }
        }
    }
}

/// Outcome of a codec select request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecNegotiation {
    /// Narrowband was requested and offered
    Narrowband,
    /// Wideband is enabled on the connection and mSBC was selected
    Wideband { connection_handle: u16 },
    /// Wideband was requested, narrowband was offered instead
    Fallback(CodecFallback),
}

impl CodecNegotiation {
    /// Codec the negotiation settled on
    pub fn codec(&self) -> CodecId {
        match self {
            CodecNegotiation::Wideband { .. } => CodecId::Msbc,
            _ => CodecId::Cvsd,
        }
    }
}

impl<S: BluetoothStack> Session<S> {
    /// Handle one hands-free event. A `None` payload is reported and
    /// ignored.
    pub fn handle_hfre_event(&mut self, event: Option<HfreEvent>) {
        let event = match event {
            Some(event) => event,
            None => {
                warn!("HFRE event without data");
                self.display("HFRE callback data: Event_Data = NULL.");
                self.prompt();
                return;
            }
        };

        debug!("HFRE event: {:?}", event);
        match event {
            HfreEvent::OpenPortIndication {
                port_id,
                remote_device,
            } => {
                info!("audio gateway {} connected on port {}", remote_device, port_id);
                self.display(format!(
                    "HFRE Open Port Indication, ID: {}, Board: {}.",
                    port_id, remote_device
                ));
                self.connected = Some(remote_device);
            }
            HfreEvent::OpenServiceLevelConnectionIndication {
                port_id,
                remote_supported_features,
                remote_call_hold_multiparty_support,
            } => {
                self.display(format!(
                    "HFRE Open Service Level Connection Indication, ID: {}",
                    port_id
                ));
                self.display(format!(
                    "                     RemoteSupportedFeaturesValid: {}",
                    if remote_supported_features.is_some() { "TRUE" } else { "FALSE" }
                ));
                self.display(format!(
                    "                          RemoteSupportedFeatures: 0x{:08X}",
                    remote_supported_features.unwrap_or(0)
                ));
                self.display(format!(
                    "                  RemoteCallHoldMultipartySupport: 0x{:08X}",
                    remote_call_hold_multiparty_support
                ));

                self.display("Enable Call Line Identification");
                if let Err(e) = self.stack.enable_caller_id_notification(port_id, true) {
                    self.display_function_error("enable_caller_id_notification", e.status);
                }
            }
            HfreEvent::ControlIndicatorStatusIndication {
                port_id,
                description,
                value,
            } => self.display(format!(
                "HFRE Control Indicator Status Indication, ID: {}, Description: {}, Value: {}.",
                port_id, description, value
            )),
            HfreEvent::ControlIndicatorStatusConfirmation {
                port_id,
                description,
                value,
            } => self.display(format!(
                "HFRE Control Indicator Status Confirmation, ID: {}, Description: {}, Value: {}.",
                port_id, description, value
            )),
            HfreEvent::CallHoldMultipartySupportConfirmation {
                port_id,
                support_mask,
            } => self.display(format!(
                "HFRE Call Hold Multiparty Support Confirmation, ID: {}, Support Mask: 0x{:08X}.",
                port_id, support_mask
            )),
            HfreEvent::CallWaitingNotificationIndication {
                port_id,
                phone_number,
            } => self.display(format!(
                "HFRE Call Waiting Notification Indication, ID: {}, Phone Number {}.",
                port_id,
                phone_number.as_deref().unwrap_or("<None>")
            )),
            HfreEvent::CallLineIdentificationNotificationIndication {
                port_id,
                phone_number,
            } => self.display(format!(
                "HFRE Call Line Identification Notification Indication, ID: {}, Phone Number {}.",
                port_id, phone_number
            )),
            HfreEvent::RingIndication { port_id } => {
                self.display(format!("HFRE Ring Indication, ID: {}.", port_id))
            }
            HfreEvent::InBandRingToneSettingIndication { port_id, enabled } => {
                self.display(format!(
                    "HFRE InBand Ring Tone Setting Indication, ID: {}, Enabled: {}.",
                    port_id,
                    if enabled { "Yes" } else { "No" }
                ))
            }
            HfreEvent::VoiceTagRequestIndication { port_id } => self.display(format!(
                "HFRE Voice Tag Request Indication, ID: {}.",
                port_id
            )),
            HfreEvent::VoiceTagRequestConfirmation {
                port_id,
                phone_number,
            } => match phone_number {
                Some(number) => self.display(format!(
                    "HFRE Voice Tag Request Confirmation, ID: {}, Phone Number {}.",
                    port_id, number
                )),
                None => self.display(format!(
                    "HFRE Voice Tag Request Confirmation, ID: {}, Request Rejected.",
                    port_id
                )),
            },
            HfreEvent::ClosePortIndication {
                port_id,
                close_status,
            } => {
                info!("hands-free port {} closed ({})", port_id, close_status);
                self.display(format!(
                    "HFRE Close Port Indication, ID: {}, Status: 0x{:04X}.",
                    port_id, close_status
                ));
                self.connected = None;
                if let Err(e) = self.stack.disable_wideband_speech() {
                    self.display_function_error("disable_wideband_speech", e.status);
                }
            }
            HfreEvent::AudioConnectionIndication {
                port_id,
                open_status,
            } => self.display(format!(
                "HFRE Audio Connection Indication, ID: {}, Status: 0x{:04X}.",
                port_id, open_status
            )),
            HfreEvent::AudioDisconnectionIndication { port_id } => self.display(format!(
                "HFRE Audio Disconnection Indication, ID: {}.",
                port_id
            )),
            HfreEvent::SubscriberNumberInformationIndication { port_id } => {
                self.display(format!(
                    "HFRE Subscriber Number Information Indication, ID: {}.",
                    port_id
                ))
            }
            HfreEvent::SubscriberNumberInformationConfirmation {
                port_id,
                service_type,
                number_format,
                phone_number,
            } => {
                self.display(format!(
                    "HFRE Subscriber Number Information Confirmation, ID: {}.",
                    port_id
                ));
                self.display(format!(
                    "+CNUM: SvcType: {} Format: {} Num: {}",
                    service_type, number_format, phone_number
                ));
            }
            HfreEvent::ResponseHoldStatusConfirmation {
                port_id,
                call_state,
            } => self.display(format!(
                "HFRE Response Hold Status Confirmation, ID: {} CallState: {}.",
                port_id, call_state
            )),
            HfreEvent::IncomingCallStateIndication {
                port_id,
                call_state,
            } => self.display(format!(
                "HFRE Incoming Call State Indication, ID: {} CallState: {}.",
                port_id, call_state
            )),
            HfreEvent::IncomingCallStateConfirmation {
                port_id,
                call_state,
            } => self.display(format!(
                "HFRE Incoming Call State Confirmation, ID: {} CallState: {}.",
                port_id, call_state
            )),
            HfreEvent::CommandResult {
                port_id,
                result_type,
                result_value,
            } => self.display(format!(
                "HFRE Command Result, ID: {}, Type {} Code {}.",
                port_id, result_type, result_value
            )),
            HfreEvent::CodecSelectRequestIndication { port_id, codec_id } => {
                self.display(format!(
                    "HFRE Codec Select Indication, ID: {} Codec ID: {}.",
                    port_id, codec_id
                ));
                self.negotiate_codec(port_id, codec_id);
            }
            HfreEvent::Unhandled(kind) => {
                self.display(format!("Unknown HFRE Event Received: {}.", kind));
            }
        }
        self.prompt();
    }

    /// Answer the codec the audio gateway suggested on `port_id`.
    ///
    /// mSBC is selected directly once wideband speech is enabled on the
    /// gateway's connection. Every other outcome turns wideband speech off
    /// and offers CVSD as the only available codec.
    pub fn negotiate_codec(&mut self, port_id: PortId, requested: u8) -> CodecNegotiation {
        let outcome = match CodecId::normalize(requested) {
            CodecId::Cvsd => CodecNegotiation::Narrowband,
            CodecId::Msbc => match self.enable_wideband() {
                Ok(connection_handle) => CodecNegotiation::Wideband { connection_handle },
                Err(reason) => CodecNegotiation::Fallback(reason),
            },
        };

        match outcome {
            CodecNegotiation::Wideband { connection_handle } => {
                info!("mSBC selected on connection {}", connection_handle);
                if let Err(e) = self.stack.send_select_codec(port_id, CodecId::Msbc) {
                    self.display_function_error("send_select_codec", e.status);
                }
            }
            CodecNegotiation::Narrowband | CodecNegotiation::Fallback(_) => {
                if let CodecNegotiation::Fallback(reason) = outcome {
                    warn!("falling back to CVSD on port {}: {}", port_id, reason);
                    self.display(format!("Codec fallback to CVSD: {}.", reason));
                }
                if let Err(e) = self.stack.disable_wideband_speech() {
                    self.display_function_error("disable_wideband_speech", e.status);
                }
                if let Err(e) = self.stack.send_available_codecs(port_id, &[CodecId::Cvsd]) {
                    self.display_function_error("send_available_codecs", e.status);
                }
            }
        }
        outcome
    }

    /// Turn wideband speech on for the connected gateway
    fn enable_wideband(&mut self) -> Result<u16, CodecFallback> {
        let remote = self.connected.ok_or(CodecFallback::NotConnected)?;
        let connection_handle = self.stack.query_connection_handle(remote).map_err(|e| {
            self.display_function_error("query_connection_handle", e.status);
            CodecFallback::ConnectionHandle(e.status)
        })?;

        let features = self.stack.query_active_features().map_err(|e| {
            self.display_function_error("query_active_features", e.status);
            CodecFallback::FeatureQuery(e.status)
        })?;
        if !features.contains(StackFeatures::WIDE_BAND_SPEECH) {
            self.display("WBS Feature is not enabled.");
            return Err(CodecFallback::WidebandInactive);
        }

        self.display(format!(
            "ConnectionHandle {} for {}.",
            connection_handle, remote
        ));
        self.stack
            .enable_wideband_speech(connection_handle)
            .map_err(|e| {
                self.display_function_error("enable_wideband_speech", e.status);
                CodecFallback::EnableWideband(e.status)
            })?;
        Ok(connection_handle)
    }
}
