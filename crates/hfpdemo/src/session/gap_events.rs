//! Handling of GAP events: inquiry results, remote names and the
//! authentication exchange.

use super::Session;
use crate::gap::{
    AuthenticationEvent, AuthenticationResponse, BdAddr, GapEvent, IoCapability, PairingPolicy,
};
use crate::stack::BluetoothStack;
use log::{debug, info, warn};

impl<S: BluetoothStack> Session<S> {
    /// Handle one GAP event. A `None` payload is reported and ignored.
    ///
    /// Never blocks; any follow-up is a direct stack call. The prompt is
    /// redisplayed on every path.
    pub fn handle_gap_event(&mut self, event: Option<GapEvent>) {
        match event {
            Some(event) => self.dispatch_gap_event(event),
            None => {
                warn!("GAP event without data");
                self.display("GAP Callback Data: Event_Data = NULL.");
            }
        }
        self.prompt();
    }

    fn dispatch_gap_event(&mut self, event: GapEvent) {
        debug!("GAP event: {:?}", event);
        match event {
            GapEvent::InquiryResult { devices } => {
                self.display(format!("GAP_Inquiry_Result: {} Found.", devices.len()));
                let kept = self.inquiry.replace(&devices);
                for (index, address) in devices.iter().take(kept).enumerate() {
                    self.display(format!("GAP Inquiry Result: {}, {}.", index + 1, address));
                }
                if kept < devices.len() {
                    warn!("{} inquiry results dropped", devices.len() - kept);
                }
            }
            GapEvent::InquiryEntryResult { address } => {
                self.display(format!("GAP Inquiry Entry Result: {}.", address));
            }
            GapEvent::Authentication {
                remote_device,
                event,
            } => self.handle_authentication_event(remote_device, event),
            GapEvent::RemoteNameResult {
                remote_device,
                name,
            } => {
                self.display(format!(
                    "GAP Remote Name Result: BD_ADDR: {}.",
                    remote_device
                ));
                match name {
                    Some(name) => self.display(format!("GAP Remote Name Result: {}.", name)),
                    None => self.display("GAP Remote Name Result: NULL."),
                }
            }
            GapEvent::Unhandled(kind) => {
                self.display(format!("Unknown/Unhandled GAP Event: {}.", kind));
            }
        }
    }

    fn handle_authentication_event(&mut self, remote: BdAddr, event: AuthenticationEvent) {
        match event {
            AuthenticationEvent::LinkKeyRequest => {
                self.display(format!("atLinkKeyRequest: {}", remote));
                // An empty key makes the stack fall back to pairing
                let key = self.link_keys.get(&remote);
                self.respond(remote, AuthenticationResponse::LinkKey(key));
            }
            AuthenticationEvent::PinCodeRequest => {
                self.display(format!("atPINCodeRequest: {}", remote));
                self.pending_auth = Some(remote);
                self.display("Respond with the command: PINCodeResponse");
            }
            AuthenticationEvent::AuthenticationStatus { status } => {
                self.display(format!(
                    "atAuthenticationStatus: {} Board: {}",
                    status, remote
                ));
                self.pending_auth = None;
            }
            AuthenticationEvent::LinkKeyCreation { link_key } => {
                self.display(format!("atLinkKeyCreation: {}", remote));
                self.display(format!("Link Key: {}", link_key));
                match self.link_keys.store(remote, link_key) {
                    Ok(slot) => {
                        info!("link key for {} stored in slot {}", remote, slot);
                        self.display("Link Key Stored locally.");
                    }
                    Err(e) => {
                        warn!("link key for {} dropped: {}", remote, e);
                        self.display("Link Key NOT Stored locally: Link Key array is full.");
                    }
                }
            }
            AuthenticationEvent::IoCapabilityRequest => {
                self.display(format!("atIOCapabilityRequest: {}", remote));
                let policy = self.pairing_policy;
                self.respond(remote, AuthenticationResponse::IoCapabilities(policy));
            }
            AuthenticationEvent::IoCapabilityResponse { remote: capabilities } => {
                self.display(format!("atIOCapabilityResponse: {}", remote));
                self.display(format!(
                    "Remote Capabilities: {}",
                    describe_capabilities(&capabilities)
                ));
            }
            AuthenticationEvent::UserConfirmationRequest { numeric_value } => {
                self.display(format!("atUserConfirmationRequest: {}", remote));
                self.pending_auth = Some(remote);
                if self.pairing_policy.io_capability != IoCapability::DisplayYesNo {
                    self.display(format!("Auto Accepting: {}", numeric_value));
                    self.respond(remote, AuthenticationResponse::UserConfirmation(true));
                    self.pending_auth = None;
                } else {
                    self.display(format!("User Confirmation: {}", numeric_value));
                    self.display("Respond with the command: UserConfirmationResponse");
                }
            }
            AuthenticationEvent::PasskeyRequest => {
                self.display(format!("atPasskeyRequest: {}", remote));
                self.pending_auth = Some(remote);
                self.display("Respond with the command: PassKeyResponse");
            }
            AuthenticationEvent::RemoteOutOfBandDataRequest => {
                self.display(format!("atRemoteOutOfBandDataRequest: {}", remote));
                self.respond(remote, AuthenticationResponse::OutOfBandData);
            }
            AuthenticationEvent::PasskeyNotification { passkey } => {
                self.display(format!("atPasskeyNotification: {}", remote));
                self.display(format!("Passkey Value: {}", passkey));
            }
            AuthenticationEvent::KeypressNotification { keypress } => {
                self.display(format!("atKeypressNotification: {}", remote));
                self.display(format!("Keypress: {}", keypress));
            }
            AuthenticationEvent::Unhandled(kind) => {
                debug!("authentication event {} ignored", kind);
                self.display("Un-handled GAP Authentication Event.");
            }
        }
    }

    /// Answer an authentication event straight away
    fn respond(&mut self, remote: BdAddr, response: AuthenticationResponse) {
        match self.stack.authentication_response(remote, &response) {
            Ok(()) => self.display("Authentication Response Success."),
            Err(e) => {
                warn!("authentication response to {} failed: {}", remote, e);
                self.display(format!("Authentication Response Failure: {}.", e.status));
            }
        }
    }
}

fn describe_capabilities(policy: &PairingPolicy) -> String {
    let mut text = policy.io_capability.to_string();
    if policy.mitm_protection {
        text.push_str(", MITM");
    }
    if policy.oob_data_present {
        text.push_str(", OOB Data");
    }
    text
}
