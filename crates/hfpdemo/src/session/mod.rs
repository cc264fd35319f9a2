//! Session state shared by the command handlers and the event handlers
//!
//! A [`Session`] owns the stack connection and everything the application
//! remembers between commands: the open server, the last inquiry, cached
//! link keys, the remote device in an authentication exchange, the
//! connected audio gateway and the Secure Simple Pairing policy.

mod gap_events;
mod hfre_events;
pub mod inquiry;
pub mod link_keys;


pub use hfre_events::{CodecFallback, CodecNegotiation};
pub use inquiry::InquiryCache;
pub use link_keys::{LinkKeyCache, LinkKeyCacheFull, LinkKeyEntry};

use crate::config::{
    self, HciDriverConfig, PlatformConfig, UartProtocol, LOCAL_DEVICE_NAME, MAX_INQUIRY_RESULTS,
    MAX_LINK_KEYS,
};
use crate::console::Console;
use crate::error::ShellError;
use crate::gap::{BdAddr, ConnectabilityMode, DiscoverabilityMode, PairabilityMode, PairingPolicy};
use crate::hfre::{LinkConnectConfig, LinkPolicy, PortId, SdpHandle, StackFeatures};
use crate::stack::{BluetoothStack, EventSender};
use log::{debug, info, warn};

pub struct Session<S: BluetoothStack> {
    pub(crate) stack: S,
    pub(crate) console: Box<dyn Console>,
    events: EventSender,
    pub(crate) stack_id: Option<u32>,
    pub(crate) server_port: Option<PortId>,
    pub(crate) sdp_handle: Option<SdpHandle>,
    pub(crate) inquiry: InquiryCache,
    pub(crate) link_keys: LinkKeyCache,
    /// Remote device whose authentication challenge awaits an answer
    pub(crate) pending_auth: Option<BdAddr>,
    /// Audio gateway holding the open hands-free port
    pub(crate) connected: Option<BdAddr>,
    pub(crate) pairing_policy: PairingPolicy,
}

impl<S: BluetoothStack> Session<S> {
    /// Create a closed session; `events` is handed to the stack when it opens
    pub fn new(stack: S, console: Box<dyn Console>, events: EventSender) -> Self {
        Self {
            stack,
            console,
            events,
            stack_id: None,
            server_port: None,
            sdp_handle: None,
            inquiry: InquiryCache::new(MAX_INQUIRY_RESULTS),
            link_keys: LinkKeyCache::new(MAX_LINK_KEYS),
            pending_auth: None,
            connected: None,
            pairing_policy: config::default_pairing_policy(),
        }
    }

    pub fn stack(&self) -> &S {
        &self.stack
    }

    pub fn stack_mut(&mut self) -> &mut S {
        &mut self.stack
    }

    pub fn stack_id(&self) -> Option<u32> {
        self.stack_id
    }

    pub fn server_port(&self) -> Option<PortId> {
        self.server_port
    }

    pub fn sdp_handle(&self) -> Option<SdpHandle> {
        self.sdp_handle
    }

    pub fn inquiry(&self) -> &InquiryCache {
        &self.inquiry
    }

    pub fn link_keys(&self) -> &LinkKeyCache {
        &self.link_keys
    }

    pub fn pending_auth(&self) -> Option<BdAddr> {
        self.pending_auth
    }

    pub fn connected(&self) -> Option<BdAddr> {
        self.connected
    }

    pub fn pairing_policy(&self) -> PairingPolicy {
        self.pairing_policy
    }

    pub(crate) fn display(&mut self, line: impl AsRef<str>) {
        self.console.write_line(line.as_ref());
    }

    pub(crate) fn display_function_error(&mut self, function: &str, status: i32) {
        warn!("{}() returned {}", function, status);
        self.display(format!("Error - {}() returned {}.", function, status));
    }

    pub(crate) fn prompt(&mut self) {
        self.console.prompt();
    }

    /// The open stack id, or `InvalidStackId`
    pub(crate) fn require_stack(&self) -> Result<u32, ShellError> {
        self.stack_id.ok_or(ShellError::InvalidStackId)
    }

    /// Open the stack and bring the local device to its default state.
    ///
    /// Opening an already open stack succeeds without touching it. Only the
    /// stack initialization itself can fail; the configuration steps after
    /// it are best effort.
    pub fn open_stack(
        &mut self,
        driver: &HciDriverConfig,
        platform: &PlatformConfig,
    ) -> Result<u32, ShellError> {
        if let Some(stack_id) = self.stack_id {
            self.display("Stack Already Initialized.");
            return Ok(stack_id);
        }

        self.display("OpenStack().");
        let stack_id = match self.stack.initialize(driver, platform, self.events.clone()) {
            Ok(stack_id) => stack_id,
            Err(e) => {
                let line = match driver {
                    HciDriverConfig::Usb => {
                        format!("Stack Initialization on USB Failed: {}.", e.status)
                    }
                    HciDriverConfig::Uart {
                        port,
                        baud_rate,
                        protocol,
                    } => format!(
                        "Stack Initialization on Port {} {} ({}) Failed: {}.",
                        port,
                        baud_rate,
                        if *protocol == UartProtocol::Bcsp { "BCSP" } else { "UART" },
                        e.status
                    ),
                };
                self.display(line);
                self.stack_id = None;
                return Err(ShellError::UnableToInitializeStack);
            }
        };

        info!("bluetooth stack {} opened", stack_id);
        self.stack_id = Some(stack_id);
        self.display(format!("Bluetooth Stack ID: {}.", stack_id));

        match self.stack.enable_feature(StackFeatures::WIDE_BAND_SPEECH) {
            Ok(()) => self.display("WBS Support initialized."),
            Err(e) => {
                warn!("wideband speech not enabled: {}", e);
                self.display(format!("WBS Support not initialized {}.", e.status));
            }
        }

        self.pairing_policy = config::default_pairing_policy();

        if let Ok(version) = self.stack.hci_version() {
            self.display(format!("Device Chipset Version: {}", version));
        }
        if let Ok(address) = self.stack.local_address() {
            self.display(format!("Bluetooth Device Address: {}", address));
        }

        let link_config = LinkConnectConfig {
            allow_role_switch_on_request: true,
            maintain_current_role_on_response: true,
        };
        if let Err(e) = self.stack.set_link_connect_config(link_config) {
            debug!("link connect config not applied: {}", e);
        }
        if self.stack.write_default_link_policy_supported() {
            if let Err(e) = self
                .stack
                .write_default_link_policy(LinkPolicy::ENABLE_MASTER_SLAVE_SWITCH)
            {
                debug!("default link policy not written: {}", e);
            }
        }

        self.delete_link_key(None);

        if let Err(e) = self.stack.set_class_of_device(config::default_class_of_device()) {
            warn!("class of device not set: {}", e);
        }
        if let Err(e) = self.stack.set_local_name(LOCAL_DEVICE_NAME) {
            warn!("local name not set: {}", e);
        }

        Ok(stack_id)
    }

    /// Shut the stack down and forget every handle it issued
    pub fn close_stack(&mut self) -> Result<(), ShellError> {
        if self.stack_id.take().is_none() {
            self.display("Stack not Initialized.");
            return Err(ShellError::UnableToInitializeStack);
        }

        self.stack.shutdown();
        self.server_port = None;
        self.sdp_handle = None;
        self.pending_auth = None;
        self.connected = None;
        info!("bluetooth stack closed");
        self.display("Stack Shutdown Successfully.");
        Ok(())
    }

    /// Make the device generally discoverable with no timeout
    pub fn set_discoverable(&mut self) -> Result<(), ShellError> {
        self.require_stack()?;
        match self
            .stack
            .set_discoverability_mode(DiscoverabilityMode::GeneralDiscoverable, 0)
        {
            Ok(()) => {
                self.display("Set Discoverability Mode (General Discoverable, 0).");
                Ok(())
            }
            Err(e) => {
                self.display(format!("Set Discoverable Mode Command Error : {}.", e.status));
                Err(ShellError::stack("set_discoverability_mode", e))
            }
        }
    }

    pub fn set_connectable(&mut self) -> Result<(), ShellError> {
        self.require_stack()?;
        match self
            .stack
            .set_connectability_mode(ConnectabilityMode::Connectable)
        {
            Ok(()) => {
                self.display("Set Connectability Mode (Connectable).");
                Ok(())
            }
            Err(e) => {
                self.display(format!(
                    "Set Connectability Mode Command Error : {}.",
                    e.status
                ));
                Err(ShellError::stack("set_connectability_mode", e))
            }
        }
    }

    /// Make the device pairable and start receiving authentication events
    pub fn set_pairable(&mut self) -> Result<(), ShellError> {
        self.require_stack()?;
        if let Err(e) = self.stack.set_pairability_mode(PairabilityMode::Pairable) {
            self.display(format!("Set Pairability Mode Command Error : {}.", e.status));
            return Err(ShellError::stack("set_pairability_mode", e));
        }
        self.display("Set Pairability Mode (Pairable).");

        match self.stack.register_remote_authentication() {
            Ok(()) => {
                self.display("Register Remote Authentication Success.");
                Ok(())
            }
            Err(e) => {
                self.display(format!(
                    "Register Remote Authentication Failure: {}",
                    e.status
                ));
                Err(ShellError::stack("register_remote_authentication", e))
            }
        }
    }

    /// Delete the stored key of one device, or every key for `None`, and
    /// bring the local cache in line.
    pub fn delete_link_key(&mut self, address: Option<BdAddr>) {
        match self.stack.delete_stored_link_keys(address) {
            Ok(deleted) => debug!("{} stored link key(s) deleted", deleted),
            Err(e) => {
                warn!("deleting stored link keys failed: {}", e);
                self.display("Deleting Stored Link Key(s) FAILED!");
            }
        }

        match address {
            None => self.link_keys.clear(),
            Some(address) => {
                self.link_keys.remove(&address);
            }
        }
    }
}
