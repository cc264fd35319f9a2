//! Application-wide constants and runtime configuration.
//!
//! Table sizes, default pairing policy and the fixed identity the device
//! presents live here. The driver and platform configuration handed to the
//! entry point are validated before the stack is touched.

use crate::gap::{ClassOfDevice, PairingPolicy};
use std::time::Duration;

/// Maximum number of commands the registry holds
pub const MAX_SUPPORTED_COMMANDS: usize = 32;

/// Maximum number of parameters a command line can carry
pub const MAX_NUM_OF_PARAMETERS: usize = 6;

/// Maximum number of devices kept from one inquiry
pub const MAX_INQUIRY_RESULTS: usize = 25;

/// Number of link keys cached locally
pub const MAX_LINK_KEYS: usize = 1;

/// Name the device advertises after the stack opens
pub const LOCAL_DEVICE_NAME: &str = "SS1-WBS-16KHz";

/// Class of Device written after the stack opens
pub const DEFAULT_CLASS_OF_DEVICE: u32 = 0x40_0500;

pub const PROMPT: &str = "HFRE16>";

pub fn default_class_of_device() -> ClassOfDevice {
    ClassOfDevice::new(DEFAULT_CLASS_OF_DEVICE)
}

pub fn default_pairing_policy() -> PairingPolicy {
    PairingPolicy::default()
}

/// Framing used on a UART HCI transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UartProtocol {
    Uart,
    UartRtsCts,
    Bcsp,
    Hcill,
}

/// How the stack reaches the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HciDriverConfig {
    Usb,
    Uart {
        port: u32,
        baud_rate: u32,
        protocol: UartProtocol,
    },
}

impl HciDriverConfig {
    pub fn validate(&self) -> Result<(), String> {
        match self {
            HciDriverConfig::Usb => Ok(()),
            HciDriverConfig::Uart { baud_rate: 0, .. } => Err("baud rate must be non-zero".into()),
            HciDriverConfig::Uart { .. } => Ok(()),
        }
    }
}

impl Default for HciDriverConfig {
    fn default() -> Self {
        HciDriverConfig::Uart {
            port: 1,
            baud_rate: 115_200,
            protocol: UartProtocol::Hcill,
        }
    }
}

/// Platform layer settings applied before the stack initializes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Delay between resetting the controller and the first HCI command
    pub initialization_delay: Duration,
}

impl PlatformConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.initialization_delay > Duration::from_secs(10) {
            Err("initialization delay longer than 10 s".into())
        } else {
            Ok(())
        }
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            initialization_delay: Duration::from_millis(100),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_validation() {
        assert!(HciDriverConfig::Usb.validate().is_ok());
        assert!(HciDriverConfig::default().validate().is_ok());
        let bad = HciDriverConfig::Uart {
            port: 1,
            baud_rate: 0,
            protocol: UartProtocol::Uart,
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_platform_validation() {
        assert!(PlatformConfig::default().validate().is_ok());
        let slow = PlatformConfig {
            initialization_delay: Duration::from_secs(60),
        };
        assert!(slow.validate().is_err());
    }
}
