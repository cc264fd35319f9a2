//! hfpdemo - A Bluetooth Hands-Free unit driven from a console
//!
//! This library implements the application side of a Hands-Free Profile
//! device: a line-oriented command shell over a Bluetooth stack, plus the
//! handlers that react to the stack's GAP and hands-free events (pairing
//! challenges, service level connections, codec selection).
//! The stack itself sits behind the [`BluetoothStack`] trait.

pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod gap;
pub mod hfre;
pub mod session;
pub mod shell;
pub mod stack;

// Re-export common types for convenience
pub use config::{HciDriverConfig, PlatformConfig, UartProtocol};
pub use console::{BufferConsole, Console, StdoutConsole};
pub use error::{ApplicationError, ShellError, StackError, StackResult};
pub use gap::{BdAddr, ClassOfDevice, GapEvent, PairingPolicy};
pub use hfre::{CodecId, HfreEvent, PortId};
pub use session::{CodecFallback, CodecNegotiation, Session};
pub use shell::{Command, Dispatch, Parameter, Shell};
pub use stack::{BluetoothStack, RecordingStack, StackCall, StackEvent};
