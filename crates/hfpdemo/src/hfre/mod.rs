//! Hands-Free profile (HFRE) types and events

pub mod events;
pub mod types;

pub use events::HfreEvent;
pub use types::*;
