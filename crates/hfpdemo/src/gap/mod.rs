pub mod constants;
pub mod events;
pub mod types;

pub use constants::*;
pub use events::{AuthenticationEvent, GapEvent};
pub use types::*;
