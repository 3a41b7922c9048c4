//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod asset_selector;
mod config_warning;
mod device_command;
mod hash;
mod session_state;

pub use asset_selector::AssetSelector;
pub use config_warning::ConfigWarning;
pub(crate) use device_command::remote_join;
pub use device_command::{DeviceCommand, DeviceCommandKind};
pub use hash::ContentHash;
pub use session_state::DeviceSessionState;
