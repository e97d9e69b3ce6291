//! Settings file and command-line resolution.

pub mod duration;
pub mod settings;

pub use duration::parse_duration;
pub use settings::{Settings, SettingsFile, StoreSettings};
