pub mod api;
pub mod prompt;
pub mod settings;

pub use api::{ApiError, DeviceApi, HttpDeviceApi};
pub use prompt::{AutoConfirm, ConfirmPrompt, TerminalPrompt};
pub use settings::Settings;
