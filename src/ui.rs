pub mod application;
pub mod pages;
pub mod task;
pub mod update;

// Workflow modules
pub mod config_form;
pub mod device_delete;
pub mod notifications;

// Unified message system
pub mod messages;

pub use application::{Console, Runtime};
pub use messages::Message;
pub use task::Task;
