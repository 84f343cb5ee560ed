use crate::ui::{
    config_form::ConfigFormMessage, device_delete::DeviceDeleteMessage,
    notifications::NotificationMessage,
};

#[derive(Debug, Clone)]
pub enum Message {
    // Page lifecycle
    PageReady,

    // Module-specific message variants
    ConfigForm(ConfigFormMessage),
    DeviceDelete(DeviceDeleteMessage),
    Notification(NotificationMessage),
}

impl From<ConfigFormMessage> for Message {
    fn from(message: ConfigFormMessage) -> Self {
        Message::ConfigForm(message)
    }
}

impl From<DeviceDeleteMessage> for Message {
    fn from(message: DeviceDeleteMessage) -> Self {
        Message::DeviceDelete(message)
    }
}

impl From<NotificationMessage> for Message {
    fn from(message: NotificationMessage) -> Self {
        Message::Notification(message)
    }
}
