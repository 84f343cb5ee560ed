use crate::models::{NotificationId, NotificationKind};

#[derive(Debug, Clone)]
pub enum NotificationMessage {
    Show {
        kind: NotificationKind,
        message: String,
    },
    Dismiss(NotificationId),
    Expired(NotificationId),
}

impl NotificationMessage {
    pub fn success(message: impl Into<String>) -> Self {
        NotificationMessage::Show {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        NotificationMessage::Show {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}
