use std::collections::BTreeMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::models::{Notification, NotificationId};
use crate::ui::task::Handle;

/// How long a notification stays up unless dismissed.
pub const AUTO_DISMISS_AFTER: Duration = Duration::from_millis(5000);

/// Class of the element notifications are appended to.
pub const CONTAINER_CLASS: &str = "notifications";

/// Attribute tying an alert element back to its notification.
pub const NOTIFICATION_ID_ATTRIBUTE: &str = "data-notification-id";

#[derive(Debug)]
pub struct ActiveNotification {
    pub notification: Notification,
    pub expires_at: Instant,
    pub(super) timer: Handle,
}

#[derive(Debug, Default)]
pub struct NotificationState {
    next_id: u64,
    active: BTreeMap<NotificationId, ActiveNotification>,
}

impl NotificationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications currently on screen, oldest first.
    pub fn active(&self) -> impl Iterator<Item = &Notification> {
        self.active.values().map(|a| &a.notification)
    }

    pub fn get(&self, id: NotificationId) -> Option<&ActiveNotification> {
        self.active.get(&id)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub(super) fn allocate_id(&mut self) -> NotificationId {
        self.next_id += 1;
        NotificationId(self.next_id)
    }

    pub(super) fn insert(&mut self, active: ActiveNotification) {
        self.active.insert(active.notification.id, active);
    }

    pub(super) fn remove(&mut self, id: NotificationId) -> Option<ActiveNotification> {
        self.active.remove(&id)
    }
}
