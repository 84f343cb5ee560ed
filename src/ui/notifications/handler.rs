use tokio::time::{Instant, sleep_until};
use tracing::{debug, warn};

use super::{
    ActiveNotification, AUTO_DISMISS_AFTER, CONTAINER_CLASS, NOTIFICATION_ID_ATTRIBUTE,
    NotificationMessage, NotificationState,
};
use crate::dom::{Document, DomMutation, Element, Selector};
use crate::models::{Notification, NotificationId};
use crate::ui::{messages::Message, task::Task, update::Update};

pub fn handle_message(
    state: &mut NotificationState,
    document: &Document,
    message: NotificationMessage,
) -> Update {
    match message {
        NotificationMessage::Show { kind, message } => {
            let container = Selector::class(CONTAINER_CLASS);
            if document.query_selector(&container).is_none() {
                warn!(
                    "No {} container on the page, dropping {} notification: {}",
                    container, kind, message
                );
                return Update::none();
            }

            let notification = Notification {
                id: state.allocate_id(),
                kind,
                message,
            };
            let id = notification.id;

            // The deadline is fixed now, not when the runtime first polls the timer.
            let expires_at = Instant::now() + AUTO_DISMISS_AFTER;
            let (timer, handle) = Task::perform(
                async move { sleep_until(expires_at).await },
                move |_| Message::Notification(NotificationMessage::Expired(id)),
            )
            .abortable();

            debug!("Showing {} notification {}: {}", kind, id, notification.message);
            let element = alert_element(&notification);
            state.insert(ActiveNotification {
                notification,
                expires_at,
                timer: handle,
            });

            Update::mutations(vec![DomMutation::Append {
                parent: container,
                element,
            }])
            .with_task(timer)
        }

        NotificationMessage::Dismiss(id) => {
            match state.remove(id) {
                Some(active) => {
                    active.timer.abort();
                    debug!("Notification {} dismissed", id);
                }
                None => debug!("Notification {} already gone", id),
            }
            Update::mutations(vec![remove_alert(id)])
        }

        NotificationMessage::Expired(id) => {
            if state.remove(id).is_some() {
                debug!("Notification {} expired", id);
            }
            Update::mutations(vec![remove_alert(id)])
        }
    }
}

/// Bootstrap style dismissible alert. The message is plain text content.
pub fn alert_element(notification: &Notification) -> Element {
    Element::new("div")
        .with_class(&format!(
            "alert alert-{} alert-dismissible fade show",
            notification.kind
        ))
        .with_attribute("role", "alert")
        .with_attribute(NOTIFICATION_ID_ATTRIBUTE, notification.id.to_string())
        .with_text(notification.message.clone())
        .with_child(
            Element::new("button")
                .with_class("btn-close")
                .with_attribute("type", "button")
                .with_attribute("data-bs-dismiss", "alert")
                .with_attribute("aria-label", "Close"),
        )
}

pub fn alert_selector(id: NotificationId) -> Selector {
    Selector::attribute("div", NOTIFICATION_ID_ATTRIBUTE, id.to_string())
}

fn remove_alert(id: NotificationId) -> DomMutation {
    DomMutation::Remove {
        target: alert_selector(id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NotificationKind;

    fn page() -> Document {
        let mut doc = Document::new();
        doc.append_child(doc.body(), Element::new("div").with_class(CONTAINER_CLASS));
        doc
    }

    #[tokio::test(start_paused = true)]
    async fn test_show_appends_alert_and_schedules_timer() {
        let mut state = NotificationState::new();
        let mut doc = page();

        let update = handle_message(&mut state, &doc, NotificationMessage::success("Deleted"));
        assert!(!update.task.is_none());
        doc.apply(update.mutations);

        let shown: Vec<_> = state.active().cloned().collect();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].kind, NotificationKind::Success);

        let node = doc.query_selector(&alert_selector(shown[0].id)).unwrap();
        let element = doc.element(node).unwrap();
        assert_eq!(element.text, "Deleted");
        assert!(element.has_class("alert-success"));
        assert!(element.has_class("alert-dismissible"));
        assert_eq!(element.attribute("role"), Some("alert"));
        assert!(doc.element(doc.children(node)[0]).unwrap().has_class("btn-close"));

        let active = state.get(shown[0].id).unwrap();
        assert_eq!(active.expires_at, Instant::now() + AUTO_DISMISS_AFTER);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_cancels_timer() {
        let mut state = NotificationState::new();
        let mut doc = page();

        let update = handle_message(&mut state, &doc, NotificationMessage::error("Not found"));
        doc.apply(update.mutations);
        let id = state.active().next().unwrap().id;
        let timer = state.get(id).unwrap().timer.clone();

        let update = handle_message(&mut state, &doc, NotificationMessage::Dismiss(id));
        assert_eq!(doc.apply(update.mutations), 1);
        assert!(timer.is_aborted());
        assert!(state.is_empty());

        // A late expiry for the same notification touches nothing.
        let update = handle_message(&mut state, &doc, NotificationMessage::Expired(id));
        assert_eq!(doc.apply(update.mutations), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_show_without_container_is_dropped() {
        let mut state = NotificationState::new();
        let doc = Document::new();

        let update = handle_message(&mut state, &doc, NotificationMessage::success("ok"));
        assert!(update.is_empty());
        assert!(state.is_empty());
    }

    #[test]
    fn test_message_is_not_markup() {
        let notification = Notification {
            id: NotificationId(7),
            kind: NotificationKind::Error,
            message: "<b>bad</b>".to_string(),
        };
        let element = alert_element(&notification);
        assert_eq!(element.text, "<b>bad</b>");
        assert_eq!(element.children.len(), 1);
        assert!(element.has_class("alert-error"));
    }
}
