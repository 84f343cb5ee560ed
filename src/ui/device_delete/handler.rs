use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::{CONFIRM_QUESTION, DeleteOutcome, DeviceDeleteMessage, DeviceDeleteState, ROW_ATTRIBUTE};
use crate::dom::{DomMutation, Selector};
use crate::models::DeviceId;
use crate::ui::{messages::Message, task::Task, update::Update};
use crate::utils::{ConfirmPrompt, DeviceApi};

pub fn handle_message(
    state: &mut DeviceDeleteState,
    api: &Arc<dyn DeviceApi>,
    prompt: &dyn ConfirmPrompt,
    message: DeviceDeleteMessage,
) -> Update {
    match message {
        DeviceDeleteMessage::DeleteRequested(device) => {
            if !prompt.confirm(CONFIRM_QUESTION) {
                debug!("Deletion of {} declined", device);
                return Update::none();
            }

            if state.begin(&device) > 1 {
                warn!("Delete for {} already in flight, sending another request", device);
            }
            debug!("Requesting deletion of {}", device);

            let api = api.clone();
            let request_device = device.clone();
            Update::task(Task::perform(
                async move { api.delete_device(&request_device).await },
                move |result| Message::DeviceDelete(DeviceDeleteMessage::Completed { device, result }),
            ))
        }

        DeviceDeleteMessage::Completed { device, result } => {
            state.finish(&device);

            let outcome = DeleteOutcome::from_result(result);
            let mut mutations = Vec::new();
            match &outcome {
                DeleteOutcome::Deleted { message } => {
                    info!("Device {} deleted: {}", device, message);
                    mutations.push(DomMutation::Remove {
                        target: row_selector(&device),
                    });
                }
                DeleteOutcome::Rejected { error } => {
                    warn!("Server refused to delete {}: {}", device, error);
                }
                DeleteOutcome::Failed { error } => {
                    error!("Delete request for {} failed: {}", device, error);
                }
            }

            let notification = outcome.notification();
            state.last_outcome = Some((device, outcome));

            Update::mutations(mutations).with_task(Task::done(Message::Notification(notification)))
        }
    }
}

/// The table row for `device`.
pub fn row_selector(device: &DeviceId) -> Selector {
    Selector::attribute("tr", ROW_ATTRIBUTE, device.as_str())
}
