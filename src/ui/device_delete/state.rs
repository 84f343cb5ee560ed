use std::collections::BTreeMap;

use serde_json::Value;

use crate::models::DeviceId;
use crate::ui::notifications::NotificationMessage;
use crate::utils::ApiError;

/// Row attribute holding the device's hardware address.
pub const ROW_ATTRIBUTE: &str = "data-mac";
pub const CONFIRM_QUESTION: &str = "Are you sure you want to delete this device?";
pub const DELETE_FAILED: &str = "Failed to delete device";
pub const DELETE_SUCCEEDED: &str = "Device deleted";

/// How a finished delete request turned out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// `success: true`; carries the server message.
    Deleted { message: String },
    /// The server answered but did not confirm the deletion.
    Rejected { error: String },
    /// The request or the body decoding failed.
    Failed { error: ApiError },
}

impl DeleteOutcome {
    pub fn from_result(result: Result<Value, ApiError>) -> Self {
        match result {
            Ok(body) => Self::from_body(&body),
            Err(error) => DeleteOutcome::Failed { error },
        }
    }

    /// Reads a `{"success", "message"?, "error"?}` body. Anything that is not
    /// an object with `success: true` counts as a rejection.
    pub fn from_body(body: &Value) -> Self {
        let text = |field: &str| {
            body.get(field)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        if body.get("success").and_then(Value::as_bool) == Some(true) {
            DeleteOutcome::Deleted {
                message: text("message").unwrap_or_else(|| DELETE_SUCCEEDED.to_string()),
            }
        } else {
            DeleteOutcome::Rejected {
                error: text("error").unwrap_or_else(|| DELETE_FAILED.to_string()),
            }
        }
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, DeleteOutcome::Deleted { .. })
    }

    pub fn notification(&self) -> NotificationMessage {
        match self {
            DeleteOutcome::Deleted { message } => NotificationMessage::success(message.clone()),
            DeleteOutcome::Rejected { error } => NotificationMessage::error(error.clone()),
            DeleteOutcome::Failed { error } => {
                NotificationMessage::error(format!("{}: {}", DELETE_FAILED, error))
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeviceDeleteState {
    /// Requests sent and not yet answered, per device. Repeated clicks are
    /// not coalesced, so a device can have more than one.
    in_flight: BTreeMap<DeviceId, usize>,
    pub last_outcome: Option<(DeviceId, DeleteOutcome)>,
}

impl DeviceDeleteState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_flight(&self, device: &DeviceId) -> usize {
        self.in_flight.get(device).copied().unwrap_or(0)
    }

    pub fn has_pending_requests(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Returns how many requests are now pending for `device`.
    pub(super) fn begin(&mut self, device: &DeviceId) -> usize {
        let count = self.in_flight.entry(device.clone()).or_insert(0);
        *count += 1;
        *count
    }

    pub(super) fn finish(&mut self, device: &DeviceId) {
        if let Some(count) = self.in_flight.get_mut(device) {
            *count -= 1;
            if *count == 0 {
                self.in_flight.remove(device);
            }
        }
    }
}
