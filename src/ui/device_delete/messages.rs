use crate::models::DeviceId;
use crate::utils::ApiError;

#[derive(Debug, Clone)]
pub enum DeviceDeleteMessage {
    DeleteRequested(DeviceId),
    Completed {
        device: DeviceId,
        result: Result<serde_json::Value, ApiError>,
    },
}
