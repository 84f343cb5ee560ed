use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::Serialize;
use tracing::debug;

use crate::models::DeviceId;

/// Endpoint removing an unknown device and its discovery history.
pub const DELETE_PATH: &str = "/unknown/delete";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Transport(String),
    #[error("invalid response body: {0}")]
    InvalidBody(String),
    #[error("invalid server url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Server side of the device workflows.
#[async_trait]
pub trait DeviceApi: Send + Sync {
    /// Asks the server to delete `device` and returns the decoded JSON body,
    /// whatever its shape. Interpreting it is up to the caller.
    async fn delete_device(&self, device: &DeviceId) -> Result<serde_json::Value, ApiError>;
}

#[derive(Serialize)]
struct DeleteRequest<'a> {
    mac: &'a DeviceId,
}

pub struct HttpDeviceApi {
    client: reqwest::Client,
    delete_url: Url,
}

impl HttpDeviceApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let invalid = |reason: String| ApiError::InvalidUrl {
            url: base_url.to_string(),
            reason,
        };

        let base = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(invalid("not a base url".to_string()));
        }
        let delete_url = base.join(DELETE_PATH).map_err(|e| invalid(e.to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self { client, delete_url })
    }

    pub fn delete_url(&self) -> &Url {
        &self.delete_url
    }
}

#[async_trait]
impl DeviceApi for HttpDeviceApi {
    async fn delete_device(&self, device: &DeviceId) -> Result<serde_json::Value, ApiError> {
        debug!("POST {} for device {}", self.delete_url, device);

        let response = self
            .client
            .post(self.delete_url.clone())
            .json(&DeleteRequest { mac: device })
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        // The body decides the outcome, error statuses still carry JSON.
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        debug!("Delete request for {} answered {} ({} bytes)", device, status, body.len());

        serde_json::from_slice(&body).map_err(|e| ApiError::InvalidBody(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Json, Router,
        http::{HeaderMap, StatusCode, header},
        routing::post,
    };
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};
    use tokio::net::TcpListener;

    type Seen = Arc<Mutex<Vec<(Option<String>, Value)>>>;

    async fn serve(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn recording_router(seen: Seen, status: StatusCode, reply: Value) -> Router {
        Router::new().route(
            DELETE_PATH,
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let seen = seen.clone();
                let reply = reply.clone();
                async move {
                    let content_type = headers
                        .get(header::CONTENT_TYPE)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    seen.lock().unwrap().push((content_type, body));
                    (status, Json(reply))
                }
            }),
        )
    }

    #[tokio::test]
    async fn test_delete_sends_mac_as_json() {
        let seen = Seen::default();
        let base = serve(recording_router(
            seen.clone(),
            StatusCode::OK,
            json!({"success": true, "message": "Deleted"}),
        ))
        .await;

        let api = HttpDeviceApi::new(&base, Duration::from_secs(5)).unwrap();
        let body = api
            .delete_device(&DeviceId::from("AA:BB:CC:DD:EE:FF"))
            .await
            .unwrap();
        assert_eq!(body, json!({"success": true, "message": "Deleted"}));

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0.as_deref(), Some("application/json"));
        assert_eq!(seen[0].1, json!({"mac": "AA:BB:CC:DD:EE:FF"}));
    }

    #[tokio::test]
    async fn test_error_status_body_is_still_returned() {
        let base = serve(recording_router(
            Seen::default(),
            StatusCode::NOT_FOUND,
            json!({"success": false, "error": "Not found"}),
        ))
        .await;

        let api = HttpDeviceApi::new(&base, Duration::from_secs(5)).unwrap();
        let body = api.delete_device(&DeviceId::from("aa")).await.unwrap();
        assert_eq!(body["error"], "Not found");
    }

    #[tokio::test]
    async fn test_non_json_body_is_an_error() {
        let router = Router::new().route(DELETE_PATH, post(|| async { "<html>oops</html>" }));
        let base = serve(router).await;

        let api = HttpDeviceApi::new(&base, Duration::from_secs(5)).unwrap();
        let err = api.delete_device(&DeviceId::from("aa")).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidBody(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_transport_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = HttpDeviceApi::new(&format!("http://{}", addr), Duration::from_secs(5)).unwrap();
        let err = api.delete_device(&DeviceId::from("aa")).await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)), "{err:?}");
    }

    #[test]
    fn test_delete_url_ignores_base_path() {
        let api = HttpDeviceApi::new("http://netureon.local:5000/dashboard", Duration::from_secs(1))
            .unwrap();
        assert_eq!(api.delete_url().as_str(), "http://netureon.local:5000/unknown/delete");

        assert!(matches!(
            HttpDeviceApi::new("not a url", Duration::from_secs(1)),
            Err(ApiError::InvalidUrl { .. })
        ));
    }
}
