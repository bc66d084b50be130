use async_trait::async_trait;
use edusync_client::cache::ResourceSource;
use edusync_client::domain::EndpointKey;
use edusync_client::error::{ApiError, ApiResult};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Resource source that serves canned payloads and counts calls per key.
///
/// Unknown keys answer with `{"key": <key>, "call": <n>}` where `n` is the
/// per-key call number, so tests can tell fresh responses apart.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockResourceSource {
    payloads: Arc<Mutex<HashMap<String, Value>>>,
    failures: Arc<Mutex<HashMap<String, ApiError>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockResourceSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `payload` for `key` from now on.
    pub fn set_payload(&self, key: &str, payload: Value) {
        self.payloads
            .lock()
            .unwrap()
            .insert(key.to_string(), payload);
    }

    /// Fail every fetch of `key` with `error` until [`recover`](Self::recover).
    pub fn fail_with(&self, key: &str, error: ApiError) {
        self.failures
            .lock()
            .unwrap()
            .insert(key.to_string(), error);
    }

    pub fn recover(&self, key: &str) {
        self.failures.lock().unwrap().remove(key);
    }

    /// Number of fetches that reached the source for `key`, failures included.
    pub fn get_call_count(&self, key: &str) -> usize {
        *self.call_counts.lock().unwrap().get(key).unwrap_or(&0)
    }

    pub fn total_calls(&self) -> usize {
        self.call_counts.lock().unwrap().values().sum()
    }

    fn clone_error(error: &ApiError) -> ApiError {
        match error {
            ApiError::Network(m) => ApiError::Network(m.clone()),
            ApiError::Timeout => ApiError::Timeout,
            ApiError::Unauthorized => ApiError::Unauthorized,
            ApiError::NotFound(m) => ApiError::NotFound(m.clone()),
            ApiError::Status { status, message } => ApiError::Status {
                status: *status,
                message: message.clone(),
            },
            other => ApiError::Network(other.to_string()),
        }
    }
}

#[async_trait]
impl ResourceSource for MockResourceSource {
    async fn fetch_resource(&self, key: &EndpointKey) -> ApiResult<Value> {
        let n = {
            let mut counts = self.call_counts.lock().unwrap();
            let count = counts.entry(key.as_str().to_string()).or_insert(0);
            *count += 1;
            *count
        };

        if let Some(error) = self.failures.lock().unwrap().get(key.as_str()) {
            return Err(Self::clone_error(error));
        }

        let payloads = self.payloads.lock().unwrap();
        Ok(payloads
            .get(key.as_str())
            .cloned()
            .unwrap_or_else(|| json!({ "key": key.as_str(), "call": n })))
    }
}
