use gloo::net::http::Request;
use serde_json::Value;
use shared::{GenerateLpjRequest, LpjHistoryItem};
use std::fmt;

/// Development default; deployments construct the client with their own URL.
const DEFAULT_BASE_URL: &str = "http://localhost:5002/api";

/// Failure modes of the document service, split so callers can decide what
/// is retryable. Validation never reaches this type.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Network unreachable, request failed before a status arrived
    Network(String),
    /// Non-2xx status from the backend
    Status(u16),
    /// The body did not have the shape the client expects
    UnexpectedShape(String),
    /// The attachment endpoint returned a zero-length body
    EmptyAttachment,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(message) => write!(f, "Network error: {}", message),
            ApiError::Status(status) => write!(f, "Server responded with status {}", status),
            ApiError::UnexpectedShape(message) => {
                write!(f, "Unexpected response shape: {}", message)
            }
            ApiError::EmptyAttachment => write!(f, "Attachment body was empty"),
        }
    }
}

impl std::error::Error for ApiError {}

/// API client for the LPJ document-generation backend
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client with the default base URL
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url }
    }

    /// Submit the form payload and return the rendered PDF bytes.
    pub async fn generate_lpj(&self, request: &GenerateLpjRequest) -> Result<Vec<u8>, ApiError> {
        let url = format!("{}/generate-lpj", self.base_url);
        let response = Request::post(&url)
            .json(request)
            .map_err(|e| ApiError::Network(format!("Failed to serialize request: {}", e)))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(ApiError::Status(response.status()));
        }

        response
            .binary()
            .await
            .map_err(|e| ApiError::UnexpectedShape(e.to_string()))
    }

    /// Fetch the list of previously generated documents.
    pub async fn fetch_history(&self) -> Result<Vec<LpjHistoryItem>, ApiError> {
        let url = format!("{}/history", self.base_url);
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(ApiError::Status(response.status()));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ApiError::UnexpectedShape(e.to_string()))?;

        let (items, used_fallback) = unwrap_history_payload(body)?;
        if used_fallback {
            // Compatibility shim: the backend has shipped both a bare array
            // and a wrapped envelope for this endpoint.
            gloo::console::warn!(
                "History response was not a bare array; using its first array-valued field"
            );
        }
        Ok(items)
    }

    /// Fetch a generated document by attachment name.
    pub async fn download_document(&self, filename: &str) -> Result<Vec<u8>, ApiError> {
        let url = format!("{}/history/{}", self.base_url, filename);
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(ApiError::Status(response.status()));
        }

        let bytes = response
            .binary()
            .await
            .map_err(|e| ApiError::UnexpectedShape(e.to_string()))?;
        if bytes.is_empty() {
            return Err(ApiError::EmptyAttachment);
        }
        Ok(bytes)
    }
}

/// Accept either a bare array or an object wrapping one under some key; the
/// first array-valued field wins. The bool reports whether the wrapped
/// fallback was taken so the caller can log it.
fn unwrap_history_payload(body: Value) -> Result<(Vec<LpjHistoryItem>, bool), ApiError> {
    match body {
        Value::Array(_) => {
            let items = serde_json::from_value(body)
                .map_err(|e| ApiError::UnexpectedShape(e.to_string()))?;
            Ok((items, false))
        }
        Value::Object(map) => {
            for (_key, value) in map {
                if value.is_array() {
                    let items = serde_json::from_value(value)
                        .map_err(|e| ApiError::UnexpectedShape(e.to_string()))?;
                    return Ok((items, true));
                }
            }
            Err(ApiError::UnexpectedShape(
                "no array found in the response".to_string(),
            ))
        }
        other => Err(ApiError::UnexpectedShape(format!(
            "unexpected data structure: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn history_row() -> Value {
        json!({
            "id": 1,
            "no_request": "LPJ-1702516122000-0042",
            "tgl_lpj": "2025-01-15",
            "file_path": "output/LPJ_PUM_1.pdf",
            "created_at": "2025-01-15T10:00:00Z"
        })
    }

    #[test]
    fn test_unwrap_bare_array() {
        let (items, used_fallback) =
            unwrap_history_payload(json!([history_row()])).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].no_request, "LPJ-1702516122000-0042");
        assert!(!used_fallback);
    }

    #[test]
    fn test_unwrap_wrapped_array() {
        let (items, used_fallback) =
            unwrap_history_payload(json!({ "data": [history_row()] })).unwrap();
        assert_eq!(items.len(), 1);
        assert!(used_fallback);
    }

    #[test]
    fn test_unwrap_object_without_array_fails() {
        let result = unwrap_history_payload(json!({ "message": "ok" }));
        assert!(matches!(result, Err(ApiError::UnexpectedShape(_))));
    }

    #[test]
    fn test_unwrap_scalar_fails() {
        let result = unwrap_history_payload(json!(42));
        assert!(matches!(result, Err(ApiError::UnexpectedShape(_))));
    }

    #[test]
    fn test_unwrap_empty_wrapped_array() {
        let (items, used_fallback) =
            unwrap_history_payload(json!({ "rows": [] })).unwrap();
        assert!(items.is_empty());
        assert!(used_fallback);
    }
}
