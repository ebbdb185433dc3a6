//! Transport adapter: posts a GraphQL document with variables and decodes
//! the response envelope. One attempt per call; failures map onto
//! [`ApiError`] without being collapsed into a single message.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Error entry of the GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// The `{data, errors}` envelope every response is wrapped in. `T` is the
/// per-operation payload keyed by operation name.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Clone)]
pub struct GraphqlClient {
    http: reqwest::Client,
    endpoint: String,
}

impl GraphqlClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Transport)?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Execute one document and decode the payload it is keyed under.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        document: &str,
        variables: Value,
    ) -> Result<T, ApiError> {
        let response = self
            .http
            .post(self.endpoint.as_str())
            .json(&request_body(document, &variables))
            .send()
            .await
            .map_err(ApiError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        let body = response.text().await.map_err(ApiError::Transport)?;
        decode_envelope(&body)
    }
}

/// The JSON body of a GraphQL POST request.
pub fn request_body(document: &str, variables: &Value) -> Value {
    json!({
        "query": document,
        "variables": variables,
    })
}

/// Decode a response body into the operation payload. Server-reported
/// errors win over a (possibly partial) data payload.
pub fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let envelope: GraphQlResponse<T> = serde_json::from_str(body).map_err(ApiError::Decode)?;

    if let Some(errors) = envelope.errors {
        if !errors.is_empty() {
            let joined = errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ApiError::Server(joined));
        }
    }

    envelope
        .data
        .ok_or_else(|| ApiError::Server("response contained no data".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Payload {
        value: u32,
    }

    #[test]
    fn request_body_carries_document_and_variables() {
        let body = request_body("query { x }", &json!({ "a": 1 }));
        assert_eq!(body["query"], "query { x }");
        assert_eq!(body["variables"]["a"], 1);
    }

    #[test]
    fn decode_envelope_returns_the_data_payload() {
        let payload: Payload = decode_envelope(r#"{ "data": { "value": 7 } }"#).unwrap();
        assert_eq!(payload, Payload { value: 7 });
    }

    #[test]
    fn decode_envelope_surfaces_server_errors() {
        let body = r#"{
            "data": null,
            "errors": [
                { "message": "mission not found" },
                { "message": "try again" }
            ]
        }"#;
        let err = decode_envelope::<Payload>(body).unwrap_err();
        match err {
            ApiError::Server(message) => {
                assert_eq!(message, "mission not found; try again");
            }
            other => panic!("expected Server error, got {other:?}"),
        }
    }

    #[test]
    fn decode_envelope_rejects_missing_data() {
        let err = decode_envelope::<Payload>(r#"{ "data": null }"#).unwrap_err();
        assert!(matches!(err, ApiError::Server(_)));
    }

    #[test]
    fn decode_envelope_rejects_malformed_bodies() {
        let err = decode_envelope::<Payload>("<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn empty_error_array_does_not_mask_data() {
        let payload: Payload =
            decode_envelope(r#"{ "data": { "value": 3 }, "errors": [] }"#).unwrap();
        assert_eq!(payload.value, 3);
    }
}
