//! The request/response shape both handlers speak, as delivered by an API gateway.

use std::collections::BTreeMap;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub const PREFLIGHT_METHOD: &str = "OPTIONS";

/// Headers attached to every response.
pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "OPTIONS,POST"),
    ("Access-Control-Allow-Headers", "Content-Type"),
];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayRequest {
    pub http_method: Option<String>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl GatewayRequest {
    pub fn new(http_method: impl Into<String>, body: Option<String>) -> Self {
        Self {
            http_method: Some(http_method.into()),
            body,
        }
    }

    pub fn is_preflight(&self) -> bool {
        self.http_method.as_deref() == Some(PREFLIGHT_METHOD)
    }
}

impl GatewayResponse {
    fn with_json(status: StatusCode, body: serde_json::Value) -> Self {
        let headers = CORS_HEADERS
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();

        Self {
            status_code: status.as_u16(),
            headers,
            body: body.to_string(),
        }
    }

    pub fn preflight() -> Self {
        Self::message(StatusCode::OK, "CORS preflight")
    }

    /// `{"message": <message>}`
    pub fn message(status: StatusCode, message: &str) -> Self {
        Self::with_json(status, json!({ "message": message }))
    }

    /// `{"error": <error>}`
    pub fn error(status: StatusCode, error: &str) -> Self {
        Self::with_json(status, json!({ "error": error }))
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}
