use axum::http::{Method, StatusCode, Uri};
use serde::Serialize;
use serde_json::json;
use tracing::{error, info};

/// Emits one structured log line per served request.
pub fn log_request(
    request_id: Option<String>,
    req_method: &Method,
    uri: &Uri,
    status_code: StatusCode,
) {
    let logline = LogLine {
        timestamp: chrono::Utc::now().to_rfc3339(),
        request_id,
        req_method: req_method.to_string(),
        uri: uri.to_string(),
        status_code: status_code.as_u16(),
    };

    if status_code.is_server_error() {
        error!("LOGLINE: {}", json!(logline));
    } else {
        info!("LOGLINE: {}", json!(logline));
    }
}

#[derive(Serialize)]
struct LogLine {
    timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    request_id: Option<String>,

    req_method: String,
    uri: String,
    status_code: u16,
}
