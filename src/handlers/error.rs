use axum::http::StatusCode;
use strum_macros::AsRefStr;

use super::gateway::GatewayResponse;
use crate::{
    backend::{NotifierError, StoreError},
    error::error_chain,
};

pub type HandlerResult<T> = core::result::Result<T, HandlerError>;

/// Message returned in place of internal error detail.
pub const GENERIC_ERROR_MSG: &str = "Internal server error";

#[derive(Debug, AsRefStr, thiserror::Error)]
pub enum HandlerError {
    #[error("Missing event title, date, or description")]
    MissingEventFields,
    #[error("Email not provided")]
    EmailNotProvided,

    #[error("request body is missing")]
    MissingBody,
    #[error("request body is not valid UTF-8")]
    BodyNotUtf8(#[source] std::string::FromUtf8Error),
    #[error("malformed request body")]
    MalformedBody(#[source] serde_json::Error),
    #[error("stored event log is not a JSON array")]
    CorruptEventLog(#[source] serde_json::Error),
    #[error("failed to serialize the event log")]
    EventLogSerialization(#[source] serde_json::Error),

    #[error("object store error")]
    Store(#[from] StoreError),
    #[error("notification service error")]
    Notifier(#[from] NotifierError),
}

impl HandlerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingEventFields | Self::EmailNotProvided => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Validation errors always carry their message. Internal errors only carry
    /// their detail when `expose_detail` is set, otherwise they are logged here.
    pub fn into_gateway_response(self, expose_detail: bool) -> GatewayResponse {
        let status = self.status_code();

        if status.is_client_error() {
            tracing::warn!(error_type = self.as_ref(), "request rejected: {self}");
            return GatewayResponse::error(status, &self.to_string());
        }

        let detail = error_chain(&self);
        tracing::error!(error_type = self.as_ref(), error = ?self, "request failed: {detail}");
        if expose_detail {
            GatewayResponse::error(status, &detail)
        } else {
            GatewayResponse::error(status, GENERIC_ERROR_MSG)
        }
    }
}
