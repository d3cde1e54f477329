//! The two request handlers, independent of the HTTP server that feeds them.
//!
//! Both follow the same linear flow: answer preflight requests directly,
//! otherwise validate the body, call the backend and map the outcome to a
//! `GatewayResponse`.

pub mod announce;
mod error;
pub mod gateway;
pub mod subscribe;

pub use announce::{Event, EventAnnouncer, EventLog};
pub use error::{HandlerError, HandlerResult, GENERIC_ERROR_MSG};
pub use gateway::{GatewayRequest, GatewayResponse, CORS_HEADERS};
pub use subscribe::SubscriptionRegistrar;

use serde::de::DeserializeOwned;

/// Deserializes a JSON request body. A missing body is an error, not an empty object.
fn parse_body<T: DeserializeOwned>(body: Option<&str>) -> HandlerResult<T> {
    let body = body.ok_or(HandlerError::MissingBody)?;
    serde_json::from_str(body).map_err(HandlerError::MalformedBody)
}
