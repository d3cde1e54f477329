//! The routes each component can handle.
//!
//! Every method on the API paths is handed to the component's handler, which decides
//! between preflight and business logic the same way it would behind an API gateway.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Router,
};

use crate::handlers::{
    EventAnnouncer, GatewayRequest, GatewayResponse, HandlerError, HandlerResult,
    SubscriptionRegistrar,
};

pub const EVENTS_PATH: &str = "/api/events";
pub const SUBSCRIBE_PATH: &str = "/api/subscribe";

async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// EVENT ANNOUNCER
pub fn announcer_routes(announcer: Arc<EventAnnouncer>) -> Router {
    Router::new()
        .route(EVENTS_PATH, any(announce))
        .with_state(announcer)
        .route("/health-check", get(health_check))
}

/// SUBSCRIPTION REGISTRAR
pub fn registrar_routes(registrar: Arc<SubscriptionRegistrar>) -> Router {
    Router::new()
        .route(SUBSCRIBE_PATH, any(subscribe))
        .with_state(registrar)
        .route("/health-check", get(health_check))
}

async fn announce(
    State(announcer): State<Arc<EventAnnouncer>>,
    method: Method,
    body: Bytes,
) -> GatewayResponse {
    match gateway_request(method, body) {
        Ok(req) => announcer.handle(req).await,
        Err(er) => announcer.reject(er),
    }
}

async fn subscribe(
    State(registrar): State<Arc<SubscriptionRegistrar>>,
    method: Method,
    body: Bytes,
) -> GatewayResponse {
    match gateway_request(method, body) {
        Ok(req) => registrar.handle(req).await,
        Err(er) => registrar.reject(er),
    }
}

/// An empty body reads as no body. Preflight requests never look at theirs.
fn gateway_request(method: Method, body: Bytes) -> HandlerResult<GatewayRequest> {
    let req = GatewayRequest::new(method.as_str(), None);
    if body.is_empty() || req.is_preflight() {
        return Ok(req);
    }

    let body = String::from_utf8(body.to_vec()).map_err(HandlerError::BodyNotUtf8)?;
    Ok(GatewayRequest {
        body: Some(body),
        ..req
    })
}

impl IntoResponse for GatewayResponse {
    fn into_response(self) -> Response {
        let mut res = (self.status(), self.body).into_response();

        let headers = res.headers_mut();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in self.headers {
            match (
                HeaderName::try_from(name.as_str()),
                HeaderValue::try_from(value.as_str()),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => tracing::warn!("dropping invalid response header: {name}"),
            }
        }

        res
    }
}
