use std::sync::Arc;

use axum::http::StatusCode;
use serde::Deserialize;
use tracing::info;

use super::{
    gateway::{GatewayRequest, GatewayResponse},
    parse_body, HandlerError, HandlerResult,
};
use crate::backend::{Notifier, Protocol};

pub const SUBSCRIBED_MSG: &str = "Subscription successful!";

/// Deserializable Subscription
#[derive(Debug, Default, Deserialize)]
pub struct DeserSubscription {
    #[serde(default)]
    pub email: Option<String>,
}

/// Subscriber email. Only checked for presence, the notification service judges the format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriberEmail(String);

impl AsRef<str> for SubscriberEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<DeserSubscription> for SubscriberEmail {
    type Error = HandlerError;

    fn try_from(deser: DeserSubscription) -> Result<Self, Self::Error> {
        deser
            .email
            .filter(|email| !email.is_empty())
            .map(SubscriberEmail)
            .ok_or(HandlerError::EmailNotProvided)
    }
}

#[derive(Debug, Clone)]
pub struct SubscriptionRegistrar {
    notifier: Arc<dyn Notifier>,
    expose_error_detail: bool,
}

impl SubscriptionRegistrar {
    pub fn new(notifier: Arc<dyn Notifier>, expose_error_detail: bool) -> Self {
        Self {
            notifier,
            expose_error_detail,
        }
    }

    pub async fn handle(&self, req: GatewayRequest) -> GatewayResponse {
        if req.is_preflight() {
            return GatewayResponse::preflight();
        }

        match self.register(req.body.as_deref()).await {
            Ok(()) => GatewayResponse::message(StatusCode::OK, SUBSCRIBED_MSG),
            Err(er) => self.reject(er),
        }
    }

    /// Maps a failure to its response, with internal detail only if configured.
    pub fn reject(&self, er: HandlerError) -> GatewayResponse {
        er.into_gateway_response(self.expose_error_detail)
    }

    #[tracing::instrument(name = "Registering a new subscriber", skip(self, body))]
    async fn register(&self, body: Option<&str>) -> HandlerResult<()> {
        let email: SubscriberEmail = parse_body::<DeserSubscription>(body)?.try_into()?;

        self.notifier
            .subscribe(Protocol::Email, email.as_ref())
            .await?;

        info!("subscription requested");
        Ok(())
    }
}
