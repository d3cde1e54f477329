use std::sync::Arc;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use super::{
    gateway::{GatewayRequest, GatewayResponse},
    parse_body, HandlerError, HandlerResult,
};
use crate::backend::{Notifier, ObjectStore};

pub const EVENTS_FILE_KEY: &str = "events.json";
pub const EVENTS_CONTENT_TYPE: &str = "application/json";
pub const ANNOUNCEMENT_SUBJECT: &str = "New Event Announcement";
pub const EVENT_CREATED_MSG: &str = "Event created successfully!";

// ###################################
// ->   STRUCTS
// ###################################
/// Deserializable Event
/// An event submission that can have missing or empty fields.
#[derive(Debug, Default, Deserialize)]
pub struct DeserEvent {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

/// Validated Event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub title: String,
    pub description: String,
    pub date: String,
}

impl TryFrom<DeserEvent> for Event {
    type Error = HandlerError;

    fn try_from(deser: DeserEvent) -> Result<Self, Self::Error> {
        let non_empty = |field: Option<String>| field.filter(|value| !value.is_empty());

        match (
            non_empty(deser.title),
            non_empty(deser.description),
            non_empty(deser.date),
        ) {
            (Some(title), Some(description), Some(date)) => Ok(Event {
                title,
                description,
                date,
            }),
            _ => Err(HandlerError::MissingEventFields),
        }
    }
}

impl Event {
    pub fn announcement(&self) -> String {
        format!(
            "New Event Created: {}\nDescription: {}",
            self.title, self.description
        )
    }
}

/// Every event ever submitted, in submission order.
///
/// Stored entries are kept exactly as read, only new submissions are validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, derive_more::Deref)]
#[serde(transparent)]
pub struct EventLog(Vec<Value>);

impl EventLog {
    /// Fails unless the document is a JSON array.
    pub fn from_slice(bytes: &[u8]) -> HandlerResult<Self> {
        serde_json::from_slice(bytes).map_err(HandlerError::CorruptEventLog)
    }

    /// Pretty printed with a 2-space indent.
    pub fn to_pretty_json(&self) -> HandlerResult<Vec<u8>> {
        serde_json::to_vec_pretty(self).map_err(HandlerError::EventLogSerialization)
    }

    pub fn push(&mut self, event: &Event) -> HandlerResult<()> {
        let entry = serde_json::to_value(event).map_err(HandlerError::EventLogSerialization)?;
        self.0.push(entry);
        Ok(())
    }
}

// ###################################
// ->   HANDLER
// ###################################
#[derive(Debug, Clone)]
pub struct EventAnnouncer {
    store: Arc<dyn ObjectStore>,
    notifier: Arc<dyn Notifier>,
    expose_error_detail: bool,
}

impl EventAnnouncer {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        notifier: Arc<dyn Notifier>,
        expose_error_detail: bool,
    ) -> Self {
        Self {
            store,
            notifier,
            expose_error_detail,
        }
    }

    pub async fn handle(&self, req: GatewayRequest) -> GatewayResponse {
        if req.is_preflight() {
            return GatewayResponse::preflight();
        }

        match self.announce(req.body.as_deref()).await {
            Ok(()) => GatewayResponse::message(StatusCode::OK, EVENT_CREATED_MSG),
            Err(er) => self.reject(er),
        }
    }

    /// Maps a failure to its response, with internal detail only if configured.
    pub fn reject(&self, er: HandlerError) -> GatewayResponse {
        er.into_gateway_response(self.expose_error_detail)
    }

    #[tracing::instrument(name = "Announcing a new event", skip(self, body))]
    async fn announce(&self, body: Option<&str>) -> HandlerResult<()> {
        let event: Event = parse_body::<DeserEvent>(body)?.try_into()?;

        let mut event_log = self.load_event_log().await?;
        event_log.push(&event)?;

        // Last writer wins: concurrent submissions may overwrite each other.
        self.store
            .put(
                EVENTS_FILE_KEY,
                event_log.to_pretty_json()?,
                EVENTS_CONTENT_TYPE,
            )
            .await?;
        info!(
            title = %event.title,
            events = event_log.len(),
            "event log saved"
        );

        // No rollback of the write above if this fails.
        self.notifier
            .publish(ANNOUNCEMENT_SUBJECT, &event.announcement())
            .await?;
        info!("announcement published");

        Ok(())
    }

    /// A missing log is the first-run state and reads as empty.
    async fn load_event_log(&self) -> HandlerResult<EventLog> {
        match self.store.get(EVENTS_FILE_KEY).await? {
            Some(bytes) => EventLog::from_slice(&bytes),
            None => {
                info!("no event log stored yet, starting a new one");
                Ok(EventLog::default())
            }
        }
    }
}
