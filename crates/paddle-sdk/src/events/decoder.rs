//! Decoding of verified notification bodies into [`WebhookEvent`]s.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::WebhookError;
use crate::events::{EventType, UnknownEventPolicy, UnrecognizedEvent, Webhook, WebhookEvent};

/// Field name reported when the body as a whole is unusable.
const BODY_FIELD: &str = "<body>";

/// Classifies a raw notification body by its `event_type` tag.
///
/// Decoding is a pure function of the input bytes. Only decode bodies whose
/// signature has been verified; [`WebhookEvents`](crate::webhook::WebhookEvents)
/// enforces that ordering.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventDecoder {
    policy: UnknownEventPolicy,
}

impl EventDecoder {
    pub fn new(policy: UnknownEventPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> UnknownEventPolicy {
        self.policy
    }

    /// Decode a notification body.
    ///
    /// # Errors
    ///
    /// * `WebhookError::MalformedPayload` - body is not a JSON object, or a
    ///   field is missing or has the wrong shape; `field` names it
    /// * `WebhookError::UnknownEventType` - unrecognized tag under
    ///   [`UnknownEventPolicy::Reject`]
    pub fn decode(&self, raw_body: &[u8]) -> Result<WebhookEvent, WebhookError> {
        let value: Value = serde_json::from_slice(raw_body)
            .map_err(|e| WebhookError::malformed_payload(BODY_FIELD, e.to_string()))?;

        let Value::Object(mut object) = value else {
            return Err(WebhookError::malformed_payload(
                BODY_FIELD,
                "expected a JSON object",
            ));
        };

        let tag = match object.get("event_type") {
            Some(Value::String(tag)) => tag.clone(),
            Some(_) => {
                return Err(WebhookError::malformed_payload(
                    "event_type",
                    "expected a string",
                ))
            }
            None => {
                return Err(WebhookError::malformed_payload(
                    "event_type",
                    "missing field",
                ))
            }
        };

        let event_type = match EventType::from_str(&tag) {
            Ok(event_type) => event_type,
            Err(e) => {
                warn!(event_type = %tag, "Received unknown webhook event type");
                return match self.policy {
                    UnknownEventPolicy::Reject => Err(e),
                    UnknownEventPolicy::PassThrough => passthrough(tag, object),
                };
            }
        };

        let data = object
            .remove("data")
            .ok_or_else(|| WebhookError::malformed_payload("data", "missing field"))?;

        let event = match event_type {
            EventType::CustomerCreated => typed(&object, data, WebhookEvent::CustomerCreated),
            EventType::CustomerUpdated => typed(&object, data, WebhookEvent::CustomerUpdated),
            EventType::SubscriptionActivated => {
                typed(&object, data, WebhookEvent::SubscriptionActivated)
            }
            EventType::SubscriptionCanceled => {
                typed(&object, data, WebhookEvent::SubscriptionCanceled)
            }
            EventType::SubscriptionCreated => {
                typed(&object, data, WebhookEvent::SubscriptionCreated)
            }
            EventType::SubscriptionImported => {
                typed(&object, data, WebhookEvent::SubscriptionImported)
            }
            EventType::SubscriptionPastDue => {
                typed(&object, data, WebhookEvent::SubscriptionPastDue)
            }
            EventType::SubscriptionPaused => typed(&object, data, WebhookEvent::SubscriptionPaused),
            EventType::SubscriptionResumed => {
                typed(&object, data, WebhookEvent::SubscriptionResumed)
            }
            EventType::SubscriptionTrialing => {
                typed(&object, data, WebhookEvent::SubscriptionTrialing)
            }
            EventType::SubscriptionUpdated => {
                typed(&object, data, WebhookEvent::SubscriptionUpdated)
            }
        }?;

        debug!(
            event_id = %event.event_id(),
            event_type = %event_type,
            "Decoded webhook event"
        );
        Ok(event)
    }
}

fn typed<T: DeserializeOwned>(
    object: &Map<String, Value>,
    data: Value,
    variant: fn(Webhook<T>) -> WebhookEvent,
) -> Result<WebhookEvent, WebhookError> {
    let data: T = serde_json::from_value(data)
        .map_err(|e| WebhookError::malformed_payload("data", e.to_string()))?;

    Ok(variant(Webhook {
        event_id: string_field(object, "event_id")?,
        notification_id: string_field(object, "notification_id")?,
        occurred_at: timestamp_field(object, "occurred_at")?,
        data,
    }))
}

fn passthrough(
    event_type: String,
    mut object: Map<String, Value>,
) -> Result<WebhookEvent, WebhookError> {
    let data = object.remove("data").unwrap_or(Value::Null);

    Ok(WebhookEvent::Unrecognized(UnrecognizedEvent {
        event_id: string_field(&object, "event_id")?,
        notification_id: string_field(&object, "notification_id")?,
        occurred_at: timestamp_field(&object, "occurred_at")?,
        event_type,
        data,
    }))
}

fn string_field(object: &Map<String, Value>, field: &str) -> Result<String, WebhookError> {
    match object.get(field) {
        Some(Value::String(value)) => Ok(value.clone()),
        Some(_) => Err(WebhookError::malformed_payload(field, "expected a string")),
        None => Err(WebhookError::malformed_payload(field, "missing field")),
    }
}

fn timestamp_field(
    object: &Map<String, Value>,
    field: &str,
) -> Result<DateTime<Utc>, WebhookError> {
    let raw = string_field(object, field)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| WebhookError::malformed_payload(field, format!("invalid RFC 3339: {}", e)))
}

#[cfg(test)]
#[path = "decoder_tests.rs"]
mod tests;
