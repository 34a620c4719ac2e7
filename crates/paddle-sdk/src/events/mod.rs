//! Paddle webhook event types.
//!
//! Every Paddle notification body has the same envelope:
//!
//! ```json
//! {
//!   "event_id": "evt_01h8441jn5pcwrfhwh78jqt8hk",
//!   "event_type": "customer.created",
//!   "occurred_at": "2023-08-21T11:57:47.390028Z",
//!   "notification_id": "ntf_01h8441jx8x5fqv2z1h1fr8cnp",
//!   "data": { ... }
//! }
//! ```
//!
//! The `event_type` tag selects the shape of `data`. [`WebhookEvent`] is a
//! closed sum type over the recognized tags, so handlers can `match`
//! exhaustively and the compiler points out every place a new event type
//! needs handling.
//!
//! # Examples
//!
//! ```rust
//! use paddle_sdk::events::{EventDecoder, WebhookEvent};
//!
//! # fn handle(raw_body: &[u8]) -> Result<(), paddle_sdk::WebhookError> {
//! let event = EventDecoder::default().decode(raw_body)?;
//!
//! match &event {
//!     WebhookEvent::CustomerCreated(webhook) => {
//!         println!("New customer {}", webhook.data.email);
//!     }
//!     WebhookEvent::SubscriptionCanceled(webhook) => {
//!         println!("Subscription {} canceled", webhook.data.id);
//!     }
//!     other => println!("Ignoring {}", other.event_type_str()),
//! }
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::client::{Customer, Subscription};
use crate::error::WebhookError;

mod decoder;

pub use decoder::EventDecoder;

// ============================================================================
// Event Type
// ============================================================================

/// Recognized values of the `event_type` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    #[serde(rename = "customer.created")]
    CustomerCreated,
    #[serde(rename = "customer.updated")]
    CustomerUpdated,
    #[serde(rename = "subscription.activated")]
    SubscriptionActivated,
    #[serde(rename = "subscription.canceled")]
    SubscriptionCanceled,
    #[serde(rename = "subscription.created")]
    SubscriptionCreated,
    #[serde(rename = "subscription.imported")]
    SubscriptionImported,
    #[serde(rename = "subscription.past_due")]
    SubscriptionPastDue,
    #[serde(rename = "subscription.paused")]
    SubscriptionPaused,
    #[serde(rename = "subscription.resumed")]
    SubscriptionResumed,
    #[serde(rename = "subscription.trialing")]
    SubscriptionTrialing,
    #[serde(rename = "subscription.updated")]
    SubscriptionUpdated,
}

impl EventType {
    /// Every recognized event type.
    pub const ALL: [EventType; 11] = [
        Self::CustomerCreated,
        Self::CustomerUpdated,
        Self::SubscriptionActivated,
        Self::SubscriptionCanceled,
        Self::SubscriptionCreated,
        Self::SubscriptionImported,
        Self::SubscriptionPastDue,
        Self::SubscriptionPaused,
        Self::SubscriptionResumed,
        Self::SubscriptionTrialing,
        Self::SubscriptionUpdated,
    ];

    /// Tag as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CustomerCreated => "customer.created",
            Self::CustomerUpdated => "customer.updated",
            Self::SubscriptionActivated => "subscription.activated",
            Self::SubscriptionCanceled => "subscription.canceled",
            Self::SubscriptionCreated => "subscription.created",
            Self::SubscriptionImported => "subscription.imported",
            Self::SubscriptionPastDue => "subscription.past_due",
            Self::SubscriptionPaused => "subscription.paused",
            Self::SubscriptionResumed => "subscription.resumed",
            Self::SubscriptionTrialing => "subscription.trialing",
            Self::SubscriptionUpdated => "subscription.updated",
        }
    }

    /// Whether `data` is a [`Customer`].
    pub fn is_customer_event(&self) -> bool {
        matches!(self, Self::CustomerCreated | Self::CustomerUpdated)
    }

    /// Whether `data` is a [`Subscription`].
    pub fn is_subscription_event(&self) -> bool {
        !self.is_customer_event()
    }
}

impl FromStr for EventType {
    type Err = WebhookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|event_type| event_type.as_str() == s)
            .ok_or_else(|| WebhookError::UnknownEventType {
                event_type: s.to_string(),
            })
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Event Records
// ============================================================================

/// Envelope fields shared by all notifications, plus the typed entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Webhook<T> {
    /// Unique ID of the event (`evt_...`)
    pub event_id: String,

    /// Unique ID of this delivery (`ntf_...`); retries of the same event share
    /// the `event_id` but not the `notification_id`
    pub notification_id: String,

    /// When the event occurred
    pub occurred_at: DateTime<Utc>,

    /// Entity the event is about, as it was when the event occurred
    pub data: T,
}

/// Notification whose `event_type` is not recognized.
///
/// Only produced under [`UnknownEventPolicy::PassThrough`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnrecognizedEvent {
    pub event_type: String,
    pub event_id: String,
    pub notification_id: String,
    pub occurred_at: DateTime<Utc>,
    /// Raw `data` value, `null` if absent
    pub data: serde_json::Value,
}

/// What the decoder does with an `event_type` it does not recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownEventPolicy {
    /// Fail with `WebhookError::UnknownEventType`
    #[default]
    Reject,
    /// Decode into [`WebhookEvent::Unrecognized`] with the raw `data`
    PassThrough,
}

/// Decoded Paddle notification.
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookEvent {
    CustomerCreated(Webhook<Customer>),
    CustomerUpdated(Webhook<Customer>),
    SubscriptionActivated(Webhook<Subscription>),
    SubscriptionCanceled(Webhook<Subscription>),
    SubscriptionCreated(Webhook<Subscription>),
    SubscriptionImported(Webhook<Subscription>),
    SubscriptionPastDue(Webhook<Subscription>),
    SubscriptionPaused(Webhook<Subscription>),
    SubscriptionResumed(Webhook<Subscription>),
    SubscriptionTrialing(Webhook<Subscription>),
    SubscriptionUpdated(Webhook<Subscription>),
    Unrecognized(UnrecognizedEvent),
}

impl WebhookEvent {
    /// Recognized event type, `None` for [`WebhookEvent::Unrecognized`].
    pub fn event_type(&self) -> Option<EventType> {
        let event_type = match self {
            Self::CustomerCreated(_) => EventType::CustomerCreated,
            Self::CustomerUpdated(_) => EventType::CustomerUpdated,
            Self::SubscriptionActivated(_) => EventType::SubscriptionActivated,
            Self::SubscriptionCanceled(_) => EventType::SubscriptionCanceled,
            Self::SubscriptionCreated(_) => EventType::SubscriptionCreated,
            Self::SubscriptionImported(_) => EventType::SubscriptionImported,
            Self::SubscriptionPastDue(_) => EventType::SubscriptionPastDue,
            Self::SubscriptionPaused(_) => EventType::SubscriptionPaused,
            Self::SubscriptionResumed(_) => EventType::SubscriptionResumed,
            Self::SubscriptionTrialing(_) => EventType::SubscriptionTrialing,
            Self::SubscriptionUpdated(_) => EventType::SubscriptionUpdated,
            Self::Unrecognized(_) => return None,
        };
        Some(event_type)
    }

    /// The `event_type` tag as received.
    pub fn event_type_str(&self) -> &str {
        match self {
            Self::Unrecognized(event) => &event.event_type,
            other => other.event_type().map(|t| t.as_str()).unwrap_or_default(),
        }
    }

    pub fn event_id(&self) -> &str {
        self.envelope().0
    }

    pub fn notification_id(&self) -> &str {
        self.envelope().1
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.envelope().2
    }

    /// The customer for `customer.*` events.
    pub fn customer(&self) -> Option<&Customer> {
        self.customer_webhook().map(|w| &w.data)
    }

    /// The subscription for `subscription.*` events.
    pub fn subscription(&self) -> Option<&Subscription> {
        self.subscription_webhook().map(|w| &w.data)
    }

    fn customer_webhook(&self) -> Option<&Webhook<Customer>> {
        match self {
            Self::CustomerCreated(w) | Self::CustomerUpdated(w) => Some(w),
            _ => None,
        }
    }

    fn subscription_webhook(&self) -> Option<&Webhook<Subscription>> {
        match self {
            Self::SubscriptionActivated(w)
            | Self::SubscriptionCanceled(w)
            | Self::SubscriptionCreated(w)
            | Self::SubscriptionImported(w)
            | Self::SubscriptionPastDue(w)
            | Self::SubscriptionPaused(w)
            | Self::SubscriptionResumed(w)
            | Self::SubscriptionTrialing(w)
            | Self::SubscriptionUpdated(w) => Some(w),
            _ => None,
        }
    }

    fn envelope(&self) -> (&str, &str, DateTime<Utc>) {
        match self {
            Self::CustomerCreated(w) | Self::CustomerUpdated(w) => {
                (&w.event_id, &w.notification_id, w.occurred_at)
            }
            Self::SubscriptionActivated(w)
            | Self::SubscriptionCanceled(w)
            | Self::SubscriptionCreated(w)
            | Self::SubscriptionImported(w)
            | Self::SubscriptionPastDue(w)
            | Self::SubscriptionPaused(w)
            | Self::SubscriptionResumed(w)
            | Self::SubscriptionTrialing(w)
            | Self::SubscriptionUpdated(w) => (&w.event_id, &w.notification_id, w.occurred_at),
            Self::Unrecognized(e) => (&e.event_id, &e.notification_id, e.occurred_at),
        }
    }
}

/// Serializes back into the notification envelope shape.
impl Serialize for WebhookEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("WebhookEvent", 5)?;
        state.serialize_field("event_id", self.event_id())?;
        state.serialize_field("event_type", self.event_type_str())?;
        state.serialize_field("occurred_at", &self.occurred_at())?;
        state.serialize_field("notification_id", self.notification_id())?;
        match self {
            Self::CustomerCreated(w) | Self::CustomerUpdated(w) => {
                state.serialize_field("data", &w.data)?
            }
            Self::SubscriptionActivated(w)
            | Self::SubscriptionCanceled(w)
            | Self::SubscriptionCreated(w)
            | Self::SubscriptionImported(w)
            | Self::SubscriptionPastDue(w)
            | Self::SubscriptionPaused(w)
            | Self::SubscriptionResumed(w)
            | Self::SubscriptionTrialing(w)
            | Self::SubscriptionUpdated(w) => state.serialize_field("data", &w.data)?,
            Self::Unrecognized(e) => state.serialize_field("data", &e.data)?,
        }
        state.end()
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
