//! # Paddle SDK
//!
//! Typed client for the Paddle Billing API with webhook signature
//! verification.
//!
//! This SDK provides:
//! - Webhook signature verification (HMAC-SHA256, constant-time comparison)
//! - Decoding of notifications into a closed set of typed events
//! - A webhook receiver that dispatches events to async handlers
//! - An API client for customers, products, prices, subscriptions and
//!   transactions
//!
//! # Examples
//!
//! ## Verifying and Decoding a Webhook
//!
//! ```rust
//! use paddle_sdk::webhook::{compute_signature, WebhookEvents};
//! use paddle_sdk::WebhookError;
//!
//! let body = br#"{"event_id":"evt_1"}"#;
//! let header = format!(
//!     "ts=1700000000;h1={}",
//!     compute_signature("whsec_test", "1700000000", body).unwrap()
//! );
//!
//! let events = WebhookEvents::new(header, "whsec_test").unwrap();
//! let err = events.construct_event(body).unwrap_err();
//!
//! // Authentic, but missing an event_type
//! assert!(matches!(err, WebhookError::MalformedPayload { ref field, .. } if field == "event_type"));
//! ```
//!
//! ## Calling the API
//!
//! ```rust,no_run
//! use paddle_sdk::client::{ClientConfig, PaddleClient, ListSubscriptionsParams, SubscriptionStatus};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PaddleClient::new(ClientConfig::from_env()?)?;
//!
//! let params = ListSubscriptionsParams {
//!     status: Some(vec![SubscriptionStatus::PastDue]),
//!     ..Default::default()
//! };
//! for subscription in client.subscriptions().list(&params).await?.data {
//!     println!("{} is past due", subscription.id);
//! }
//! # Ok(())
//! # }
//! ```

// Public modules
pub mod client;
pub mod error;
pub mod events;
pub mod webhook;

// Re-export commonly used types at crate root for convenience
pub use error::{ApiError, ConfigError, WebhookError};

pub use client::{ClientConfig, Environment, PaddleClient};
pub use events::{EventDecoder, EventType, UnknownEventPolicy, Webhook, WebhookEvent};
pub use webhook::{
    SignatureVerifier, WebhookConfig, WebhookEvents, WebhookSecret, SIGNATURE_HEADER,
};

#[cfg(test)]
pub(crate) mod test_support;
