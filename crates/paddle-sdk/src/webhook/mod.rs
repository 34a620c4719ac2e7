//! Paddle webhook verification and intake.
//!
//! Paddle signs each notification with the secret key of its notification
//! destination and sends the signature in the `paddle-signature` header:
//!
//! ```text
//! paddle-signature: ts=1671552777;h1=eb4d0dc8853be92b7f063b9f3ba5233eb920a09459b6e6b2c26705b4364db151
//! ```
//!
//! `h1` is the lowercase hex HMAC-SHA256 of `<ts>:<raw body>`. Verification
//! must use the exact bytes received, so read the body into a buffer before
//! any JSON parsing.
//!
//! # Core Components
//!
//! - [`SignatureVerifier`] - HMAC-SHA256 verification with constant-time comparison
//! - [`WebhookEvents`] - verify then decode into a typed [`WebhookEvent`](crate::events::WebhookEvent)
//! - [`WebhookReceiver`] - HTTP-shaped intake with async handler dispatch
//! - [`WebhookConfig`] - secret, timestamp tolerance and unknown event policy
//!
//! # Examples
//!
//! ```rust
//! use paddle_sdk::webhook::{WebhookEvents, SIGNATURE_HEADER};
//! use std::collections::HashMap;
//!
//! fn handle(headers: &HashMap<String, String>, raw_body: &[u8]) -> u16 {
//!     let Some(signature) = headers.get(SIGNATURE_HEADER) else {
//!         return 401;
//!     };
//!
//!     let events = match WebhookEvents::new(signature.as_str(), "pdl_ntfset_secret") {
//!         Ok(events) => events,
//!         Err(e) => return e.status_code(),
//!     };
//!
//!     match events.construct_event(raw_body) {
//!         Ok(event) => {
//!             println!("{} {}", event.event_type_str(), event.event_id());
//!             200
//!         }
//!         Err(e) => e.status_code(),
//!     }
//! }
//!
//! assert_eq!(handle(&HashMap::new(), b"{}"), 401);
//! ```
//!
//! ## HTTP Server Integration (Axum Example)
//!
//! ```rust,ignore
//! use paddle_sdk::webhook::{WebhookReceiver, WebhookRequest};
//! use axum::{extract::State, http::{HeaderMap, StatusCode}, response::IntoResponse};
//! use bytes::Bytes;
//! use std::sync::Arc;
//!
//! async fn handle_webhook(
//!     State(receiver): State<Arc<WebhookReceiver>>,
//!     headers: HeaderMap,
//!     body: Bytes,
//! ) -> impl IntoResponse {
//!     let headers = headers
//!         .iter()
//!         .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or("").to_string()))
//!         .collect();
//!
//!     let response = receiver.receive_webhook(WebhookRequest::new(headers, body)).await;
//!     let status = StatusCode::from_u16(response.status_code()).unwrap();
//!     (status, response.message().to_string())
//! }
//! ```

mod config;
mod handler;
mod receiver;
mod validation;
mod webhook_events;

pub use config::{WebhookConfig, WebhookSecret, WEBHOOK_SECRET_ENV};
pub use handler::WebhookHandler;
pub use receiver::{WebhookReceiver, WebhookRequest, WebhookResponse};
pub use validation::{compute_signature, SignatureHeader, SignatureVerifier};
pub use webhook_events::WebhookEvents;

/// Name of the header carrying the notification signature.
pub const SIGNATURE_HEADER: &str = "paddle-signature";
