//! Webhook handler trait for application-provided processing logic.
//!
//! Handlers receive decoded, authenticated events after the receiver has
//! already answered Paddle, so they may take as long as they need.
//!
//! # Examples
//!
//! ```rust,no_run
//! use paddle_sdk::webhook::WebhookHandler;
//! use paddle_sdk::events::WebhookEvent;
//! use async_trait::async_trait;
//!
//! struct ProvisioningHandler;
//!
//! #[async_trait]
//! impl WebhookHandler for ProvisioningHandler {
//!     async fn handle_event(&self, event: &WebhookEvent) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!         if let WebhookEvent::SubscriptionActivated(webhook) = event {
//!             println!("Provision seats for {}", webhook.data.customer_id);
//!         }
//!         Ok(())
//!     }
//! }
//! ```

use crate::events::WebhookEvent;
use async_trait::async_trait;
use std::error::Error;

/// Application logic invoked for every accepted notification.
///
/// Errors are logged by the receiver; Paddle has already been told the
/// notification was received, so returning an error does not trigger a retry.
#[async_trait]
pub trait WebhookHandler: Send + Sync {
    async fn handle_event(&self, event: &WebhookEvent) -> Result<(), Box<dyn Error + Send + Sync>>;
}

#[cfg(test)]
#[path = "handler_tests.rs"]
mod tests;
