//! Webhook receiver for HTTP intake and async handler dispatch.
//!
//! The receiver follows a fire-and-forget pattern:
//! 1. Find the `paddle-signature` header
//! 2. Verify the signature and decode the body
//! 3. Return the HTTP response immediately
//! 4. Run registered handlers on spawned tasks
//!
//! Paddle retries a notification when it does not get a 2xx answer within
//! a few seconds, so handler work never delays the response.
//!
//! # Examples
//!
//! ```rust,no_run
//! use paddle_sdk::webhook::{WebhookConfig, WebhookReceiver, WebhookRequest, WebhookSecret};
//! use std::collections::HashMap;
//!
//! # async fn example() -> Result<(), paddle_sdk::WebhookError> {
//! let config = WebhookConfig::new(WebhookSecret::new("pdl_ntfset_secret")?);
//! let receiver = WebhookReceiver::new(config);
//!
//! let headers = HashMap::from([
//!     ("Paddle-Signature".to_string(), "ts=1700000000;h1=abc...".to_string()),
//! ]);
//! let body = bytes::Bytes::from_static(b"{\"event_type\":\"customer.created\"}");
//!
//! let response = receiver.receive_webhook(WebhookRequest::new(headers, body)).await;
//! println!("Status: {}", response.status_code());
//! # Ok(())
//! # }
//! ```

use crate::error::WebhookError;
use crate::webhook::handler::WebhookHandler;
use crate::webhook::{WebhookConfig, WebhookEvents, SIGNATURE_HEADER};
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

// ============================================================================
// Webhook Request/Response Types
// ============================================================================

/// Raw HTTP webhook request data.
///
/// # Examples
///
/// ```rust
/// use paddle_sdk::webhook::WebhookRequest;
/// use std::collections::HashMap;
///
/// let headers = HashMap::from([
///     ("Paddle-Signature".to_string(), "ts=1;h1=ab".to_string()),
/// ]);
/// let request = WebhookRequest::new(headers, b"{}".to_vec().into());
///
/// assert_eq!(request.signature(), Some("ts=1;h1=ab"));
/// assert_eq!(request.header("paddle-signature"), Some("ts=1;h1=ab"));
/// ```
#[derive(Debug, Clone)]
pub struct WebhookRequest {
    headers: HashMap<String, String>,
    body: Bytes,
}

impl WebhookRequest {
    /// Create a new webhook request from headers and the raw body.
    pub fn new(headers: HashMap<String, String>, body: Bytes) -> Self {
        Self { headers, body }
    }

    /// Look up a header by name, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .or_else(|| {
                self.headers
                    .iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(name))
                    .map(|(_, value)| value)
            })
            .map(|s| s.as_str())
    }

    /// The `paddle-signature` header value.
    pub fn signature(&self) -> Option<&str> {
        self.header(SIGNATURE_HEADER)
    }

    /// The raw body bytes.
    pub fn payload(&self) -> &[u8] {
        &self.body
    }

    /// All headers as received.
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }
}

/// HTTP response for a webhook request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookResponse {
    /// 200 OK - notification accepted and dispatched to handlers
    Ok { message: String, event_id: String },

    /// 401 Unauthorized - missing, invalid or expired signature
    Unauthorized { message: String },

    /// 400 Bad Request - malformed header or payload, unknown event type
    BadRequest { message: String },

    /// 500 Internal Server Error - receiver misconfiguration
    InternalError { message: String },
}

impl WebhookResponse {
    /// Get the HTTP status code for this response.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Ok { .. } => 200,
            Self::Unauthorized { .. } => 401,
            Self::BadRequest { .. } => 400,
            Self::InternalError { .. } => 500,
        }
    }

    /// Get the response message.
    pub fn message(&self) -> &str {
        match self {
            Self::Ok { message, .. } => message,
            Self::Unauthorized { message } => message,
            Self::BadRequest { message } => message,
            Self::InternalError { message } => message,
        }
    }

    /// Check if response indicates success.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }
}

impl From<&WebhookError> for WebhookResponse {
    fn from(err: &WebhookError) -> Self {
        let message = err.to_string();
        match err.status_code() {
            401 => Self::Unauthorized { message },
            400 => Self::BadRequest { message },
            _ => Self::InternalError { message },
        }
    }
}

// ============================================================================
// Webhook Receiver
// ============================================================================

/// Receives Paddle notifications and dispatches them to handlers.
pub struct WebhookReceiver {
    config: WebhookConfig,
    handlers: Arc<RwLock<Vec<Arc<dyn WebhookHandler>>>>,
}

impl WebhookReceiver {
    pub fn new(config: WebhookConfig) -> Self {
        Self {
            config,
            handlers: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Register a handler. All handlers run concurrently for every event.
    pub async fn add_handler(&self, handler: Arc<dyn WebhookHandler>) {
        let mut handlers = self.handlers.write().await;
        handlers.push(handler);
    }

    /// Number of registered handlers.
    pub async fn handler_count(&self) -> usize {
        self.handlers.read().await.len()
    }

    /// Process an incoming webhook request.
    ///
    /// Handlers are spawned after the event is accepted; the returned
    /// response does not wait for them.
    pub async fn receive_webhook(&self, request: WebhookRequest) -> WebhookResponse {
        let signature = match request.signature() {
            Some(sig) => sig,
            None => {
                warn!("Rejected webhook without signature header");
                return WebhookResponse::Unauthorized {
                    message: format!("Missing {} header", SIGNATURE_HEADER),
                };
            }
        };

        let gate = WebhookEvents::from_config(signature, &self.config);
        let event = match gate.construct_event(request.payload()) {
            Ok(event) => event,
            Err(e) => {
                if e.is_authentication_failure() {
                    warn!(error = %e, "Webhook authentication failed");
                } else {
                    error!(error = %e, "Webhook processing failed");
                }
                return WebhookResponse::from(&e);
            }
        };

        let event_id = event.event_id().to_string();

        info!(
            event_id = %event_id,
            event_type = %event.event_type_str(),
            notification_id = %event.notification_id(),
            "Webhook accepted"
        );

        // Spawn async handler tasks (fire-and-forget)
        let handlers = self.handlers.clone();
        let event = Arc::new(event);
        tokio::spawn(async move {
            let handlers_guard = handlers.read().await;
            for handler in handlers_guard.iter() {
                let handler = handler.clone();
                let event = event.clone();

                tokio::spawn(async move {
                    if let Err(e) = handler.handle_event(&event).await {
                        error!(
                            event_id = %event.event_id(),
                            error = %e,
                            "Handler execution failed"
                        );
                    }
                });
            }
        });

        WebhookResponse::Ok {
            message: "Webhook received".to_string(),
            event_id,
        }
    }
}

#[cfg(test)]
#[path = "receiver_tests.rs"]
mod tests;
