//! Verify-then-decode entry point for a single notification.

use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::WebhookError;
use crate::events::{EventDecoder, WebhookEvent};
use crate::webhook::{SignatureVerifier, WebhookConfig};

/// Authenticates a notification and decodes it.
///
/// The body is never decoded unless its signature verified, so a
/// `WebhookEvent` obtained from here is always authentic.
///
/// # Examples
///
/// ```
/// use paddle_sdk::webhook::{compute_signature, WebhookEvents};
///
/// let body = br#"{"event_id":"evt_1","event_type":"customer.created","occurred_at":"2024-01-01T00:00:00Z","notification_id":"ntf_1","data":{}}"#;
/// let header = format!(
///     "ts=1700000000;h1={}",
///     compute_signature("whsec_test", "1700000000", body).unwrap()
/// );
///
/// let events = WebhookEvents::new(header, "whsec_test").unwrap();
///
/// // Signature is valid, but `data` is not a customer
/// let err = events.construct_event(body).unwrap_err();
/// assert_eq!(err.status_code(), 400);
/// ```
#[derive(Debug, Clone)]
pub struct WebhookEvents {
    verifier: SignatureVerifier,
    decoder: EventDecoder,
}

impl WebhookEvents {
    /// Create a gate for a received `paddle-signature` header value.
    ///
    /// # Errors
    ///
    /// Returns `WebhookError::Configuration` if `secret` is empty.
    pub fn new(signature_header: impl Into<String>, secret: &str) -> Result<Self, WebhookError> {
        Ok(Self {
            verifier: SignatureVerifier::new(signature_header, secret)?,
            decoder: EventDecoder::default(),
        })
    }

    /// Create a gate using the secret, tolerance and unknown event policy of
    /// `config`.
    pub fn from_config(signature_header: impl Into<String>, config: &WebhookConfig) -> Self {
        Self {
            verifier: SignatureVerifier::from_config(signature_header, config),
            decoder: EventDecoder::new(config.unknown_event_policy()),
        }
    }

    /// Verify `raw_body` and decode it into a typed event.
    pub fn construct_event(&self, raw_body: &[u8]) -> Result<WebhookEvent, WebhookError> {
        self.verifier.verify(raw_body)?;
        self.decoder.decode(raw_body)
    }

    /// Read a request body stream to the end.
    ///
    /// Verification needs the exact bytes Paddle sent, so bodies must be
    /// buffered before any JSON parsing.
    pub async fn buffer<R>(mut reader: R) -> std::io::Result<Bytes>
    where
        R: AsyncRead + Unpin,
    {
        let mut buf = BytesMut::new();
        while reader.read_buf(&mut buf).await? != 0 {}
        Ok(buf.freeze())
    }
}

#[cfg(test)]
#[path = "webhook_events_tests.rs"]
mod tests;
