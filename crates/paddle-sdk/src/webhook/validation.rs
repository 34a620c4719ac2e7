//! Webhook signature validation implementation.
//!
//! Paddle signs every notification with HMAC-SHA256 over `<ts>:<raw body>`
//! using the notification destination's secret key and sends the result in the
//! `paddle-signature` header as `ts=<unix seconds>;h1=<hex digest>`.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

use crate::error::WebhookError;
use crate::webhook::{WebhookConfig, WebhookSecret};

type HmacSha256 = Hmac<Sha256>;

const TIMESTAMP_PREFIX: &str = "ts=";
const SIGNATURE_PREFIX: &str = "h1=";

/// Parsed `paddle-signature` header.
///
/// # Examples
///
/// ```
/// use paddle_sdk::webhook::SignatureHeader;
///
/// let header: SignatureHeader = "h1=abc123;ts=1700000000".parse().unwrap();
/// assert_eq!(header.timestamp(), "1700000000");
/// assert_eq!(header.signature(), "abc123");
/// assert_eq!(header.to_string(), "ts=1700000000;h1=abc123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    timestamp: String,
    signature: String,
}

impl SignatureHeader {
    pub fn new(timestamp: impl Into<String>, signature: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            signature: signature.into(),
        }
    }

    /// Parse a header value.
    ///
    /// The value must contain exactly two `;`-separated segments, one starting
    /// with `ts=` and one with `h1=`, in either order, each with a non-empty
    /// value. The value is everything after the prefix, so `ts=17=00` yields
    /// `17=00` rather than stopping at the next `=`.
    ///
    /// # Errors
    ///
    /// Returns `WebhookError::MalformedHeader` for any other shape.
    pub fn parse(header: &str) -> Result<Self, WebhookError> {
        let segments: Vec<&str> = header.split(';').collect();
        if segments.len() != 2 {
            return Err(WebhookError::malformed_header(format!(
                "expected 2 segments, found {}",
                segments.len()
            )));
        }

        let timestamp = find_value(&segments, TIMESTAMP_PREFIX)?;
        let signature = find_value(&segments, SIGNATURE_PREFIX)?;

        Ok(Self::new(timestamp, signature))
    }

    /// The `ts` value as sent, before any numeric interpretation.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// The received hex digest.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// The `ts` value as unix seconds.
    pub fn timestamp_secs(&self) -> Result<i64, WebhookError> {
        self.timestamp
            .parse::<i64>()
            .map_err(|_| WebhookError::malformed_header("ts is not a unix timestamp"))
    }
}

fn find_value<'a>(segments: &[&'a str], prefix: &str) -> Result<&'a str, WebhookError> {
    let value = segments
        .iter()
        .find_map(|segment| segment.strip_prefix(prefix))
        .ok_or_else(|| WebhookError::malformed_header(format!("missing '{}' segment", prefix)))?;

    if value.is_empty() {
        return Err(WebhookError::malformed_header(format!(
            "empty '{}' value",
            prefix
        )));
    }
    Ok(value)
}

impl FromStr for SignatureHeader {
    type Err = WebhookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SignatureHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{};{}{}",
            TIMESTAMP_PREFIX, self.timestamp, SIGNATURE_PREFIX, self.signature
        )
    }
}

/// Compute the lowercase hex HMAC-SHA256 digest Paddle would send for `body`
/// signed at `timestamp`.
///
/// # Errors
///
/// Returns `WebhookError::Configuration` if the HMAC cannot be keyed.
pub fn compute_signature(
    secret: &str,
    timestamp: &str,
    body: &[u8],
) -> Result<String, WebhookError> {
    hmac_hex(secret.as_bytes(), timestamp, body)
}

fn hmac_hex(secret: &[u8], timestamp: &str, body: &[u8]) -> Result<String, WebhookError> {
    let mut mac = HmacSha256::new_from_slice(secret).map_err(|e| WebhookError::Configuration {
        message: format!("Failed to create HMAC instance: {}", e),
    })?;

    mac.update(timestamp.as_bytes());
    mac.update(b":");
    mac.update(body);

    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Verifies the `paddle-signature` header of one notification.
///
/// A verifier is built per request from the received header value. Building
/// it only fails when the secret is unusable, header problems surface from
/// [`verify`](Self::verify).
///
/// # Examples
///
/// ```
/// use paddle_sdk::webhook::{compute_signature, SignatureVerifier};
///
/// let body = br#"{"event_id":"evt_1"}"#;
/// let digest = compute_signature("whsec_test", "1700000000", body).unwrap();
/// let header = format!("ts=1700000000;h1={}", digest);
///
/// let verifier = SignatureVerifier::new(header, "whsec_test").unwrap();
/// assert!(verifier.verify(body).is_ok());
/// assert!(verifier.verify(br#"{"event_id":"evt_2"}"#).is_err());
/// ```
#[derive(Clone)]
pub struct SignatureVerifier {
    header: String,
    secret: WebhookSecret,
    timestamp_tolerance: Option<Duration>,
}

impl SignatureVerifier {
    /// Create a verifier for a received header value.
    ///
    /// # Errors
    ///
    /// Returns `WebhookError::Configuration` if `secret` is empty.
    pub fn new(signature_header: impl Into<String>, secret: &str) -> Result<Self, WebhookError> {
        Ok(Self::with_secret(signature_header, WebhookSecret::new(secret)?))
    }

    /// Create a verifier from an already validated secret.
    pub fn with_secret(signature_header: impl Into<String>, secret: WebhookSecret) -> Self {
        Self {
            header: signature_header.into(),
            secret,
            timestamp_tolerance: None,
        }
    }

    /// Create a verifier using the secret and tolerance of `config`.
    pub fn from_config(signature_header: impl Into<String>, config: &WebhookConfig) -> Self {
        let verifier = Self::with_secret(signature_header, config.secret().clone());
        match config.timestamp_tolerance() {
            Some(tolerance) => verifier.with_timestamp_tolerance(tolerance),
            None => verifier,
        }
    }

    /// Reject signatures whose `ts` is further than `tolerance` from now.
    pub fn with_timestamp_tolerance(mut self, tolerance: Duration) -> Self {
        self.timestamp_tolerance = Some(tolerance);
        self
    }

    /// Verify `raw_body` against the header.
    ///
    /// `raw_body` must be the exact bytes received, before any JSON parsing.
    ///
    /// # Errors
    ///
    /// * `WebhookError::MalformedHeader` - header shape is wrong
    /// * `WebhookError::InvalidSignature` - digest mismatch
    /// * `WebhookError::MalformedPayload` - authentic body is not UTF-8
    /// * `WebhookError::MalformedHeader` - `ts` is not an integer or too far
    ///   from `now` to compute an age, when a tolerance is set
    /// * `WebhookError::SignatureExpired` - outside the configured tolerance
    pub fn verify(&self, raw_body: &[u8]) -> Result<(), WebhookError> {
        self.verify_at(raw_body, Utc::now())
    }

    /// Verify `raw_body` as if the current time were `now`.
    pub fn verify_at(&self, raw_body: &[u8], now: DateTime<Utc>) -> Result<(), WebhookError> {
        let header = SignatureHeader::parse(&self.header).inspect_err(|e| {
            warn!(error = %e, "Rejected webhook with malformed signature header");
        })?;

        let expected = hmac_hex(self.secret.expose(), header.timestamp(), raw_body)?;
        if !constant_time_compare(header.signature().as_bytes(), expected.as_bytes()) {
            warn!(timestamp = %header.timestamp(), "Webhook signature mismatch");
            return Err(WebhookError::InvalidSignature);
        }

        // Checked only once the body is known to be authentic
        std::str::from_utf8(raw_body)
            .map_err(|e| WebhookError::malformed_payload("<body>", e.to_string()))?;

        if let Some(tolerance) = self.timestamp_tolerance {
            let age_secs = now
                .timestamp()
                .checked_sub(header.timestamp_secs()?)
                .ok_or_else(|| WebhookError::malformed_header("ts out of range"))?;
            let tolerance_secs = tolerance.as_secs();
            if age_secs.unsigned_abs() > tolerance_secs {
                warn!(age_secs, tolerance_secs, "Webhook signature outside tolerance");
                return Err(WebhookError::SignatureExpired {
                    age_secs,
                    tolerance_secs,
                });
            }
        }

        debug!(timestamp = %header.timestamp(), "Webhook signature verified");
        Ok(())
    }
}

fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    // Length is not secret
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

// Security: Don't expose secrets in debug output
impl fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("secret", &"<REDACTED>")
            .field("timestamp_tolerance", &self.timestamp_tolerance)
            .finish()
    }
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
