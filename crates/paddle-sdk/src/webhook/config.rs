//! Webhook secret and verification settings.

use std::sync::Arc;
use std::time::Duration;

use zeroize::Zeroizing;

use crate::error::WebhookError;
use crate::events::UnknownEventPolicy;

/// Environment variable holding the endpoint secret key.
pub const WEBHOOK_SECRET_ENV: &str = "PADDLE_WEBHOOK_SECRET";

/// Shared secret of a Paddle notification destination.
///
/// The secret is wiped from memory when the last clone is dropped and never
/// appears in `Debug` output.
///
/// # Examples
///
/// ```
/// use paddle_sdk::webhook::WebhookSecret;
///
/// let secret = WebhookSecret::new("pdl_ntfset_01h8...").unwrap();
/// assert_eq!(format!("{:?}", secret), "WebhookSecret(<REDACTED>)");
///
/// assert!(WebhookSecret::new("").is_err());
/// ```
#[derive(Clone)]
pub struct WebhookSecret(Arc<Zeroizing<String>>);

impl WebhookSecret {
    /// Wrap a secret.
    ///
    /// # Errors
    ///
    /// Returns `WebhookError::Configuration` if the secret is empty.
    pub fn new(secret: impl Into<String>) -> Result<Self, WebhookError> {
        let secret = Zeroizing::new(secret.into());
        if secret.is_empty() {
            return Err(WebhookError::Configuration {
                message: "Paddle webhook secret must not be empty".to_string(),
            });
        }
        Ok(Self(Arc::new(secret)))
    }

    pub(crate) fn expose(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

// Security: Don't expose the secret in debug output
impl std::fmt::Debug for WebhookSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("WebhookSecret(<REDACTED>)")
    }
}

impl std::str::FromStr for WebhookSecret {
    type Err = WebhookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Settings shared by every verification performed for one endpoint.
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    secret: WebhookSecret,
    timestamp_tolerance: Option<Duration>,
    unknown_event_policy: UnknownEventPolicy,
}

impl WebhookConfig {
    /// Create a configuration with no timestamp tolerance that rejects
    /// unknown event types.
    pub fn new(secret: WebhookSecret) -> Self {
        Self {
            secret,
            timestamp_tolerance: None,
            unknown_event_policy: UnknownEventPolicy::default(),
        }
    }

    /// Load the secret from `PADDLE_WEBHOOK_SECRET`.
    ///
    /// # Errors
    ///
    /// Returns `WebhookError::Configuration` if the variable is unset or empty.
    pub fn from_env() -> Result<Self, WebhookError> {
        let secret = std::env::var(WEBHOOK_SECRET_ENV).map_err(|_| WebhookError::Configuration {
            message: format!("{} is not set", WEBHOOK_SECRET_ENV),
        })?;
        Ok(Self::new(WebhookSecret::new(secret)?))
    }

    /// Reject signatures whose `ts` is older than `tolerance`.
    pub fn with_timestamp_tolerance(mut self, tolerance: Duration) -> Self {
        self.timestamp_tolerance = Some(tolerance);
        self
    }

    /// Choose how unrecognized `event_type` values are decoded.
    pub fn with_unknown_event_policy(mut self, policy: UnknownEventPolicy) -> Self {
        self.unknown_event_policy = policy;
        self
    }

    pub fn secret(&self) -> &WebhookSecret {
        &self.secret
    }

    pub fn timestamp_tolerance(&self) -> Option<Duration> {
        self.timestamp_tolerance
    }

    pub fn unknown_event_policy(&self) -> UnknownEventPolicy {
        self.unknown_event_policy
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
