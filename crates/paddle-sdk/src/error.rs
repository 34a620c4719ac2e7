//! Error types for Paddle SDK operations.
//!
//! This module defines the error types used throughout the SDK. Webhook errors
//! are split into distinguishable kinds so callers can decide how to answer the
//! inbound callback, and API errors carry enough context for retry decisions.

use thiserror::Error;

/// Errors raised while verifying or decoding a Paddle webhook.
///
/// Verification and decoding are sequential gates: a caller receiving
/// [`WebhookError::InvalidSignature`] must reject the callback and never
/// attempt to decode the body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookError {
    /// The verifier was constructed without a usable secret.
    ///
    /// This is a deployment misconfiguration and is raised at construction
    /// time, never per request.
    #[error("Webhook configuration error: {message}")]
    Configuration { message: String },

    /// The `paddle-signature` header does not have the `ts=..;h1=..` shape.
    #[error("Malformed signature header: {message}")]
    MalformedHeader { message: String },

    /// The computed digest does not match the received one.
    #[error("Invalid webhook signature")]
    InvalidSignature,

    /// The signature timestamp is older than the configured tolerance.
    ///
    /// Only produced when a timestamp tolerance has been configured.
    #[error("Webhook signature expired: signed {age_secs}s ago, tolerance is {tolerance_secs}s")]
    SignatureExpired { age_secs: i64, tolerance_secs: u64 },

    /// The body is not valid JSON or a required field is missing or mistyped.
    #[error("Malformed webhook payload at '{field}': {message}")]
    MalformedPayload { field: String, message: String },

    /// The `event_type` tag is not one of the recognized event types.
    #[error("Unknown webhook event type: {event_type}")]
    UnknownEventType { event_type: String },
}

impl WebhookError {
    pub(crate) fn malformed_header(message: impl Into<String>) -> Self {
        Self::MalformedHeader {
            message: message.into(),
        }
    }

    pub(crate) fn malformed_payload(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedPayload {
            field: field.into(),
            message: message.into(),
        }
    }

    /// HTTP status code a webhook endpoint should answer with for this error.
    ///
    /// Signature failures map to 401, shape failures to 400 and configuration
    /// failures to 500 since they are the receiver's fault, not Paddle's.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Configuration { .. } => 500,
            Self::MalformedHeader { .. } => 400,
            Self::InvalidSignature => 401,
            Self::SignatureExpired { .. } => 401,
            Self::MalformedPayload { .. } => 400,
            Self::UnknownEventType { .. } => 400,
        }
    }

    /// Check if this error means the request could not be authenticated.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            Self::MalformedHeader { .. } | Self::InvalidSignature | Self::SignatureExpired { .. }
        )
    }
}

/// Errors during Paddle API operations.
///
/// These errors represent failures when communicating with the Paddle API,
/// including HTTP errors and parsing failures.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP error response from the Paddle API.
    #[error("HTTP error: {status} - {message}")]
    HttpError { status: u16, message: String },

    /// Request to the Paddle API timed out.
    #[error("Request timeout")]
    Timeout,

    /// The request was invalid (client error).
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// The API key was rejected.
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// The API key lacks permission for the operation.
    #[error("Authorization failed")]
    AuthorizationFailed,

    /// The requested resource was not found.
    #[error("Resource not found")]
    NotFound,

    /// Client configuration is invalid.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Failed to parse a JSON response from the Paddle API.
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// HTTP client error (network, TLS, etc.).
    #[error("HTTP client error: {0}")]
    HttpClientError(#[from] reqwest::Error),
}

impl ApiError {
    /// Check if this error represents a transient condition that may succeed if retried.
    ///
    /// Transient conditions include:
    /// - Server errors (5xx)
    /// - Rate limiting (429)
    /// - Request timeouts
    /// - Network/transport errors
    pub fn is_transient(&self) -> bool {
        match self {
            Self::HttpError { status, .. } => *status >= 500 || *status == 429,
            Self::Timeout => true,
            Self::InvalidRequest { .. } => false,
            Self::AuthenticationFailed => false,
            Self::AuthorizationFailed => false,
            Self::NotFound => false,
            Self::Configuration { .. } => false,
            Self::JsonError(_) => false,
            Self::HttpClientError(e) => !e.is_builder() && !e.is_decode(),
        }
    }
}

/// Errors while loading SDK configuration from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required setting is missing.
    #[error("Required setting missing: {key}")]
    Missing { key: String },

    /// A setting has a value that cannot be used.
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
