//! Paddle Billing API client.
//!
//! This module provides the main `PaddleClient` for making authenticated API
//! calls. Resource operations are grouped into endpoint handles obtained from
//! the client (`client.customers()`, `client.subscriptions()`, ...), each of
//! which borrows the client's HTTP connection and configuration.

mod common;
mod customer;
mod pagination;
mod price;
mod product;
mod query;
mod subscription;
mod transaction;

use std::time::Duration;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{ApiError, ConfigError};

pub use common::{
    AdjustedTotals, BillingDetails, CollectionMode, CountryCode, CurrencyCode, CustomData,
    Discount, EntityStatus, Interval, IntervalUnit, Period, Proration, TaxRate, TaxRateTotals,
    Totals,
};
pub use customer::{
    CreateCustomerRequest, CreditBalance, Customer, CustomerCreditBalance, CustomersEndpoint,
    ListCustomersParams, UpdateCustomerRequest,
};
pub use pagination::{Meta, Pagination, Response};
pub use price::{
    CreatePriceRequest, ListPricesParams, Price, PriceInclude, PricesEndpoint, Quantity, UnitPrice,
    UnitPriceOverride, UpdatePriceRequest,
};
pub use product::{
    CreateProductRequest, ListProductsParams, Product, ProductInclude, ProductsEndpoint,
    TaxCategory, UpdateProductRequest,
};
pub use query::{prepare_query, stringify_query};
pub use subscription::{
    GetSubscriptionParams, ListSubscriptionsParams, ManagementUrls, ProrationBillingMode,
    ScheduledChange, ScheduledChangeAction, Subscription, SubscriptionInclude, SubscriptionItem,
    SubscriptionItemInput, SubscriptionStatus, SubscriptionsEndpoint, UpdateSubscriptionRequest,
};
pub use transaction::{
    Checkout, CreateTransactionRequest, InvoiceUrl, ListTransactionsParams,
    PreviewTransactionRequest, Transaction, TransactionAddress, TransactionDetails,
    TransactionInclude, TransactionIncludeParams, TransactionItem, TransactionItemInput,
    TransactionPreview, TransactionStatus, TransactionsEndpoint, UpdateTransactionRequest,
};

/// Production API base URL.
pub const PRODUCTION_API_URL: &str = "https://api.paddle.com";

/// Sandbox API base URL.
pub const SANDBOX_API_URL: &str = "https://sandbox-api.paddle.com";

/// Paddle environment a client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Live environment (`https://api.paddle.com`)
    #[default]
    Production,
    /// Sandbox environment (`https://sandbox-api.paddle.com`)
    Sandbox,
}

impl Environment {
    /// Base URL for this environment.
    pub fn base_url(&self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_API_URL,
            Self::Sandbox => SANDBOX_API_URL,
        }
    }
}

/// Configuration for Paddle API client behavior.
///
/// # Examples
///
/// ```
/// use paddle_sdk::client::{ClientConfig, Environment};
/// use std::time::Duration;
///
/// let config = ClientConfig::builder("pdl_sdbx_apikey_123")
///     .environment(Environment::Sandbox)
///     .timeout(Duration::from_secs(10))
///     .build();
///
/// assert_eq!(config.base_url(), "https://sandbox-api.paddle.com");
/// ```
#[derive(Clone)]
pub struct ClientConfig {
    /// API key sent as a bearer token
    pub api_key: String,
    /// Target environment
    pub environment: Environment,
    /// Explicit base URL, overriding the environment's URL
    pub base_url_override: Option<String>,
    /// Paddle vendor (seller) identifier
    pub vendor_id: Option<u64>,
    /// User agent string for API requests
    pub user_agent: String,
    /// Request timeout duration
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a new builder for client configuration.
    pub fn builder(api_key: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder::new(api_key)
    }

    /// Load configuration from environment variables.
    ///
    /// Reads `PADDLE_API_KEY` (required), `PADDLE_SANDBOX` (`true`/`false`,
    /// default `false`), `PADDLE_VENDOR_ID` and `PADDLE_API_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let api_key = lookup("PADDLE_API_KEY")
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ConfigError::Missing {
                key: "PADDLE_API_KEY".to_string(),
            })?;

        let mut builder = Self::builder(api_key);

        if let Some(sandbox) = lookup("PADDLE_SANDBOX") {
            let sandbox =
                sandbox
                    .trim()
                    .parse::<bool>()
                    .map_err(|e| ConfigError::InvalidValue {
                        key: "PADDLE_SANDBOX".to_string(),
                        message: e.to_string(),
                    })?;
            if sandbox {
                builder = builder.environment(Environment::Sandbox);
            }
        }

        if let Some(vendor_id) = lookup("PADDLE_VENDOR_ID") {
            let vendor_id =
                vendor_id
                    .trim()
                    .parse::<u64>()
                    .map_err(|e| ConfigError::InvalidValue {
                        key: "PADDLE_VENDOR_ID".to_string(),
                        message: e.to_string(),
                    })?;
            builder = builder.vendor_id(vendor_id);
        }

        if let Some(url) = lookup("PADDLE_API_URL") {
            builder = builder.base_url(url);
        }

        Ok(builder.build())
    }

    /// Resolved API base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url_override
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url())
            .trim_end_matches('/')
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

// Security: Don't expose the API key in debug output
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<REDACTED>")
            .field("environment", &self.environment)
            .field("base_url_override", &self.base_url_override)
            .field("vendor_id", &self.vendor_id)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Builder for constructing `ClientConfig` instances.
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Create a new configuration builder with defaults.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            config: ClientConfig {
                api_key: api_key.into(),
                environment: Environment::default(),
                base_url_override: None,
                vendor_id: None,
                user_agent: concat!("paddle-sdk/", env!("CARGO_PKG_VERSION")).to_string(),
                timeout: Duration::from_secs(30),
            },
        }
    }

    /// Select the production or sandbox environment.
    pub fn environment(mut self, environment: Environment) -> Self {
        self.config.environment = environment;
        self
    }

    /// Shorthand for selecting the sandbox environment.
    pub fn sandbox(self, sandbox: bool) -> Self {
        if sandbox {
            self.environment(Environment::Sandbox)
        } else {
            self.environment(Environment::Production)
        }
    }

    /// Override the API base URL (used for testing against mock servers).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url_override = Some(url.into());
        self
    }

    /// Set the vendor identifier.
    pub fn vendor_id(mut self, vendor_id: u64) -> Self {
        self.config.vendor_id = Some(vendor_id);
        self
    }

    /// Set the user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Build the final configuration.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

/// Paddle API client.
///
/// # Examples
///
/// ```no_run
/// # use paddle_sdk::client::{ClientConfig, PaddleClient, ListCustomersParams};
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ClientConfig::builder("pdl_live_apikey_123").build();
/// let client = PaddleClient::new(config)?;
///
/// let customers = client.customers().list(&ListCustomersParams::default()).await?;
/// for customer in customers.data {
///     println!("{} <{}>", customer.id, customer.email);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PaddleClient {
    http_client: reqwest::Client,
    config: ClientConfig,
}

impl PaddleClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Configuration` if the API key is empty, the base URL
    /// is not a valid URL or the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        if config.api_key.trim().is_empty() {
            return Err(ApiError::Configuration {
                message: "Paddle API key must not be empty".to_string(),
            });
        }

        url::Url::parse(config.base_url()).map_err(|e| ApiError::Configuration {
            message: format!("Invalid Paddle API base URL '{}': {}", config.base_url(), e),
        })?;

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| ApiError::Configuration {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Customer operations.
    pub fn customers(&self) -> CustomersEndpoint<'_> {
        CustomersEndpoint::new(self)
    }

    /// Product operations.
    pub fn products(&self) -> ProductsEndpoint<'_> {
        ProductsEndpoint::new(self)
    }

    /// Price operations.
    pub fn prices(&self) -> PricesEndpoint<'_> {
        PricesEndpoint::new(self)
    }

    /// Subscription operations.
    pub fn subscriptions(&self) -> SubscriptionsEndpoint<'_> {
        SubscriptionsEndpoint::new(self)
    }

    /// Transaction operations.
    pub fn transactions(&self) -> TransactionsEndpoint<'_> {
        TransactionsEndpoint::new(self)
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<Response<T>, ApiError> {
        self.send::<(), T>(Method::GET, path, query, None).await
    }

    pub(crate) async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
        body: &B,
    ) -> Result<Response<T>, ApiError> {
        self.send(Method::POST, path, query, Some(body)).await
    }

    pub(crate) async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response<T>, ApiError> {
        self.send(Method::PATCH, path, &[], Some(body)).await
    }

    fn url(&self, path: &str) -> String {
        // Normalize path - remove leading slash if present for consistent URL building
        let normalized_path = path.strip_prefix('/').unwrap_or(path);
        format!("{}/{}", self.config.base_url(), normalized_path)
    }

    async fn send<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&B>,
    ) -> Result<Response<T>, ApiError> {
        let url = self.url(path);
        debug!(method = %method, path = %path, "Sending Paddle API request");

        let mut request = self
            .http_client
            .request(method.clone(), &url)
            .bearer_auth(&self.config.api_key)
            .header("Accept", "application/json");

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout
            } else {
                ApiError::HttpClientError(e)
            }
        })?;

        // Map HTTP status codes to appropriate errors
        let status = response.status();
        if !status.is_success() {
            warn!(
                method = %method,
                path = %path,
                status = status.as_u16(),
                "Paddle API request failed"
            );
            return Err(match status.as_u16() {
                401 => ApiError::AuthenticationFailed,
                403 => ApiError::AuthorizationFailed,
                404 => ApiError::NotFound,
                _ => {
                    let message = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unable to read error body".to_string());
                    ApiError::HttpError {
                        status: status.as_u16(),
                        message,
                    }
                }
            });
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl std::fmt::Debug for PaddleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaddleClient")
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
