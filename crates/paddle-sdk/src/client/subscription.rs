//! Subscription Operations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{
    prepare_query, BillingDetails, CollectionMode, CurrencyCode, CustomData, Discount, Interval,
    PaddleClient, Period, Price, Response,
};
use crate::error::ApiError;

#[cfg(test)]
#[path = "subscription_tests.rs"]
mod tests;

/// Status of a subscription or subscription item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Canceled,
    PastDue,
    Paused,
    Trialing,
}

/// Change scheduled to take effect at the end of the billing period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduledChangeAction {
    Cancel,
    Pause,
    Resume,
}

/// Pending change on a subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledChange {
    pub action: ScheduledChangeAction,
    pub effective_at: DateTime<Utc>,
    pub resume_at: Option<DateTime<Utc>>,
}

/// Customer-facing links for managing a subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagementUrls {
    pub update_payment_method: Option<String>,
    pub cancel: String,
}

/// Line item on a subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionItem {
    pub status: SubscriptionStatus,
    pub quantity: u32,
    pub recurring: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub previously_billed_at: Option<DateTime<Utc>>,
    pub next_billed_at: Option<DateTime<Utc>>,
    pub trial_dates: Option<Period>,
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

/// Paddle subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: String,
    pub status: SubscriptionStatus,
    pub customer_id: String,
    pub address_id: String,
    pub business_id: Option<String>,
    pub currency_code: CurrencyCode,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub first_billed_at: Option<DateTime<Utc>>,
    pub next_billed_at: Option<DateTime<Utc>>,
    pub paused_at: Option<DateTime<Utc>>,
    pub canceled_at: Option<DateTime<Utc>>,
    pub discount: Option<Discount>,
    pub collection_mode: CollectionMode,
    pub billing_details: Option<BillingDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_terms: Option<Interval>,
    pub current_billing_period: Option<Period>,
    pub billing_cycle: Interval,
    pub scheduled_change: Option<ScheduledChange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub management_urls: Option<ManagementUrls>,
    pub items: Vec<SubscriptionItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

/// How Paddle bills for changes made to a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProrationBillingMode {
    /// Prorated amount is calculated and billed now
    ProratedImmediately,
    /// Prorated amount is calculated now and billed on the next renewal
    ProratedNextBillingPeriod,
    /// Full amount is billed now
    FullImmediately,
    /// Full amount is billed on the next renewal
    FullNextBillingPeriod,
    /// Nothing is billed
    DoNotBill,
}

/// Price and quantity of an item when updating a subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionItemInput {
    pub price_id: String,
    pub quantity: u32,
}

/// Request to update a subscription.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateSubscriptionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<CurrencyCode>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_billed_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<Discount>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_mode: Option<CollectionMode>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_details: Option<BillingDetails>,

    pub items: Vec<SubscriptionItemInput>,

    pub proration_billing_mode: ProrationBillingMode,
}

impl UpdateSubscriptionRequest {
    /// Create an update that replaces the subscription items.
    pub fn new(items: Vec<SubscriptionItemInput>, proration_billing_mode: ProrationBillingMode) -> Self {
        Self {
            customer_id: None,
            address_id: None,
            business_id: None,
            currency_code: None,
            next_billed_at: None,
            discount: None,
            collection_mode: None,
            billing_details: None,
            items,
            proration_billing_mode,
        }
    }
}

/// Filters for listing subscriptions.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListSubscriptionsParams {
    pub after: Option<String>,
    pub order_by: Option<String>,
    pub per_page: Option<u32>,
    pub customer_id: Option<Vec<String>>,
    pub price_id: Option<Vec<String>>,
    pub status: Option<Vec<SubscriptionStatus>>,
}

/// Related entities that can be included when fetching a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionInclude {
    NextTransaction,
    RecurringTransactionDetails,
}

/// Options for fetching a single subscription.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetSubscriptionParams {
    pub include: Option<Vec<SubscriptionInclude>>,
}

/// Subscription endpoint group.
#[derive(Debug, Clone, Copy)]
pub struct SubscriptionsEndpoint<'a> {
    client: &'a PaddleClient,
}

impl<'a> SubscriptionsEndpoint<'a> {
    pub(crate) fn new(client: &'a PaddleClient) -> Self {
        Self { client }
    }

    /// List subscriptions matching the given filters.
    pub async fn list(
        &self,
        params: &ListSubscriptionsParams,
    ) -> Result<Response<Vec<Subscription>>, ApiError> {
        let query = prepare_query(params)?;
        self.client.get("/subscriptions", &query).await
    }

    /// Create a subscription.
    ///
    /// Paddle normally creates subscriptions from completed transactions; this
    /// passes the body through for imports and other direct creation flows.
    pub async fn create(
        &self,
        request: &serde_json::Value,
    ) -> Result<Response<Subscription>, ApiError> {
        self.client.post("/subscriptions", &[], request).await
    }

    /// Get a subscription by ID.
    pub async fn get(
        &self,
        subscription_id: &str,
        params: &GetSubscriptionParams,
    ) -> Result<Response<Subscription>, ApiError> {
        let path = format!("/subscriptions/{}", subscription_id);
        let query = prepare_query(params)?;
        self.client.get(&path, &query).await
    }

    /// Update a subscription.
    pub async fn update(
        &self,
        subscription_id: &str,
        request: &UpdateSubscriptionRequest,
    ) -> Result<Response<Subscription>, ApiError> {
        let path = format!("/subscriptions/{}", subscription_id);
        self.client.patch(&path, request).await
    }
}
