//! Transaction Operations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{
    prepare_query, AdjustedTotals, BillingDetails, CollectionMode, CountryCode, CurrencyCode,
    CustomData, Interval, PaddleClient, Period, Price, Proration, Response, TaxRate, Totals,
};
use crate::error::ApiError;

#[cfg(test)]
#[path = "transaction_tests.rs"]
mod tests;

/// Status of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Draft,
    Ready,
    Billed,
    Paid,
    Completed,
    Canceled,
    PastDue,
}

/// Checkout link for a transaction. `url` is null until checkout is enabled.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Checkout {
    pub url: Option<String>,
}

/// Price and quantity of an item on a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionItem {
    pub quantity: u32,
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proration: Option<Proration>,
}

/// Item in a create, update or preview request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionItemInput {
    pub price_id: String,
    pub quantity: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_in_totals: Option<bool>,
}

impl TransactionItemInput {
    pub fn new(price_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            price_id: price_id.into(),
            quantity,
            include_in_totals: None,
        }
    }
}

/// Minimal address used for tax calculation in previews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionAddress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    pub country_code: CountryCode,
}

/// Calculated totals of a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDetails {
    #[serde(default)]
    pub tax_rates_used: Vec<TaxRate>,
    pub totals: Totals,
    #[serde(default)]
    pub adjusted_totals: Option<AdjustedTotals>,
    #[serde(default)]
    pub payout_totals: Option<Totals>,
    #[serde(default)]
    pub adjusted_payout_totals: Option<AdjustedTotals>,
}

/// Paddle transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub status: TransactionStatus,
    pub customer_id: Option<String>,
    pub address_id: Option<String>,
    pub business_id: Option<String>,
    pub currency_code: CurrencyCode,
    #[serde(default)]
    pub discount_id: Option<String>,
    #[serde(default)]
    pub subscription_id: Option<String>,
    #[serde(default)]
    pub invoice_id: Option<String>,
    #[serde(default)]
    pub invoice_number: Option<String>,
    pub collection_mode: CollectionMode,
    #[serde(default)]
    pub billing_details: Option<BillingDetails>,
    #[serde(default)]
    pub billing_period: Option<Period>,
    pub items: Vec<TransactionItem>,
    #[serde(default)]
    pub details: Option<TransactionDetails>,
    #[serde(default)]
    pub checkout: Option<Checkout>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub billed_at: Option<DateTime<Utc>>,
}

/// Related entities that can be included with a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionInclude {
    Address,
    Adjustment,
    AdjustmentsTotals,
    Business,
    Customer,
    Discount,
}

/// `include` query for create and get.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TransactionIncludeParams {
    pub include: Option<Vec<TransactionInclude>>,
}

/// Filters for listing transactions.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListTransactionsParams {
    pub after: Option<String>,
    pub order_by: Option<String>,
    pub per_page: Option<u32>,
    pub billed_at: Option<String>,
    pub collection_mode: Option<CollectionMode>,
    pub created_at: Option<String>,
    pub customer_id: Option<Vec<String>>,
    pub id: Option<Vec<String>>,
    pub include: Option<Vec<TransactionInclude>>,
    pub invoice_number: Option<Vec<String>>,
    pub status: Option<Vec<TransactionStatus>>,
    pub subscription_id: Option<Vec<String>>,
    pub updated_at: Option<String>,
}

/// Request to create a transaction.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTransactionRequest {
    pub items: Vec<TransactionItemInput>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TransactionStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<CurrencyCode>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_mode: Option<CollectionMode>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_details: Option<BillingDetails>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout: Option<Checkout>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl CreateTransactionRequest {
    pub fn new(items: Vec<TransactionItemInput>) -> Self {
        Self {
            items,
            status: None,
            customer_id: None,
            address_id: None,
            business_id: None,
            currency_code: None,
            collection_mode: None,
            discount_id: None,
            billing_details: None,
            checkout: None,
            custom_data: None,
        }
    }
}

/// Request to update a transaction. Unset fields are left unchanged.
///
/// Only `billed` and `canceled` are accepted as a new `status`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateTransactionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TransactionStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<CurrencyCode>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_mode: Option<CollectionMode>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_details: Option<BillingDetails>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_terms: Option<Interval>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_period: Option<Period>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<TransactionItemInput>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout: Option<Checkout>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

/// Request to preview a transaction without creating it.
#[derive(Debug, Clone, Serialize)]
pub struct PreviewTransactionRequest {
    pub items: Vec<TransactionItemInput>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<CurrencyCode>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_ip_address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<TransactionAddress>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_trials: Option<bool>,
}

impl PreviewTransactionRequest {
    pub fn new(items: Vec<TransactionItemInput>) -> Self {
        Self {
            items,
            customer_id: None,
            address_id: None,
            business_id: None,
            currency_code: None,
            discount_id: None,
            customer_ip_address: None,
            address: None,
            ignore_trials: None,
        }
    }
}

/// Result of a transaction preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionPreview {
    pub customer_id: Option<String>,
    pub address_id: Option<String>,
    pub business_id: Option<String>,
    pub currency_code: CurrencyCode,
    pub discount_id: Option<String>,
    pub customer_ip_address: Option<String>,
    pub address: Option<TransactionAddress>,
    #[serde(default)]
    pub details: Option<TransactionDetails>,
}

/// Temporary link to an invoice PDF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceUrl {
    pub url: String,
}

/// Transaction endpoint group.
#[derive(Debug, Clone, Copy)]
pub struct TransactionsEndpoint<'a> {
    client: &'a PaddleClient,
}

impl<'a> TransactionsEndpoint<'a> {
    pub(crate) fn new(client: &'a PaddleClient) -> Self {
        Self { client }
    }

    /// List transactions matching the given filters.
    pub async fn list(
        &self,
        params: &ListTransactionsParams,
    ) -> Result<Response<Vec<Transaction>>, ApiError> {
        let query = prepare_query(params)?;
        self.client.get("/transactions", &query).await
    }

    /// Create a transaction.
    pub async fn create(
        &self,
        request: &CreateTransactionRequest,
        include: &TransactionIncludeParams,
    ) -> Result<Response<Transaction>, ApiError> {
        let query = prepare_query(include)?;
        self.client.post("/transactions", &query, request).await
    }

    /// Get a transaction by ID.
    pub async fn get(
        &self,
        transaction_id: &str,
        include: &TransactionIncludeParams,
    ) -> Result<Response<Transaction>, ApiError> {
        let path = format!("/transactions/{}", transaction_id);
        let query = prepare_query(include)?;
        self.client.get(&path, &query).await
    }

    /// Update a transaction.
    pub async fn update(
        &self,
        transaction_id: &str,
        request: &UpdateTransactionRequest,
    ) -> Result<Response<Transaction>, ApiError> {
        let path = format!("/transactions/{}", transaction_id);
        self.client.patch(&path, request).await
    }

    /// Calculate totals for a set of items without creating a transaction.
    pub async fn preview(
        &self,
        request: &PreviewTransactionRequest,
    ) -> Result<Response<TransactionPreview>, ApiError> {
        self.client.post("/transactions/preview", &[], request).await
    }

    /// Get a link to the invoice PDF of a billed or completed transaction.
    pub async fn invoice(&self, transaction_id: &str) -> Result<Response<InvoiceUrl>, ApiError> {
        let path = format!("/transactions/{}/invoice", transaction_id);
        self.client.get(&path, &[]).await
    }
}
