//! Shared Paddle value types used across several resources.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Free-form key/value data attached to Paddle entities.
pub type CustomData = serde_json::Map<String, serde_json::Value>;

/// ISO 4217 currency code, e.g. `USD`.
pub type CurrencyCode = String;

/// ISO 3166-1 alpha-2 country code, e.g. `DE`.
pub type CountryCode = String;

/// Lifecycle status shared by customers, products and prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityStatus {
    Active,
    Archived,
}

/// Time span with RFC 3339 bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Period {
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

/// Unit of a billing or trial interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalUnit {
    Day,
    Week,
    Month,
    Year,
}

/// Repeating interval such as "every 3 months".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub interval: IntervalUnit,
    pub frequency: u32,
}

/// How Paddle collects payment for a subscription or transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionMode {
    Automatic,
    Manual,
}

/// Proration applied to a transaction item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proration {
    pub rate: String,
    pub billing_period: Period,
}

/// Monetary totals. Amounts are strings in the lowest denomination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: String,
    pub discount: String,
    pub tax: String,
    pub total: String,
    #[serde(default)]
    pub grand_total: Option<String>,
    #[serde(default)]
    pub fee: Option<String>,
    #[serde(default)]
    pub credit: Option<String>,
    #[serde(default)]
    pub balance: Option<String>,
    #[serde(default)]
    pub earnings: Option<String>,
    pub currency_code: CurrencyCode,
}

/// Totals after adjustments have been applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustedTotals {
    pub subtotal: String,
    pub tax: String,
    pub total: String,
    pub grand_total: String,
    #[serde(default)]
    pub fee: Option<String>,
    #[serde(default)]
    pub earnings: Option<String>,
    pub currency_code: CurrencyCode,
}

/// Tax rate used when calculating a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxRate {
    pub tax_rate: String,
    pub totals: TaxRateTotals,
}

/// Subset of [`Totals`] reported per tax rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxRateTotals {
    pub subtotal: String,
    pub discount: String,
    pub tax: String,
    pub total: String,
}

/// Discount applied to a subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    pub id: String,
    pub starts_at: DateTime<Utc>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
}

/// Invoicing details for manually collected subscriptions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingDetails {
    pub enable_checkout: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_order_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_information: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_terms: Option<Interval>,
}
