//! Price Operations

use serde::{Deserialize, Serialize};

use crate::client::{
    prepare_query, CountryCode, CurrencyCode, CustomData, EntityStatus, Interval, PaddleClient,
    Response,
};
use crate::error::ApiError;

#[cfg(test)]
#[path = "price_tests.rs"]
mod tests;

/// Amount charged per unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitPrice {
    /// Amount in the lowest denomination, e.g. `"1000"` for 10.00 USD
    pub amount: String,
    pub currency_code: CurrencyCode,
}

/// Country-specific override of the unit price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitPriceOverride {
    pub country_codes: Vec<CountryCode>,
    pub unit_price: UnitPrice,
}

/// Allowed purchase quantity range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantity {
    pub minimum: u32,
    pub maximum: u32,
}

/// Related entities that can be included when listing prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceInclude {
    Product,
}

/// Paddle price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub id: String,
    pub product_id: String,
    pub description: String,
    pub billing_cycle: Option<Interval>,
    pub trial_period: Option<Interval>,
    pub tax_mode: String,
    pub unit_price: UnitPrice,
    #[serde(default)]
    pub unit_price_overrides: Vec<UnitPriceOverride>,
    pub quantity: Quantity,
    pub status: EntityStatus,
    pub custom_data: Option<CustomData>,
}

/// Request to create a price.
#[derive(Debug, Clone, Serialize)]
pub struct CreatePriceRequest {
    pub product_id: String,
    pub description: String,
    pub unit_price: UnitPrice,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_cycle: Option<Interval>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial_period: Option<Interval>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_mode: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unit_price_overrides: Vec<UnitPriceOverride>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Quantity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

/// Request to update a price. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdatePriceRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_cycle: Option<Interval>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial_period: Option<Interval>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_mode: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<UnitPrice>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price_overrides: Option<Vec<UnitPriceOverride>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Quantity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EntityStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

/// Filters for listing prices.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListPricesParams {
    pub after: Option<String>,
    pub id: Option<Vec<String>>,
    pub include: Option<PriceInclude>,
    pub order_by: Option<String>,
    pub per_page: Option<u32>,
    /// One or more product IDs, sent comma-joined
    pub product_id: Option<Vec<String>>,
    pub status: Option<EntityStatus>,
    pub recurring: Option<bool>,
}

/// Price endpoint group.
#[derive(Debug, Clone, Copy)]
pub struct PricesEndpoint<'a> {
    client: &'a PaddleClient,
}

impl<'a> PricesEndpoint<'a> {
    pub(crate) fn new(client: &'a PaddleClient) -> Self {
        Self { client }
    }

    /// List prices matching the given filters.
    pub async fn list(&self, params: &ListPricesParams) -> Result<Response<Vec<Price>>, ApiError> {
        let query = prepare_query(params)?;
        self.client.get("/prices", &query).await
    }

    /// Create a price for an existing product.
    pub async fn create(&self, request: &CreatePriceRequest) -> Result<Response<Price>, ApiError> {
        self.client.post("/prices", &[], request).await
    }

    /// Get a price by ID.
    pub async fn get(&self, price_id: &str) -> Result<Response<Price>, ApiError> {
        let path = format!("/prices/{}", price_id);
        self.client.get(&path, &[]).await
    }

    /// Update a price.
    pub async fn update(
        &self,
        price_id: &str,
        request: &UpdatePriceRequest,
    ) -> Result<Response<Price>, ApiError> {
        let path = format!("/prices/{}", price_id);
        self.client.patch(&path, request).await
    }
}
