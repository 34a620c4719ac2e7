//! Customer Operations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{prepare_query, CurrencyCode, CustomData, EntityStatus, PaddleClient, Response};
use crate::error::ApiError;

#[cfg(test)]
#[path = "customer_tests.rs"]
mod tests;

/// Paddle customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: Option<String>,
    pub email: String,
    pub marketing_consent: bool,
    pub status: EntityStatus,
    pub custom_data: Option<CustomData>,
    pub locale: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a customer.
#[derive(Debug, Clone, Serialize)]
pub struct CreateCustomerRequest {
    /// Email address (required)
    pub email: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

/// Request to update a customer. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateCustomerRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub marketing_consent: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EntityStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

/// Filters for listing customers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListCustomersParams {
    pub after: Option<String>,
    pub id: Option<Vec<String>>,
    pub order_by: Option<String>,
    pub per_page: Option<u32>,
    pub search: Option<String>,
    pub status: Option<EntityStatus>,
}

/// Credit balance amounts for one currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditBalance {
    pub available: String,
    pub reserved: String,
    pub used: String,
}

/// Credit balance of a customer in one currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerCreditBalance {
    pub customer_id: String,
    pub currency_code: CurrencyCode,
    pub balance: CreditBalance,
}

/// Customer endpoint group.
#[derive(Debug, Clone, Copy)]
pub struct CustomersEndpoint<'a> {
    client: &'a PaddleClient,
}

impl<'a> CustomersEndpoint<'a> {
    pub(crate) fn new(client: &'a PaddleClient) -> Self {
        Self { client }
    }

    /// List customers matching the given filters.
    pub async fn list(&self, params: &ListCustomersParams) -> Result<Response<Vec<Customer>>, ApiError> {
        let query = prepare_query(params)?;
        self.client.get("/customers", &query).await
    }

    /// Create a customer.
    pub async fn create(&self, request: &CreateCustomerRequest) -> Result<Response<Customer>, ApiError> {
        self.client.post("/customers", &[], request).await
    }

    /// Get a customer by ID.
    ///
    /// # Errors
    ///
    /// * `ApiError::NotFound` - Customer does not exist
    pub async fn get(&self, customer_id: &str) -> Result<Response<Customer>, ApiError> {
        let path = format!("/customers/{}", customer_id);
        self.client.get(&path, &[]).await
    }

    /// Update a customer.
    pub async fn update(
        &self,
        customer_id: &str,
        request: &UpdateCustomerRequest,
    ) -> Result<Response<Customer>, ApiError> {
        let path = format!("/customers/{}", customer_id);
        self.client.patch(&path, request).await
    }

    /// List credit balances for a customer, one entry per currency.
    pub async fn credit_balances(
        &self,
        customer_id: &str,
    ) -> Result<Response<Vec<CustomerCreditBalance>>, ApiError> {
        let path = format!("/customers/{}/credit-balances", customer_id);
        self.client.get(&path, &[]).await
    }
}
