//! Product Operations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{prepare_query, CustomData, EntityStatus, PaddleClient, Price, Response};
use crate::error::ApiError;

#[cfg(test)]
#[path = "product_tests.rs"]
mod tests;

/// Tax category of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaxCategory {
    DigitalGoods,
    Ebooks,
    ImplementationServices,
    ProfessionalServices,
    Saas,
    SoftwareProgrammingServices,
    Standard,
    TrainingServices,
    WebsiteHosting,
}

/// Related entities that can be included when listing products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductInclude {
    Prices,
}

/// Paddle product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub tax_category: TaxCategory,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub custom_data: Option<CustomData>,
    pub status: EntityStatus,
    pub created_at: DateTime<Utc>,

    /// Present when listed with `include=prices`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prices: Option<Vec<Price>>,
}

/// Request to create a product.
#[derive(Debug, Clone, Serialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub tax_category: TaxCategory,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

/// Request to update a product. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateProductRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_category: Option<TaxCategory>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EntityStatus>,
}

/// Filters for listing products.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListProductsParams {
    pub after: Option<String>,
    pub id: Option<Vec<String>>,
    pub include: Option<ProductInclude>,
    pub order_by: Option<String>,
    pub per_page: Option<u32>,
    pub status: Option<EntityStatus>,
    pub tax_category: Option<Vec<TaxCategory>>,
}

/// Product endpoint group.
#[derive(Debug, Clone, Copy)]
pub struct ProductsEndpoint<'a> {
    client: &'a PaddleClient,
}

impl<'a> ProductsEndpoint<'a> {
    pub(crate) fn new(client: &'a PaddleClient) -> Self {
        Self { client }
    }

    /// List products matching the given filters.
    pub async fn list(&self, params: &ListProductsParams) -> Result<Response<Vec<Product>>, ApiError> {
        let query = prepare_query(params)?;
        self.client.get("/products", &query).await
    }

    /// Create a product.
    pub async fn create(&self, request: &CreateProductRequest) -> Result<Response<Product>, ApiError> {
        self.client.post("/products", &[], request).await
    }

    /// Get a product by ID.
    pub async fn get(&self, product_id: &str) -> Result<Response<Product>, ApiError> {
        let path = format!("/products/{}", product_id);
        self.client.get(&path, &[]).await
    }

    /// Update a product.
    pub async fn update(
        &self,
        product_id: &str,
        request: &UpdateProductRequest,
    ) -> Result<Response<Product>, ApiError> {
        let path = format!("/products/{}", product_id);
        self.client.patch(&path, request).await
    }
}
