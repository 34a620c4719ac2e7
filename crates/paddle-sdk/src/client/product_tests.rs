//! Tests for Product Operations

use super::*;
use crate::test_support::{client_for, envelope, price_json, product_json};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_tax_category_uses_kebab_case() {
    let value = serde_json::to_value(TaxCategory::SoftwareProgrammingServices).unwrap();
    assert_eq!(value, json!("software-programming-services"));

    let parsed: TaxCategory = serde_json::from_value(json!("digital-goods")).unwrap();
    assert_eq!(parsed, TaxCategory::DigitalGoods);
}

#[test]
fn test_product_without_prices() {
    let product: Product = serde_json::from_value(product_json()).unwrap();

    assert_eq!(product.name, "AeroEdit Pro");
    assert_eq!(product.tax_category, TaxCategory::Standard);
    assert!(product.prices.is_none());
    assert!(product.custom_data.unwrap().contains_key("features"));
}

#[tokio::test]
async fn test_list_products_with_prices_included() {
    let mock_server = MockServer::start().await;
    let mut product = product_json();
    product["prices"] = json!([price_json()]);

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("include", "prices"))
        .and(query_param("tax_category", "saas,standard"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([product]))))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let params = ListProductsParams {
        include: Some(ProductInclude::Prices),
        tax_category: Some(vec![TaxCategory::Saas, TaxCategory::Standard]),
        ..Default::default()
    };

    let response = client.products().list(&params).await.unwrap();

    let prices = response.data[0].prices.as_ref().unwrap();
    assert_eq!(prices.len(), 1);
    assert_eq!(prices[0].unit_price.amount, "3000");
}

#[tokio::test]
async fn test_create_product() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/products"))
        .and(body_json(json!({ "name": "AeroEdit Pro", "tax_category": "standard" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(envelope(product_json())))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let request = CreateProductRequest {
        name: "AeroEdit Pro".to_string(),
        tax_category: TaxCategory::Standard,
        description: None,
        image_url: None,
        custom_data: None,
    };

    let response = client.products().create(&request).await.unwrap();
    assert_eq!(response.data.id, "pro_01gsz4t5hdjse780zja8vvr7jg");
}

#[tokio::test]
async fn test_get_and_update_product() {
    let mock_server = MockServer::start().await;
    let id = "pro_01gsz4t5hdjse780zja8vvr7jg";

    Mock::given(method("GET"))
        .and(path(format!("/products/{}", id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(product_json())))
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path(format!("/products/{}", id)))
        .and(body_json(json!({ "description": "Now with more wings." })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(product_json())))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());

    let fetched = client.products().get(id).await.unwrap();
    assert_eq!(fetched.data.status, EntityStatus::Active);

    let request = UpdateProductRequest {
        description: Some("Now with more wings.".to_string()),
        ..Default::default()
    };
    assert!(client.products().update(id, &request).await.is_ok());
}
