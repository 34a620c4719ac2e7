//! Tests for Price Operations

use super::*;
use crate::client::IntervalUnit;
use crate::test_support::{client_for, envelope, price_json};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_price_deserialization() {
    let price: Price = serde_json::from_value(price_json()).unwrap();

    let cycle = price.billing_cycle.unwrap();
    assert_eq!(cycle.interval, IntervalUnit::Month);
    assert_eq!(cycle.frequency, 1);
    assert!(price.trial_period.is_none());
    assert_eq!(price.unit_price_overrides[0].country_codes, vec!["IE", "DE"]);
    assert_eq!(price.quantity, Quantity { minimum: 1, maximum: 100 });
}

#[test]
fn test_missing_overrides_default_to_empty() {
    let mut value = price_json();
    value
        .as_object_mut()
        .unwrap()
        .remove("unit_price_overrides");

    let price: Price = serde_json::from_value(value).unwrap();
    assert!(price.unit_price_overrides.is_empty());
}

#[tokio::test]
async fn test_list_prices_joins_product_ids() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/prices"))
        .and(query_param("product_id", "pro_1,pro_2"))
        .and(query_param("recurring", "true"))
        .and(query_param("include", "product"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([price_json()]))))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let params = ListPricesParams {
        product_id: Some(vec!["pro_1".to_string(), "pro_2".to_string()]),
        recurring: Some(true),
        include: Some(PriceInclude::Product),
        ..Default::default()
    };

    let response = client.prices().list(&params).await.unwrap();
    assert_eq!(response.data[0].description, "Monthly");
}

#[tokio::test]
async fn test_create_price_skips_empty_overrides() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/prices"))
        .and(body_json(json!({
            "product_id": "pro_01gsz4t5hdjse780zja8vvr7jg",
            "description": "Monthly",
            "unit_price": { "amount": "3000", "currency_code": "USD" },
            "billing_cycle": { "interval": "month", "frequency": 1 }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(envelope(price_json())))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let request = CreatePriceRequest {
        product_id: "pro_01gsz4t5hdjse780zja8vvr7jg".to_string(),
        description: "Monthly".to_string(),
        unit_price: UnitPrice {
            amount: "3000".to_string(),
            currency_code: "USD".to_string(),
        },
        billing_cycle: Some(Interval {
            interval: IntervalUnit::Month,
            frequency: 1,
        }),
        trial_period: None,
        tax_mode: None,
        unit_price_overrides: Vec::new(),
        quantity: None,
        custom_data: None,
    };

    let response = client.prices().create(&request).await.unwrap();
    assert_eq!(response.data.id, "pri_01gsz8x8sawmvhz1pv30nge1ke");
}

#[tokio::test]
async fn test_get_and_archive_price() {
    let mock_server = MockServer::start().await;
    let id = "pri_01gsz8x8sawmvhz1pv30nge1ke";
    let mut archived = price_json();
    archived["status"] = json!("archived");

    Mock::given(method("GET"))
        .and(path(format!("/prices/{}", id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(price_json())))
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path(format!("/prices/{}", id)))
        .and(body_json(json!({ "status": "archived" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(archived)))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());

    let fetched = client.prices().get(id).await.unwrap();
    assert_eq!(fetched.data.status, EntityStatus::Active);

    let request = UpdatePriceRequest {
        status: Some(EntityStatus::Archived),
        ..Default::default()
    };
    let updated = client.prices().update(id, &request).await.unwrap();
    assert_eq!(updated.data.status, EntityStatus::Archived);
}
