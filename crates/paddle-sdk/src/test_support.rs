//! Fixtures shared by the unit tests.

use serde_json::{json, Value};

use crate::client::{ClientConfig, PaddleClient};
use crate::webhook::compute_signature;

pub const TEST_API_KEY: &str = "pdl_sdbx_apikey_test";
pub const TEST_SECRET: &str = "whsec_test";
pub const TEST_TIMESTAMP: &str = "1700000000";

/// Client pointed at a mock server.
pub fn client_for(uri: &str) -> PaddleClient {
    let config = ClientConfig::builder(TEST_API_KEY).base_url(uri).build();
    PaddleClient::new(config).unwrap()
}

/// Wrap `data` in the standard response envelope.
pub fn envelope(data: Value) -> Value {
    json!({
        "data": data,
        "meta": { "request_id": "req_test" }
    })
}

/// `paddle-signature` header value for `body` signed with `secret` at `ts`.
pub fn signature_header(secret: &str, ts: &str, body: &str) -> String {
    let digest = compute_signature(secret, ts, body.as_bytes()).unwrap();
    format!("ts={};h1={}", ts, digest)
}

/// Webhook notification body for the given event type and entity.
pub fn event_body(event_type: &str, data: Value) -> String {
    json!({
        "event_id": "evt_01h8441jn5pcwrfhwh78jqt8hk",
        "event_type": event_type,
        "occurred_at": "2023-08-21T11:57:47.390028Z",
        "notification_id": "ntf_01h8441jx8x5fqv2z1h1fr8cnp",
        "data": data
    })
    .to_string()
}

pub fn customer_json() -> Value {
    json!({
        "id": "ctm_01h8441jn5pcwrfhwh78jqt8hk",
        "name": "Sam Miller",
        "email": "sam@example.com",
        "marketing_consent": false,
        "status": "active",
        "custom_data": null,
        "locale": "en",
        "created_at": "2023-08-21T11:57:47.390028Z",
        "updated_at": "2023-08-21T11:57:47.390028Z"
    })
}

pub fn product_json() -> Value {
    json!({
        "id": "pro_01gsz4t5hdjse780zja8vvr7jg",
        "name": "AeroEdit Pro",
        "tax_category": "standard",
        "description": "Designed for professional pilots.",
        "image_url": "https://example.com/aeroedit-pro.png",
        "custom_data": { "features": { "sso": true } },
        "status": "active",
        "created_at": "2023-02-23T12:43:46.605Z"
    })
}

pub fn price_json() -> Value {
    json!({
        "id": "pri_01gsz8x8sawmvhz1pv30nge1ke",
        "product_id": "pro_01gsz4t5hdjse780zja8vvr7jg",
        "description": "Monthly",
        "billing_cycle": { "interval": "month", "frequency": 1 },
        "trial_period": null,
        "tax_mode": "account_setting",
        "unit_price": { "amount": "3000", "currency_code": "USD" },
        "unit_price_overrides": [
            {
                "country_codes": ["IE", "DE"],
                "unit_price": { "amount": "2800", "currency_code": "EUR" }
            }
        ],
        "quantity": { "minimum": 1, "maximum": 100 },
        "status": "active",
        "custom_data": null
    })
}

pub fn subscription_json() -> Value {
    json!({
        "id": "sub_01h8bx8fmywym11t6swgzba704",
        "status": "active",
        "customer_id": "ctm_01h8441jn5pcwrfhwh78jqt8hk",
        "address_id": "add_01h8441jr6by7shhzjqzkkxjmj",
        "business_id": null,
        "currency_code": "USD",
        "created_at": "2023-08-22T13:30:30.484Z",
        "updated_at": "2023-08-22T13:30:30.484Z",
        "started_at": "2023-08-22T13:30:29.998681Z",
        "first_billed_at": "2023-08-22T13:30:29.998681Z",
        "next_billed_at": "2023-09-22T13:30:29.998681Z",
        "paused_at": null,
        "canceled_at": null,
        "discount": null,
        "collection_mode": "automatic",
        "billing_details": null,
        "current_billing_period": {
            "starts_at": "2023-08-22T13:30:29.998681Z",
            "ends_at": "2023-09-22T13:30:29.998681Z"
        },
        "billing_cycle": { "interval": "month", "frequency": 1 },
        "scheduled_change": null,
        "management_urls": {
            "update_payment_method": "https://buyer-portal.paddle.com/subscriptions/sub_01h8bx8fmywym11t6swgzba704/update-payment-method",
            "cancel": "https://buyer-portal.paddle.com/subscriptions/sub_01h8bx8fmywym11t6swgzba704/cancel"
        },
        "items": [
            {
                "status": "active",
                "quantity": 10,
                "recurring": true,
                "created_at": "2023-08-22T13:30:30.484Z",
                "updated_at": "2023-08-22T13:30:30.484Z",
                "previously_billed_at": "2023-08-22T13:30:29.998681Z",
                "next_billed_at": "2023-09-22T13:30:29.998681Z",
                "trial_dates": null,
                "price": price_json()
            }
        ],
        "custom_data": null
    })
}

pub fn transaction_json() -> Value {
    json!({
        "id": "txn_01h8bx69629a16wwm9z8rjmak3",
        "status": "completed",
        "customer_id": "ctm_01h8441jn5pcwrfhwh78jqt8hk",
        "address_id": "add_01h8441jr6by7shhzjqzkkxjmj",
        "business_id": null,
        "currency_code": "USD",
        "discount_id": null,
        "subscription_id": "sub_01h8bx8fmywym11t6swgzba704",
        "invoice_id": "inv_01h8bx8fkqyxerg0fmg0r6k0sx",
        "invoice_number": "325-10566",
        "collection_mode": "automatic",
        "billing_details": null,
        "billing_period": {
            "starts_at": "2023-08-22T13:30:29.998681Z",
            "ends_at": "2023-09-22T13:30:29.998681Z"
        },
        "items": [
            {
                "quantity": 10,
                "price": price_json(),
                "proration": null
            }
        ],
        "details": {
            "tax_rates_used": [
                {
                    "tax_rate": "0.08",
                    "totals": {
                        "subtotal": "30000",
                        "discount": "0",
                        "tax": "2400",
                        "total": "32400"
                    }
                }
            ],
            "totals": {
                "subtotal": "30000",
                "discount": "0",
                "tax": "2400",
                "total": "32400",
                "credit": "0",
                "balance": "0",
                "grand_total": "32400",
                "fee": null,
                "earnings": null,
                "currency_code": "USD"
            }
        },
        "checkout": { "url": "https://example.com/pay?_ptxn=txn_01h8bx69629a16wwm9z8rjmak3" },
        "custom_data": null,
        "created_at": "2023-08-22T13:29:50.390Z",
        "updated_at": "2023-08-22T13:30:31.170Z",
        "billed_at": "2023-08-22T13:30:29.998681Z"
    })
}
