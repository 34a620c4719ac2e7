//! Tests for event types and the WebhookEvent accessors.

use super::*;
use crate::test_support::{customer_json, event_body, subscription_json};
use serde_json::json;

fn decode(event_type: &str, data: serde_json::Value) -> WebhookEvent {
    EventDecoder::default()
        .decode(event_body(event_type, data).as_bytes())
        .unwrap()
}

// ============================================================================
// EventType
// ============================================================================

mod event_type_tests {
    use super::*;

    #[test]
    fn test_all_tags_parse_back() {
        for event_type in EventType::ALL {
            assert_eq!(event_type.as_str().parse::<EventType>().unwrap(), event_type);
            assert_eq!(event_type.to_string(), event_type.as_str());
        }
    }

    #[test]
    fn test_serde_uses_wire_tags() {
        for event_type in EventType::ALL {
            let value = serde_json::to_value(event_type).unwrap();
            assert_eq!(value, json!(event_type.as_str()));

            let back: EventType = serde_json::from_value(value).unwrap();
            assert_eq!(back, event_type);
        }
    }

    #[test]
    fn test_unknown_tag() {
        let err = "transaction.completed".parse::<EventType>().unwrap_err();

        assert_eq!(
            err,
            WebhookError::UnknownEventType {
                event_type: "transaction.completed".to_string()
            }
        );
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        assert!("Customer.Created".parse::<EventType>().is_err());
        assert!("customer.created ".parse::<EventType>().is_err());
    }

    #[test]
    fn test_entity_classification() {
        let customers: Vec<_> = EventType::ALL
            .into_iter()
            .filter(EventType::is_customer_event)
            .collect();
        assert_eq!(
            customers,
            vec![EventType::CustomerCreated, EventType::CustomerUpdated]
        );

        assert_eq!(
            EventType::ALL
                .iter()
                .filter(|t| t.is_subscription_event())
                .count(),
            9
        );
    }

    #[test]
    fn test_past_due_tag() {
        assert_eq!(EventType::SubscriptionPastDue.as_str(), "subscription.past_due");
    }
}

// ============================================================================
// WebhookEvent
// ============================================================================

mod webhook_event_tests {
    use super::*;

    #[test]
    fn test_envelope_accessors() {
        let event = decode("customer.updated", customer_json());

        assert_eq!(event.event_type(), Some(EventType::CustomerUpdated));
        assert_eq!(event.event_type_str(), "customer.updated");
        assert_eq!(event.event_id(), "evt_01h8441jn5pcwrfhwh78jqt8hk");
        assert_eq!(event.notification_id(), "ntf_01h8441jx8x5fqv2z1h1fr8cnp");
        assert_eq!(
            event.occurred_at().to_rfc3339(),
            "2023-08-21T11:57:47.390028+00:00"
        );
    }

    #[test]
    fn test_entity_accessors() {
        let customer_event = decode("customer.created", customer_json());
        assert_eq!(
            customer_event.customer().unwrap().id,
            "ctm_01h8441jn5pcwrfhwh78jqt8hk"
        );
        assert!(customer_event.subscription().is_none());

        let subscription_event = decode("subscription.canceled", subscription_json());
        assert_eq!(
            subscription_event.subscription().unwrap().id,
            "sub_01h8bx8fmywym11t6swgzba704"
        );
        assert!(subscription_event.customer().is_none());
    }

    #[test]
    fn test_unrecognized_accessors() {
        let event = WebhookEvent::Unrecognized(UnrecognizedEvent {
            event_type: "adjustment.created".to_string(),
            event_id: "evt_1".to_string(),
            notification_id: "ntf_1".to_string(),
            occurred_at: Utc::now(),
            data: json!({ "id": "adj_1" }),
        });

        assert!(event.event_type().is_none());
        assert_eq!(event.event_type_str(), "adjustment.created");
        assert_eq!(event.event_id(), "evt_1");
        assert!(event.customer().is_none());
        assert!(event.subscription().is_none());
    }

    #[test]
    fn test_serialize_restores_envelope() {
        let body = event_body("customer.updated", customer_json());
        let event = EventDecoder::default().decode(body.as_bytes()).unwrap();

        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(value["event_type"], "customer.updated");
        assert_eq!(value["event_id"], "evt_01h8441jn5pcwrfhwh78jqt8hk");
        assert_eq!(value["notification_id"], "ntf_01h8441jx8x5fqv2z1h1fr8cnp");
        assert_eq!(value["data"]["id"], "ctm_01h8441jn5pcwrfhwh78jqt8hk");

        // Re-serialized form decodes to the same event
        let again = EventDecoder::default()
            .decode(value.to_string().as_bytes())
            .unwrap();
        assert_eq!(again, event);
    }

    #[test]
    fn test_serialize_unrecognized_keeps_raw_data() {
        let event = WebhookEvent::Unrecognized(UnrecognizedEvent {
            event_type: "adjustment.created".to_string(),
            event_id: "evt_1".to_string(),
            notification_id: "ntf_1".to_string(),
            occurred_at: Utc::now(),
            data: json!({ "id": "adj_1", "nested": [1, 2] }),
        });

        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(value["event_type"], "adjustment.created");
        assert_eq!(value["data"], json!({ "id": "adj_1", "nested": [1, 2] }));
    }

    #[test]
    fn test_webhook_record_round_trips() {
        let webhook = Webhook {
            event_id: "evt_1".to_string(),
            notification_id: "ntf_1".to_string(),
            occurred_at: "2024-01-01T00:00:00Z".parse().unwrap(),
            data: json!({ "k": "v" }),
        };

        let back: Webhook<serde_json::Value> =
            serde_json::from_value(serde_json::to_value(&webhook).unwrap()).unwrap();
        assert_eq!(back, webhook);
    }
}

#[test]
fn test_default_policy_is_reject() {
    assert_eq!(UnknownEventPolicy::default(), UnknownEventPolicy::Reject);
}
