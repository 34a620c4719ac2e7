//! Tests for webhook signature validation.

use super::*;
use chrono::TimeZone;

const SECRET: &str = "whsec_test";
const TS: &str = "1700000000";
const BODY: &[u8] = br#"{"event_id":"evt_1"}"#;
const DIGEST: &str = "d1e9214b89dd0803e51b93ae35ad2d92a25de2b482cfe98281a6b9bfd51cd23d";

fn header() -> String {
    format!("ts={};h1={}", TS, DIGEST)
}

fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

// ============================================================================
// Header Parsing
// ============================================================================

mod header_parsing {
    use super::*;

    #[test]
    fn test_parse_canonical_order() {
        let parsed = SignatureHeader::parse(&header()).unwrap();

        assert_eq!(parsed.timestamp(), TS);
        assert_eq!(parsed.signature(), DIGEST);
        assert_eq!(parsed.timestamp_secs().unwrap(), 1_700_000_000);
    }

    #[test]
    fn test_parse_is_order_independent() {
        let reversed = format!("h1={};ts={}", DIGEST, TS);

        assert_eq!(
            SignatureHeader::parse(&reversed).unwrap(),
            SignatureHeader::parse(&header()).unwrap()
        );
    }

    #[test]
    fn test_display_round_trips() {
        let parsed: SignatureHeader = header().parse().unwrap();
        assert_eq!(parsed.to_string(), header());
    }

    #[test]
    fn test_one_segment_is_malformed() {
        let result = SignatureHeader::parse(&format!("ts={}", TS));
        assert!(matches!(result, Err(WebhookError::MalformedHeader { .. })));
    }

    #[test]
    fn test_three_segments_are_malformed() {
        let result = SignatureHeader::parse(&format!("{};extra=1", header()));
        assert!(matches!(result, Err(WebhookError::MalformedHeader { .. })));
    }

    #[test]
    fn test_trailing_separator_counts_as_segment() {
        let result = SignatureHeader::parse(&format!("{};", header()));
        assert!(matches!(result, Err(WebhookError::MalformedHeader { .. })));
    }

    #[test]
    fn test_missing_h1_segment() {
        let result = SignatureHeader::parse("ts=1;ts=2");
        assert!(matches!(result, Err(WebhookError::MalformedHeader { .. })));
    }

    #[test]
    fn test_missing_ts_segment() {
        let result = SignatureHeader::parse(&format!("v1=abc;h1={}", DIGEST));
        assert!(matches!(result, Err(WebhookError::MalformedHeader { .. })));
    }

    #[test]
    fn test_empty_values_are_malformed() {
        for header in ["ts=;h1=abc", "ts=1700000000;h1=", "h1=;ts="] {
            let result = SignatureHeader::parse(header);
            assert!(
                matches!(result, Err(WebhookError::MalformedHeader { .. })),
                "{} should be malformed",
                header
            );
        }
    }

    #[test]
    fn test_value_keeps_everything_after_prefix() {
        let parsed = SignatureHeader::parse("ts=17=00;h1=ab=cd").unwrap();

        assert_eq!(parsed.timestamp(), "17=00");
        assert_eq!(parsed.signature(), "ab=cd");
        assert!(parsed.timestamp_secs().is_err());
    }

    #[test]
    fn test_empty_header_is_malformed() {
        assert!(matches!(
            SignatureHeader::parse(""),
            Err(WebhookError::MalformedHeader { .. })
        ));
    }
}

// ============================================================================
// Signature Computation
// ============================================================================

#[test]
fn test_compute_signature_known_vector() {
    assert_eq!(compute_signature(SECRET, TS, BODY).unwrap(), DIGEST);
}

#[test]
fn test_compute_signature_is_lowercase_hex() {
    let digest = compute_signature(SECRET, TS, b"anything").unwrap();

    assert_eq!(digest.len(), 64);
    assert!(digest
        .chars()
        .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
}

// ============================================================================
// Verification
// ============================================================================

mod verification {
    use super::*;

    #[test]
    fn test_valid_signature_verifies() {
        let verifier = SignatureVerifier::new(header(), SECRET).unwrap();
        assert_eq!(verifier.verify(BODY), Ok(()));
    }

    #[test]
    fn test_reversed_header_verifies() {
        let verifier = SignatureVerifier::new(format!("h1={};ts={}", DIGEST, TS), SECRET).unwrap();
        assert_eq!(verifier.verify(BODY), Ok(()));
    }

    #[test]
    fn test_empty_secret_fails_at_construction() {
        let result = SignatureVerifier::new(header(), "");
        assert!(matches!(result, Err(WebhookError::Configuration { .. })));
    }

    #[test]
    fn test_malformed_header_surfaces_on_verify() {
        let verifier = SignatureVerifier::new("garbage", SECRET).unwrap();
        assert!(matches!(
            verifier.verify(BODY),
            Err(WebhookError::MalformedHeader { .. })
        ));
    }

    #[test]
    fn test_modified_body_is_rejected() {
        let verifier = SignatureVerifier::new(header(), SECRET).unwrap();
        assert_eq!(
            verifier.verify(br#"{"event_id":"evt_2"}"#),
            Err(WebhookError::InvalidSignature)
        );
    }

    #[test]
    fn test_every_single_byte_mutation_is_rejected() {
        let verifier = SignatureVerifier::new(header(), SECRET).unwrap();

        for i in 0..BODY.len() {
            let mut mutated = BODY.to_vec();
            mutated[i] = if mutated[i] == b'x' { b'y' } else { b'x' };
            assert_eq!(
                verifier.verify(&mutated),
                Err(WebhookError::InvalidSignature),
                "mutation at byte {} was accepted",
                i
            );
        }
    }

    #[test]
    fn test_modified_timestamp_is_rejected() {
        let verifier = SignatureVerifier::new(format!("ts=1700000001;h1={}", DIGEST), SECRET).unwrap();
        assert_eq!(verifier.verify(BODY), Err(WebhookError::InvalidSignature));
    }

    #[test]
    fn test_modified_digest_is_rejected() {
        let mut digest = DIGEST.to_string();
        digest.replace_range(0..1, "e");
        let verifier = SignatureVerifier::new(format!("ts={};h1={}", TS, digest), SECRET).unwrap();

        assert_eq!(verifier.verify(BODY), Err(WebhookError::InvalidSignature));
    }

    #[test]
    fn test_uppercase_digest_is_rejected() {
        let header = format!("ts={};h1={}", TS, DIGEST.to_uppercase());
        let verifier = SignatureVerifier::new(header, SECRET).unwrap();

        assert_eq!(verifier.verify(BODY), Err(WebhookError::InvalidSignature));
    }

    #[test]
    fn test_truncated_digest_is_rejected() {
        let header = format!("ts={};h1={}", TS, &DIGEST[..32]);
        let verifier = SignatureVerifier::new(header, SECRET).unwrap();

        assert_eq!(verifier.verify(BODY), Err(WebhookError::InvalidSignature));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let verifier = SignatureVerifier::new(header(), "other_secret").unwrap();
        assert_eq!(verifier.verify(BODY), Err(WebhookError::InvalidSignature));
    }

    #[test]
    fn test_unsigned_non_utf8_body_is_invalid_signature() {
        let verifier = SignatureVerifier::new("ts=1;h1=deadbeef", SECRET).unwrap();
        assert_eq!(
            verifier.verify(&[0xff, 0xfe]),
            Err(WebhookError::InvalidSignature)
        );

        let verifier = SignatureVerifier::new(header(), SECRET).unwrap();
        assert_eq!(
            verifier.verify(&[0xff, 0xfe, 0x00]),
            Err(WebhookError::InvalidSignature)
        );
    }

    #[test]
    fn test_signed_non_utf8_body_is_malformed_payload() {
        let body = [0xff, 0xfe, 0x00];
        let digest = compute_signature(SECRET, TS, &body).unwrap();
        let verifier = SignatureVerifier::new(format!("ts={};h1={}", TS, digest), SECRET).unwrap();

        match verifier.verify(&body) {
            Err(WebhookError::MalformedPayload { field, .. }) => assert_eq!(field, "<body>"),
            other => panic!("Expected MalformedPayload, got {:?}", other),
        }
    }

    #[test]
    fn test_verification_is_idempotent() {
        let verifier = SignatureVerifier::new(header(), SECRET).unwrap();

        let first = verifier.verify(BODY);
        let second = verifier.verify(BODY);
        assert_eq!(first, second);

        let bad = br#"{"event_id":"evt_9"}"#;
        assert_eq!(verifier.verify(bad), verifier.verify(bad));
    }

    #[test]
    fn test_from_config_uses_config_secret() {
        let config = WebhookConfig::new(WebhookSecret::new(SECRET).unwrap());
        let verifier = SignatureVerifier::from_config(header(), &config);

        assert_eq!(verifier.verify(BODY), Ok(()));
    }

    #[test]
    fn test_debug_output_hides_secret() {
        let verifier = SignatureVerifier::new(header(), SECRET).unwrap();
        let debug_output = format!("{:?}", verifier);

        assert!(debug_output.contains("<REDACTED>"));
        assert!(!debug_output.contains(SECRET));
    }
}

// ============================================================================
// Timestamp Tolerance
// ============================================================================

mod tolerance {
    use super::*;

    fn verifier(tolerance_secs: u64) -> SignatureVerifier {
        SignatureVerifier::new(header(), SECRET)
            .unwrap()
            .with_timestamp_tolerance(Duration::from_secs(tolerance_secs))
    }

    #[test]
    fn test_no_tolerance_accepts_old_signatures() {
        let verifier = SignatureVerifier::new(header(), SECRET).unwrap();
        assert_eq!(verifier.verify_at(BODY, at(1_800_000_000)), Ok(()));
    }

    #[test]
    fn test_within_tolerance() {
        assert_eq!(verifier(300).verify_at(BODY, at(1_700_000_300)), Ok(()));
    }

    #[test]
    fn test_outside_tolerance_is_expired() {
        let result = verifier(300).verify_at(BODY, at(1_700_000_301));

        assert_eq!(
            result,
            Err(WebhookError::SignatureExpired {
                age_secs: 301,
                tolerance_secs: 300
            })
        );
    }

    #[test]
    fn test_future_timestamp_beyond_tolerance_is_expired() {
        let result = verifier(60).verify_at(BODY, at(1_699_999_000));
        assert!(matches!(result, Err(WebhookError::SignatureExpired { .. })));
    }

    fn signed_at(ts: &str, tolerance_secs: u64) -> SignatureVerifier {
        let digest = compute_signature(SECRET, ts, BODY).unwrap();
        SignatureVerifier::new(format!("ts={};h1={}", ts, digest), SECRET)
            .unwrap()
            .with_timestamp_tolerance(Duration::from_secs(tolerance_secs))
    }

    #[test]
    fn test_extreme_past_timestamp_is_malformed() {
        let verifier = signed_at(&i64::MIN.to_string(), 300);

        match verifier.verify_at(BODY, at(1_700_000_000)) {
            Err(WebhookError::MalformedHeader { message }) => {
                assert!(message.contains("ts out of range"))
            }
            other => panic!("Expected MalformedHeader, got {:?}", other),
        }
    }

    #[test]
    fn test_extreme_future_timestamp_is_expired() {
        let result = signed_at(&i64::MAX.to_string(), 300).verify_at(BODY, at(1_700_000_000));

        assert_eq!(
            result,
            Err(WebhookError::SignatureExpired {
                age_secs: 1_700_000_000 - i64::MAX,
                tolerance_secs: 300,
            })
        );
    }

    #[test]
    fn test_invalid_signature_wins_over_expiry() {
        let result = verifier(1).verify_at(br#"{"event_id":"evt_2"}"#, at(1_800_000_000));
        assert_eq!(result, Err(WebhookError::InvalidSignature));
    }

    #[test]
    fn test_from_config_applies_tolerance() {
        let config = WebhookConfig::new(WebhookSecret::new(SECRET).unwrap())
            .with_timestamp_tolerance(Duration::from_secs(5));
        let verifier = SignatureVerifier::from_config(header(), &config);

        assert!(matches!(
            verifier.verify_at(BODY, at(1_700_000_100)),
            Err(WebhookError::SignatureExpired { .. })
        ));
    }
}
