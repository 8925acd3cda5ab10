//! Verify input validation against JSON test vectors stored in `test-vectors/`.
//!
//! Each case gives raw call data and either the `RequestSpec` fields it must
//! produce or the kind of rejection it must hit.

use std::collections::BTreeMap;
use std::time::Duration;

use fetch_core::{FetchParams, HttpMethod, ValidationError};

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    HttpMethod::ALL
        .into_iter()
        .find(|m| m.as_str() == s)
        .unwrap_or_else(|| panic!("unknown method: {s}"))
}

fn error_kind(err: &ValidationError) -> &'static str {
    match err {
        ValidationError::Malformed(_) => "malformed",
        ValidationError::InvalidUrl { .. } => "invalid_url",
        ValidationError::UnsupportedScheme(_) => "unsupported_scheme",
        ValidationError::NonPositiveTimeout => "non_positive_timeout",
        ValidationError::InvalidHeader { .. } => "invalid_header",
    }
}

#[test]
fn params_test_vectors() {
    let raw = include_str!("../../test-vectors/params.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let outcome = FetchParams::from_value(case["input"].clone()).and_then(FetchParams::validate);

        if let Some(kind) = case["error"].as_str() {
            let err = match outcome {
                Ok(spec) => panic!("{name}: expected {kind} rejection, got {spec:?}"),
                Err(err) => err,
            };
            assert_eq!(error_kind(&err), kind, "{name}: {err}");
            assert!(!err.to_string().is_empty(), "{name}");
            continue;
        }

        let spec = outcome.unwrap_or_else(|e| panic!("{name}: unexpected rejection: {e}"));
        let expected = &case["expected"];
        assert_eq!(spec.url.as_str(), expected["url"].as_str().unwrap(), "{name}: url");
        assert_eq!(
            spec.method,
            parse_method(expected["method"].as_str().unwrap()),
            "{name}: method"
        );
        let headers: BTreeMap<String, String> =
            serde_json::from_value(expected["headers"].clone()).unwrap();
        assert_eq!(spec.headers, headers, "{name}: headers");
        assert_eq!(spec.body.as_deref(), expected["body"].as_str(), "{name}: body");
        assert_eq!(
            spec.timeout,
            Duration::from_secs(expected["timeout_secs"].as_u64().unwrap()),
            "{name}: timeout"
        );
    }
}

#[test]
fn every_method_in_the_set_is_accepted() {
    for method in HttpMethod::ALL {
        let input = serde_json::json!({"url": "https://example.test", "method": method.as_str()});
        let spec = FetchParams::from_value(input).unwrap().validate().unwrap();
        assert_eq!(spec.method, method);
    }
}
