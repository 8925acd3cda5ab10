//! Input schema for the `fetch` action.
//!
//! # Design
//! Validation runs before the executor and is a separate step: raw call data
//! is deserialized into `FetchParams` (shape, types, method set, defaults),
//! then `validate` checks what serde cannot (URL syntax and scheme, timeout
//! positivity, header tokens) and produces a `RequestSpec`. The executor
//! only ever sees specs that passed here.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::header::{HeaderName, HeaderValue};
use serde::Deserialize;
use url::Url;

use crate::error::ValidationError;
use crate::http::HttpMethod;
use crate::types::{RequestSpec, DEFAULT_TIMEOUT_SECS};

/// Raw `fetch` call data, with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FetchParams {
    pub url: String,
    #[serde(default)]
    pub method: HttpMethod,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub body: Option<String>,
    /// Signed so that zero and negative values reach `validate` and get a
    /// precise error instead of a generic type mismatch.
    #[serde(default = "default_timeout")]
    pub timeout: i64,
}

fn default_timeout() -> i64 {
    DEFAULT_TIMEOUT_SECS as i64
}

impl FetchParams {
    pub fn from_value(value: serde_json::Value) -> Result<Self, ValidationError> {
        serde_json::from_value(value).map_err(|e| ValidationError::Malformed(e.to_string()))
    }

    pub fn from_json(input: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(input).map_err(|e| ValidationError::Malformed(e.to_string()))
    }

    pub fn validate(self) -> Result<RequestSpec, ValidationError> {
        let url = parse_url(&self.url)?;

        let secs = u64::try_from(self.timeout)
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or(ValidationError::NonPositiveTimeout)?;

        for (name, value) in &self.headers {
            check_header(name, value)?;
        }

        Ok(RequestSpec {
            url,
            method: self.method,
            headers: self.headers,
            body: self.body,
            timeout: Duration::from_secs(secs),
        })
    }
}

fn parse_url(raw: &str) -> Result<Url, ValidationError> {
    let url = Url::parse(raw).map_err(|e| ValidationError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ValidationError::UnsupportedScheme(raw.to_string()));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(ValidationError::InvalidUrl {
            url: raw.to_string(),
            reason: "missing host".to_string(),
        });
    }
    Ok(url)
}

fn check_header(name: &str, value: &str) -> Result<(), ValidationError> {
    HeaderName::from_bytes(name.as_bytes()).map_err(|e| ValidationError::InvalidHeader {
        name: name.to_string(),
        reason: e.to_string(),
    })?;
    HeaderValue::from_str(value).map_err(|e| ValidationError::InvalidHeader {
        name: name.to_string(),
        reason: e.to_string(),
    })?;
    Ok(())
}
