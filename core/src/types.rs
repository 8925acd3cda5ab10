//! Per-call input and output of the `fetch` action.
//!
//! # Design
//! `ResponseResult` is a two-variant enum so that a half-failed result
//! (status present but an error too, headers on a failure) cannot be
//! represented. The wire shape the host sees is produced by a hand-written
//! `Serialize` impl: success carries `status`, `content`, `headers`; failure
//! carries `status: 0`, `content: ""`, `error`.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::ser::{Serialize, SerializeMap, Serializer};
use url::Url;

use crate::http::{HttpMethod, HttpRequest};

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// A validated request, ready for the executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    pub url: Url,
    pub method: HttpMethod,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
    pub timeout: Duration,
}

impl RequestSpec {
    /// A GET with no headers, no body, and the default timeout.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            method: HttpMethod::default(),
            headers: BTreeMap::new(),
            body: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub(crate) fn to_request(&self) -> HttpRequest {
        HttpRequest {
            method: self.method,
            url: self.url.clone(),
            headers: self
                .headers
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
            body: self.body.clone(),
            timeout: self.timeout,
        }
    }
}

/// Normalized outcome of one `fetch` call.
///
/// `Success` means a response was obtained, whatever its status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseResult {
    Success {
        status: u16,
        content: String,
        headers: BTreeMap<String, String>,
    },
    Failure {
        error: String,
    },
}

impl ResponseResult {
    /// Remote status code, or 0 when no response was obtained.
    pub fn status(&self) -> u16 {
        match self {
            ResponseResult::Success { status, .. } => *status,
            ResponseResult::Failure { .. } => 0,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            ResponseResult::Success { content, .. } => content,
            ResponseResult::Failure { .. } => "",
        }
    }

    pub fn headers(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            ResponseResult::Success { headers, .. } => Some(headers),
            ResponseResult::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ResponseResult::Success { .. } => None,
            ResponseResult::Failure { error } => Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ResponseResult::Success { .. })
    }
}

impl Serialize for ResponseResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("status", &self.status())?;
        map.serialize_entry("content", self.content())?;
        match self {
            ResponseResult::Success { headers, .. } => map.serialize_entry("headers", headers)?,
            ResponseResult::Failure { error } => map.serialize_entry("error", error)?,
        }
        map.end()
    }
}
