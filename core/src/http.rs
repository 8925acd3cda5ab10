//! HTTP transport types and the client seam.
//!
//! # Design
//! Requests and responses are plain data. The executor builds an
//! `HttpRequest`, hands it to whatever `HttpClient` the host supplied, and
//! normalizes the `HttpResponse` it gets back. The client owns connection
//! pooling and TLS; nothing in this crate creates or tears one down on the
//! caller's behalf.
//!
//! All fields use owned types (`String`, `Vec`) so values can cross the FFI
//! boundary and thread boundaries without lifetime concerns.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::FetchError;

/// HTTP method accepted by the `fetch` action.
///
/// Deserialization is case-sensitive: only the uppercase names are accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
        HttpMethod::Head,
        HttpMethod::Options,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// `timeout` bounds the whole exchange: connect, send, and reading the full
/// response body.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub timeout: Duration,
}

/// An HTTP response described as plain data.
///
/// Header names are kept exactly as the transport reported them, one entry
/// per received header line. `ReqwestClient` reports them lowercased, since
/// hyper normalizes names while parsing, so `X-Test` arrives as `x-test`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// A ready-to-use HTTP client handle supplied by the host.
///
/// Implementations must be safe to share between concurrent invocations.
/// Any status code the remote returns is an `Ok` response; `Err` is reserved
/// for failures to obtain a response at all.
pub trait HttpClient: Send + Sync {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, FetchError>> + Send;
}

impl<C: HttpClient> HttpClient for Arc<C> {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, FetchError>> + Send {
        (**self).send(request)
    }
}

impl<C: HttpClient> HttpClient for &C {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, FetchError>> + Send {
        (**self).send(request)
    }
}
