//! The `fetch` action: one outbound HTTP request, one normalized result.
//!
//! # Overview
//! A host invokes `fetch` with structured input (`url`, `method`, `headers`,
//! `body`, `timeout`) and always gets a `ResponseResult` back: the remote's
//! status, body text and headers, or `status: 0` with an error message when
//! no response could be obtained.
//!
//! # Design
//! - Validation (`params`) is a separate step that turns raw input into a
//!   `RequestSpec`; bad input never reaches the executor.
//! - The executor (`executor::execute`) is stateless and holds no locks. It
//!   wraps the client call in one boundary (timeout, error mapping, panic
//!   guard), so every outcome is a value.
//! - The HTTP client is injected through the `HttpClient` trait and owned by
//!   the host. `ReqwestClient` is the stock implementation.
//! - `FetchService` is the named action: validate, then execute.

pub mod backends;
pub mod error;
pub mod executor;
pub mod http;
pub mod params;
pub mod service;
pub mod types;

pub use backends::{ClientConfig, ReqwestClient};
pub use error::{FetchError, ValidationError};
pub use executor::execute;
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use params::FetchParams;
pub use service::{FetchService, SERVICE_NAME};
pub use types::{RequestSpec, ResponseResult, DEFAULT_TIMEOUT_SECS};
