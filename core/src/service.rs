//! The `fetch` named action as the host invokes it.
//!
//! Glues the two steps together: validate raw call data into a
//! `RequestSpec`, then run the executor against the host's client.
//! Validation failures are returned on the `Err` channel and never reach
//! the executor; everything past validation is a `ResponseResult`.

use tracing::info;

use crate::error::ValidationError;
use crate::executor::execute;
use crate::http::HttpClient;
use crate::params::FetchParams;
use crate::types::ResponseResult;

pub const SERVICE_NAME: &str = "fetch";

/// The `fetch` action bound to a host-owned client handle.
#[derive(Debug, Clone)]
pub struct FetchService<C> {
    client: C,
}

impl<C: HttpClient> FetchService<C> {
    pub fn new(client: C) -> Self {
        info!(service = SERVICE_NAME, "fetch action registered");
        Self { client }
    }

    pub fn name(&self) -> &'static str {
        SERVICE_NAME
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub async fn call(&self, input: serde_json::Value) -> Result<ResponseResult, ValidationError> {
        let spec = FetchParams::from_value(input)?.validate()?;
        Ok(execute(&spec, &self.client).await)
    }

    /// Same as [`call`](Self::call), for input that is still a JSON string.
    pub async fn call_json(&self, input: &str) -> Result<ResponseResult, ValidationError> {
        let spec = FetchParams::from_json(input)?.validate()?;
        Ok(execute(&spec, &self.client).await)
    }
}
