//! The request executor: one request in, one normalized result out.
//!
//! # Design
//! `execute` is the single boundary where every outcome is folded into a
//! `ResponseResult`. The client call runs under the per-call timeout and a
//! panic guard, so a slow server, a transport error, and a misbehaving
//! client all come back as `Failure` rather than as an error or an unwind.
//! Status codes are never failures here: a 404 or a 500 is a response.

use std::any::Any;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tracing::{debug, error};

use crate::error::FetchError;
use crate::http::{HttpClient, HttpResponse};
use crate::types::{RequestSpec, ResponseResult};

/// Issue `spec` through `client` and normalize the outcome.
///
/// Never fails and never retries. Resolves within `spec.timeout` plus
/// scheduling slack.
///
/// The timeout needs a Tokio runtime with the time driver enabled. Driven
/// from any other executor, the call still resolves, to a `Failure`
/// describing the missing runtime.
pub async fn execute<C: HttpClient>(spec: &RequestSpec, client: &C) -> ResponseResult {
    debug!(
        url = %spec.url,
        method = %spec.method,
        headers = ?spec.headers,
        "Fetching URL"
    );

    let guarded = AssertUnwindSafe(async {
        tokio::time::timeout(spec.timeout, client.send(spec.to_request())).await
    })
    .catch_unwind();

    let outcome = match guarded.await {
        Ok(Ok(result)) => result,
        Ok(Err(_elapsed)) => Err(FetchError::Timeout(spec.timeout)),
        Err(payload) => Err(FetchError::Unexpected(panic_message(&*payload))),
    };

    match outcome {
        Ok(response) => {
            debug!(
                status = response.status,
                content_length = response.body.chars().count(),
                "Response received"
            );
            success(response)
        }
        Err(err) => {
            if err.is_unexpected() {
                error!(url = %spec.url, error = %err, "Unexpected error fetching URL");
            } else {
                error!(url = %spec.url, error = %err, "Error fetching URL");
            }
            ResponseResult::Failure {
                error: err.to_string(),
            }
        }
    }
}

fn success(response: HttpResponse) -> ResponseResult {
    ResponseResult::Success {
        status: response.status,
        content: response.body,
        headers: fold_headers(response.headers),
    }
}

/// Collapse repeated header names into one entry, values joined by `", "`
/// in arrival order. Names are not re-cased.
fn fold_headers(pairs: Vec<(String, String)>) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    for (name, value) in pairs {
        match headers.entry(name) {
            Entry::Occupied(mut entry) => {
                let existing: &mut String = entry.get_mut();
                existing.push_str(", ");
                existing.push_str(&value);
            }
            Entry::Vacant(entry) => {
                entry.insert(value);
            }
        }
    }
    headers
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "client panicked".to_string()
    }
}
