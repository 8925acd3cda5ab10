//! C-ABI wrapper around `fetch-core`.
//!
//! # Overview
//! Exposes the `fetch` action through `extern "C"` functions so a host
//! written in any language with a C FFI can issue requests without linking
//! to Rust's async runtime directly. Input and output are JSON strings with
//! the same shape the core serializes.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - The host owns the client handle: `fetch_client_new` creates the
//!   runtime and the pooled HTTP client once, every `fetch_call` reuses
//!   them, `fetch_client_free` tears them down.
//! - `fetch_call` blocks the calling thread until the request resolves,
//!   which is at most the request's `timeout`. Calls from several host
//!   threads may share one handle.
//! - The C caller owns all returned pointers and must call the matching
//!   `fetch_*_free` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Duration;

use fetch_core::{ClientConfig, FetchService, ReqwestClient, ValidationError};
use tracing_subscriber::EnvFilter;

use types::*;

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

fn new_client(config: &ClientConfig) -> *mut FfiFetchClient {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("fetch-ffi")
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!(error = %e, "failed to start runtime");
            return std::ptr::null_mut();
        }
    };
    let client = match ReqwestClient::from_config(config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "failed to build http client");
            return std::ptr::null_mut();
        }
    };
    let handle = FfiFetchClient {
        runtime,
        service: FetchService::new(client),
    };
    Box::into_raw(Box::new(handle))
}

/// Create a client handle with default settings.
///
/// Returns null if the runtime or HTTP client cannot be built.
/// The caller must free the returned pointer with `fetch_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn fetch_client_new() -> *mut FfiFetchClient {
    catch_unwind(|| new_client(&ClientConfig::default())).unwrap_or(std::ptr::null_mut())
}

/// Create a client handle with a custom user agent and idle-pool timeout.
///
/// `user_agent` may be null (keep the default). `pool_idle_timeout_secs` of
/// 0 keeps the default.
#[unsafe(no_mangle)]
pub extern "C" fn fetch_client_new_with_config(
    user_agent: *const c_char,
    pool_idle_timeout_secs: u64,
) -> *mut FfiFetchClient {
    catch_unwind(|| {
        let mut config = ClientConfig::default();
        if !user_agent.is_null() {
            match unsafe { CStr::from_ptr(user_agent) }.to_str() {
                Ok(ua) => config.user_agent = ua.to_string(),
                Err(_) => return std::ptr::null_mut(),
            }
        }
        if pool_idle_timeout_secs > 0 {
            config.pool_idle_timeout = Duration::from_secs(pool_idle_timeout_secs);
        }
        new_client(&config)
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a handle created by `fetch_client_new*`. Safe to call with null.
///
/// Must not be called from inside an async runtime, nor while another
/// thread is in `fetch_call` with the same handle.
#[unsafe(no_mangle)]
pub extern "C" fn fetch_client_free(client: *mut FfiFetchClient) {
    if !client.is_null() {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            drop(unsafe { Box::from_raw(client) });
        }));
    }
}

// ---------------------------------------------------------------------------
// The fetch action
// ---------------------------------------------------------------------------

/// Run the `fetch` action with JSON input.
///
/// `input_json` is an object with `url` and optionally `method`, `headers`,
/// `body`, `timeout`. Never returns null; the caller must free the result
/// with `fetch_result_free`.
#[unsafe(no_mangle)]
pub extern "C" fn fetch_call(
    client: *const FfiFetchClient,
    input_json: *const c_char,
) -> *mut FfiFetchResult {
    if client.is_null() {
        return FfiFetchResult::null_arg("client");
    }
    if input_json.is_null() {
        return FfiFetchResult::null_arg("input_json");
    }
    catch_unwind(AssertUnwindSafe(|| {
        let handle = unsafe { &*client };
        let input = match unsafe { CStr::from_ptr(input_json) }.to_str() {
            Ok(s) => s,
            Err(_) => {
                let err = ValidationError::Malformed("input_json is not valid UTF-8".to_string());
                return FfiFetchResult::invalid_input(&err);
            }
        };
        match handle.runtime.block_on(handle.service.call_json(input)) {
            Ok(result) => FfiFetchResult::response(&result),
            Err(err) => FfiFetchResult::invalid_input(&err),
        }
    }))
    .unwrap_or_else(|_| FfiFetchResult::panic("panic in fetch_call"))
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Install a `tracing` subscriber writing to stderr.
///
/// `filter` is an `EnvFilter` directive such as `"debug"` or
/// `"fetch_core=debug"`; null means `"info"`. `RUST_LOG` wins when set.
/// Returns false if the directive is invalid or a subscriber is already
/// installed.
#[unsafe(no_mangle)]
pub extern "C" fn fetch_logging_init(filter: *const c_char) -> bool {
    catch_unwind(|| {
        let directive = if filter.is_null() {
            "info"
        } else {
            match unsafe { CStr::from_ptr(filter) }.to_str() {
                Ok(s) => s,
                Err(_) => return false,
            }
        };
        let filter = match EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(directive))
        {
            Ok(f) => f,
            Err(_) => return false,
        };
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .is_ok()
    })
    .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free a result returned by `fetch_call`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn fetch_result_free(result: *mut FfiFetchResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(AssertUnwindSafe(|| {
        let result = unsafe { Box::from_raw(result) };
        if !result.payload.is_null() {
            drop(unsafe { CString::from_raw(result.payload) });
        }
    }));
}
