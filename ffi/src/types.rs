//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! The `fetch` result already has a stable JSON shape, so the C side gets
//! that JSON as a string instead of a tree of nested structs. The envelope
//! only adds a tag that says whether the string is a `ResponseResult` or an
//! error message, plus the status code for callers that want it without
//! parsing.

use std::ffi::CString;
use std::os::raw::c_char;

use fetch_core::{FetchService, ReqwestClient, ResponseResult, ValidationError};

/// Opaque handle owning the runtime and the shared HTTP client. C callers
/// receive a pointer to this and pass it back into every call.
pub struct FfiFetchClient {
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) service: FetchService<ReqwestClient>,
}

/// What `FfiFetchResult::payload` holds.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiResultTag {
    /// `payload` is a JSON `ResponseResult`. Transport failures land here
    /// too, with `status` 0.
    Response = 0,
    /// Input was rejected before any request; `payload` is the message.
    InvalidInput = 1,
    NullArg = 2,
    Panic = 3,
}

/// Result envelope for `fetch_call`.
#[repr(C)]
pub struct FfiFetchResult {
    pub tag: FfiResultTag,
    pub status: u16,
    pub payload: *mut c_char,
}

impl FfiFetchResult {
    fn boxed(tag: FfiResultTag, status: u16, payload: String) -> *mut Self {
        // Messages can echo raw input, which may hold NULs.
        let payload = if payload.contains('\0') {
            payload.replace('\0', "\\u0000")
        } else {
            payload
        };
        let result = Box::new(FfiFetchResult {
            tag,
            status,
            payload: CString::new(payload).unwrap_or_default().into_raw(),
        });
        Box::into_raw(result)
    }

    /// Build a result carrying a serialized `ResponseResult`.
    pub(crate) fn response(result: &ResponseResult) -> *mut Self {
        match serde_json::to_string(result) {
            Ok(json) => Self::boxed(FfiResultTag::Response, result.status(), json),
            Err(e) => Self::panic(&format!("failed to serialize result: {e}")),
        }
    }

    pub(crate) fn invalid_input(err: &ValidationError) -> *mut Self {
        Self::boxed(FfiResultTag::InvalidInput, 0, err.to_string())
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::boxed(FfiResultTag::NullArg, 0, format!("null argument: {name}"))
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::boxed(FfiResultTag::Panic, 0, msg.to_string())
    }
}
