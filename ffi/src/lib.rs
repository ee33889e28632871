//! C-ABI wrapper around `gestao-core`.
//!
//! # Overview
//! Exposes document validation, input masks, amount formatting and the
//! host-does-IO API client through `extern "C"` functions, so a UI shell in
//! any language with a C FFI can call them from its field and request hooks.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - One generic `gestao_build_request` / `gestao_parse_response` pair
//!   mirrors the core client; JSON payloads cross as C strings.
//! - The C caller owns all returned pointers and must call the matching
//!   `gestao_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use gestao_core::http::{HttpMethod, HttpResponse};
use gestao_core::{ApiClient, ClientConfig};

use types::*;

/// Borrow a C string as `&str`. Invalid UTF-8 reads as empty.
///
/// # Safety
/// `ptr` must be non-null and point to a NUL-terminated string that outlives
/// the returned reference.
unsafe fn read_str<'a>(ptr: *const c_char) -> &'a str {
    unsafe { CStr::from_ptr(ptr) }.to_str().unwrap_or("")
}

// ---------------------------------------------------------------------------
// Validation and formatting
// ---------------------------------------------------------------------------

/// Validate a personal or entity taxpayer id, masked or not.
///
/// Returns false for null input.
#[unsafe(no_mangle)]
pub extern "C" fn gestao_validate_document(raw: *const c_char) -> bool {
    catch_unwind(|| {
        if raw.is_null() {
            return false;
        }
        gestao_core::validate_document(unsafe { read_str(raw) })
    })
    .unwrap_or(false)
}

/// Reformat a field's current text with the given mask.
///
/// Returns null if `raw` is null. Free the result with `gestao_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn gestao_apply_mask(raw: *const c_char, kind: FfiMaskKind) -> *mut c_char {
    catch_unwind(|| {
        if raw.is_null() {
            return std::ptr::null_mut();
        }
        let masked = gestao_core::apply_mask(unsafe { read_str(raw) }, kind.into());
        to_c_string(masked)
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Format an amount in cents as pt-BR currency.
///
/// Free the result with `gestao_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn gestao_format_cents(cents: i64) -> *mut c_char {
    catch_unwind(|| to_c_string(gestao_core::format_cents(cents))).unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new `ApiClient` bound to `base_url`.
///
/// `csrf_token` may be null. Returns null if `base_url` is null or if an
/// internal panic occurs. Free the result with `gestao_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn gestao_client_new(
    base_url: *const c_char,
    csrf_token: *const c_char,
) -> *mut FfiApiClient {
    catch_unwind(|| {
        if base_url.is_null() {
            return std::ptr::null_mut();
        }
        let mut config = ClientConfig::new(unsafe { read_str(base_url) });
        if !csrf_token.is_null() {
            config = config.with_csrf_token(unsafe { read_str(csrf_token) });
        }
        let client = ApiClient::new(&config);
        Box::into_raw(Box::new(FfiApiClient { inner: client }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `gestao_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn gestao_client_free(client: *mut FfiApiClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Requests and responses
// ---------------------------------------------------------------------------

/// Build a request for `endpoint` under the client's base URL.
///
/// `json_body` may be null (no body). When given it must be valid JSON.
/// Returns null if `client` or `endpoint` is null or the body does not
/// parse. Free the result with `gestao_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn gestao_build_request(
    client: *const FfiApiClient,
    method: FfiHttpMethod,
    endpoint: *const c_char,
    json_body: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() || endpoint.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let endpoint = unsafe { read_str(endpoint) };
        let body = if json_body.is_null() {
            None
        } else {
            match serde_json::from_str::<serde_json::Value>(unsafe { read_str(json_body) }) {
                Ok(value) => Some(value.to_string()),
                Err(_) => return std::ptr::null_mut(),
            }
        };
        let req = client.inner.build(method.into(), endpoint, body);
        FfiHttpRequest::from_core(req)
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Convert an `FfiHttpResponse` to a core `HttpResponse`. A null body reads
/// as empty.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    let body = if resp.body.is_null() {
        String::new()
    } else {
        unsafe { read_str(resp.body) }.to_string()
    };
    HttpResponse {
        status: resp.status,
        headers: Vec::new(),
        body,
    }
}

/// Parse the response to a `method` request.
///
/// Never returns null. Free the result with `gestao_free_result`.
#[unsafe(no_mangle)]
pub extern "C" fn gestao_parse_response(
    client: *const FfiApiClient,
    method: FfiHttpMethod,
    response: *const FfiHttpResponse,
) -> *mut FfiApiResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiApiResult::null_arg("client");
        }
        if response.is_null() {
            return FfiApiResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        let method = HttpMethod::from(method);
        match client
            .inner
            .parse_json::<serde_json::Value>(method, ffi_response_to_core(resp))
        {
            Ok(value) => FfiApiResult::ok(resp.status, &value),
            Err(e) => FfiApiResult::from_error(e, method),
        }
    })
    .unwrap_or_else(|_| FfiApiResult::panic("panic in gestao_parse_response"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free a request returned by `gestao_build_request`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn gestao_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        free_c_string(req.path);
        free_c_string(req.body);
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    req.headers,
                    req.headers_len as usize,
                ))
            };
            for h in headers.iter() {
                free_c_string(h.key);
                free_c_string(h.value);
            }
        }
    });
}

/// Free a result returned by `gestao_parse_response`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn gestao_free_result(result: *mut FfiApiResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        free_c_string(result.error_message);
        free_c_string(result.body);
        free_c_string(result.toast_message);
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn gestao_free_string(s: *mut c_char) {
    let _ = catch_unwind(|| free_c_string(s));
}

fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
