//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! enums with explicit discriminants. Conversion functions live here to keep
//! `lib.rs` focused on the `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use gestao_core::error::ApiError;
use gestao_core::http::HttpMethod;
use gestao_core::mask::MaskKind;
use gestao_core::notify::{Toast, ToastLevel};

/// Opaque handle to an `ApiClient`. C callers receive a pointer to this
/// and pass it back into every client function.
pub struct FfiApiClient {
    pub(crate) inner: gestao_core::ApiClient,
}

/// Copy `s` into a heap-allocated C string owned by the caller. Interior NUL
/// bytes cannot be represented and are dropped.
pub(crate) fn to_c_string(s: impl Into<String>) -> *mut c_char {
    let mut s: String = s.into();
    s.retain(|c| c != '\0');
    CString::new(s).unwrap_or_default().into_raw()
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Mask kinds as a C enum.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub enum FfiMaskKind {
    Document = 0,
    Phone = 1,
    PostalCode = 2,
    Currency = 3,
}

impl From<FfiMaskKind> for MaskKind {
    fn from(k: FfiMaskKind) -> Self {
        match k {
            FfiMaskKind::Document => MaskKind::Document,
            FfiMaskKind::Phone => MaskKind::Phone,
            FfiMaskKind::PostalCode => MaskKind::PostalCode,
            FfiMaskKind::Currency => MaskKind::Currency,
        }
    }
}

/// Toast severity as a C enum.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiToastLevel {
    Info = 0,
    Success = 1,
    Warning = 2,
    Danger = 3,
}

impl From<ToastLevel> for FfiToastLevel {
    fn from(l: ToastLevel) -> Self {
        match l {
            ToastLevel::Info => FfiToastLevel::Info,
            ToastLevel::Success => FfiToastLevel::Success,
            ToastLevel::Warning => FfiToastLevel::Warning,
            ToastLevel::Danger => FfiToastLevel::Danger,
        }
    }
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
    Put = 2,
    Delete = 3,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
            HttpMethod::Put => FfiHttpMethod::Put,
            HttpMethod::Delete => FfiHttpMethod::Delete,
        }
    }
}

impl From<FfiHttpMethod> for HttpMethod {
    fn from(m: FfiHttpMethod) -> Self {
        match m {
            FfiHttpMethod::Get => HttpMethod::Get,
            FfiHttpMethod::Post => HttpMethod::Post,
            FfiHttpMethod::Put => HttpMethod::Put,
            FfiHttpMethod::Delete => HttpMethod::Delete,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// Built by `gestao_build_request`. The C caller executes the request and
/// passes the response back through `gestao_parse_response`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub path: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: gestao_core::HttpRequest) -> *mut Self {
        let path = to_c_string(req.path);
        let body = match req.body {
            Some(b) => to_c_string(b),
            None => std::ptr::null_mut(),
        };

        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: to_c_string(k),
                    value: to_c_string(v),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            path,
            headers,
            headers_len,
            body,
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this on the stack after executing a request, then
/// passes a pointer to `gestao_parse_response`. The FFI layer reads but does
/// not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiApiResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    NotFound = 1,
    Http = 2,
    Transport = 3,
    Deserialization = 4,
    Serialization = 5,
    Panic = 6,
    NullArg = 7,
}

/// Result envelope for `gestao_parse_response`.
///
/// On success `error_code` is `Ok`, `body` holds the parsed JSON re-encoded
/// as a C string, and the error and toast fields are null.
/// On failure `body` is null, `error_message` is a human-readable C string,
/// and `toast_message`/`toast_level` describe the notification to show.
#[repr(C)]
pub struct FfiApiResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub body: *mut c_char,
    pub toast_message: *mut c_char,
    pub toast_level: FfiToastLevel,
}

impl FfiApiResult {
    fn boxed(self) -> *mut Self {
        Box::into_raw(Box::new(self))
    }

    /// Build a success result carrying the response JSON.
    pub(crate) fn ok(status: u16, value: &serde_json::Value) -> *mut Self {
        FfiApiResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: status,
            body: to_c_string(value.to_string()),
            toast_message: std::ptr::null_mut(),
            toast_level: FfiToastLevel::Info,
        }
        .boxed()
    }

    /// Build an error result from an `ApiError` raised by a `method` call.
    pub(crate) fn from_error(err: ApiError, method: HttpMethod) -> *mut Self {
        let error_code = match &err {
            ApiError::NotFound => FfiErrorCode::NotFound,
            ApiError::Http { .. } => FfiErrorCode::Http,
            ApiError::Transport(_) => FfiErrorCode::Transport,
            ApiError::Deserialization(_) => FfiErrorCode::Deserialization,
            ApiError::Serialization(_) => FfiErrorCode::Serialization,
        };
        let Toast { message, level } = err.toast(method);
        FfiApiResult {
            error_code,
            error_message: to_c_string(err.to_string()),
            http_status: err.status().unwrap_or(0),
            body: std::ptr::null_mut(),
            toast_message: to_c_string(message),
            toast_level: level.into(),
        }
        .boxed()
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::failure(FfiErrorCode::NullArg, &format!("null argument: {name}"))
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::failure(FfiErrorCode::Panic, msg)
    }

    fn failure(error_code: FfiErrorCode, msg: &str) -> *mut Self {
        FfiApiResult {
            error_code,
            error_message: to_c_string(msg),
            http_status: 0,
            body: std::ptr::null_mut(),
            toast_message: std::ptr::null_mut(),
            toast_level: FfiToastLevel::Danger,
        }
        .boxed()
    }
}
