//! Presentation helpers for the business-management client.
//!
//! # Overview
//! Pure functions the pages call on every keystroke or render: taxpayer-id
//! validation, progressive input masks, pt-BR currency and date formatting,
//! toast descriptions, and a debouncer. The JSON API wrapper follows the
//! host-does-IO pattern: it builds `HttpRequest` values and parses
//! `HttpResponse` values, and the host performs the network round-trip.
//!
//! # Design
//! - Nothing here holds process-wide state; every function is pure given its
//!   arguments, apart from `Debouncer`, whose clock is supplied by the caller.
//! - No UI toolkit types appear in the API. The host wires `apply_mask` to a
//!   field's change event and renders `Toast` values itself.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod debounce;
pub mod document;
pub mod error;
pub mod format;
pub mod http;
pub mod mask;
pub mod notify;
pub mod types;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use debounce::Debouncer;
pub use document::{
    strip_non_digits, validate_cnpj, validate_cpf, validate_document, Document, DocumentError,
    DocumentKind,
};
pub use error::ApiError;
pub use format::{format_cents, format_currency, format_date, format_datetime, FormatError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use mask::{apply_mask, MaskKind};
pub use notify::{Toast, ToastLevel};
pub use types::{CreateSupplier, Supplier, SupplierStatus, UpdateSupplier};
