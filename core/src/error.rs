//! Error types for the API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the resource does not exist" from "the server returned an unexpected
//! status." All other non-2xx responses land in `Http` with the raw status
//! code and body. `Transport` is reported by the host when the round-trip
//! itself failed and no response exists.

use thiserror::Error;

use crate::http::HttpMethod;
use crate::notify::Toast;

/// Errors returned by `ApiClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The host could not complete the round-trip.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    pub fn transport(msg: impl Into<String>) -> Self {
        ApiError::Transport(msg.into())
    }

    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound => Some(404),
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The user-facing notification for a failed call with `method`.
    pub fn toast(&self, method: HttpMethod) -> Toast {
        let message = match method {
            HttpMethod::Get => "Erro ao carregar dados",
            HttpMethod::Post => "Erro ao salvar dados",
            HttpMethod::Put => "Erro ao atualizar dados",
            HttpMethod::Delete => "Erro ao excluir dados",
        };
        Toast::danger(message)
    }
}
