//! Stateless HTTP request builder and response parser for the backend API.
//!
//! # Design
//! `ApiClient` holds only the base URL and the anti-forgery token and carries
//! no mutable state between calls. Each verb is split into a `build_*`
//! method that produces an `HttpRequest` and a shared `parse_json` that
//! consumes the `HttpResponse`. The caller executes the round-trip, keeping
//! the core deterministic and free of I/O dependencies.
//!
//! Failures are logged here, once, with the verb that produced them. The
//! caller decides whether to surface `ApiError::toast` to the user.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

pub const CSRF_HEADER: &str = "x-csrftoken";

/// Synchronous, stateless client for the JSON API behind the pages.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    csrf_token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            csrf_token: config.csrf_token.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_get(&self, endpoint: &str) -> HttpRequest {
        self.build(HttpMethod::Get, endpoint, None)
    }

    pub fn build_post<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        payload: &T,
    ) -> Result<HttpRequest, ApiError> {
        let body = to_json(payload)?;
        Ok(self.build(HttpMethod::Post, endpoint, Some(body)))
    }

    pub fn build_put<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        payload: &T,
    ) -> Result<HttpRequest, ApiError> {
        let body = to_json(payload)?;
        Ok(self.build(HttpMethod::Put, endpoint, Some(body)))
    }

    pub fn build_delete(&self, endpoint: &str) -> HttpRequest {
        self.build(HttpMethod::Delete, endpoint, None)
    }

    /// Build a request for `method` with an already-serialized JSON body.
    ///
    /// Every verb except DELETE declares a JSON content type; mutating verbs
    /// carry the anti-forgery token when one is configured.
    pub fn build(&self, method: HttpMethod, endpoint: &str, body: Option<String>) -> HttpRequest {
        let mut headers = Vec::new();
        if method != HttpMethod::Delete {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }
        if method.is_mutating() {
            if let Some(token) = &self.csrf_token {
                headers.push((CSRF_HEADER.to_string(), token.clone()));
            }
        }
        let path = format!("{}{}", self.base_url, normalize_endpoint(endpoint));
        debug!(%method, %path, "built request");
        HttpRequest {
            method,
            path,
            headers,
            body,
        }
    }

    /// Parse the response to a `method` request.
    ///
    /// Any 2xx is a success. `204 No Content` and empty bodies decode as
    /// `{}`, so callers of DELETE can ask for `serde_json::Value` and get an
    /// empty object.
    pub fn parse_json<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        response: HttpResponse,
    ) -> Result<T, ApiError> {
        check_status(method, &response)?;
        let body = if response.status == 204 || response.body.trim().is_empty() {
            "{}"
        } else {
            response.body.as_str()
        };
        serde_json::from_str(body).map_err(|e| {
            error!(%method, status = response.status, error = %e, "response body is not valid JSON");
            ApiError::Deserialization(e.to_string())
        })
    }
}

fn to_json<T: Serialize + ?Sized>(payload: &T) -> Result<String, ApiError> {
    serde_json::to_string(payload).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn normalize_endpoint(endpoint: &str) -> String {
    if endpoint.is_empty() || endpoint.starts_with('/') {
        endpoint.to_string()
    } else {
        format!("/{endpoint}")
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(method: HttpMethod, response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    error!(%method, status = response.status, "request failed");
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn client() -> ApiClient {
        ApiClient::new(&ClientConfig::new("http://localhost:3000/api").with_csrf_token("tok"))
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_get_produces_correct_request() {
        let req = client().build_get("/suppliers");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/api/suppliers");
        assert!(req.body.is_none());
        assert_eq!(req.header("Content-Type"), Some("application/json"));
        assert_eq!(req.header(CSRF_HEADER), None);
    }

    #[test]
    fn build_post_carries_token_and_body() {
        let req = client().build_post("/suppliers", &json!({"name": "ACME"})).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.header("X-CSRFToken"), Some("tok"));
        assert_eq!(req.header("content-type"), Some("application/json"));
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["name"], "ACME");
    }

    #[test]
    fn build_put_carries_token() {
        let req = client().build_put("/suppliers/1", &json!({"status": "inativo"})).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/api/suppliers/1");
        assert_eq!(req.header(CSRF_HEADER), Some("tok"));
    }

    #[test]
    fn build_delete_has_token_but_no_content_type() {
        let req = client().build_delete("/suppliers/1");
        assert_eq!(req.method, HttpMethod::Delete);
        assert!(req.body.is_none());
        assert_eq!(req.headers, vec![(CSRF_HEADER.to_string(), "tok".to_string())]);
    }

    #[test]
    fn no_token_configured_means_no_header() {
        let client = ApiClient::new(&ClientConfig::default());
        let req = client.build_delete("/suppliers/1");
        assert!(req.headers.is_empty());
        assert_eq!(req.path, "/api/suppliers/1");
    }

    #[test]
    fn endpoint_without_leading_slash_is_joined() {
        let req = client().build_get("suppliers");
        assert_eq!(req.path, "http://localhost:3000/api/suppliers");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = ApiClient::new(&ClientConfig::new("http://localhost:3000/api/"));
        assert_eq!(client.base_url(), "http://localhost:3000/api");
    }

    #[test]
    fn parse_accepts_any_2xx() {
        let value: Value = client().parse_json(HttpMethod::Post, response(201, r#"{"id":1}"#)).unwrap();
        assert_eq!(value["id"], 1);
        let value: Value = client().parse_json(HttpMethod::Get, response(200, "[1,2]")).unwrap();
        assert_eq!(value, json!([1, 2]));
    }

    #[test]
    fn parse_no_content_yields_empty_object() {
        let value: Value = client().parse_json(HttpMethod::Delete, response(204, "")).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn parse_not_found() {
        let err = client()
            .parse_json::<Value>(HttpMethod::Get, response(404, ""))
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_server_error_keeps_body() {
        let err = client()
            .parse_json::<Value>(HttpMethod::Put, response(500, "internal error"))
            .unwrap_err();
        match err {
            ApiError::Http { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "internal error");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_bad_json() {
        let err = client()
            .parse_json::<Value>(HttpMethod::Get, response(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }
}
