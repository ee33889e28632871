//! Verify the validator, masks and client against JSON vectors in `test-vectors/`.
//!
//! Request bodies are compared as parsed JSON, not raw strings, so field
//! ordering differences do not cause false negatives.

use gestao_core::{
    apply_mask, validate_document, ApiClient, ClientConfig, Document, DocumentKind, HttpMethod,
    HttpResponse, MaskKind,
};
use serde_json::Value;

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn load(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap()
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

#[test]
fn document_test_vectors() {
    let vectors = load(include_str!("../../test-vectors/documents.json"));

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input = case["input"].as_str().unwrap();
        let valid = case["valid"].as_bool().unwrap();

        assert_eq!(validate_document(input), valid, "{name}: validate");
        assert_eq!(Document::parse(input).is_ok(), valid, "{name}: parse");

        if valid {
            let doc = Document::parse(input).unwrap();
            let kind: DocumentKind = serde_json::from_value(case["kind"].clone()).unwrap();
            assert_eq!(doc.kind(), kind, "{name}: kind");
            assert_eq!(doc.to_string(), case["masked"].as_str().unwrap(), "{name}: masked");
        }
    }
}

// ---------------------------------------------------------------------------
// Masks
// ---------------------------------------------------------------------------

#[test]
fn mask_test_vectors() {
    let vectors = load(include_str!("../../test-vectors/masks.json"));

    for case in vectors["cases"].as_array().unwrap() {
        let kind: MaskKind = case["kind"].as_str().unwrap().parse().unwrap();
        let input = case["input"].as_str().unwrap();
        let expected = case["expected"].as_str().unwrap();
        assert_eq!(apply_mask(input, kind), expected, "{kind} {input:?}");
    }
}

// ---------------------------------------------------------------------------
// HTTP exchanges
// ---------------------------------------------------------------------------

#[test]
fn http_test_vectors() {
    let vectors = load(include_str!("../../test-vectors/http.json"));
    let config = ClientConfig::new(vectors["base_url"].as_str().unwrap())
        .with_csrf_token(vectors["csrf_token"].as_str().unwrap());
    let client = ApiClient::new(&config);

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let method = parse_method(case["method"].as_str().unwrap());
        let endpoint = case["endpoint"].as_str().unwrap();
        let expected_req = &case["expected_request"];

        // Verify build
        let req = match method {
            HttpMethod::Get => client.build_get(endpoint),
            HttpMethod::Post => client.build_post(endpoint, &case["payload"]).unwrap(),
            HttpMethod::Put => client.build_put(endpoint, &case["payload"]).unwrap(),
            HttpMethod::Delete => client.build_delete(endpoint),
        };
        assert_eq!(req.method, method, "{name}: method");
        assert_eq!(req.path, expected_req["path"].as_str().unwrap(), "{name}: path");

        let expected_headers: Vec<(String, String)> = expected_req["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");

        match expected_req.get("body") {
            Some(expected_body) => {
                let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
                assert_eq!(&body, expected_body, "{name}: body");
            }
            None => assert!(req.body.is_none(), "{name}: body"),
        }

        // Verify parse
        let sim = &case["simulated_response"];
        let response = HttpResponse {
            status: sim["status"].as_u64().unwrap() as u16,
            headers: Vec::new(),
            body: sim["body"].as_str().unwrap().to_string(),
        };
        let result = client.parse_json::<Value>(method, response);
        let expected = &case["expected_result"];
        if let Some(ok) = expected.get("ok") {
            assert_eq!(&result.unwrap(), ok, "{name}: parsed result");
        } else {
            let err = result.unwrap_err();
            let expected_err = &expected["error"];
            assert_eq!(
                err.status(),
                Some(expected_err["status"].as_u64().unwrap() as u16),
                "{name}: status"
            );
            assert_eq!(
                err.toast(method).message,
                expected_err["toast"].as_str().unwrap(),
                "{name}: toast"
            );
        }
    }
}
