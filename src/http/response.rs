//! HTTP response building module
//!
//! Every response built here carries the CORS headers; every non-empty body
//! is JSON.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::http::response::Builder;
use hyper::{Response, StatusCode};
use serde_json::json;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "POST, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type";

pub const DELIVERED_MESSAGE: &str = "Email successfully delivered";

fn with_cors(builder: Builder) -> Builder {
    builder
        .header("Access-Control-Allow-Origin", ALLOW_ORIGIN)
        .header("Access-Control-Allow-Methods", ALLOW_METHODS)
        .header("Access-Control-Allow-Headers", ALLOW_HEADERS)
}

/// Build JSON response
pub fn build_json_response(status: StatusCode, body: &serde_json::Value) -> Response<Full<Bytes>> {
    let json = body.to_string();
    with_cors(Response::builder().status(status))
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build an error response of the form `{"error": "..."}`
pub fn build_error_response(status: StatusCode, message: &str) -> Response<Full<Bytes>> {
    build_json_response(status, &json!({ "error": message }))
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response() -> Response<Full<Bytes>> {
    with_cors(Response::builder().status(StatusCode::NO_CONTENT))
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// 200 after the mail relay accepted the message
pub fn build_delivered_response() -> Response<Full<Bytes>> {
    build_json_response(StatusCode::OK, &json!({ "message": DELIVERED_MESSAGE }))
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    build_error_response(StatusCode::NOT_FOUND, "Not Found")
}

/// Build 400 response for a rejected submission
pub fn build_400_response() -> Response<Full<Bytes>> {
    build_error_response(StatusCode::BAD_REQUEST, "Invalid Body")
}

/// Build 413 Payload Too Large response
pub fn build_413_response() -> Response<Full<Bytes>> {
    build_error_response(StatusCode::PAYLOAD_TOO_LARGE, "Payload Too Large")
}

/// Build 500 response; failure detail never reaches the client
pub fn build_500_response() -> Response<Full<Bytes>> {
    build_error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
