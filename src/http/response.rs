//! Response helpers.
//!
//! # Responsibilities
//! - Build the status-only JSON responses for 404/405
//! - Give route handlers a JSON response helper with the same content type

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::Response;
use serde::Serialize;

/// Content type used for every JSON body the router produces.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// A response carrying only a status and an empty JSON object.
pub fn status_only(status: StatusCode) -> Response {
    with_json_body(status, Body::from("{}"))
}

/// Serialize `value` as the JSON body of a response.
///
/// Falls back to a 500 status-only response if serialization fails.
pub fn json<T: Serialize>(status: StatusCode, value: &T) -> Response {
    match serde_json::to_vec(value) {
        Ok(bytes) => with_json_body(status, Body::from(bytes)),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize response body");
            status_only(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

fn with_json_body(status: StatusCode, body: Body) -> Response {
    let mut response = Response::new(body);
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(JSON_CONTENT_TYPE),
    );
    response
}
