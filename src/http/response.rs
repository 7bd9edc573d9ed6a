//! Response construction for the dispatcher.
//!
//! # Responsibilities
//! - Encode discovery listings as JSON
//! - Build the 404 fallback
//! - Apply the discovery media type to every dispatched response
//!
//! # Design Decisions
//! - Media type is the literal `application/JSON`, not case-normalized
//! - Delegated handlers keep any Content-Type they set themselves
//! - Encode failures surface as 500 instead of an empty body

use std::collections::BTreeMap;

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::error::Result;

/// Media type stamped on every response leaving the dispatcher.
pub const DISCOVERY_CONTENT_TYPE: &str = "application/JSON";

/// 200 response carrying a name → URL discovery listing.
pub fn discovery_response(listing: &BTreeMap<String, String>) -> Result<Response> {
    let body = serde_json::to_vec(listing)?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, DISCOVERY_CONTENT_TYPE)
        .body(Body::from(body))?;

    Ok(response)
}

/// 404 with the standard reason phrase as body.
pub fn not_found() -> Response {
    let reason = StatusCode::NOT_FOUND.canonical_reason().unwrap_or("Not Found");
    let mut response = (StatusCode::NOT_FOUND, reason).into_response();
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(DISCOVERY_CONTENT_TYPE));
    response
}

/// Set the discovery media type unless the handler chose its own.
pub fn ensure_content_type(response: &mut Response) {
    response
        .headers_mut()
        .entry(header::CONTENT_TYPE)
        .or_insert(HeaderValue::from_static(DISCOVERY_CONTENT_TYPE));
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn test_discovery_response() {
        let mut listing = BTreeMap::new();
        listing.insert("list".to_string(), "http://localhost:8080/v1/users".to_string());

        let response = discovery_response(&listing).unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/JSON");

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], br#"{"list":"http://localhost:8080/v1/users"}"#);
    }

    #[tokio::test]
    async fn test_empty_listing_is_empty_object() {
        let response = discovery_response(&BTreeMap::new()).unwrap();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"{}");
    }

    #[tokio::test]
    async fn test_not_found() {
        let response = not_found();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/JSON");

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Not Found");
    }

    #[test]
    fn test_ensure_content_type_keeps_handler_choice() {
        let mut plain = Response::new(Body::empty());
        ensure_content_type(&mut plain);
        assert_eq!(plain.headers()[header::CONTENT_TYPE], "application/JSON");

        let mut text = "hello".into_response();
        ensure_content_type(&mut text);
        assert_eq!(text.headers()[header::CONTENT_TYPE], "text/plain; charset=utf-8");
    }
}
