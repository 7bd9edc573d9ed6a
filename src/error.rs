use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::http::response::DISCOVERY_CONTENT_TYPE;

pub type Result<T> = std::result::Result<T, RouterError>;

/// Failures the dispatcher itself can hit while building a response.
///
/// Handler failures belong to the controllers and never show up here.
#[derive(Debug, Error)]
pub enum RouterError {
    #[error("failed to encode discovery listing: {0}")]
    DiscoveryEncode(#[from] serde_json::Error),

    #[error("failed to build response: {0}")]
    Response(#[from] axum::http::Error),
}

impl IntoResponse for RouterError {
    fn into_response(self) -> Response {
        let mut response = (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response();
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static(DISCOVERY_CONTENT_TYPE));
        response
    }
}
