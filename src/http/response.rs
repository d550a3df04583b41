//! Response helpers.
//!
//! # Responsibilities
//! - Map proxy errors to HTTP status codes
//! - Build the not-found, redirect and document responses of the SPA layer
//!
//! # Design Decisions
//! - Backend unreachable results in 502 Bad Gateway
//! - Backend timeouts result in 504 Gateway Timeout
//! - Error bodies are short plain-text messages

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::proxy::ProxyError;

impl ProxyError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            ProxyError::InvalidPrefix(_)
            | ProxyError::InvalidTarget { .. }
            | ProxyError::Rewrite(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let message = match self.status_code() {
            StatusCode::BAD_GATEWAY => "Upstream request failed",
            StatusCode::GATEWAY_TIMEOUT => "Upstream request timed out",
            _ => "Proxy misconfigured",
        };
        (self.status_code(), message).into_response()
    }
}

pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "No matching route found").into_response()
}

/// `302 Found` to `location`, as the runner backend redirects to its UI.
pub fn found(location: &str) -> Response {
    match HeaderValue::from_str(location) {
        Ok(value) => (StatusCode::FOUND, [(header::LOCATION, value)]).into_response(),
        Err(_) => not_found(),
    }
}

/// HTML document response.
pub fn html(body: Vec<u8>) -> Response {
    (
        [(header::CONTENT_TYPE, HeaderValue::from_static("text/html; charset=utf-8"))],
        Body::from(body),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proxy_error_status() {
        let unreachable = ProxyError::Upstream {
            target: "http://127.0.0.1:1337".into(),
            reason: "connection refused".into(),
        };
        assert_eq!(unreachable.into_response().status(), StatusCode::BAD_GATEWAY);

        let slow = ProxyError::Timeout {
            target: "http://127.0.0.1:1337".into(),
            secs: 30,
        };
        assert_eq!(slow.into_response().status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn test_found() {
        let response = found("/runner/");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "/runner/");
    }
}
