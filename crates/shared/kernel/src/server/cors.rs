//! Cross-origin handling for browser callers.
//!
//! Every response carries the allow headers. `OPTIONS` requests are answered
//! here with `204 No Content` and never reach a handler, whatever their body.

use crate::server::ApiState;
use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, header};
use axum::middleware::Next;
use axum::response::Response;

pub const ALLOWED_METHODS: &str = "POST, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type";

/// Axum middleware; mount with `axum::middleware::from_fn_with_state`.
pub async fn cors(State(state): State<ApiState>, request: Request, next: Next) -> Response {
    let origin = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let allowed = state.config.cors.allow_origin(origin.as_deref());

    if request.method() == Method::OPTIONS {
        return preflight_response(allowed);
    }

    let mut response = next.run(request).await;
    apply_headers(response.headers_mut(), allowed);
    response
}

/// Writes the CORS headers. `allow_origin` of `None` omits the origin grant.
pub fn apply_headers(headers: &mut HeaderMap, allow_origin: Option<&str>) {
    if let Some(value) = allow_origin.and_then(|origin| HeaderValue::from_str(origin).ok()) {
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
    }
    headers.append(header::VARY, HeaderValue::from_static("Origin"));
    headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOWED_METHODS));
    headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOWED_HEADERS));
}

/// Empty `204` answer to a pre-flight.
#[must_use]
pub fn preflight_response(allow_origin: Option<&str>) -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::NO_CONTENT;
    apply_headers(response.headers_mut(), allow_origin);
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preflight_is_empty_no_content() {
        let response = preflight_response(Some("https://folio.dev"));
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "https://folio.dev");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], ALLOWED_METHODS);
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], ALLOWED_HEADERS);
        assert_eq!(headers[header::VARY], "Origin");
    }

    #[test]
    fn refused_origin_gets_no_grant() {
        let mut headers = HeaderMap::new();
        apply_headers(&mut headers, None);
        assert!(!headers.contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
        assert!(headers.contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
    }
}
