//! Cross-origin policy for the browser client.

use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use super::auth::TOKEN_HEADER;

/// Creates the CORS layer for `origin`.
///
/// `*` allows any origin. Otherwise only the given origin is echoed back and the
/// credential header must be listed explicitly. Other origins get no
/// `Access-Control-Allow-Origin` header.
pub fn layer(origin: &str) -> CorsLayer {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ];

    if origin == "*" {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any);
    }

    let base = CorsLayer::new().allow_methods(methods).allow_headers([
        header::AUTHORIZATION,
        header::CONTENT_TYPE,
        header::ACCEPT,
        HeaderName::from_static(TOKEN_HEADER),
    ]);

    match HeaderValue::from_str(origin) {
        Ok(value) => base.allow_origin(AllowOrigin::list([value])),
        Err(_) => {
            tracing::warn!(origin, "Invalid CORS origin, cross-origin requests disabled");
            base
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, routing::get};
    use tower::ServiceExt;

    async fn preflight(origin_cfg: &str, origin: &str) -> Option<String> {
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(layer(origin_cfg));

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/")
                    .header(header::ORIGIN, origin)
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    #[tokio::test]
    async fn test_wildcard_origin() {
        assert_eq!(
            preflight("*", "https://app.example.com").await.as_deref(),
            Some("*")
        );
    }

    #[tokio::test]
    async fn test_exact_origin() {
        assert_eq!(
            preflight("https://app.example.com", "https://app.example.com")
                .await
                .as_deref(),
            Some("https://app.example.com")
        );
        assert_eq!(
            preflight("https://app.example.com", "https://evil.example.com").await,
            None
        );
    }
}
