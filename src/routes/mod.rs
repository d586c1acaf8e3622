use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, create_security_headers_layer, Config};
use crate::handlers::{health_check, not_found};

pub fn create_routes(config: &Config) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .fallback(not_found)
        .layer(create_security_headers_layer(config.production))
        .layer(create_cors_layer(&config.cors_allowed_origins, config.production))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, HeaderMap, Method, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    fn test_config(production: bool) -> Config {
        Config {
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            production,
            cors_allowed_origins: vec!["http://localhost:3000".to_string()],
        }
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_check() {
        let (status, headers, body) = get_json(create_routes(&test_config(false)), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["status"], "ok");
        assert_eq!(body["data"]["service"], "auth-server");
        assert_eq!(headers["x-content-type-options"], "nosniff");
        assert!(headers.get("strict-transport-security").is_none());
    }

    #[tokio::test]
    async fn test_production_adds_hsts() {
        let (_, headers, _) = get_json(create_routes(&test_config(true)), "/health").await;
        assert!(headers.get("strict-transport-security").is_some());
    }

    async fn preflight(app: Router, origin: &str) -> HeaderMap {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/health")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .body(Body::empty())
            .unwrap();

        app.oneshot(request).await.unwrap().headers().clone()
    }

    async fn cross_origin_get(app: Router, origin: &str) -> HeaderMap {
        let request = Request::builder()
            .uri("/health")
            .header(header::ORIGIN, origin)
            .body(Body::empty())
            .unwrap();

        app.oneshot(request).await.unwrap().headers().clone()
    }

    #[tokio::test]
    async fn test_preflight_from_listed_origin() {
        let headers = preflight(create_routes(&test_config(false)), "http://localhost:3000").await;

        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3000"
        );
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
        assert_eq!(headers[header::ACCESS_CONTROL_MAX_AGE], "86400");
    }

    #[tokio::test]
    async fn test_preflight_from_unlisted_origin() {
        let headers = preflight(create_routes(&test_config(false)), "https://evil.example").await;
        assert!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[tokio::test]
    async fn test_empty_origins_mirror_in_development() {
        let mut config = test_config(false);
        config.cors_allowed_origins.clear();

        let headers = cross_origin_get(create_routes(&config), "http://localhost:8080").await;
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:8080"
        );
    }

    #[tokio::test]
    async fn test_no_valid_origins_refuses_all_in_production() {
        let mut config = test_config(true);
        config.cors_allowed_origins = vec!["bad\norigin".to_string()];

        let headers = cross_origin_get(create_routes(&config), "https://evil.example").await;
        assert!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let (status, headers, body) =
            get_json(create_routes(&test_config(false)), "/admins/1").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(body["error"]["message"], "No route for '/admins/1'");
        assert_eq!(headers["x-frame-options"], "DENY");
    }
}
