//! # HTTP Flows
//!
//! The gateway router in front of a node runtime, driven with
//! `tower::ServiceExt::oneshot`:
//!
//! 1. **Check → register → check** against the file store
//! 2. **Concurrent HTTP claims**: one `200`, the rest `409`
//! 3. **Restart**: a name registered over HTTP is unavailable after restart
//! 4. **Browser preflight**: CORS grant for the configured origin

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use axum::response::Response;
    use axum::Router;
    use ng_node::{NodeConfig, NodeRuntime};
    use serde_json::{json, Value};
    use tempfile::tempdir;
    use tower::ServiceExt;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    async fn started_node(dir: &std::path::Path) -> (NodeRuntime, Router) {
        let mut config = NodeConfig::default();
        config.storage.data_file = dir.join("users.txt");
        let node = NodeRuntime::new(config).unwrap();
        node.start().await.unwrap();
        let router = node.gateway().unwrap().router();
        (node, router)
    }

    fn post_username(uri: &str, username: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "username": username }).to_string()))
            .unwrap()
    }

    async fn send(router: &Router, request: Request<Body>) -> Response {
        router.clone().oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    // =============================================================================
    // FLOWS
    // =============================================================================

    #[tokio::test]
    async fn test_check_register_check_over_http() {
        let dir = tempdir().unwrap();
        let (_node, router) = started_node(dir.path()).await;

        let response = send(&router, post_username("/check-username", "alice")).await;
        assert_eq!(json_body(response).await, json!({"available": true}));

        let response = send(&router, post_username("/register", "alice")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(&router, post_username("/check-username", "alice")).await;
        assert_eq!(json_body(response).await, json!({"available": false}));

        let raw = std::fs::read_to_string(dir.path().join("users.txt")).unwrap();
        assert_eq!(raw, "alice\n");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_http_claims() {
        const CALLERS: usize = 16;
        let dir = tempdir().unwrap();
        let (_node, router) = started_node(dir.path()).await;

        let handles: Vec<_> = (0..CALLERS)
            .map(|_| {
                let router = router.clone();
                tokio::spawn(async move {
                    router
                        .oneshot(post_username("/register", "bob"))
                        .await
                        .unwrap()
                        .status()
                })
            })
            .collect();

        let mut statuses = Vec::new();
        for handle in handles {
            statuses.push(handle.await.unwrap());
        }

        let ok = statuses.iter().filter(|s| **s == StatusCode::OK).count();
        let conflict = statuses.iter().filter(|s| **s == StatusCode::CONFLICT).count();
        assert_eq!(ok, 1);
        assert_eq!(conflict, CALLERS - 1);
    }

    #[tokio::test]
    async fn test_http_registration_survives_restart() {
        let dir = tempdir().unwrap();

        {
            let (_node, router) = started_node(dir.path()).await;
            let response = send(&router, post_username("/register", "dave")).await;
            assert_eq!(response.status(), StatusCode::OK);
        }

        let (_node, router) = started_node(dir.path()).await;
        let response = send(&router, post_username("/check-username", "dave")).await;
        assert_eq!(json_body(response).await, json!({"available": false}));

        let response = send(&router, post_username("/register", "dave")).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_metrics_endpoint_counts_warm_start() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("users.txt"), "alice\nbob\n").unwrap();
        let (node, router) = started_node(dir.path()).await;

        let request = Request::builder().uri("/metrics").body(Body::empty()).unwrap();
        let body = json_body(send(&router, request).await).await;

        assert_eq!(body["names_warmed"], 2);
        assert_eq!(node.metrics().snapshot().names_warmed, 2);
    }

    #[tokio::test]
    async fn test_browser_preflight() {
        let dir = tempdir().unwrap();
        let (_node, router) = started_node(dir.path()).await;

        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/check-username")
            .header(header::ORIGIN, "http://localhost:5173")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();
        let response = send(&router, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "http://localhost:5173"
        );
    }

    #[tokio::test]
    async fn test_simple_request_carries_cors_header() {
        let dir = tempdir().unwrap();
        let (_node, router) = started_node(dir.path()).await;

        let mut request = post_username("/check-username", "erin");
        request
            .headers_mut()
            .insert(header::ORIGIN, "http://localhost:5173".parse().unwrap());
        let response = send(&router, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }
}
