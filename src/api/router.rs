//! HTTP router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Divination routes are nested under `/api/divination`.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::api::endpoints;
use crate::api::types::ApiContext;
use crate::interpretation::ProviderRegistry;

/// Build the service router around a provider registry.
pub fn api_router(registry: Arc<ProviderRegistry>) -> Router {
    build_router(ApiContext::new(registry))
}

fn build_router(ctx: ApiContext) -> Router {
    let divination = Router::new()
        .route("/methods", get(endpoints::divination::methods))
        .route("/models", get(endpoints::divination::models))
        .route("/liuyao", post(endpoints::divination::liuyao));

    Router::new()
        .route("/", get(endpoints::health::root))
        .route("/api/health", get(endpoints::health::check))
        .nest("/api/divination", divination)
        .with_state(ctx)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::interpretation::transport::MockTransport;
    use crate::interpretation::{InteractionLog, PromptTransport, ProviderId};

    const PROVIDER_REPLY: &str = r#"{"version":"1.0","root":"card-overview","components":[
        {"id":"card-overview","type":"card","props":{"title":"📖 Overview"},"children":["text-overview"]},
        {"id":"text-overview","type":"text","props":{"content":"Heaven and earth exchange."}}
    ]}"#;

    fn no_transport(_: ProviderId) -> Option<Box<dyn PromptTransport>> {
        None
    }

    fn unconfigured_router(dir: &std::path::Path) -> Router {
        let registry = ProviderRegistry::with_factory(Box::new(no_transport), InteractionLog::new(dir));
        api_router(Arc::new(registry))
    }

    fn mock_router(dir: &std::path::Path) -> Router {
        let registry = ProviderRegistry::with_factory(
            Box::new(|_: ProviderId| {
                Some(Box::new(MockTransport::replying(PROVIDER_REPLY)) as Box<dyn PromptTransport>)
            }),
            InteractionLog::new(dir),
        );
        api_router(Arc::new(registry))
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn peace_throws() -> serde_json::Value {
        serde_json::json!([[1, 1, 1], [1, 1, 1], [1, 1, 1], [0, 0, 0], [0, 0, 0], [0, 0, 0]])
    }

    #[tokio::test]
    async fn root_and_health_respond() {
        let dir = tempfile::tempdir().unwrap();
        let app = unconfigured_router(dir.path());

        let response = app.clone().oneshot(get_request("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");

        let response = app.oneshot(get_request("/api/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "healthy");
    }

    #[tokio::test]
    async fn methods_lists_four_entries() {
        let dir = tempfile::tempdir().unwrap();
        let response = unconfigured_router(dir.path())
            .oneshot(get_request("/api/divination/methods"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json.as_array().unwrap().len(), 4);
        assert_eq!(json[0]["id"], "liuyao");
        assert_eq!(json[0]["available"], true);
    }

    #[tokio::test]
    async fn models_lists_providers() {
        let dir = tempfile::tempdir().unwrap();
        let response = unconfigured_router(dir.path())
            .oneshot(get_request("/api/divination/models"))
            .await
            .unwrap();
        let json = json_body(response).await;
        assert_eq!(json[0]["id"], "gemini");
        assert_eq!(json[0]["default"], true);
        assert_eq!(json[1]["id"], "deepseek");
    }

    #[tokio::test]
    async fn liuyao_without_provider_returns_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let body = serde_json::json!({ "question": "Should I move?", "coinResults": peace_throws() });
        let response = unconfigured_router(dir.path())
            .oneshot(post_json("/api/divination/liuyao", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["model"], "gemini");
        assert_eq!(json["originalHexagram"]["name"], "地天泰");
        assert_eq!(json["originalHexagram"]["number"], 11);
        assert_eq!(json["changedHexagram"]["name"], "天地否");
        assert_eq!(json["lines"].as_array().unwrap().len(), 6);
        assert_eq!(json["a2uiResponse"]["metadata"]["generatedBy"], "fallback");
        assert_eq!(json["a2uiResponse"]["metadata"]["isNativeA2UI"], false);
    }

    #[tokio::test]
    async fn liuyao_with_provider_returns_native_document() {
        let dir = tempfile::tempdir().unwrap();
        let body = serde_json::json!({
            "question": "Should I move?",
            "coin_results": [[1, 1, 0], [1, 1, 0], [1, 1, 0], [1, 1, 0], [1, 1, 0], [1, 1, 0]],
            "model": "DeepSeek"
        });
        let response = mock_router(dir.path())
            .oneshot(post_json("/api/divination/liuyao", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["model"], "deepseek");
        assert!(json["changedHexagram"].is_null());
        assert_eq!(json["a2uiResponse"]["metadata"]["generatedBy"], "deepseek");
        assert_eq!(json["a2uiResponse"]["metadata"]["isNativeA2UI"], true);
        assert_eq!(json["a2uiResponse"]["data"]["question"], "Should I move?");
    }

    #[tokio::test]
    async fn wrong_throw_count_is_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let body = serde_json::json!({ "question": "q", "coinResults": [[1, 1, 1]] });
        let response = unconfigured_router(dir.path())
            .oneshot(post_json("/api/divination/liuyao", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn wrong_coin_count_is_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let body = serde_json::json!({
            "question": "q",
            "coinResults": [[1, 1, 1], [1, 1], [1, 1, 1], [0, 0, 0], [0, 0, 0], [0, 0, 0]]
        });
        let response = unconfigured_router(dir.path())
            .oneshot(post_json("/api/divination/liuyao", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let message = json_body(response).await["error"]["message"].as_str().unwrap().to_string();
        assert!(message.contains("Throw 2"), "{message}");
    }

    #[tokio::test]
    async fn unknown_model_is_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let body = serde_json::json!({ "question": "q", "coinResults": peace_throws(), "model": "gpt" });
        let response = unconfigured_router(dir.path())
            .oneshot(post_json("/api/divination/liuyao", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let message = json_body(response).await["error"]["message"].as_str().unwrap().to_string();
        assert!(message.contains("Unsupported model"));
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let body = serde_json::json!({ "question": "q", "coinResults": [[-1, 0, 1]] });
        let response = unconfigured_router(dir.path())
            .oneshot(post_json("/api/divination/liuyao", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn interpretation_is_logged() {
        let dir = tempfile::tempdir().unwrap();
        let body = serde_json::json!({ "question": "q", "coinResults": peace_throws() });
        let response = mock_router(dir.path())
            .oneshot(post_json("/api/divination/liuyao", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
