//! HTTP Routes
//!
//! API Endpoints:
//! - /v1/chat/completions   POST  chat completion → 图像生成
//! - /v1/models             GET   支持的模型列表
//! - /models                GET   同上
//!
//! 其他路径或方法一律返回 404 错误信封

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/v1/chat/completions",
            post(handlers::chat_completions).fallback(handlers::not_found),
        )
        .route(
            "/v1/models",
            get(handlers::list_models).fallback(handlers::not_found),
        )
        .route(
            "/models",
            get(handlers::list_models).fallback(handlers::not_found),
        )
        .fallback(handlers::not_found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::PollConfig;
    use crate::test_support::{FakeImageHost, FakeProvider, PollStep};
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    struct TestApp {
        router: Router,
        host: Arc<FakeImageHost>,
        provider: Arc<FakeProvider>,
    }

    fn test_app(steps: Vec<PollStep>) -> TestApp {
        let host = Arc::new(FakeImageHost::returning("http://cdn/uploaded.png"));
        let provider = Arc::new(FakeProvider::with_steps(steps));
        let state = AppState::new(
            host.clone(),
            provider.clone(),
            PollConfig::default(),
            vec!["Qwen/Qwen-Image".to_string(), "Qwen/Qwen-Image-Edit".to_string()],
        );
        TestApp {
            router: create_routes().with_state(Arc::new(state)),
            host,
            provider,
        }
    }

    fn chat_request(auth: Option<&str>, body: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/v1/chat/completions")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(auth) = auth {
            builder = builder.header(header::AUTHORIZATION, auth);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_str(&body_string(response).await).unwrap()
    }

    fn error_envelope(message: &str, code: u16) -> Value {
        json!({"error": {"message": message, "type": "error", "code": code}})
    }

    #[tokio::test]
    async fn test_missing_authorization_is_rejected_before_parsing() {
        let app = test_app(vec![]);

        let response = app
            .router
            .oneshot(chat_request(None, "not even json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(response).await,
            error_envelope("Invalid authorization format", 401)
        );
    }

    #[tokio::test]
    async fn test_wrong_scheme_is_unauthorized() {
        let app = test_app(vec![]);

        let response = app
            .router
            .oneshot(chat_request(Some("Token abc"), "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_oversized_body_checks_auth_first() {
        let app = test_app(vec![]);
        let router = app.router.layer(axum::extract::DefaultBodyLimit::max(16));
        let oversized = "x".repeat(1024);

        let response = router
            .clone()
            .oneshot(chat_request(None, &oversized))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(response).await,
            error_envelope("Invalid authorization format", 401)
        );

        let response = router
            .oneshot(chat_request(Some("Bearer k"), &oversized))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            body_json(response).await,
            error_envelope("Request body too large", 413)
        );
    }

    #[tokio::test]
    async fn test_invalid_json_is_bad_request() {
        let app = test_app(vec![]);

        let response = app
            .router
            .oneshot(chat_request(Some("Bearer k"), "{oops"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            error_envelope("Invalid JSON in request body", 400)
        );
    }

    #[tokio::test]
    async fn test_field_validation() {
        let cases = [
            (json!({"messages": [{"role": "user", "content": "x"}]}), "Model is required"),
            (json!({"model": "m", "messages": []}), "Messages are required"),
            (
                json!({"model": "m", "messages": [{"role": "system", "content": "x"}]}),
                "No text content found in the last user message",
            ),
        ];

        for (body, message) in cases {
            let app = test_app(vec![]);
            let response = app
                .router
                .oneshot(chat_request(Some("Bearer k"), &body.to_string()))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(body_json(response).await, error_envelope(message, 400));
        }
    }

    #[tokio::test]
    async fn test_more_than_one_image_rejected_before_network() {
        let app = test_app(vec![]);
        let body = json!({
            "model": "Qwen/Qwen-Image-Edit",
            "messages": [{
                "role": "user",
                "content": [
                    {"type": "text", "text": "combine"},
                    {"type": "image_url", "image_url": {"url": "data:image/png;base64,AAAA"}},
                    {"type": "image_url", "image_url": {"url": "http://x/b.png"}}
                ]
            }]
        });

        let response = app
            .router
            .oneshot(chat_request(Some("Bearer k"), &body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            error_envelope("Only 1 image is supported", 400)
        );
        assert_eq!(app.host.upload_count(), 0);
        assert!(app.provider.submitted().is_empty());
        assert_eq!(app.provider.fetch_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_completion_response() {
        let app = test_app(vec![
            PollStep::Status("RUNNING"),
            PollStep::Succeed(vec!["http://x/1.png", "http://x/2.png"]),
        ]);
        let body = json!({
            "model": "Qwen/Qwen-Image-Edit",
            "messages": [{
                "role": "user",
                "content": [
                    {"type": "text", "text": "make it snow"},
                    {"type": "image_url", "image_url": "data:image/png;base64,AAAA"}
                ]
            }],
            "steps": 30
        });

        let response = app
            .router
            .oneshot(chat_request(Some("Bearer ms-key"), &body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let value = body_json(response).await;
        assert_eq!(value["object"], "chat.completion");
        assert_eq!(value["model"], "Qwen/Qwen-Image-Edit");
        assert_eq!(
            value["choices"][0]["message"]["content"],
            "![](http://x/1.png)\n![](http://x/2.png)"
        );

        let submitted = app.provider.submitted();
        assert_eq!(submitted[0].image_url.as_deref(), Some("http://cdn/uploaded.png"));
        assert_eq!(submitted[0].options.get("steps"), Some(&json!(30)));
        assert_eq!(app.provider.last_credential().as_deref(), Some("ms-key"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stream_response() {
        let app = test_app(vec![PollStep::Succeed(vec![])]);
        let body = json!({
            "model": "Qwen/Qwen-Image",
            "messages": [{"role": "user", "content": "a cat"}],
            "stream": true
        });

        let response = app
            .router
            .oneshot(chat_request(Some("Bearer k"), &body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/event-stream"
        );

        let text = body_string(response).await;
        let frames: Vec<&str> = text.split("\n\n").filter(|f| !f.is_empty()).collect();
        assert_eq!(frames.len(), 4);
        assert_eq!(frames[3], "data: [DONE]");
        assert!(frames[1].contains("图像生成完成，但未返回URL。"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_numeric_stream_flag_streams() {
        let app = test_app(vec![PollStep::Succeed(vec!["http://x/1.png"])]);
        let body = json!({
            "model": "Qwen/Qwen-Image",
            "messages": [{"role": "user", "content": "a cat"}],
            "stream": 1
        });

        let response = app
            .router
            .oneshot(chat_request(Some("Bearer k"), &body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/event-stream"
        );
        let text = body_string(response).await;
        assert!(text.contains("chat.completion.chunk"));
        assert!(text.ends_with("data: [DONE]\n\n"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_generation_failure_is_internal_error() {
        let app = test_app(vec![PollStep::Status("FAILED")]);
        let body = json!({"model": "m", "messages": [{"role": "user", "content": "x"}]});

        let response = app
            .router
            .oneshot(chat_request(Some("Bearer k"), &body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            error_envelope("Image generation failed", 500)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_internal_error() {
        let app = test_app(vec![]);
        let body = json!({"model": "m", "messages": [{"role": "user", "content": "x"}]});

        let response = app
            .router
            .oneshot(chat_request(Some("Bearer k"), &body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, error_envelope("Task timeout", 500));
    }

    #[tokio::test]
    async fn test_models_on_both_paths() {
        for path in ["/v1/models", "/models"] {
            let app = test_app(vec![]);
            let response = app
                .router
                .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            let value = body_json(response).await;
            assert_eq!(value["object"], "list");
            assert_eq!(value["data"][1]["id"], "Qwen/Qwen-Image-Edit");
            assert_eq!(value["data"][1]["owned_by"], "modelscope");
        }
    }

    #[tokio::test]
    async fn test_unknown_path_and_method_are_not_found() {
        let requests = [
            Request::builder().uri("/v1/embeddings").body(Body::empty()).unwrap(),
            Request::builder()
                .uri("/v1/chat/completions")
                .body(Body::empty())
                .unwrap(),
            Request::builder()
                .method("POST")
                .uri("/v1/models")
                .body(Body::empty())
                .unwrap(),
        ];

        for request in requests {
            let app = test_app(vec![]);
            let response = app.router.oneshot(request).await.unwrap();

            assert_eq!(response.status(), StatusCode::NOT_FOUND);
            assert_eq!(body_json(response).await, error_envelope("Not Found", 404));
        }
    }
}
