pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::conversation::handlers as chat;
use crate::screening::handlers as screening;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes();

    Router::new()
        .route("/health", get(health::health_handler))
        // Screening API
        .route("/api/v1/screen", post(screening::handle_screen))
        // Chat API
        .route("/api/v1/chat", post(chat::handle_chat))
        .route("/api/v1/chat/questions", get(chat::handle_questions))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::conversation::scripted::SCREENING_QUESTIONS;
    use crate::conversation::{ConversationStrategy, FreeFormChat, ScriptedInterview};
    use crate::llm_client::testing::{stub_client, StubTransport};
    use crate::scoring::LexicalScorer;

    const BOUNDARY: &str = "screener-test-boundary";

    fn app(chat: Arc<dyn ConversationStrategy>) -> Router {
        build_router(AppState {
            config: Config::default(),
            scorer: Arc::new(LexicalScorer),
            chat,
        })
    }

    fn scripted_app() -> Router {
        app(Arc::new(ScriptedInterview))
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn multipart_body(jd_text: Option<&str>, files: &[(&str, &str)]) -> String {
        let mut body = String::new();
        if let Some(jd) = jd_text {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"jd_text\"\r\n\r\n{jd}\r\n"
            ));
        }
        for (filename, content) in files {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resumes\"; filename=\"{filename}\"\r\nContent-Type: application/pdf\r\n\r\n{content}\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        body
    }

    fn screen_request(body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/screen")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn chat_request(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/chat")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = scripted_app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["scorer"], "lexical");
        assert_eq!(body["chat_mode"], "scripted");
    }

    #[tokio::test]
    async fn test_screen_returns_one_row_per_upload() {
        let body = multipart_body(
            Some("Rust engineer with Tokio experience"),
            &[("first.pdf", "not a real pdf"), ("second.pdf", "also not a pdf")],
        );

        let response = scripted_app().oneshot(screen_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let report = body_json(response).await;
        let candidates = report["candidates"].as_array().unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0]["filename"], "first.pdf");
        assert_eq!(candidates[0]["is_top"], true);
        assert_eq!(candidates[0]["score"], 0.0);
        assert_eq!(candidates[0]["relevance"], 0.0);
        assert_eq!(candidates[1]["filename"], "second.pdf");
        assert_eq!(report["scorer"], "lexical");
        assert_eq!(report["score_scale"], "unit");
    }

    #[tokio::test]
    async fn test_screen_without_jd_is_rejected() {
        let body = multipart_body(None, &[("cv.pdf", "bytes")]);

        let response = scripted_app().oneshot(screen_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_screen_without_files_is_rejected() {
        let body = multipart_body(Some("Rust engineer"), &[]);

        let response = scripted_app().oneshot(screen_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "at least one resume file is required");
    }

    #[tokio::test]
    async fn test_scripted_chat_round_trip() {
        let router = scripted_app();

        let first = router
            .clone()
            .oneshot(chat_request(json!({"relevance": 0.8})))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        let first = body_json(first).await;
        assert_eq!(first["mode"], "scripted");
        assert_eq!(first["question"], SCREENING_QUESTIONS[0]);
        assert_eq!(first["state"]["question_index"], 0);

        let second = router
            .oneshot(chat_request(json!({
                "state": first["state"],
                "message": "I have spent six years building backend services"
            })))
            .await
            .unwrap();
        let second = body_json(second).await;
        assert_eq!(second["state"]["question_index"], 1);
        assert_eq!(second["question"], SCREENING_QUESTIONS[1]);
        assert!(second["outcome"].is_null());
    }

    #[tokio::test]
    async fn test_scripted_chat_inconsistent_state_is_rejected() {
        let response = scripted_app()
            .oneshot(chat_request(json!({
                "state": {"question_index": 2, "answers": [], "relevance": 0.5},
                "message": "hello"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "CONVERSATION_ERROR");
    }

    #[tokio::test]
    async fn test_scripted_chat_rejects_percent_relevance() {
        let response = scripted_app()
            .oneshot(chat_request(json!({"relevance": 40})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_free_form_chat_uses_configured_strategy() {
        let stub = StubTransport::replying("Jane Doe is the strongest candidate.");
        let router = app(Arc::new(FreeFormChat::new(stub_client(stub))));

        let response = router
            .oneshot(chat_request(json!({
                "message": "Who is strongest?",
                "candidates": [{
                    "filename": "jane.pdf", "name": "Jane Doe", "email": "", "phone": "",
                    "score": 0.9, "skills": "Rust", "reason": ""
                }]
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["mode"], "free_form");
        assert_eq!(body["answer"], "Jane Doe is the strongest candidate.");
    }

    #[tokio::test]
    async fn test_questions_endpoint() {
        let response = scripted_app()
            .oneshot(Request::get("/api/v1/chat/questions").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body = body_json(response).await;
        assert_eq!(body["mode"], "scripted");
        assert_eq!(body["questions"].as_array().unwrap().len(), SCREENING_QUESTIONS.len());
    }
}
