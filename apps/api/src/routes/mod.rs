pub mod health;

use axum::{routing::get, routing::post, Router};

use crate::outreach::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/messages", post(handlers::handle_generate_message))
        .route(
            "/api/v1/messages/summarize",
            post(handlers::handle_summarize),
        )
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
    use crate::llm_client::testing::ScriptedCompletion;

    fn app(llm: ScriptedCompletion) -> Router {
        build_router(AppState {
            llm: Arc::new(llm),
            config: Config::for_tests(),
        })
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(ScriptedCompletion::new())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_generate_message_returns_cleaned_text() {
        let llm = ScriptedCompletion::new()
            .reply("- Runs retail ops at Simmons")
            .reply("Output:\nHi Lisa,\nYour retail ops work at Simmons. Would be glad to connect.\nBest,\nJoseph");
        let response = app(llm)
            .oneshot(post_json(
                "/api/v1/messages",
                json!({
                    "prospect_name": "Lisa",
                    "company": "Simmons",
                    "prospect_background": "Lisa leads retail operations at Simmons Bank."
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(
            body["final_message"],
            "Hi Lisa,\nYour retail ops work at Simmons. Would be glad to connect.\nBest,\nJoseph"
        );
        assert_eq!(body["degraded"], false);
        assert_eq!(body["summary_source"], "model");
        assert_eq!(body["compliance"]["passed"], true);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_still_200_with_fallback() {
        let llm = ScriptedCompletion::new().fail("down").fail("down");
        let response = app(llm)
            .oneshot(post_json(
                "/api/v1/messages",
                json!({"prospect_background": "bio"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["final_message"], "Failed to generate message");
        assert_eq!(body["degraded"], true);
        assert!(body["compliance"].is_null());
    }

    #[tokio::test]
    async fn test_missing_background_is_rejected() {
        let response = app(ScriptedCompletion::new())
            .oneshot(post_json("/api/v1/messages", json!({"prospect_name": "Jane"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json_body(response).await["error"]["code"], "MALFORMED_REQUEST");
    }

    #[tokio::test]
    async fn test_oversized_metadata_is_rejected() {
        let response = app(ScriptedCompletion::new())
            .oneshot(post_json(
                "/api/v1/messages",
                json!({"company": "x".repeat(500), "prospect_background": "bio"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_summarize_preview_for_empty_background() {
        let response = app(ScriptedCompletion::new())
            .oneshot(post_json(
                "/api/v1/messages/summarize",
                json!({"prospect_background": ""}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["summary"], "No content to summarize.");
        assert_eq!(body["source"], "no_content");
    }
}
