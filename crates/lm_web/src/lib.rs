use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

pub async fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/flashcards", post(handlers::flashcards))
        .route("/api/quiz", post(handlers::quiz))
        .route("/api/summarize", post(handlers::summarize))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

pub async fn serve(state: AppState, addr: SocketAddr) -> lm_core::Result<()> {
    let app = create_app(state).await;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🌐 Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

pub mod prelude {
    pub use crate::{create_app, serve, ApiError, AppState};
    pub use lm_core::{Error, Result};
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use lm_core::Article;
    use lm_inference::models::{DummyClassifier, DummyGenerator, DummySummarizer};
    use lm_inference::StudyGenerator;
    use lm_news::{DummyNewsSource, NewsConfig, NewsPipeline};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    struct Harness {
        generator: Arc<DummyGenerator>,
        news: Arc<DummyNewsSource>,
        classifier: Arc<DummyClassifier>,
        summarizer: Arc<DummySummarizer>,
    }

    impl Harness {
        fn new(generator: DummyGenerator, articles: Vec<Article>) -> Self {
            Self {
                generator: Arc::new(generator),
                news: Arc::new(DummyNewsSource::new(articles)),
                classifier: Arc::new(DummyClassifier::new()),
                summarizer: Arc::new(DummySummarizer::new()),
            }
        }

        async fn app(&self) -> Router {
            let news = NewsPipeline::new(
                self.news.clone(),
                self.classifier.clone(),
                self.summarizer.clone(),
                &NewsConfig::default(),
            );
            create_app(AppState::new(StudyGenerator::new(self.generator.clone()), Some(news))).await
        }
    }

    async fn post(app: Router, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn assert_flashcard_shape(value: &Value) {
        let cards = value["flashcards"].as_array().expect("flashcards array");
        assert!(!cards.is_empty());
        for card in cards {
            assert!(card["front"].is_string());
            assert!(card["back"].is_string());
        }
    }

    #[tokio::test]
    async fn test_health() {
        let harness = Harness::new(DummyGenerator::new(), vec![]);
        let request = Request::builder().uri("/api/health").body(Body::empty()).unwrap();
        let response = harness.app().await.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_flashcards_from_model_json() {
        let harness = Harness::new(DummyGenerator::new(), vec![]);
        let (status, body) = post(
            harness.app().await,
            "/api/flashcards",
            r#"{"notes": "Water boils at 100C. Ice melts at 0C."}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_flashcard_shape(&body);
        assert_eq!(body["flashcards"].as_array().unwrap().len(), 2);
        assert_eq!(harness.generator.calls(), 1);
    }

    #[tokio::test]
    async fn test_flashcards_shape_survives_unparseable_output() {
        for reply in ["I'd rather not.", "{ broken json", r#"{"cards": []}"#, ""] {
            let harness = Harness::new(DummyGenerator::with_reply(reply), vec![]);
            let (status, body) =
                post(harness.app().await, "/api/flashcards", r#"{"notes": "anything"}"#).await;
            assert_eq!(status, StatusCode::OK);
            assert_flashcard_shape(&body);
        }
    }

    #[tokio::test]
    async fn test_missing_input_is_bad_request_without_model_call() {
        let cases = [
            ("/api/flashcards", r#"{}"#, "Notes are required"),
            ("/api/flashcards", r#"{"notes": ""}"#, "Notes are required"),
            ("/api/quiz", r#"{"text": null}"#, "Text is required"),
            ("/api/quiz", r#"{"notes": "wrong field"}"#, "Text is required"),
            ("/api/summarize", r#"{"from": "2024-05-01"}"#, "Ticker required"),
        ];
        for (uri, body, message) in cases {
            let harness = Harness::new(DummyGenerator::new(), vec![Article::new("x", None)]);
            let (status, json) = post(harness.app().await, uri, body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert_eq!(json["error"], message);
            assert_eq!(harness.generator.calls(), 0);
            assert_eq!(harness.news.calls(), 0);
            assert_eq!(harness.classifier.calls(), 0);
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let harness = Harness::new(DummyGenerator::new(), vec![]);
        let (status, body) = post(harness.app().await, "/api/quiz", "not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
        assert_eq!(harness.generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_body_parsed_without_json_content_type() {
        for content_type in [None, Some("text/plain")] {
            let harness = Harness::new(DummyGenerator::new(), vec![]);
            let mut request = Request::builder().method("POST").uri("/api/flashcards");
            if let Some(content_type) = content_type {
                request = request.header("content-type", content_type);
            }
            let request = request
                .body(Body::from(r#"{"notes": "Water boils at 100C."}"#))
                .unwrap();
            let response = harness.app().await.oneshot(request).await.unwrap();

            assert_eq!(response.status(), StatusCode::OK, "{:?}", content_type);
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            assert_flashcard_shape(&serde_json::from_slice(&bytes).unwrap());
            assert_eq!(harness.generator.calls(), 1);
        }
    }

    #[tokio::test]
    async fn test_empty_body_is_missing_field() {
        let harness = Harness::new(DummyGenerator::new(), vec![]);
        let (status, body) = post(harness.app().await, "/api/quiz", "").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Text is required");
        assert_eq!(harness.generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_quiz_fallback() {
        let harness = Harness::new(DummyGenerator::with_reply("Rivers carry water."), vec![]);
        let (status, body) = post(harness.app().await, "/api/quiz", r#"{"text": "Rivers"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["quiz"][0]["correct"], 0);
        assert_eq!(body["quiz"][0]["options"].as_array().unwrap().len(), 4);
        assert_eq!(body["quiz"][0]["explanation"], "Rivers carry water.");
    }

    #[tokio::test]
    async fn test_generator_failure_is_server_error() {
        let harness = Harness::new(DummyGenerator::failing(), vec![]);
        let (status, body) = post(harness.app().await, "/api/flashcards", r#"{"notes": "x"}"#).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Dummy generator failure");
    }

    #[tokio::test]
    async fn test_summarize_without_news() {
        let harness = Harness::new(DummyGenerator::new(), vec![]);
        let (status, body) =
            post(harness.app().await, "/api/summarize", r#"{"ticker": "ZZZZ", "from": "", "to": ""}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["summary"].as_str().unwrap().contains("ZZZZ"));
        assert_eq!(body["sentiment"], "⚠️ Neutral");
        assert_eq!(body["articles"], json!([]));
        assert_eq!(body["chartData"], json!([]));
        assert_eq!(harness.news.calls(), 1);
        assert_eq!(harness.classifier.calls(), 0);
        assert_eq!(harness.summarizer.calls(), 0);
    }

    #[tokio::test]
    async fn test_summarize_report() {
        let articles = vec![
            Article::new("Apple shares surge", Some("Record iPhone sales")),
            Article::new("Apple beats estimates", None),
            Article::new("Apple faces lawsuit", Some("Shares drop")),
        ];
        let harness = Harness::new(DummyGenerator::new(), articles);
        let (status, body) = post(harness.app().await, "/api/summarize", r#"{"ticker": "AAPL"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sentiment"], "✅ Positive");
        assert_eq!(
            body["chartData"],
            json!([
                { "name": "Positive", "value": 2 },
                { "name": "Negative", "value": 1 },
                { "name": "Neutral", "value": 0 }
            ])
        );
        assert_eq!(
            body["keyPoints"],
            json!(["Apple shares surge", "Apple beats estimates", "Apple faces lawsuit"])
        );
        assert_eq!(body["articles"][0]["sentiment"], "Positive");
        assert_eq!(body["articles"][2]["sentiment"], "Negative");
        assert!(body["summary"].as_str().unwrap().starts_with("Article 1: Apple shares surge."));
    }

    #[tokio::test]
    async fn test_summarize_unconfigured_is_server_error() {
        let state = AppState::new(StudyGenerator::new(Arc::new(DummyGenerator::new())), None);
        let (status, body) = post(create_app(state).await, "/api/summarize", r#"{"ticker": "AAPL"}"#).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("NEWS_API_KEY"));
    }
}
