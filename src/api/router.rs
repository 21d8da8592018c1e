use std::any::Any;

use axum::{
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{self, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

use super::health;
use super::middleware::logging_middleware;
use super::predict;
use super::state::AppState;
use super::types::{ApiError, INTERNAL_ERROR_DETAIL};

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        .route("/api/predict", post(predict::predict))
        .with_state(state);

    with_middleware(router)
}

/// Panic recovery, request logging, tracing and CORS, innermost first
fn with_middleware(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
}

/// Any origin, method and header
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(cors::Any)
        .allow_methods(cors::Any)
        .allow_headers(cors::Any)
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");

    error!(panic = message, "Request handler panicked");
    ApiError::internal(INTERNAL_ERROR_DETAIL).into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::llm::MockAdviceProvider;
    use crate::domain::{AdviceProvider, PromptBuilder, TemplateKind};
    use crate::infrastructure::services::TriageService;

    fn app_with(provider: Option<Arc<MockAdviceProvider>>, echo: bool) -> Router {
        let provider = provider.map(|p| p as Arc<dyn AdviceProvider>);
        let service = TriageService::new(provider, PromptBuilder::new(TemplateKind::Detailed));
        create_router(AppState::new(service).with_echo_question(echo))
    }

    fn predict_request(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/predict")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }

    #[tokio::test]
    async fn test_root_reports_running() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let (status, json) = send(app_with(None, false), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], health::ROOT_MESSAGE);
    }

    #[tokio::test]
    async fn test_health_is_degraded_without_provider() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, json) = send(app_with(None, false), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "degraded");
    }

    #[tokio::test]
    async fn test_predict_returns_provider_answer() {
        let provider = Arc::new(
            MockAdviceProvider::new("mock").with_response("Drink fluids.\nDepartment: General Medicine 💊 "),
        );
        let app = app_with(Some(provider.clone()), false);

        let (status, json) = send(app, predict_request(r#"{"question": "fever"}"#)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            serde_json::json!({ "answer": "Drink fluids.\nDepartment: General Medicine 💊" })
        );
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_predict_rejects_blank_question() {
        let provider = Arc::new(MockAdviceProvider::new("mock").with_response("unused"));

        for body in [r#"{"question": "   "}"#, r#"{"question": ""}"#, "{}"] {
            let app = app_with(Some(provider.clone()), false);
            let (status, json) = send(app, predict_request(body)).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
            assert_eq!(json, serde_json::json!({ "detail": "Question cannot be empty" }));
        }

        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_predict_falls_back_when_provider_fails() {
        let provider = Arc::new(MockAdviceProvider::new("mock").with_error("connection refused"));
        let app = app_with(Some(provider), false);

        let (status, json) = send(
            app,
            predict_request(r#"{"question": "I have a severe headache and blurry vision"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let answer = json["answer"].as_str().unwrap();
        assert!(answer.starts_with("Headaches are often linked"));
        assert!(answer.ends_with("Department: Neurology 🧠"));
    }

    #[tokio::test]
    async fn test_predict_echoes_question_when_enabled() {
        let (status, json) = send(
            app_with(None, true),
            predict_request(r#"{"question": "my knee hurts"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["question"], "my knee hurts");
        assert!(json["answer"].as_str().unwrap().ends_with("Department: Orthopedics 🦴"));
    }

    #[tokio::test]
    async fn test_predict_invalid_json_uses_detail_body() {
        let (status, json) = send(app_with(None, false), predict_request("{not json")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["detail"].as_str().unwrap().starts_with("Invalid JSON syntax"));
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/predict")
            .header(header::ORIGIN, "http://localhost:3000")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();

        let response = app_with(None, false).oneshot(request).await.unwrap();

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_request_id_is_echoed() {
        let request = Request::builder()
            .uri("/live")
            .header("x-request-id", "req-42")
            .body(Body::empty())
            .unwrap();

        let response = app_with(None, false).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get("x-request-id").unwrap(), "req-42");
    }

    #[tokio::test]
    async fn test_generated_request_id_reaches_handler() {
        async fn seen_id(headers: axum::http::HeaderMap) -> String {
            headers
                .get("x-request-id")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string()
        }

        let app = with_middleware(Router::new().route("/id", get(seen_id)));
        let request = Request::builder().uri("/id").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        let echoed = response.headers().get("x-request-id").unwrap().to_str().unwrap().to_string();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        assert!(uuid::Uuid::parse_str(&echoed).is_ok());
        assert_eq!(String::from_utf8(bytes.to_vec()).unwrap(), echoed);
    }

    #[tokio::test]
    async fn test_panic_becomes_internal_error() {
        async fn boom() -> &'static str {
            panic!("handler bug")
        }

        let app = with_middleware(Router::new().route("/boom", get(boom)));
        let request = Request::builder().uri("/boom").body(Body::empty()).unwrap();
        let (status, json) = send(app, request).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["detail"], INTERNAL_ERROR_DETAIL);
    }
}
