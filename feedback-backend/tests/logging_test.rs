// tests/logging_test.rs
use axum::{
    body::{to_bytes, Body},
    extract::Extension,
    http::{Request, StatusCode},
    routing::{get, post},
    Router,
};
use feedback_backend::log_with_context;
use feedback_backend::logging::{
    inject_request_context, logging_middleware, RequestContext, REQUEST_ID_HEADER,
};
use std::io::Write;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::SubscriberInitExt;

/// fmt レイヤーの出力を溜めるバッファ
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn capturing_subscriber(
    logs: &CapturedLogs,
    level: tracing::Level,
) -> impl tracing::Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(logs.clone())
        .finish()
}

#[test]
fn test_structured_logging_macro() {
    let logs = CapturedLogs::default();

    tracing::subscriber::with_default(capturing_subscriber(&logs, tracing::Level::DEBUG), || {
        log_with_context!(tracing::Level::INFO, "Test message without context");
        log_with_context!(
            tracing::Level::INFO,
            "Test message with context",
            "feedback_id" => 42,
            "operation" => "test"
        );
        log_with_context!(
            tracing::Level::ERROR,
            "Error occurred during test",
            "error" => "Test error"
        );
        log_with_context!(tracing::Level::DEBUG, "Debug information");
        // 上限が DEBUG なので出力されない
        log_with_context!(tracing::Level::TRACE, "Trace detail");
    });

    let output = logs.contents();
    assert!(output.contains("INFO"));
    assert!(output.contains("Test message without context"));
    assert!(output.contains("Test message with context"));
    assert!(output.contains("feedback_id=42"));
    assert!(output.contains("operation=\"test\""));
    assert!(output.contains("ERROR"));
    assert!(output.contains("error=\"Test error\""));
    assert!(output.contains("Debug information"));
    assert!(!output.contains("Trace detail"));
}

#[test]
fn test_macro_respects_subscriber_level() {
    let logs = CapturedLogs::default();

    tracing::subscriber::with_default(capturing_subscriber(&logs, tracing::Level::WARN), || {
        log_with_context!(tracing::Level::INFO, "Routine detail", "feedback_id" => 7);
        log_with_context!(tracing::Level::WARN, "Mail delivery failed", "feedback_id" => 7);
    });

    let output = logs.contents();
    assert!(!output.contains("Routine detail"));
    assert!(output.contains("WARN"));
    assert!(output.contains("Mail delivery failed"));
}

#[tokio::test]
async fn test_logging_middleware_passes_status_through() {
    let app = Router::new()
        .route("/test", get(|| async { "Test response" }))
        .route(
            "/error",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error") }),
        )
        .layer(axum::middleware::from_fn(logging_middleware))
        .layer(axum::middleware::from_fn(inject_request_context));

    for (uri, expected) in [
        ("/test", StatusCode::OK),
        ("/error", StatusCode::INTERNAL_SERVER_ERROR),
        ("/not-found", StatusCode::NOT_FOUND),
    ] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), expected, "{}", uri);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER), "{}", uri);
    }
}

#[tokio::test]
async fn test_completion_log_carries_request_span_fields() {
    let logs = CapturedLogs::default();
    let _guard = capturing_subscriber(&logs, tracing::Level::INFO).set_default();

    let app = Router::new()
        .route(
            "/error",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error") }),
        )
        .layer(axum::middleware::from_fn(logging_middleware))
        .layer(axum::middleware::from_fn(inject_request_context));

    let response = app
        .oneshot(Request::builder().uri("/error").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let request_id = response.headers()[REQUEST_ID_HEADER]
        .to_str()
        .unwrap()
        .to_string();

    let output = logs.contents();
    let completed = output
        .lines()
        .find(|line| line.contains("Request completed"))
        .expect("completion line");
    assert!(completed.contains("ERROR"));
    assert!(completed.contains(&format!("request_id={}", request_id)));
    assert!(completed.contains("method=GET"));
    assert!(completed.contains("path=/error"));
    assert!(completed.contains("status=500"));
}

#[tokio::test]
async fn test_request_context_generation() {
    let app = Router::new()
        .route(
            "/context-test",
            post(|Extension(context): Extension<RequestContext>| async move {
                assert!(!context.request_id.is_empty());
                assert_eq!(context.path, "/context-test");
                assert_eq!(context.method, "POST");
                context.request_id
            }),
        )
        .layer(axum::middleware::from_fn(inject_request_context));

    let send = |app: Router| async move {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/context-test")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let header_id = response.headers()[REQUEST_ID_HEADER]
            .to_str()
            .unwrap()
            .to_string();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        // 応答ヘッダーとハンドラーが見た ID は一致する
        assert_eq!(header_id.as_bytes(), &body[..]);
        header_id
    };

    let first_id = send(app.clone()).await;
    let second_id = send(app).await;

    // リクエストごとに異なる ID が振られる
    assert_ne!(first_id, second_id);
}
