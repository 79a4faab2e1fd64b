// feedback-backend/src/logging/mod.rs

use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{Instrument, Level, Span};
use uuid::Uuid;

/// リクエスト ID をやり取りするヘッダー
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_REQUEST_ID_LEN: usize = 64;

/// レベルを値で受け取り、キー付きフィールドと共にイベントを出す
///
/// ```ignore
/// log_with_context!(tracing::Level::INFO, "Feedback stored", "feedback_id" => id);
/// ```
#[macro_export]
macro_rules! log_with_context {
    ($level:expr, $msg:expr $(, $($key:expr => $value:expr),* $(,)?)?) => {
        match $level {
            tracing::Level::ERROR => {
                tracing::error!(message = $msg $(, $($key = ?$value,)*)?);
            }
            tracing::Level::WARN => {
                tracing::warn!(message = $msg $(, $($key = ?$value,)*)?);
            }
            tracing::Level::INFO => {
                tracing::info!(message = $msg $(, $($key = ?$value,)*)?);
            }
            tracing::Level::DEBUG => {
                tracing::debug!(message = $msg $(, $($key = ?$value,)*)?);
            }
            _ => {
                tracing::trace!(message = $msg $(, $($key = ?$value,)*)?);
            }
        }
    };
}

/// 1 リクエスト分の識別情報。`inject_request_context` が extensions に入れる
#[derive(Clone, Debug)]
pub struct RequestContext {
    pub request_id: String,
    pub path: String,
    pub method: String,
}

impl RequestContext {
    /// クライアントが妥当な `x-request-id` を付けていればそれを引き継ぐ
    pub fn from_request(req: &Request<Body>) -> Self {
        let request_id = incoming_request_id(req.headers())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Self {
            request_id,
            path: req.uri().path().to_string(),
            method: req.method().to_string(),
        }
    }

    /// このリクエスト内のログすべてに ID・メソッド・パスを付けるスパン
    pub fn span(&self) -> Span {
        tracing::info_span!(
            "request",
            request_id = %self.request_id,
            method = %self.method,
            path = %self.path,
        )
    }
}

fn incoming_request_id(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(REQUEST_ID_HEADER)?.to_str().ok()?.trim();

    let acceptable = !value.is_empty()
        && value.len() <= MAX_REQUEST_ID_LEN
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');

    acceptable.then(|| value.to_string())
}

fn completion_level(status: StatusCode) -> Level {
    if status.is_server_error() {
        Level::ERROR
    } else if status.is_client_error() {
        Level::WARN
    } else {
        Level::INFO
    }
}

/// コンテキストを生成し、以降の処理をリクエストスパンの中で走らせる
///
/// 応答には同じ ID を `x-request-id` として返す。
pub async fn inject_request_context(mut req: Request<Body>, next: Next) -> Response {
    let context = RequestContext::from_request(&req);
    let span = context.span();
    let header_value = HeaderValue::from_str(&context.request_id).ok();

    req.extensions_mut().insert(context);
    let mut response = next.run(req).instrument(span).await;

    if let Some(value) = header_value {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// 開始と完了をログに残す。ID 等はスパン側が持つ
pub async fn logging_middleware(req: Request<Body>, next: Next) -> Response {
    let start = Instant::now();

    log_with_context!(Level::DEBUG, "Request started");

    let response = next.run(req).await;
    let status = response.status();

    log_with_context!(
        completion_level(status),
        "Request completed",
        "status" => status.as_u16(),
        "duration_ms" => start.elapsed().as_millis(),
    );

    response
}
