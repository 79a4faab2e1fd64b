// tests/common/request.rs
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request},
    response::Response,
};
use serde_json::Value;

/// application/x-www-form-urlencoded の本文を組み立てる
pub fn encode_form(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(key, value)| {
            format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// フォーム送信リクエストを作成
pub fn create_form_request(uri: &str, fields: &[(&str, &str)]) -> Request<Body> {
    let body = encode_form(fields);

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(header::CONTENT_LENGTH, body.len())
        .header(header::USER_AGENT, "feedback-tests/1.0")
        .body(Body::from(body))
        .unwrap()
}

/// ブラウザの FormData 送信と同じ multipart/form-data リクエストを作成
pub fn create_multipart_request(uri: &str, fields: &[(&str, &str)]) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(b"------boundary\r\n");
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(b"------boundary--\r\n");

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "multipart/form-data; boundary=----boundary")
        .header(header::CONTENT_LENGTH, body.len())
        .header(header::USER_AGENT, "feedback-tests/1.0")
        .body(Body::from(body))
        .unwrap()
}

pub fn create_get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// ワークショップの典型的な回答
pub fn valid_feedback() -> Vec<(&'static str, &'static str)> {
    vec![
        ("content_quality", "5"),
        ("clarity", "4"),
        ("engagement", "3"),
        ("satisfaction", "5"),
        ("apply_likelihood", "2"),
        ("most_valuable", "great"),
        ("improvements", "more examples"),
        ("recommend", "yes"),
    ]
}

/// 指定フィールドだけ差し替えた回答
pub fn feedback_with(field: &str, value: &'static str) -> Vec<(&'static str, &'static str)> {
    valid_feedback()
        .into_iter()
        .map(|(key, original)| if key == field { (key, value) } else { (key, original) })
        .collect()
}

/// 指定フィールドを除いた回答
pub fn feedback_without(field: &str) -> Vec<(&'static str, &'static str)> {
    valid_feedback()
        .into_iter()
        .filter(|(key, _)| *key != field)
        .collect()
}

pub async fn body_string(response: Response) -> String {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}
