use crate::domain::feedback_form::RequestMetadata;
use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{header::USER_AGENT, request::Parts},
};
use std::convert::Infallible;
use std::net::SocketAddr;

/// 送信元 IP と User-Agent を取り出す Extractor
///
/// どちらも取得できなければ None のまま。リクエストを拒否することはない。
#[derive(Debug, Clone, Default)]
pub struct ClientMetadata(pub RequestMetadata);

impl<S> FromRequestParts<S> for ClientMetadata
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // into_make_service_with_connect_info で起動した場合のみ存在する
        let ip_address = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string());

        let user_agent = parts
            .headers
            .get(USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        Ok(ClientMetadata(RequestMetadata {
            ip_address,
            user_agent,
        }))
    }
}
