//! Chat Completion Handler
//!
//! POST /v1/chat/completions

use axum::{
    body::Bytes,
    extract::{FromRequest, Request, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::application::{ChatCompletionCommand, ChatCompletionOutput};
use crate::domain::chat::render_event_stream;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// 从 Authorization 头中取出 Bearer 凭证
fn bearer_credential(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_PREFIX)
}

/// Chat completion
///
/// 先校验凭证再读取请求体，超出大小上限的未认证请求同样得到 401
pub async fn chat_completions(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Response, ApiError> {
    let credential = bearer_credential(request.headers())
        .ok_or_else(|| ApiError::Unauthorized("Invalid authorization format".to_string()))?
        .to_string();

    let body = Bytes::from_request(request, &state).await?;
    let body: Map<String, Value> = serde_json::from_slice(&body)
        .map_err(|_| ApiError::BadRequest("Invalid JSON in request body".to_string()))?;

    let cmd = ChatCompletionCommand::from_body(credential, body);
    let output = state.chat_completion_handler.handle(cmd).await?;

    match output {
        ChatCompletionOutput::Completion(response) => Ok(Json(response).into_response()),
        ChatCompletionOutput::Stream(chunks) => {
            let body = render_event_stream(&chunks)
                .map_err(|e| ApiError::Internal(format!("Failed to encode stream: {}", e)))?;
            Ok(([(header::CONTENT_TYPE, "text/event-stream")], body).into_response())
        }
    }
}
