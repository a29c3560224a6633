//! Model Catalog Handler
//!
//! GET /v1/models, GET /models

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{ListModels, ModelList};
use crate::infrastructure::http::state::AppState;

/// 列出支持的模型
pub async fn list_models(State(state): State<Arc<AppState>>) -> Json<ModelList> {
    Json(state.list_models_handler.handle(ListModels))
}
