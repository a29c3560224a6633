//! Model Query Handlers

use std::sync::Arc;

use serde::Serialize;

use crate::application::queries::ListModels;

/// 模型归属方
pub const MODEL_OWNER: &str = "modelscope";

// ============================================================================
// Response DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelEntry {
    pub id: String,
    pub object: &'static str,
    pub owned_by: &'static str,
}

/// 模型列表响应
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelList {
    pub object: &'static str,
    pub data: Vec<ModelEntry>,
}

// ============================================================================
// Handlers
// ============================================================================

/// ListModels Handler
///
/// 模型列表在启动时确定，之后只读
pub struct ListModelsHandler {
    models: Arc<[String]>,
}

impl ListModelsHandler {
    pub fn new(models: impl Into<Arc<[String]>>) -> Self {
        Self {
            models: models.into(),
        }
    }

    pub fn handle(&self, _query: ListModels) -> ModelList {
        ModelList {
            object: "list",
            data: self
                .models
                .iter()
                .map(|id| ModelEntry {
                    id: id.clone(),
                    object: "model",
                    owned_by: MODEL_OWNER,
                })
                .collect(),
        }
    }
}
