//! Generation Provider Port - 异步图像生成服务抽象
//!
//! 定义任务提交和状态查询接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::generation::{GenerationPayload, TaskSnapshot};

/// 生成服务错误
#[derive(Debug, Error)]
pub enum ProviderError {
    /// 传输层错误（连接失败、超时等）
    #[error("Network error: {0}")]
    Network(String),

    /// 提供方返回了非 2xx 状态码，携带原始响应体
    #[error("{body}")]
    Status { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// 是否为可在轮询截止时间内重试的传输层错误
    pub fn is_transient(&self) -> bool {
        matches!(self, ProviderError::Network(_))
    }
}

/// Generation Provider Port
///
/// 凭证由调用方逐请求传入，适配器本身不持有任何密钥
#[async_trait]
pub trait GenerationProviderPort: Send + Sync {
    /// 以异步模式提交生成任务，返回任务 ID
    async fn submit(
        &self,
        credential: &str,
        payload: &GenerationPayload,
    ) -> Result<String, ProviderError>;

    /// 查询一次任务状态
    async fn fetch_task(&self, credential: &str, task_id: &str)
        -> Result<TaskSnapshot, ProviderError>;
}
