//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::{ProviderError, UploadError};

/// 应用层错误
///
/// 除 `ValidationError` 外均由上游服务引起，这一层不做任何重试
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 验证错误（客户端引起）
    #[error("{0}")]
    ValidationError(String),

    /// 图床上传失败
    #[error("{0}")]
    UploadError(String),

    /// 生成服务调用失败
    #[error("{0}")]
    ProviderError(String),

    /// 生成任务以失败状态结束
    #[error("{0}")]
    GenerationError(String),

    /// 轮询超过截止时间
    #[error("{0}")]
    TimeoutError(String),
}

impl ApplicationError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 是否由客户端引起
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }
}

impl From<UploadError> for ApplicationError {
    fn from(err: UploadError) -> Self {
        Self::UploadError(err.to_string())
    }
}

impl From<ProviderError> for ApplicationError {
    fn from(err: ProviderError) -> Self {
        Self::ProviderError(format!("ModelScope API error: {}", err))
    }
}
