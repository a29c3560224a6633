//! Image Host Port - 图床上传抽象
//!
//! 把内联图片（data URL）上传到外部图床，换取可公开访问的 URL

use async_trait::async_trait;
use thiserror::Error;

/// 图床上传错误
#[derive(Debug, Error)]
pub enum UploadError {
    /// 图床拒绝了图片（status != 0）
    #[error("Image upload failed: {0}")]
    Rejected(String),

    #[error("Network error during image upload: {0}")]
    Network(String),

    #[error("Invalid upload response: {0}")]
    InvalidResponse(String),
}

/// Image Host Port
#[async_trait]
pub trait ImageHostPort: Send + Sync {
    /// 上传 data URL，返回托管后的 URL
    async fn upload(&self, data_url: &str) -> Result<String, UploadError>;
}
