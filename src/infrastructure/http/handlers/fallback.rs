//! Fallback Handler
//!
//! 未知路径和不支持的方法统一返回 404 错误信封

use crate::infrastructure::http::error::ApiError;

pub async fn not_found() -> ApiError {
    ApiError::NotFound("Not Found".to_string())
}
