//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod generation_provider;
mod image_host;

pub use generation_provider::{GenerationProviderPort, ProviderError};
pub use image_host::{ImageHostPort, UploadError};
