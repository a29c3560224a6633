//! ImgBridge - OpenAI 兼容的图像生成网关
//!
//! 把 `/v1/chat/completions` 请求转换为 ModelScope 异步图像生成任务，
//! 轮询完成后以 Markdown 图片链接的形式返回。
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Chat Context: 消息解析、完成响应与流式分片
//! - Generation Context: 生成请求载荷、任务状态
//!
//! 应用层 (application/):
//! - Ports: 端口定义（ImageHostPort, GenerationProviderPort）
//! - Commands: chat completion 命令处理器
//! - Queries: 模型列表查询
//! - Normalizer / Poller: 图片归一化与任务轮询
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: OpenAI 兼容接口
//! - Adapters: 百度图床客户端, ModelScope 客户端

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

#[cfg(test)]
mod test_support;

pub use config::{load_config, AppConfig};
