//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Chat Context: 聊天消息提取与响应渲染
//! - Generation Context: 图像生成载荷与任务状态

pub mod chat;
pub mod generation;
