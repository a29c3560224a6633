//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：处理 chat completion 请求

mod chat_commands;

pub mod handlers;

pub use chat_commands::*;
