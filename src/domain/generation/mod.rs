//! Generation Context - 图像生成限界上下文
//!
//! 职责:
//! - 生成请求载荷
//! - 异步任务状态快照

mod payload;
mod task;

pub use payload::{GenerationPayload, PASSTHROUGH_PARAMS};
pub use task::{TaskSnapshot, TaskStatus};
