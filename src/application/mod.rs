//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（ImageHost、GenerationProvider）
//! - commands: CQRS 命令及处理器（chat completion）
//! - queries: CQRS 查询及处理器（模型列表）
//! - normalizer / poller: 图片规范化与任务轮询
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod normalizer;
pub mod poller;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    handlers::{ChatCompletionHandler, MAX_REFERENCE_IMAGES},
    ChatCompletionCommand, ChatCompletionOutput,
};

pub use error::ApplicationError;

pub use normalizer::{is_inline_image, ImageNormalizer, INLINE_IMAGE_PREFIX};
pub use poller::{PollConfig, TaskPoller};

pub use ports::{GenerationProviderPort, ImageHostPort, ProviderError, UploadError};

pub use queries::{
    handlers::{ListModelsHandler, ModelEntry, ModelList, MODEL_OWNER},
    ListModels,
};
