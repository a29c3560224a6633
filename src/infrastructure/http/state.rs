//! Application State
//!
//! 所有请求共享的只读状态：命令/查询处理器及其依赖的端口

use std::sync::Arc;

use crate::application::{
    ChatCompletionHandler, GenerationProviderPort, ImageHostPort, ListModelsHandler, PollConfig,
};

/// 应用状态
///
/// 请求之间没有可变共享状态，因此不需要任何锁
pub struct AppState {
    // ========== Command Handlers ==========
    pub chat_completion_handler: ChatCompletionHandler,

    // ========== Query Handlers ==========
    pub list_models_handler: ListModelsHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        image_host: Arc<dyn ImageHostPort>,
        provider: Arc<dyn GenerationProviderPort>,
        poll_config: PollConfig,
        models: Vec<String>,
    ) -> Self {
        Self {
            chat_completion_handler: ChatCompletionHandler::new(image_host, provider, poll_config),
            list_models_handler: ListModelsHandler::new(models),
        }
    }
}
