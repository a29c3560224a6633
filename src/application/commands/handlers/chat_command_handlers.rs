//! Chat Completion Command Handler
//!
//! 编排一次请求：提取输入 → 规范化图片 → 提交任务 → 轮询 → 渲染响应

use std::sync::Arc;

use crate::application::commands::chat_commands::*;
use crate::application::error::ApplicationError;
use crate::application::normalizer::ImageNormalizer;
use crate::application::poller::{PollConfig, TaskPoller};
use crate::application::ports::{GenerationProviderPort, ImageHostPort};
use crate::domain::chat::{build_stream_chunks, extract_last_user_input, ChatCompletionResponse};
use crate::domain::generation::GenerationPayload;

/// 下游生成接口只接受一张参考图
pub const MAX_REFERENCE_IMAGES: usize = 1;

/// ChatCompletion Handler
pub struct ChatCompletionHandler {
    normalizer: ImageNormalizer,
    provider: Arc<dyn GenerationProviderPort>,
    poller: TaskPoller,
}

impl ChatCompletionHandler {
    pub fn new(
        image_host: Arc<dyn ImageHostPort>,
        provider: Arc<dyn GenerationProviderPort>,
        poll_config: PollConfig,
    ) -> Self {
        Self {
            normalizer: ImageNormalizer::new(image_host),
            poller: TaskPoller::new(provider.clone(), poll_config),
            provider,
        }
    }

    pub async fn handle(
        &self,
        cmd: ChatCompletionCommand,
    ) -> Result<ChatCompletionOutput, ApplicationError> {
        // 字段验证
        if cmd.model.is_empty() {
            return Err(ApplicationError::validation("Model is required"));
        }
        if cmd.messages.is_empty() {
            return Err(ApplicationError::validation("Messages are required"));
        }

        let input = extract_last_user_input(&cmd.messages);
        if input.is_empty() {
            return Err(ApplicationError::validation(
                "No text content found in the last user message",
            ));
        }
        if input.images.len() > MAX_REFERENCE_IMAGES {
            return Err(ApplicationError::validation("Only 1 image is supported"));
        }

        tracing::info!(
            model = %cmd.model,
            prompt_len = input.prompt.chars().count(),
            has_image = !input.images.is_empty(),
            stream = cmd.stream,
            "Handling chat completion"
        );

        let image_url = match input.images.first() {
            Some(image_ref) => Some(self.normalizer.normalize(image_ref).await?),
            None => None,
        };

        let payload = GenerationPayload::new(&cmd.model, input.prompt)
            .with_image_url(image_url)
            .with_passthrough(&cmd.options);

        let task_id = self.provider.submit(&cmd.credential, &payload).await?;
        tracing::info!(task_id = %task_id, model = %cmd.model, "Generation task submitted");

        let result = self.poller.poll(&cmd.credential, &task_id).await?;

        Ok(if cmd.stream {
            ChatCompletionOutput::Stream(build_stream_chunks(&cmd.model, &result))
        } else {
            ChatCompletionOutput::Completion(ChatCompletionResponse::from_task(&cmd.model, &result))
        })
    }
}
