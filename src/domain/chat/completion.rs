//! Chat Context - Completion
//!
//! 把生成任务结果渲染为 chat completion 响应或模拟的流式分块

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::generation::TaskSnapshot;

/// 任务成功但没有返回图片时的占位文本
pub const NO_IMAGE_PLACEHOLDER: &str = "图像生成完成，但未返回URL。";

/// 流结束标记
pub const STREAM_DONE: &str = "[DONE]";

/// 用量统计（固定占位值，并非真实 token 数）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl Usage {
    pub const PLACEHOLDER: Usage = Usage {
        prompt_tokens: 1,
        completion_tokens: 1,
        total_tokens: 2,
    };
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssistantMessage {
    pub role: &'static str,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Choice {
    pub index: u32,
    pub message: AssistantMessage,
    pub finish_reason: &'static str,
}

/// 非流式响应
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatCompletionResponse {
    pub id: String,
    pub object: &'static str,
    pub created: i64,
    pub model: String,
    pub choices: Vec<Choice>,
    pub usage: Usage,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChunkDelta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChunkChoice {
    pub index: u32,
    pub delta: ChunkDelta,
    pub finish_reason: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

/// 流式分块
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatCompletionChunk {
    pub id: String,
    pub object: &'static str,
    pub created: i64,
    pub model: String,
    pub choices: Vec<ChunkChoice>,
}

fn completion_id() -> String {
    format!("chatcmpl-{}", Uuid::new_v4().simple())
}

/// 把输出图片渲染为 Markdown 图片标记，每行一个
pub fn render_content(output_images: &[String]) -> String {
    if output_images.is_empty() {
        return NO_IMAGE_PLACEHOLDER.to_string();
    }
    output_images
        .iter()
        .map(|url| format!("![]({})", url))
        .collect::<Vec<_>>()
        .join("\n")
}

impl ChatCompletionResponse {
    pub fn from_task(model: &str, result: &TaskSnapshot) -> Self {
        Self {
            id: completion_id(),
            object: "chat.completion",
            created: Utc::now().timestamp(),
            model: model.to_string(),
            choices: vec![Choice {
                index: 0,
                message: AssistantMessage {
                    role: "assistant",
                    content: render_content(&result.output_images),
                },
                finish_reason: "stop",
            }],
            usage: Usage::PLACEHOLDER,
        }
    }

    pub fn content(&self) -> Option<&str> {
        self.choices.first().map(|c| c.message.content.as_str())
    }
}

/// 构建模拟流的三个分块
///
/// 结果在第一个分块发出前已完整可知，顺序固定：角色声明、完整内容、结束（带用量）
pub fn build_stream_chunks(model: &str, result: &TaskSnapshot) -> Vec<ChatCompletionChunk> {
    let id = completion_id();
    let created = Utc::now().timestamp();
    let chunk = |delta: ChunkDelta, finish_reason: Option<&'static str>, usage: Option<Usage>| {
        ChatCompletionChunk {
            id: id.clone(),
            object: "chat.completion.chunk",
            created,
            model: model.to_string(),
            choices: vec![ChunkChoice {
                index: 0,
                delta,
                finish_reason,
                usage,
            }],
        }
    };

    vec![
        chunk(
            ChunkDelta {
                role: Some("assistant"),
                content: Some(String::new()),
            },
            None,
            None,
        ),
        chunk(
            ChunkDelta {
                role: None,
                content: Some(render_content(&result.output_images)),
            },
            None,
            None,
        ),
        chunk(ChunkDelta::default(), Some("stop"), Some(Usage::PLACEHOLDER)),
    ]
}

/// 渲染为 `text/event-stream` 响应体
pub fn render_event_stream(chunks: &[ChatCompletionChunk]) -> Result<String, serde_json::Error> {
    let mut body = String::new();
    for chunk in chunks {
        body.push_str("data: ");
        body.push_str(&serde_json::to_string(chunk)?);
        body.push_str("\n\n");
    }
    body.push_str("data: ");
    body.push_str(STREAM_DONE);
    body.push_str("\n\n");
    Ok(body)
}
