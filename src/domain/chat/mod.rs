//! Chat Context - 聊天协议限界上下文
//!
//! 职责:
//! - 聊天消息解析与输入提取
//! - chat completion 响应与流式分块渲染

mod completion;
mod message;

pub use completion::{
    build_stream_chunks, render_content, render_event_stream, AssistantMessage,
    ChatCompletionChunk, ChatCompletionResponse, Choice, ChunkChoice, ChunkDelta, Usage,
    NO_IMAGE_PLACEHOLDER, STREAM_DONE,
};
pub use message::{
    extract_last_user_input, ChatMessage, ContentPart, ExtractedInput, ImageRef, MessageContent,
};
