//! Chat Completion Commands

use serde_json::{Map, Value};

use crate::domain::chat::{ChatCompletionChunk, ChatCompletionResponse, ChatMessage};

/// 一次 chat completion 请求
#[derive(Debug, Clone, Default)]
pub struct ChatCompletionCommand {
    /// 透传给生成服务的 Bearer 凭证
    pub credential: String,
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
    /// 原始请求体，用于挑选透传参数
    pub options: Map<String, Value>,
}

impl ChatCompletionCommand {
    /// 从原始请求体构建命令
    ///
    /// `model` 非字符串视为缺失；`stream` 按真值判断（见 [`is_truthy`]）
    pub fn from_body(credential: impl Into<String>, body: Map<String, Value>) -> Self {
        let model = body
            .get("model")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let messages = body
            .get("messages")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(ChatMessage::from_value).collect())
            .unwrap_or_default();
        let stream = body.get("stream").is_some_and(is_truthy);

        Self {
            credential: credential.into(),
            model,
            messages,
            stream,
            options: body,
        }
    }
}

/// JSON 值的真值判断
///
/// `false`、`null`、`0`、`NaN` 和空字符串为假；数组与对象（包括空的）为真
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// 命令执行结果
#[derive(Debug, Clone)]
pub enum ChatCompletionOutput {
    Completion(ChatCompletionResponse),
    Stream(Vec<ChatCompletionChunk>),
}
