//! Chat Context - Messages
//!
//! 聊天消息模型以及从消息历史中提取提示词和参考图片

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// 聊天消息
///
/// 反序列化是宽松的：无法识别的内容形态不会导致整个请求失败
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub role: String,

    #[serde(default, deserialize_with = "lenient_content")]
    pub content: Option<MessageContent>,
}

impl ChatMessage {
    pub fn user(content: impl Into<MessageContent>) -> Self {
        Self {
            role: "user".to_string(),
            content: Some(content.into()),
        }
    }

    pub fn assistant(content: impl Into<MessageContent>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: Some(content.into()),
        }
    }

    /// 从任意 JSON 值解析消息
    ///
    /// 非对象或形态不合法的消息被视为没有可用内容的空消息
    pub fn from_value(value: &Value) -> Self {
        match serde_json::from_value(value.clone()) {
            Ok(message) => message,
            Err(e) => {
                tracing::debug!(error = %e, "Skipping unparsable chat message");
                Self::default()
            }
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == "user"
    }
}

/// 消息内容：纯文本或内容片段序列
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(#[serde(deserialize_with = "lenient_parts")] Vec<ContentPart>),
}

impl From<&str> for MessageContent {
    fn from(text: &str) -> Self {
        MessageContent::Text(text.to_string())
    }
}

impl From<String> for MessageContent {
    fn from(text: String) -> Self {
        MessageContent::Text(text)
    }
}

impl From<Vec<ContentPart>> for MessageContent {
    fn from(parts: Vec<ContentPart>) -> Self {
        MessageContent::Parts(parts)
    }
}

/// 内容片段
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text {
        #[serde(default)]
        text: String,
    },
    ImageUrl {
        #[serde(default)]
        image_url: Option<ImageRef>,
    },
    /// 其他类型（如 input_audio），忽略
    #[serde(other)]
    Unsupported,
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text { text: text.into() }
    }

    pub fn image(url: impl Into<String>) -> Self {
        ContentPart::ImageUrl {
            image_url: Some(ImageRef::Url(url.into())),
        }
    }
}

/// 图片引用：既可能是裸字符串，也可能是带 url 字段的对象
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ImageRef {
    Url(String),
    Object {
        #[serde(default)]
        url: Option<String>,
    },
}

impl ImageRef {
    /// 解析出的 URL；空字符串或缺失视为无法解析
    pub fn url(&self) -> Option<&str> {
        let url = match self {
            ImageRef::Url(url) => Some(url.as_str()),
            ImageRef::Object { url } => url.as_deref(),
        };
        url.filter(|u| !u.is_empty())
    }
}

/// 内容形态无法识别时视为没有内容，但保留消息的 role
fn lenient_content<'de, D>(deserializer: D) -> Result<Option<MessageContent>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| serde_json::from_value(v).ok()))
}

/// 逐个解析内容片段，跳过无法识别的片段
fn lenient_parts<'de, D>(deserializer: D) -> Result<Vec<ContentPart>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect())
}

/// 从最后一条用户消息中提取的输入
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedInput {
    /// 提示词
    pub prompt: String,
    /// 参考图片（URL 或 data URL），保持原始顺序
    pub images: Vec<String>,
}

impl ExtractedInput {
    /// 提示词为空时调用方必须拒绝请求
    pub fn is_empty(&self) -> bool {
        self.prompt.is_empty()
    }

    fn from_message(message: &ChatMessage) -> Self {
        let mut input = Self::default();

        match &message.content {
            Some(MessageContent::Text(text)) => input.prompt = text.clone(),
            Some(MessageContent::Parts(parts)) => {
                for part in parts {
                    match part {
                        // 最后一个非空文本片段生效
                        ContentPart::Text { text } if !text.is_empty() => {
                            input.prompt = text.clone();
                        }
                        ContentPart::ImageUrl {
                            image_url: Some(image_ref),
                        } => {
                            if let Some(url) = image_ref.url() {
                                input.images.push(url.to_string());
                            }
                        }
                        _ => {}
                    }
                }
            }
            None => {}
        }

        input
    }
}

/// 提取最后一条用户消息的提示词和图片
///
/// 只考虑最后一条 `role == "user"` 的消息，更早的用户消息被完全忽略。
pub fn extract_last_user_input(messages: &[ChatMessage]) -> ExtractedInput {
    messages
        .iter()
        .rev()
        .find(|m| m.is_user())
        .map(ExtractedInput::from_message)
        .unwrap_or_default()
}
