//! Generation Context - Payload

use serde::Serialize;
use serde_json::{Map, Value};

/// 从入站请求原样透传给提供方的可选参数
pub const PASSTHROUGH_PARAMS: &[&str] = &[
    "negative_prompt",
    "size",
    "seed",
    "steps",
    "guidance",
    "loras",
];

/// 图像生成请求载荷
///
/// 可选参数只有在入站请求中出现时才会带上，不做默认值填充
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationPayload {
    pub model: String,
    pub prompt: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(flatten)]
    pub options: Map<String, Value>,
}

impl GenerationPayload {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            image_url: None,
            options: Map::new(),
        }
    }

    pub fn with_image_url(mut self, image_url: Option<String>) -> Self {
        self.image_url = image_url;
        self
    }

    /// 从请求体中挑出透传参数（包括显式的 null）
    pub fn with_passthrough(mut self, request: &Map<String, Value>) -> Self {
        for &param in PASSTHROUGH_PARAMS {
            if let Some(value) = request.get(param) {
                self.options.insert(param.to_string(), value.clone());
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_payload_omits_optionals() {
        let payload = GenerationPayload::new("Qwen/Qwen-Image", "a golden cat");
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"model": "Qwen/Qwen-Image", "prompt": "a golden cat"})
        );
    }

    #[test]
    fn test_passthrough_only_present_params() {
        let request = json!({
            "model": "ignored",
            "messages": [],
            "stream": true,
            "size": "1024x1024",
            "seed": 7,
            "loras": {"repo/a": 0.6, "repo/b": 0.4},
            "negative_prompt": null,
            "temperature": 0.2
        });

        let payload = GenerationPayload::new("Qwen/Qwen-Image-Edit", "fix it")
            .with_image_url(Some("http://x/ref.png".to_string()))
            .with_passthrough(request.as_object().unwrap());

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "model": "Qwen/Qwen-Image-Edit",
                "prompt": "fix it",
                "image_url": "http://x/ref.png",
                "size": "1024x1024",
                "seed": 7,
                "loras": {"repo/a": 0.6, "repo/b": 0.4},
                "negative_prompt": null
            })
        );
    }
}
