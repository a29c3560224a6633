//! Baidu Upload Client - 把 data URL 上传到百度图床
//!
//! 实现 ImageHostPort trait
//!
//! 外部接口:
//! POST https://image.baidu.com/aigc/pic_upload
//! Request: token, scene, picInfo, timestamp (application/x-www-form-urlencoded)
//! Response: {"status": 0, "message": "success", "data": {"url": "..."}}
//!           {"status": 1, "message": "请您换张图片试试~"}

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use super::upload_token::{sign_upload, UPLOAD_SCENE};
use crate::application::ports::{ImageHostPort, UploadError};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=UTF-8";

/// 上传表单
#[derive(Debug, Serialize)]
struct UploadForm<'a> {
    token: String,
    scene: &'static str,
    #[serde(rename = "picInfo")]
    pic_info: &'a str,
    timestamp: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    /// 只有数值 0 表示成功，缺失或其他类型都按拒绝处理
    #[serde(default)]
    status: Option<Value>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<UploadData>,
}

#[derive(Debug, Deserialize)]
struct UploadData {
    #[serde(default)]
    url: Option<String>,
}

/// 百度图床客户端配置
#[derive(Debug, Clone)]
pub struct BaiduUploadClientConfig {
    /// 上传接口 URL
    pub url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for BaiduUploadClientConfig {
    fn default() -> Self {
        Self {
            url: "https://image.baidu.com/aigc/pic_upload".to_string(),
            timeout_secs: 120,
        }
    }
}

impl BaiduUploadClientConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// 百度图床客户端
pub struct BaiduUploadClient {
    client: Client,
    config: BaiduUploadClientConfig,
}

impl BaiduUploadClient {
    pub fn new(config: BaiduUploadClientConfig) -> Result<Self, UploadError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| UploadError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl ImageHostPort for BaiduUploadClient {
    async fn upload(&self, data_url: &str) -> Result<String, UploadError> {
        let timestamp = Utc::now().timestamp_millis().to_string();
        let form = UploadForm {
            token: sign_upload(data_url, &timestamp),
            scene: UPLOAD_SCENE,
            pic_info: data_url,
            timestamp,
        };

        tracing::debug!(
            url = %self.config.url,
            data_url_len = data_url.len(),
            "Sending image upload request"
        );

        let mut request = self
            .client
            .post(&self.config.url)
            .form(&form)
            .build()
            .map_err(|e| UploadError::Network(e.to_string()))?;
        // 图床要求显式声明 charset
        request
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| UploadError::Network(e.to_string()))?;

        let result: UploadResponse = response
            .json()
            .await
            .map_err(|e| UploadError::InvalidResponse(e.to_string()))?;

        if result.status.as_ref().and_then(Value::as_f64) == Some(0.0) {
            if let Some(url) = result.data.and_then(|d| d.url) {
                return Ok(url);
            }
            return Err(UploadError::InvalidResponse(
                "missing data.url in successful response".to_string(),
            ));
        }

        tracing::warn!(status = ?result.status, message = ?result.message, "Image upload rejected");
        Err(UploadError::Rejected(
            result
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "Unknown error".to_string()),
        ))
    }
}
