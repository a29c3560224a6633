//! ModelScope Client - 调用 ModelScope 异步图像生成接口
//!
//! 实现 GenerationProviderPort trait
//!
//! 外部接口:
//! POST {api_url}            X-ModelScope-Async-Mode: true  →  {"task_id": "..."}
//! GET  {task_url}/{task_id} X-ModelScope-Task-Type: image_generation
//!                           →  {"task_status": "SUCCEED", "output_images": [...]}

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use std::time::Duration;

use crate::application::ports::{GenerationProviderPort, ProviderError};
use crate::domain::generation::{GenerationPayload, TaskSnapshot};

const ASYNC_MODE_HEADER: &str = "X-ModelScope-Async-Mode";
const TASK_TYPE_HEADER: &str = "X-ModelScope-Task-Type";
const TASK_TYPE_IMAGE_GENERATION: &str = "image_generation";

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    task_id: String,
}

/// ModelScope 客户端配置
#[derive(Debug, Clone)]
pub struct ModelScopeClientConfig {
    /// 任务提交接口
    pub api_url: String,
    /// 任务查询接口前缀
    pub task_url: String,
    /// 单次请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for ModelScopeClientConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api-inference.modelscope.cn/v1/images/generations".to_string(),
            task_url: "https://api-inference.modelscope.cn/v1/tasks".to_string(),
            timeout_secs: 120,
        }
    }
}

impl ModelScopeClientConfig {
    /// 以同一个 base URL 派生两个接口地址
    pub fn with_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            api_url: format!("{}/v1/images/generations", base),
            task_url: format!("{}/v1/tasks", base),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// ModelScope 客户端
pub struct ModelScopeClient {
    client: Client,
    config: ModelScopeClientConfig,
}

impl ModelScopeClient {
    pub fn new(config: ModelScopeClientConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn task_url(&self, task_id: &str) -> String {
        format!("{}/{}", self.config.task_url.trim_end_matches('/'), task_id)
    }

    async fn send(request: RequestBuilder) -> Result<Response, ProviderError> {
        let response = request
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl GenerationProviderPort for ModelScopeClient {
    async fn submit(
        &self,
        credential: &str,
        payload: &GenerationPayload,
    ) -> Result<String, ProviderError> {
        tracing::debug!(
            url = %self.config.api_url,
            model = %payload.model,
            has_image = payload.image_url.is_some(),
            "Submitting generation task"
        );

        let request = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(credential)
            .header(ASYNC_MODE_HEADER, "true")
            .json(payload);

        let response = Self::send(request).await?;
        let submitted: SubmitResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        Ok(submitted.task_id)
    }

    async fn fetch_task(
        &self,
        credential: &str,
        task_id: &str,
    ) -> Result<TaskSnapshot, ProviderError> {
        let request = self
            .client
            .get(self.task_url(task_id))
            .bearer_auth(credential)
            .header(TASK_TYPE_HEADER, TASK_TYPE_IMAGE_GENERATION);

        let response = Self::send(request).await?;
        response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))
    }
}
