//! Task Poller - 轮询异步生成任务直到终止状态或截止时间

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::application::error::ApplicationError;
use crate::application::ports::GenerationProviderPort;
use crate::domain::generation::{TaskSnapshot, TaskStatus};

/// 轮询配置
#[derive(Debug, Clone, Copy)]
pub struct PollConfig {
    /// 整体截止时间
    pub timeout: Duration,
    /// 固定轮询间隔（非指数退避）
    pub interval: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            interval: Duration::from_secs(2),
        }
    }
}

pub struct TaskPoller {
    provider: Arc<dyn GenerationProviderPort>,
    config: PollConfig,
}

impl TaskPoller {
    pub fn new(provider: Arc<dyn GenerationProviderPort>, config: PollConfig) -> Self {
        Self { provider, config }
    }

    /// 轮询任务
    ///
    /// - `SUCCEED`: 返回完整的任务快照
    /// - `FAILED`: 立即返回 `GenerationError`，不再查询
    /// - 非 2xx 响应: 立即返回 `ProviderError`
    /// - 传输层错误或其他状态: 等待一个间隔后重试
    /// - 超过截止时间: `TimeoutError`
    pub async fn poll(
        &self,
        credential: &str,
        task_id: &str,
    ) -> Result<TaskSnapshot, ApplicationError> {
        let started = Instant::now();
        let mut attempts: u32 = 0;

        while started.elapsed() < self.config.timeout {
            attempts += 1;

            match self.provider.fetch_task(credential, task_id).await {
                Ok(snapshot) => match snapshot.status() {
                    TaskStatus::Succeed => {
                        tracing::info!(
                            task_id = %task_id,
                            attempts = attempts,
                            images = snapshot.output_images.len(),
                            "Generation task succeeded"
                        );
                        return Ok(snapshot);
                    }
                    TaskStatus::Failed => {
                        tracing::warn!(task_id = %task_id, attempts = attempts, "Generation task failed");
                        return Err(ApplicationError::GenerationError(
                            "Image generation failed".to_string(),
                        ));
                    }
                    TaskStatus::Running(status) => {
                        tracing::debug!(task_id = %task_id, status = %status, "Task still running");
                    }
                },
                Err(e) if e.is_transient() => {
                    tracing::warn!(task_id = %task_id, error = %e, "Task status check failed, retrying");
                }
                Err(e) => {
                    return Err(ApplicationError::ProviderError(format!(
                        "Task check failed: {}",
                        e
                    )));
                }
            }

            tokio::time::sleep(self.config.interval).await;
        }

        tracing::warn!(
            task_id = %task_id,
            attempts = attempts,
            timeout_secs = self.config.timeout.as_secs(),
            "Generation task timed out"
        );
        Err(ApplicationError::TimeoutError("Task timeout".to_string()))
    }
}
