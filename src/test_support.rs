//! 测试用的内存端口实现

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ports::{GenerationProviderPort, ImageHostPort, ProviderError, UploadError};
use crate::domain::generation::{GenerationPayload, TaskSnapshot};

/// 固定返回结果的图床
pub struct FakeImageHost {
    result: Result<String, String>,
    uploads: AtomicU32,
}

impl FakeImageHost {
    pub fn returning(url: &str) -> Self {
        Self {
            result: Ok(url.to_string()),
            uploads: AtomicU32::new(0),
        }
    }

    pub fn rejecting(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            uploads: AtomicU32::new(0),
        }
    }

    pub fn upload_count(&self) -> u32 {
        self.uploads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageHostPort for FakeImageHost {
    async fn upload(&self, _data_url: &str) -> Result<String, UploadError> {
        self.uploads.fetch_add(1, Ordering::SeqCst);
        self.result.clone().map_err(UploadError::Rejected)
    }
}

/// 单次状态查询的脚本化结果
pub enum PollStep {
    Status(&'static str),
    Succeed(Vec<&'static str>),
    Error(ProviderError),
}

/// 按脚本返回任务状态的生成服务；脚本耗尽后一直返回 PENDING
pub struct FakeProvider {
    steps: Mutex<VecDeque<PollStep>>,
    submit_error: Mutex<Option<ProviderError>>,
    submitted: Mutex<Vec<GenerationPayload>>,
    last_credential: Mutex<Option<String>>,
    fetches: AtomicU32,
}

impl FakeProvider {
    pub fn with_steps(steps: Vec<PollStep>) -> Self {
        Self {
            steps: Mutex::new(steps.into()),
            submit_error: Mutex::new(None),
            submitted: Mutex::new(Vec::new()),
            last_credential: Mutex::new(None),
            fetches: AtomicU32::new(0),
        }
    }

    pub fn failing_submit(self, error: ProviderError) -> Self {
        *self.submit_error.lock().unwrap() = Some(error);
        self
    }

    pub fn fetch_count(&self) -> u32 {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn submitted(&self) -> Vec<GenerationPayload> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn last_credential(&self) -> Option<String> {
        self.last_credential.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationProviderPort for FakeProvider {
    async fn submit(
        &self,
        credential: &str,
        payload: &GenerationPayload,
    ) -> Result<String, ProviderError> {
        *self.last_credential.lock().unwrap() = Some(credential.to_string());
        if let Some(error) = self.submit_error.lock().unwrap().take() {
            return Err(error);
        }
        self.submitted.lock().unwrap().push(payload.clone());
        Ok("task-1".to_string())
    }

    async fn fetch_task(
        &self,
        credential: &str,
        _task_id: &str,
    ) -> Result<TaskSnapshot, ProviderError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        *self.last_credential.lock().unwrap() = Some(credential.to_string());

        match self.steps.lock().unwrap().pop_front() {
            Some(PollStep::Status(status)) => Ok(TaskSnapshot::with_status(status)),
            Some(PollStep::Succeed(urls)) => Ok(TaskSnapshot::succeeded(
                urls.into_iter().map(String::from).collect(),
            )),
            Some(PollStep::Error(e)) => Err(e),
            None => Ok(TaskSnapshot::with_status("PENDING")),
        }
    }
}
