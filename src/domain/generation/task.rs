//! Generation Context - Task

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// 任务状态
///
/// 提供方只有 `SUCCEED` 和 `FAILED` 两个终止状态，其余均视为仍在运行
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    Succeed,
    Failed,
    Running(String),
}

impl TaskStatus {
    pub fn from_str(s: &str) -> Self {
        match s {
            "SUCCEED" => TaskStatus::Succeed,
            "FAILED" => TaskStatus::Failed,
            other => TaskStatus::Running(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TaskStatus::Succeed => "SUCCEED",
            TaskStatus::Failed => "FAILED",
            TaskStatus::Running(s) => s,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, TaskStatus::Running(_))
    }
}

/// 一次任务状态查询的结果
///
/// 保留提供方返回的完整载荷，`extra` 中是未单独建模的字段
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskSnapshot {
    #[serde(default)]
    pub task_id: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub task_status: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub output_images: Vec<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 显式的 `null` 与缺失字段同样按默认值处理
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl TaskSnapshot {
    pub fn with_status(status: &str) -> Self {
        Self {
            task_status: status.to_string(),
            ..Default::default()
        }
    }

    pub fn succeeded(output_images: Vec<String>) -> Self {
        Self {
            task_status: "SUCCEED".to_string(),
            output_images,
            ..Default::default()
        }
    }

    pub fn status(&self) -> TaskStatus {
        TaskStatus::from_str(&self.task_status)
    }
}
