//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// ModelScope 生成服务配置
    #[serde(default)]
    pub modelscope: ModelScopeConfig,

    /// 图床上传配置
    #[serde(default)]
    pub upload: UploadConfig,

    /// 模型目录配置
    #[serde(default)]
    pub models: ModelsConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 请求体大小上限（字节），内联图片会让请求体变大
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_max_body_bytes() -> usize {
    50 * 1024 * 1024 // 50 MB
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// ModelScope 生成服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct ModelScopeConfig {
    /// 任务提交接口
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// 任务查询接口前缀
    #[serde(default = "default_task_url")]
    pub task_url: String,

    /// 单次 HTTP 请求超时时间（秒）
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// 轮询截止时间（秒）
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_secs: u64,

    /// 轮询间隔（秒）
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

fn default_api_url() -> String {
    "https://api-inference.modelscope.cn/v1/images/generations".to_string()
}

fn default_task_url() -> String {
    "https://api-inference.modelscope.cn/v1/tasks".to_string()
}

fn default_request_timeout() -> u64 {
    120
}

fn default_poll_timeout() -> u64 {
    60
}

fn default_poll_interval() -> u64 {
    2
}

impl Default for ModelScopeConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            task_url: default_task_url(),
            request_timeout_secs: default_request_timeout(),
            poll_timeout_secs: default_poll_timeout(),
            poll_interval_secs: default_poll_interval(),
        }
    }
}

/// 图床上传配置
#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    /// 上传接口
    #[serde(default = "default_upload_url")]
    pub url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_request_timeout")]
    pub timeout_secs: u64,
}

fn default_upload_url() -> String {
    "https://image.baidu.com/aigc/pic_upload".to_string()
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            url: default_upload_url(),
            timeout_secs: default_request_timeout(),
        }
    }
}

/// 模型目录配置
#[derive(Debug, Clone, Deserialize)]
pub struct ModelsConfig {
    /// `/v1/models` 返回的模型列表
    #[serde(default = "default_supported_models")]
    pub supported: Vec<String>,
}

fn default_supported_models() -> Vec<String> {
    [
        "Qwen/Qwen-Image",
        "Tongyi-MAI/Z-Image-Turbo",
        "Qwen/Qwen-Image-Edit",
        "Qwen/Qwen-Image-Edit-2509",
        "Qwen/Qwen-Image-Edit-2511",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            supported: default_supported_models(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
