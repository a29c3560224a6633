//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 环境变量前缀
const ENV_PREFIX: &str = "IMGBRIDGE";

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `IMGBRIDGE_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `IMGBRIDGE_SERVER__PORT=8080`
/// - `IMGBRIDGE_MODELSCOPE__POLL_TIMEOUT_SECS=90`
/// - `IMGBRIDGE_UPLOAD__URL=https://image.baidu.com/aigc/pic_upload`
/// - `IMGBRIDGE_LOG__LEVEL=debug`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8000)?
        .set_default("server.max_body_bytes", 50 * 1024 * 1024)?
        .set_default(
            "modelscope.api_url",
            "https://api-inference.modelscope.cn/v1/images/generations",
        )?
        .set_default("modelscope.task_url", "https://api-inference.modelscope.cn/v1/tasks")?
        .set_default("modelscope.request_timeout_secs", 120)?
        .set_default("modelscope.poll_timeout_secs", 60)?
        .set_default("modelscope.poll_interval_secs", 2)?
        .set_default("upload.url", "https://image.baidu.com/aigc/pic_upload")?
        .set_default("upload.timeout_secs", 120)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: IMGBRIDGE_MODELSCOPE__API_URL=http://localhost:9000/v1/images/generations
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.modelscope.api_url.is_empty() || config.modelscope.task_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "ModelScope URLs cannot be empty".to_string(),
        ));
    }

    if config.upload.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Upload URL cannot be empty".to_string(),
        ));
    }

    if config.modelscope.poll_timeout_secs == 0 || config.modelscope.poll_interval_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Poll timeout and interval must be greater than 0".to_string(),
        ));
    }

    if config.models.supported.is_empty() {
        return Err(ConfigError::ValidationError(
            "Supported model list cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Max Body Size: {} bytes", config.server.max_body_bytes);
    tracing::info!("ModelScope API: {}", config.modelscope.api_url);
    tracing::info!("ModelScope Tasks: {}", config.modelscope.task_url);
    tracing::info!(
        "Polling: every {}s, timeout {}s",
        config.modelscope.poll_interval_secs,
        config.modelscope.poll_timeout_secs
    );
    tracing::info!("Upload URL: {}", config.upload.url);
    tracing::info!("Models: {}", config.models.supported.join(", "));
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
