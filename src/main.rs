//! ImgBridge - OpenAI 兼容的图像生成网关
//!
//! - Domain: chat/, generation/
//! - Application: commands, queries, ports
//! - Infrastructure: http, adapters

use std::sync::Arc;
use std::time::Duration;

use imgbridge::application::PollConfig;
use imgbridge::config::{load_config, print_config, LogConfig};
use imgbridge::infrastructure::adapters::{
    BaiduUploadClient, BaiduUploadClientConfig, ModelScopeClient, ModelScopeClientConfig,
};
use imgbridge::infrastructure::http::{AppState, HttpServer, ServerConfig};
use tracing_subscriber::EnvFilter;

fn init_tracing(log: &LogConfig) {
    let log_filter = format!("{},imgbridge={},tower_http=debug", log.level, log.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter));

    if log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);

    tracing::info!("ImgBridge - OpenAI compatible image generation gateway");
    print_config(&config);

    // 图床客户端
    let upload_config = BaiduUploadClientConfig {
        url: config.upload.url.clone(),
        timeout_secs: config.upload.timeout_secs,
    };
    let image_host = Arc::new(BaiduUploadClient::new(upload_config)?);

    // ModelScope 客户端
    let modelscope_config = ModelScopeClientConfig {
        api_url: config.modelscope.api_url.clone(),
        task_url: config.modelscope.task_url.clone(),
        timeout_secs: config.modelscope.request_timeout_secs,
    };
    let provider = Arc::new(ModelScopeClient::new(modelscope_config)?);

    let poll_config = PollConfig {
        timeout: Duration::from_secs(config.modelscope.poll_timeout_secs),
        interval: Duration::from_secs(config.modelscope.poll_interval_secs),
    };

    let state = AppState::new(
        image_host,
        provider,
        poll_config,
        config.models.supported.clone(),
    );

    let server_config = ServerConfig::new(&config.server.host, config.server.port)
        .with_max_body_bytes(config.server.max_body_bytes);
    let server = HttpServer::new(server_config, state);

    server.run_with_shutdown(shutdown_signal()).await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
