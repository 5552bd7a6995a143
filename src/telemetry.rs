//! 博客服务遥测
//! 负责 tracing 订阅器的组装；指标由 metrics 宏在首次写入时自动注册，无需预声明

use crate::config::LoggingConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// 按配置的输出格式构建日志层
/// 配置校验保证 format 只会是 json 或 pretty，json 为生产默认
fn fmt_layer<S>(format: &str) -> Box<dyn Layer<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    match format.to_lowercase().as_str() {
        "pretty" => tracing_subscriber::fmt::layer()
            .pretty()
            .with_target(true)
            .boxed(),
        _ => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_target(false)
            .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
            .boxed(),
    }
}

/// 初始化日志订阅器
/// RUST_LOG 优先；否则按配置级别过滤本服务，压低 sqlx 的语句日志
pub fn init_telemetry(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{},sqlx=warn,tower_http=info", logging.level))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer(&logging.format))
        .init();

    tracing::info!(
        service = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
        format = %logging.format,
        "Logging online"
    );
}
