//! PostgreSQL 接入层
//! 博客数据落在 users / posts 两张表，连接池参数全部来自配置

use crate::config::DatabaseConfig;
use secrecy::ExposeSecret;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::{Duration, Instant};

/// 数据库错误类型
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("failed to apply migrations: {0}")]
    Migrate(#[source] sqlx::migrate::MigrateError),
}

/// 数据库健康状态，健康时附带探测耗时
#[derive(Debug, Clone)]
pub enum HealthStatus {
    Healthy { latency_ms: u64 },
    Unhealthy(String),
}

/// 按配置建立连接池
/// 借出前做连通性校验，拿到的连接一定可用
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, DbError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .test_before_acquire(true)
        .connect(config.url.expose_secret())
        .await
        .map_err(DbError::Connect)?;

    tracing::info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Postgres pool ready"
    );

    Ok(pool)
}

/// 应用 migrations/ 下的全部迁移（users、posts 表）
pub async fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(DbError::Migrate)?;

    tracing::info!("Schema migrations applied");
    Ok(())
}

/// 就绪探针用的数据库探测，记录一次往返耗时
pub async fn health_check(pool: &PgPool) -> HealthStatus {
    let started = Instant::now();

    match sqlx::query("SELECT 1").fetch_one(pool).await {
        Ok(_) => HealthStatus::Healthy {
            latency_ms: started.elapsed().as_millis() as u64,
        },
        Err(e) => {
            tracing::warn!(error = %e, "Database probe failed");
            HealthStatus::Unhealthy(e.to_string())
        }
    }
}

/// 上报连接池水位指标
pub fn record_pool_metrics(pool: &PgPool) {
    metrics::gauge!("blog_db_pool_size").set(pool.size() as f64);
    metrics::gauge!("blog_db_pool_idle").set(pool.num_idle() as f64);
}
