/*
 * Responsibility
 * - プロセス全体で共有する外部クライアント (Postgres pool / Valkey / HTTP client)
 * - 初回アクセス時に一度だけ初期化し、以降は再利用する (途中で破棄しない)
 * - handler からは直接参照せず、AppState 経由で注入する
 */
use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tokio::sync::OnceCell;

use crate::services::cache::{CacheError, ValkeyClient};

static DB: OnceCell<PgPool> = OnceCell::const_new();
static CACHE: OnceCell<ValkeyClient> = OnceCell::const_new();
static HTTP: OnceCell<reqwest::Client> = OnceCell::const_new();

const PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

pub async fn db(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = DB
        .get_or_try_init(|| async {
            tracing::info!("connecting to postgres");
            PgPoolOptions::new()
                .max_connections(10)
                .acquire_timeout(Duration::from_secs(5))
                .connect(database_url)
                .await
        })
        .await?;

    // PgPool is an Arc internally
    Ok(pool.clone())
}

pub async fn cache(redis_url: &str) -> Result<ValkeyClient, CacheError> {
    let client = CACHE
        .get_or_try_init(|| async {
            tracing::info!("connecting to valkey");
            ValkeyClient::new(redis_url).await
        })
        .await?;

    Ok(client.clone())
}

pub async fn http() -> Result<reqwest::Client, reqwest::Error> {
    let client = HTTP
        .get_or_try_init(|| async {
            reqwest::Client::builder()
                .timeout(PROVIDER_TIMEOUT)
                .build()
        })
        .await?;

    Ok(client.clone())
}
