use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing_subscriber::EnvFilter;

use th_api::app::create_app;
use th_api::routes::user::AppState;
use th_core::repositories::{InMemoryUserRepository, UserRepository};
use th_core::services::notification::NotificationDispatcher;
use th_core::services::token::{TokenCodec, TokenCodecConfig};
use th_core::services::verification::{EphemeralStore, VerificationServiceConfig};
use th_core::User;
use th_infra::cache::{InMemoryEphemeralStore, RedisClient, RedisEphemeralStore};
use th_infra::database::{DatabasePool, MySqlUserRepository};
use th_infra::notification::create_notification_port;
use th_shared::config::{
    AppConfig, DatabaseProvider, LogFormat, LoggingConfig, StoreProvider,
};

/// How long shutdown waits for queued notifications to drain
const NOTIFICATION_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(&config.logging);

    tracing::info!(environment = %config.environment, "Starting TaskHub API Server");
    config.validate().context("invalid configuration")?;

    let codec = Arc::new(TokenCodec::new(TokenCodecConfig::from_settings(
        &config.auth.jwt,
        &config.verification,
    )));

    let port = create_notification_port(&config.notification)
        .await
        .context("failed to create notification publisher")?;
    let (notifier, worker) = NotificationDispatcher::spawn(
        port,
        config.notification.channel_capacity,
        Duration::from_millis(config.notification.publish_timeout_ms),
    );
    let notifier = Arc::new(notifier);

    match (config.database.provider, config.cache.provider) {
        (DatabaseProvider::Mysql, StoreProvider::Redis) => {
            let (users, pool) = mysql_users(&config).await?;
            serve(&config, users, redis_store(&config).await?, Arc::clone(&notifier), codec).await?;
            pool.close().await;
        }
        (DatabaseProvider::Mysql, StoreProvider::Memory) => {
            let (users, pool) = mysql_users(&config).await?;
            serve(&config, users, Arc::new(InMemoryEphemeralStore::new()), Arc::clone(&notifier), codec).await?;
            pool.close().await;
        }
        (DatabaseProvider::Memory, StoreProvider::Redis) => {
            let users = memory_users(&codec).await?;
            serve(&config, users, redis_store(&config).await?, Arc::clone(&notifier), codec).await?;
        }
        (DatabaseProvider::Memory, StoreProvider::Memory) => {
            let users = memory_users(&codec).await?;
            serve(&config, users, Arc::new(InMemoryEphemeralStore::new()), Arc::clone(&notifier), codec).await?;
        }
    }

    // The worker stops once the last dispatcher handle is gone and the queue is drained
    drop(notifier);
    if tokio::time::timeout(NOTIFICATION_DRAIN_TIMEOUT, worker).await.is_err() {
        tracing::warn!("Notification queue not drained before shutdown");
    }

    tracing::info!("TaskHub API Server stopped");
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match logging.format {
        LogFormat::Json => builder.json().with_target(false).init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Compact => builder.compact().init(),
    }
}

async fn serve<U, S>(
    config: &AppConfig,
    users: Arc<U>,
    store: Arc<S>,
    notifier: Arc<NotificationDispatcher>,
    codec: Arc<TokenCodec>,
) -> anyhow::Result<()>
where
    U: UserRepository + 'static,
    S: EphemeralStore + 'static,
{
    let verification = VerificationServiceConfig::from_settings(&config.verification, config.environment);
    let state = web::Data::new(AppState::new(users, store, notifier, Arc::clone(&codec), verification));

    let bind_address = config.server.bind_address();
    tracing::info!("Server will bind to: {}", bind_address);

    let app_config = config.clone();
    let mut server = HttpServer::new(move || create_app(state.clone(), Arc::clone(&codec), &app_config));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await
        .context("server error")
}

async fn mysql_users(config: &AppConfig) -> anyhow::Result<(Arc<MySqlUserRepository>, DatabasePool)> {
    let pool = DatabasePool::new(&config.database)
        .await
        .context("failed to connect to the user database")?;
    let users = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));
    Ok((users, pool))
}

async fn redis_store(config: &AppConfig) -> anyhow::Result<Arc<RedisEphemeralStore>> {
    let client = RedisClient::new(config.cache.clone())
        .await
        .context("failed to connect to the verification store")?;
    Ok(Arc::new(RedisEphemeralStore::new(client)))
}

/// Development-only user store with one seeded user and a logged bearer token
async fn memory_users(codec: &TokenCodec) -> anyhow::Result<Arc<InMemoryUserRepository>> {
    let users = Arc::new(InMemoryUserRepository::new());
    let demo = User::new("demo", "demo@taskhub.local").with_phone("08012345678");
    let token = codec
        .issue_session_token(demo.id, demo.is_admin)
        .context("failed to issue demo session token")?;

    tracing::warn!(
        user_id = %demo.id,
        bearer_token = %token,
        "Using the in-memory user store with a demo user"
    );
    users.insert(demo).await;

    Ok(users)
}
