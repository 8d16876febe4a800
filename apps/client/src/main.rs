use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use matcher_client::api::ApiClient;
use matcher_client::config::Config;
use matcher_client::routing::{RouterDriver, SessionRouter};
use matcher_client::routing::routes::ROOT_PATH;
use matcher_client::session::{MemoryStore, SessionStore, SharedStorage};
use matcher_client::shell::Shell;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (malformed values abort startup)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting matcher client v{}", env!("CARGO_PKG_VERSION"));
    info!("Backend: {}", config.api_base_url);

    // One durable store shared by every tab of this process; this tab gets
    // its own context on it plus a private tab-scoped store.
    let storage = SharedStorage::new();
    let durable = storage.attach();
    let events = durable.subscribe();
    let session = SessionStore::new(Arc::new(durable), Arc::new(MemoryStore::new()));

    let api = ApiClient::new(config.api_base_url.clone(), config.request_timeout, session.clone())?;

    let router = SessionRouter::new(session, ROOT_PATH);
    let driver = RouterDriver::spawn(router, events, config.session_check_interval);
    info!(
        "Session validation every {}s",
        config.session_check_interval.as_secs()
    );

    let shell = Shell::new(api, driver.handle(), config.chat_system_prompt.clone());
    let result = shell.run(tokio::io::stdin(), tokio::io::stdout()).await;

    driver.shutdown().await;
    result
}
