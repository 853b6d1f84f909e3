//! NoteHub anonymous chat server.
//!
//! Relays chat messages between WebSocket clients and keeps a bounded history
//! in Redis (or in process memory when no Redis URL is configured).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin notehub-chat-server
//! cargo run --bin notehub-chat-server -- --port 3000 --redis-url redis://127.0.0.1:6379/0
//! ```

use std::{sync::Arc, time::Duration};

use clap::Parser;
use notehub_chat_server::{
    config::{
        ChatConfig, HISTORY_LAST_N_MESSAGES, HISTORY_MAX_SAVE_LEN, REDIS_CHAT_HISTORY_KEY,
        REDIS_TIMEOUT_MS,
    },
    domain::HistoryStore,
    infrastructure::{
        history::{InMemoryHistoryStore, RedisHistoryStore},
        registry::WebSocketConnectionRegistry,
    },
    ui::{AppState, Server},
};
use notehub_chat_shared::{
    logger::setup_logger,
    time::{MonotonicClock, SystemClock},
};

#[derive(Parser, Debug)]
#[command(name = "notehub-chat-server")]
#[command(about = "Anonymous WebSocket chat with bounded history", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "NOTEHUB_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "NOTEHUB_PORT", default_value = "8080")]
    port: u16,

    /// Redis URL for the chat history (history stays in memory when omitted)
    #[arg(long, env = "NOTEHUB_REDIS_URL")]
    redis_url: Option<String>,

    /// Redis list key holding the chat history
    #[arg(long, env = "NOTEHUB_HISTORY_KEY", default_value = REDIS_CHAT_HISTORY_KEY)]
    history_key: String,

    /// Number of events replayed to a client when it joins
    #[arg(long, env = "NOTEHUB_HISTORY_LAST_N", default_value_t = HISTORY_LAST_N_MESSAGES)]
    history_last_n: usize,

    /// Maximum number of events kept in the history
    #[arg(long, env = "NOTEHUB_HISTORY_MAX_LEN", default_value_t = HISTORY_MAX_SAVE_LEN)]
    history_max_len: usize,

    /// Timeout for a single Redis operation, in milliseconds
    #[arg(long, env = "NOTEHUB_REDIS_TIMEOUT_MS", default_value_t = REDIS_TIMEOUT_MS)]
    redis_timeout_ms: u64,
}

impl Args {
    fn chat_config(&self) -> ChatConfig {
        ChatConfig {
            redis_url: self.redis_url.clone(),
            history_key: self.history_key.clone(),
            history_last_n: self.history_last_n,
            history_max_len: self.history_max_len,
            redis_timeout: Duration::from_millis(self.redis_timeout_ms),
        }
    }
}

/// Build the history store selected by the configuration
async fn build_history_store(
    config: &ChatConfig,
) -> Result<Arc<dyn HistoryStore>, Box<dyn std::error::Error>> {
    let Some(url) = &config.redis_url else {
        tracing::info!(
            "No Redis URL configured, keeping up to {} chat events in memory",
            config.history_max_len
        );
        return Ok(Arc::new(InMemoryHistoryStore::new(config.history_max_len)));
    };

    let store = RedisHistoryStore::new(
        url,
        config.history_key.clone(),
        config.history_max_len,
        config.redis_timeout,
    )?;
    // Redis が落ちていても起動は続ける（配信は履歴なしで動く）
    match store.ping().await {
        Ok(()) => tracing::info!("Chat history stored in Redis list '{}'", config.history_key),
        Err(e) => tracing::warn!("Redis is not reachable yet, history is degraded: {}", e),
    }
    Ok(Arc::new(store))
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    setup_logger(env!("CARGO_CRATE_NAME"), env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();
    let config = args.chat_config();
    if let Err(e) = config.validate() {
        tracing::error!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    // Initialize dependencies in order:
    // 1. History Store
    // 2. Connection Registry
    // 3. UseCases (AppState)
    // 4. Server

    let history = match build_history_store(&config).await {
        Ok(history) => history,
        Err(e) => {
            tracing::error!("Failed to set up chat history: {}", e);
            std::process::exit(1);
        }
    };
    let registry = Arc::new(WebSocketConnectionRegistry::new());
    let clock = Arc::new(MonotonicClock::new(SystemClock));

    let state = AppState::new(history, registry, clock, config.history_last_n);
    if let Err(e) = Server::new(state).run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
