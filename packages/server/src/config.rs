//! Server configuration.

use std::time::Duration;

use thiserror::Error;

/// Redis key where chat events are stored
pub const REDIS_CHAT_HISTORY_KEY: &str = "chat:history";
/// Number of events replayed to a client when it joins
pub const HISTORY_LAST_N_MESSAGES: usize = 20;
/// Maximum number of events kept in the history store (older ones are evicted)
pub const HISTORY_MAX_SAVE_LEN: usize = 1000;
/// Default timeout for a single history store operation
pub const REDIS_TIMEOUT_MS: u64 = 500;
/// Path of the chat WebSocket endpoint
pub const CHAT_WS_PATH: &str = "/ws/anon-chat";

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("history max length must be at least 1")]
    ZeroHistoryCapacity,

    #[error("replay count ({replay}) must not exceed history max length ({capacity})")]
    ReplayExceedsCapacity { replay: usize, capacity: usize },

    #[error("history key must not be empty")]
    EmptyHistoryKey,

    #[error("redis timeout must be greater than zero")]
    ZeroTimeout,
}

/// Chat history settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Redis connection URL. `None` keeps history in process memory.
    pub redis_url: Option<String>,
    pub history_key: String,
    pub history_last_n: usize,
    pub history_max_len: usize,
    pub redis_timeout: Duration,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            redis_url: None,
            history_key: REDIS_CHAT_HISTORY_KEY.to_string(),
            history_last_n: HISTORY_LAST_N_MESSAGES,
            history_max_len: HISTORY_MAX_SAVE_LEN,
            redis_timeout: Duration::from_millis(REDIS_TIMEOUT_MS),
        }
    }
}

impl ChatConfig {
    /// Validate the settings
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_max_len == 0 {
            return Err(ConfigError::ZeroHistoryCapacity);
        }
        if self.history_last_n > self.history_max_len {
            return Err(ConfigError::ReplayExceedsCapacity {
                replay: self.history_last_n,
                capacity: self.history_max_len,
            });
        }
        if self.history_key.trim().is_empty() {
            return Err(ConfigError::EmptyHistoryKey);
        }
        if self.redis_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}
