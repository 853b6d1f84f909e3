//! HTTP API response types.

use serde::{Deserialize, Serialize};

use crate::domain::ChatEvent;

/// Response of `GET /api/chat/history`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryDto {
    pub events: Vec<ChatEvent>,
}

/// Response of `GET /api/chat/participants`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantsDto {
    pub count: usize,
    pub nicknames: Vec<String>,
}
