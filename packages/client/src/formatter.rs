//! Message formatting utilities for client display.

use chrono::{DateTime, Local};
use notehub_chat_server::domain::{ChatEvent, ChatEventType};

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a chat event received from the server
    ///
    /// System events are shown as `[time] text`, messages as
    /// `nickname: text (time)`. Messages from `own_nickname` are marked `(me)`.
    pub fn format_event(event: &ChatEvent, own_nickname: &str) -> String {
        let time = Self::format_time(&event.timestamp);
        match event.r#type {
            ChatEventType::System => format!("\n[{}] {}\n", time, event.text),
            ChatEventType::Message => {
                let me_suffix = if event.nickname == own_nickname {
                    " (me)"
                } else {
                    ""
                };
                format!(
                    "\n{}{}: {} ({})\n",
                    event.nickname, me_suffix, event.text, time
                )
            }
        }
    }

    /// Format a frame that is not a chat event
    pub fn format_raw_message(text: &str) -> String {
        format!("\n[raw] {}\n", text)
    }

    /// Format an ISO-8601 timestamp as local `HH:MM:SS`
    ///
    /// Unparsable timestamps are shown as-is.
    pub fn format_time(timestamp: &str) -> String {
        match DateTime::parse_from_rfc3339(timestamp) {
            Ok(dt) => dt.with_timezone(&Local).format("%H:%M:%S").to_string(),
            Err(_) => timestamp.to_string(),
        }
    }
}
