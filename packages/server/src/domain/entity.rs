//! エンティティ: ChatEvent
//!
//! チャットルームで起きた入室・退室・発言を表す、不変のレコードです。
//! 作成後に変更されることはなく、History Store の FIFO 削除によってのみ消えます。

use chrono::{DateTime, Utc};
use notehub_chat_shared::time::to_iso8601;
use serde::{Deserialize, Serialize};

use super::value_object::{MessageText, Nickname};

/// ChatEvent の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatEventType {
    /// 入室・退室などのシステム通知
    System,
    /// 参加者の発言
    Message,
}

/// チャットイベント
///
/// JSON 表現（`type`, `timestamp`, `nickname`, `text`）がそのまま
/// WebSocket のフレームと History Store のエントリになります。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEvent {
    pub r#type: ChatEventType,
    /// UTC の ISO-8601 文字列
    pub timestamp: String,
    /// system イベントでは空文字列
    pub nickname: String,
    pub text: String,
}

impl ChatEvent {
    /// 入室通知を作成
    pub fn joined(nickname: &Nickname, at: DateTime<Utc>) -> Self {
        Self::system(format!("{} вошёл в чат", nickname), at)
    }

    /// 退室通知を作成
    pub fn left(nickname: &Nickname, at: DateTime<Utc>) -> Self {
        Self::system(format!("{} вышел из чат", nickname), at)
    }

    /// 発言イベントを作成
    pub fn message(nickname: &Nickname, text: MessageText, at: DateTime<Utc>) -> Self {
        Self {
            r#type: ChatEventType::Message,
            timestamp: to_iso8601(&at),
            nickname: nickname.as_str().to_string(),
            text: text.into_inner(),
        }
    }

    fn system(text: String, at: DateTime<Utc>) -> Self {
        Self {
            r#type: ChatEventType::System,
            timestamp: to_iso8601(&at),
            nickname: String::new(),
            text,
        }
    }

    /// JSON 文字列にシリアライズ
    ///
    /// serde_json は非 ASCII 文字をエスケープしないので、キリル文字などはそのまま出力されます。
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// JSON 文字列からデシリアライズ
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
