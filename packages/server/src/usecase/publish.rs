//! イベントの保存と配信
//!
//! 全てのイベントは「History Store に保存 → 全接続にブロードキャスト」の順で処理されます。
//! 保存に失敗しても配信は続けます（永続性より可用性を優先）。

use std::sync::Arc;

use crate::domain::{ChatEvent, ConnectionRegistry, HistoryStore};

use super::error::PublishError;

/// ChatEvent を保存・配信する
pub struct EventPublisher {
    history: Arc<dyn HistoryStore>,
    registry: Arc<dyn ConnectionRegistry>,
}

impl EventPublisher {
    pub fn new(history: Arc<dyn HistoryStore>, registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { history, registry }
    }

    /// 保存してからブロードキャスト
    pub async fn publish(&self, event: &ChatEvent) -> Result<(), PublishError> {
        self.persist(event).await;
        self.broadcast(event).await
    }

    /// History Store に保存する。失敗は警告ログに残すだけ
    pub async fn persist(&self, event: &ChatEvent) {
        if let Err(e) = self.history.append(event).await {
            tracing::warn!(
                "Failed to persist {:?} event to chat history, delivering anyway: {}",
                event.r#type,
                e
            );
        }
    }

    /// 呼び出し時点で登録されている全ての接続に配信
    pub async fn broadcast(&self, event: &ChatEvent) -> Result<(), PublishError> {
        let payload = event
            .to_json()
            .map_err(|e| PublishError::Serialization(e.to_string()))?;
        self.registry.broadcast(&payload).await;
        Ok(())
    }
}
