//! UseCase: 履歴の取得（HTTP API 用）

use std::sync::Arc;

use crate::domain::{ChatEvent, HistoryError, HistoryStore};

/// 直近の履歴を取得するユースケース
pub struct GetHistoryUseCase {
    history: Arc<dyn HistoryStore>,
    /// 一度に返す最大件数
    max_limit: usize,
}

impl GetHistoryUseCase {
    pub fn new(history: Arc<dyn HistoryStore>, max_limit: usize) -> Self {
        Self { history, max_limit }
    }

    /// 直近 `limit` 件（省略時と上限は `max_limit`）を古い順に返す
    ///
    /// パースできないエントリは警告を出して読み飛ばします。
    pub async fn execute(&self, limit: Option<usize>) -> Result<Vec<ChatEvent>, HistoryError> {
        let n = limit.unwrap_or(self.max_limit).min(self.max_limit);
        let entries = self.history.replay(n).await?;

        Ok(entries
            .iter()
            .filter_map(|entry| match ChatEvent::from_json(entry) {
                Ok(event) => Some(event),
                Err(e) => {
                    tracing::warn!("Skipping malformed chat history entry: {}", e);
                    None
                }
            })
            .collect())
    }
}
