//! インメモリ History Store 実装
//!
//! Redis を使わない単一プロセス構成で使います。
//! Mutex で append と trim を一つのクリティカルセクションにまとめるので、
//! プロセス内の並行書き込みに対しては Redis 実装と同じ保証になります。

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChatEvent, HistoryError, HistoryStore};

/// インメモリ History Store
pub struct InMemoryHistoryStore {
    entries: Mutex<VecDeque<String>>,
    max_len: usize,
}

impl InMemoryHistoryStore {
    /// 最大 `max_len` 件を保持するストアを作成
    ///
    /// 領域は追加に応じて確保され、上限分を前もって確保しない。
    pub fn new(max_len: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::new()),
            max_len,
        }
    }

    /// 現在の保持件数
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    /// 保持している全エントリ（古い順）
    pub async fn snapshot(&self) -> Vec<String> {
        self.entries.lock().await.iter().cloned().collect()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn append(&self, event: &ChatEvent) -> Result<(), HistoryError> {
        let payload = event
            .to_json()
            .map_err(|e| HistoryError::Serialization(e.to_string()))?;

        let mut entries = self.entries.lock().await;
        entries.push_back(payload);
        while entries.len() > self.max_len {
            entries.pop_front();
        }
        Ok(())
    }

    async fn replay(&self, n: usize) -> Result<Vec<String>, HistoryError> {
        let entries = self.entries.lock().await;
        let skip = entries.len().saturating_sub(n);
        Ok(entries.iter().skip(skip).cloned().collect())
    }
}
