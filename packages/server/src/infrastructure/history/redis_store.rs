//! Redis History Store 実装
//!
//! 1 デプロイにつき 1 つの Redis リスト（デフォルトのキーは `chat:history`）に、
//! シリアライズした ChatEvent を追加順に保存します。
//!
//! ## アトミック性
//!
//! `append` は `MULTI` / `RPUSH` / `LTRIM` / `EXEC` のパイプラインで実行します。
//! 複数プロセスが同時に書き込んでも、リストが上限を超えたり trim が重複したりしません。

use std::{future::Future, time::Duration};

use async_trait::async_trait;
use redis::{AsyncCommands, aio::MultiplexedConnection};
use tokio::time::timeout;

use crate::domain::{ChatEvent, HistoryError, HistoryStore};

/// Redis History Store
#[derive(Clone)]
pub struct RedisHistoryStore {
    client: redis::Client,
    key: String,
    max_len: usize,
    op_timeout: Duration,
}

impl RedisHistoryStore {
    /// 新しい RedisHistoryStore を作成
    ///
    /// URL の形式だけを検証し、接続は各操作のたびに確立します。
    pub fn new(
        url: &str,
        key: impl Into<String>,
        max_len: usize,
        op_timeout: Duration,
    ) -> Result<Self, HistoryError> {
        let client =
            redis::Client::open(url).map_err(|e| HistoryError::Unavailable(e.to_string()))?;
        Ok(Self {
            client,
            key: key.into(),
            max_len,
            op_timeout,
        })
    }

    /// Redis に到達できるか確認
    pub async fn ping(&self) -> Result<(), HistoryError> {
        self.with_timeout(async {
            let mut conn = self.connection().await?;
            let _: String = redis::cmd("PING")
                .query_async(&mut conn)
                .await
                .map_err(unavailable)?;
            Ok::<_, HistoryError>(())
        })
        .await
    }

    async fn connection(&self) -> Result<MultiplexedConnection, HistoryError> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(unavailable)
    }

    async fn with_timeout<T, F>(&self, op: F) -> Result<T, HistoryError>
    where
        F: Future<Output = Result<T, HistoryError>>,
    {
        match timeout(self.op_timeout, op).await {
            Ok(result) => result,
            Err(_) => Err(HistoryError::Timeout(self.op_timeout.as_millis() as u64)),
        }
    }
}

#[async_trait]
impl HistoryStore for RedisHistoryStore {
    async fn append(&self, event: &ChatEvent) -> Result<(), HistoryError> {
        let payload = event
            .to_json()
            .map_err(|e| HistoryError::Serialization(e.to_string()))?;

        self.with_timeout(async {
            let mut conn = self.connection().await?;
            let _: () = redis::pipe()
                .atomic()
                .rpush(&self.key, payload)
                .ignore()
                .ltrim(&self.key, trim_start(self.max_len), -1)
                .ignore()
                .query_async(&mut conn)
                .await
                .map_err(unavailable)?;
            Ok::<_, HistoryError>(())
        })
        .await
    }

    async fn replay(&self, n: usize) -> Result<Vec<String>, HistoryError> {
        // LRANGE key -0 -1 はリスト全体を返してしまう
        if n == 0 {
            return Ok(Vec::new());
        }

        self.with_timeout(async {
            let mut conn = self.connection().await?;
            let entries: Vec<String> = conn
                .lrange(&self.key, range_start(n), -1)
                .await
                .map_err(unavailable)?;
            Ok::<_, HistoryError>(entries)
        })
        .await
    }
}

fn unavailable(e: redis::RedisError) -> HistoryError {
    HistoryError::Unavailable(e.to_string())
}

/// 直近 `max_len` 件を残す LTRIM の開始インデックス
fn trim_start(max_len: usize) -> isize {
    -isize::try_from(max_len).unwrap_or(isize::MAX)
}

/// 直近 `n` 件を取り出す LRANGE の開始インデックス
fn range_start(n: usize) -> isize {
    -isize::try_from(n).unwrap_or(isize::MAX)
}
