//! WebSocket を使った ConnectionRegistry 実装
//!
//! ## 責務
//!
//! - 接続中のクライアントの `UnboundedSender` と nickname を管理
//! - 全接続へのブロードキャストと、送信に失敗した接続の切り離し
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。
//! サーバーごとに 1 つ作成され、各ユースケースにコンストラクタ経由で渡されます。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, ConnectionRegistry, Nickname, PusherChannel};

/// 登録済みの接続
struct Connection {
    nickname: Nickname,
    sender: PusherChannel,
}

/// WebSocket を使った ConnectionRegistry 実装
#[derive(Default)]
pub struct WebSocketConnectionRegistry {
    /// Key: ConnectionId, Value: nickname と sender
    connections: Mutex<HashMap<ConnectionId, Connection>>,
}

impl WebSocketConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConnectionRegistry for WebSocketConnectionRegistry {
    async fn register(&self, id: ConnectionId, nickname: Nickname, sender: PusherChannel) {
        let mut connections = self.connections.lock().await;
        tracing::debug!("Connection '{}' ({}) registered", id, nickname);
        connections.insert(id, Connection { nickname, sender });
    }

    async fn deregister(&self, id: &ConnectionId) {
        let mut connections = self.connections.lock().await;
        if connections.remove(id).is_some() {
            tracing::debug!("Connection '{}' deregistered", id);
        }
    }

    async fn broadcast(&self, content: &str) {
        let mut connections = self.connections.lock().await;

        // ロック中のメンバーがそのままスナップショットになる
        connections.retain(|id, connection| match connection.sender.send(content.to_string()) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    "Failed to push message to connection '{}' ({}): {}. Removing it.",
                    id,
                    connection.nickname,
                    e
                );
                false
            }
        });
        tracing::debug!("Broadcasted message to {} connection(s)", connections.len());
    }

    async fn nicknames(&self) -> Vec<Nickname> {
        let connections = self.connections.lock().await;
        connections.values().map(|c| c.nickname.clone()).collect()
    }

    async fn count(&self) -> usize {
        self.connections.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - register / deregister
    // - broadcast: 全接続への送信と、送信失敗の切り離し
    //
    // 【なぜこのテストが必要か】
    // - Registry は全てのセッションハンドラが共有する唯一の可変状態
    // - 一部の接続の失敗が他の接続への配信を止めないことを保証する
    // ========================================

    fn nickname(name: &str) -> Nickname {
        Nickname::new(name).unwrap()
    }

    #[tokio::test]
    async fn test_register_and_deregister() {
        // テスト項目: 登録した接続が数えられ、登録解除で消える
        // given (前提条件):
        let registry = WebSocketConnectionRegistry::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        let id = ConnectionId::generate();
        registry.register(id, nickname("alice"), tx).await;
        assert_eq!(registry.count().await, 1);

        // when (操作):
        registry.deregister(&id).await;

        // then (期待する結果):
        assert_eq!(registry.count().await, 0);
    }

    #[tokio::test]
    async fn test_deregister_unknown_connection_is_noop() {
        // テスト項目: 存在しない接続の登録解除は何もしない（冪等性）
        // given (前提条件):
        let registry = WebSocketConnectionRegistry::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        registry
            .register(ConnectionId::generate(), nickname("alice"), tx)
            .await;

        // when (操作):
        registry.deregister(&ConnectionId::generate()).await;

        // then (期待する結果):
        assert_eq!(registry.count().await, 1);
    }

    #[tokio::test]
    async fn test_same_nickname_can_connect_twice() {
        // テスト項目: 同じ nickname の接続が複数あっても別々に登録される
        // given (前提条件):
        let registry = WebSocketConnectionRegistry::new();
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();

        // when (操作):
        registry
            .register(ConnectionId::generate(), nickname("alice"), tx1)
            .await;
        registry
            .register(ConnectionId::generate(), nickname("alice"), tx2)
            .await;

        // then (期待する結果):
        assert_eq!(registry.count().await, 2);
        assert_eq!(registry.nicknames().await, vec![nickname("alice"); 2]);
    }

    #[tokio::test]
    async fn test_broadcast_reaches_every_connection() {
        // テスト項目: ブロードキャストが全ての接続に届く
        // given (前提条件):
        let registry = WebSocketConnectionRegistry::new();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        registry
            .register(ConnectionId::generate(), nickname("alice"), tx1)
            .await;
        registry
            .register(ConnectionId::generate(), nickname("bob"), tx2)
            .await;

        // when (操作):
        registry.broadcast("Broadcast message").await;

        // then (期待する結果):
        assert_eq!(rx1.recv().await, Some("Broadcast message".to_string()));
        assert_eq!(rx2.recv().await, Some("Broadcast message".to_string()));
    }

    #[tokio::test]
    async fn test_broadcast_isolates_closed_connection() {
        // テスト項目: 閉じた接続への送信失敗は他の接続への配信を止めず、その接続は削除される
        // given (前提条件):
        let registry = WebSocketConnectionRegistry::new();
        let (tx_closed, rx_closed) = mpsc::unbounded_channel();
        let (tx_open, mut rx_open) = mpsc::unbounded_channel();
        registry
            .register(ConnectionId::generate(), nickname("gone"), tx_closed)
            .await;
        registry
            .register(ConnectionId::generate(), nickname("alice"), tx_open)
            .await;
        drop(rx_closed);

        // when (操作):
        registry.broadcast("still delivered").await;

        // then (期待する結果):
        assert_eq!(rx_open.recv().await, Some("still delivered".to_string()));
        assert_eq!(registry.count().await, 1);
        assert_eq!(registry.nicknames().await, vec![nickname("alice")]);
    }

    #[tokio::test]
    async fn test_broadcast_with_no_connections() {
        // テスト項目: 接続がなくてもブロードキャストはパニックしない
        // given (前提条件):
        let registry = WebSocketConnectionRegistry::new();

        // when (操作):
        registry.broadcast("nobody listens").await;

        // then (期待する結果):
        assert_eq!(registry.count().await, 0);
    }
}
