//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 受信したテキストの trim、保存、ブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 空白のみのメッセージが保存も配信もされないことを保証
//! - 送信者自身にもメッセージが届くこと（自分宛てを除外しない）を確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：メッセージの保存とブロードキャスト
//! - エッジケース：空白のみのメッセージ
//! - 異常系：History Store への保存失敗（配信は続行）

use std::sync::Arc;

use notehub_chat_shared::time::Clock;

use crate::domain::{ChatEvent, MessageText, Nickname};

use super::{error::PublishError, publish::EventPublisher};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    publisher: Arc<EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    pub fn new(publisher: Arc<EventPublisher>, clock: Arc<dyn Clock>) -> Self {
        Self { publisher, clock }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `nickname` - 接続時に紐付けられた送信者の nickname
    /// * `raw_text` - クライアントから受信したテキストフレーム
    ///
    /// # Returns
    ///
    /// * `Ok(Some(ChatEvent))` - 保存・配信したイベント
    /// * `Ok(None)` - trim 後に空だったので何もしなかった
    /// * `Err(PublishError)` - 配信用のシリアライズに失敗
    pub async fn execute(
        &self,
        nickname: &Nickname,
        raw_text: &str,
    ) -> Result<Option<ChatEvent>, PublishError> {
        let Some(text) = MessageText::from_frame(raw_text) else {
            return Ok(None);
        };

        let event = ChatEvent::message(nickname, text, self.clock.now());
        self.publisher.publish(&event).await?;
        Ok(Some(event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            ChatEventType, ConnectionId, ConnectionRegistry, HistoryError, HistoryStore,
            history::MockHistoryStore,
        },
        infrastructure::{history::InMemoryHistoryStore, registry::WebSocketConnectionRegistry},
    };
    use notehub_chat_shared::time::SystemClock;
    use tokio::sync::mpsc;

    fn create_usecase(
        history: Arc<dyn HistoryStore>,
        registry: Arc<WebSocketConnectionRegistry>,
    ) -> SendMessageUseCase {
        let publisher = Arc::new(EventPublisher::new(history, registry));
        SendMessageUseCase::new(publisher, Arc::new(SystemClock))
    }

    #[tokio::test]
    async fn test_send_message_persists_and_echoes_to_sender() {
        // テスト項目: メッセージが保存され、送信者を含む全員に届く
        // given (前提条件):
        let history = Arc::new(InMemoryHistoryStore::new(100));
        let registry = Arc::new(WebSocketConnectionRegistry::new());
        let alice = Nickname::new("alice").unwrap();
        let (tx_alice, mut rx_alice) = mpsc::unbounded_channel();
        let (tx_bob, mut rx_bob) = mpsc::unbounded_channel();
        registry
            .register(ConnectionId::generate(), alice.clone(), tx_alice)
            .await;
        registry
            .register(ConnectionId::generate(), Nickname::new("bob").unwrap(), tx_bob)
            .await;
        let usecase = create_usecase(history.clone(), registry);

        // when (操作):
        let event = usecase.execute(&alice, "  Hello, bob!  ").await.unwrap().unwrap();

        // then (期待する結果):
        assert_eq!(event.r#type, ChatEventType::Message);
        assert_eq!(event.nickname, "alice");
        assert_eq!(event.text, "Hello, bob!");
        let expected = event.to_json().unwrap();
        assert_eq!(rx_alice.recv().await, Some(expected.clone()));
        assert_eq!(rx_bob.recv().await, Some(expected.clone()));
        assert_eq!(history.snapshot().await, vec![expected]);
    }

    #[tokio::test]
    async fn test_whitespace_only_message_is_dropped() {
        // テスト項目: 空白のみのメッセージは保存も配信もされない
        // given (前提条件):
        let history = Arc::new(InMemoryHistoryStore::new(100));
        let registry = Arc::new(WebSocketConnectionRegistry::new());
        let alice = Nickname::new("alice").unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        registry
            .register(ConnectionId::generate(), alice.clone(), tx)
            .await;
        let usecase = create_usecase(history.clone(), registry);

        // when (操作):
        let result = usecase.execute(&alice, "   ").await;

        // then (期待する結果):
        assert_eq!(result, Ok(None));
        assert!(history.is_empty().await);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_store_failure_does_not_block_delivery() {
        // テスト項目: 保存に失敗してもメッセージは配信される
        // given (前提条件):
        let mut history = MockHistoryStore::new();
        history
            .expect_append()
            .times(1)
            .returning(|_| Err(HistoryError::Unavailable("redis down".to_string())));
        let registry = Arc::new(WebSocketConnectionRegistry::new());
        let alice = Nickname::new("alice").unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        registry
            .register(ConnectionId::generate(), alice.clone(), tx)
            .await;
        let usecase = create_usecase(Arc::new(history), registry);

        // when (操作):
        let event = usecase.execute(&alice, "still here").await.unwrap();

        // then (期待する結果):
        assert!(event.is_some());
        assert!(rx.recv().await.is_some_and(|frame| frame.contains("still here")));
    }

    #[tokio::test]
    async fn test_send_message_with_no_listeners() {
        // テスト項目: 接続が一つもなくてもメッセージは保存される
        // given (前提条件):
        let history = Arc::new(InMemoryHistoryStore::new(100));
        let registry = Arc::new(WebSocketConnectionRegistry::new());
        let usecase = create_usecase(history.clone(), registry);

        // when (操作):
        let result = usecase
            .execute(&Nickname::new("ghost").unwrap(), "anyone?")
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(history.len().await, 1);
    }
}
