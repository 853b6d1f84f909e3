//! UseCase: 入室処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinChatUseCase::execute()：接続の登録と履歴のリプレイ
//! - JoinChatUseCase::announce_joined()：入室イベントの保存と配信
//!
//! ### なぜこのテストが必要か
//! - 新しい接続だけがリプレイを受け取り、既存の接続は入室イベントだけを受け取ることを保証
//! - History Store が使えなくても入室自体は成功することを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：履歴ありの入室
//! - エッジケース：履歴がリプレイ件数より多い場合
//! - 異常系：History Store に到達できない場合（空のリプレイで続行）

use std::sync::Arc;

use notehub_chat_shared::time::Clock;

use crate::domain::{
    ChatEvent, ConnectionId, ConnectionRegistry, HistoryStore, Nickname, PusherChannel,
};

use super::{error::PublishError, publish::EventPublisher};

/// 入室直後のセッション
#[derive(Debug)]
pub struct JoinedSession {
    /// Registry に登録された接続 ID
    pub connection_id: ConnectionId,
    /// 新しい接続にだけ送る直近の履歴（古い順、シリアライズ済み）
    pub backlog: Vec<String>,
}

/// 入室のユースケース
pub struct JoinChatUseCase {
    history: Arc<dyn HistoryStore>,
    registry: Arc<dyn ConnectionRegistry>,
    publisher: Arc<EventPublisher>,
    clock: Arc<dyn Clock>,
    /// 入室時にリプレイする件数
    replay_len: usize,
}

impl JoinChatUseCase {
    pub fn new(
        history: Arc<dyn HistoryStore>,
        registry: Arc<dyn ConnectionRegistry>,
        publisher: Arc<EventPublisher>,
        clock: Arc<dyn Clock>,
        replay_len: usize,
    ) -> Self {
        Self {
            history,
            registry,
            publisher,
            clock,
            replay_len,
        }
    }

    /// 接続を登録し、リプレイする履歴を取得
    ///
    /// # Arguments
    ///
    /// * `nickname` - 検証済みの nickname
    /// * `sender` - この接続へのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// 登録した接続 ID と、直近 `replay_len` 件の履歴。
    /// History Store に到達できない場合、履歴は空になります。
    pub async fn execute(&self, nickname: Nickname, sender: PusherChannel) -> JoinedSession {
        let connection_id = ConnectionId::generate();
        self.registry
            .register(connection_id, nickname.clone(), sender)
            .await;

        let backlog = match self.history.replay(self.replay_len).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    "Chat history unavailable, '{}' joins with an empty backlog: {}",
                    nickname,
                    e
                );
                Vec::new()
            }
        };

        JoinedSession {
            connection_id,
            backlog,
        }
    }

    /// 入室イベントを保存し、新しい接続を含む全ての接続にブロードキャスト
    pub async fn announce_joined(&self, nickname: &Nickname) -> Result<ChatEvent, PublishError> {
        let event = ChatEvent::joined(nickname, self.clock.now());
        self.publisher.publish(&event).await?;
        Ok(event)
    }
}
