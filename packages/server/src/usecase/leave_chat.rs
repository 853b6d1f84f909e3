//! UseCase: 退室処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LeaveChatUseCase::execute() メソッド
//! - 退室イベントの保存、登録解除、残りの接続へのブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 退室する接続自身には退室イベントが届かないこと（登録解除が配信より先）を保証
//! - 残りの参加者が退室イベントをちょうど 1 回受け取ることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加者の退室と通知
//! - エッジケース：最後の参加者の退室（通知対象なし）

use std::sync::Arc;

use notehub_chat_shared::time::Clock;

use crate::domain::{ChatEvent, ConnectionId, ConnectionRegistry, Nickname};

use super::{error::PublishError, publish::EventPublisher};

/// 退室のユースケース
pub struct LeaveChatUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    publisher: Arc<EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl LeaveChatUseCase {
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        publisher: Arc<EventPublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            publisher,
            clock,
        }
    }

    /// 退室を実行
    ///
    /// 1. 退室イベントを保存
    /// 2. 接続を登録解除
    /// 3. 残りの接続にブロードキャスト
    ///
    /// 配信に失敗した場合でも登録解除は必ず行われます。
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        nickname: &Nickname,
    ) -> Result<ChatEvent, PublishError> {
        let event = ChatEvent::left(nickname, self.clock.now());
        self.publisher.persist(&event).await;
        self.registry.deregister(connection_id).await;
        self.publisher.broadcast(&event).await?;
        Ok(event)
    }
}
