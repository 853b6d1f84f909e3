//! Server state.

use std::sync::Arc;

use notehub_chat_shared::time::Clock;

use crate::{
    domain::{ConnectionRegistry, HistoryStore},
    usecase::{
        EventPublisher, GetHistoryUseCase, GetParticipantsUseCase, JoinChatUseCase,
        LeaveChatUseCase, SendMessageUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// JoinChatUseCase（入室のユースケース）
    pub join_chat_usecase: JoinChatUseCase,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message_usecase: SendMessageUseCase,
    /// LeaveChatUseCase（退室のユースケース）
    pub leave_chat_usecase: LeaveChatUseCase,
    /// GetHistoryUseCase（履歴取得のユースケース）
    pub get_history_usecase: GetHistoryUseCase,
    /// GetParticipantsUseCase（参加者一覧取得のユースケース）
    pub get_participants_usecase: GetParticipantsUseCase,
}

impl AppState {
    /// Wire every use case around one history store and one connection registry
    ///
    /// # Arguments
    ///
    /// * `history` - History store shared by all sessions
    /// * `registry` - Connection registry owned by this server instance
    /// * `clock` - Clock used to timestamp chat events
    /// * `replay_len` - Number of history entries replayed on join
    pub fn new(
        history: Arc<dyn HistoryStore>,
        registry: Arc<dyn ConnectionRegistry>,
        clock: Arc<dyn Clock>,
        replay_len: usize,
    ) -> Self {
        let publisher = Arc::new(EventPublisher::new(history.clone(), registry.clone()));

        Self {
            join_chat_usecase: JoinChatUseCase::new(
                history.clone(),
                registry.clone(),
                publisher.clone(),
                clock.clone(),
                replay_len,
            ),
            send_message_usecase: SendMessageUseCase::new(publisher.clone(), clock.clone()),
            leave_chat_usecase: LeaveChatUseCase::new(registry.clone(), publisher, clock),
            get_history_usecase: GetHistoryUseCase::new(history, replay_len),
            get_participants_usecase: GetParticipantsUseCase::new(registry),
        }
    }
}
