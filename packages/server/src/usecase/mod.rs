//! UseCase 層
//!
//! セッションハンドラ（UI 層）から呼ばれるアプリケーションロジックです。
//! History Store と Connection Registry にはドメイン層の trait 経由でのみ依存します。

mod error;
mod get_history;
mod get_participants;
mod join_chat;
mod leave_chat;
mod publish;
mod send_message;

pub use error::PublishError;
pub use get_history::GetHistoryUseCase;
pub use get_participants::GetParticipantsUseCase;
pub use join_chat::{JoinChatUseCase, JoinedSession};
pub use leave_chat::LeaveChatUseCase;
pub use publish::EventPublisher;
pub use send_message::SendMessageUseCase;
