//! ドメイン層
//!
//! チャットの中核となる型（`ChatEvent`、値オブジェクト）と、
//! ユースケース層が依存するインターフェース（`HistoryStore`、`ConnectionRegistry`）を定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

pub mod entity;
pub mod error;
pub mod history;
pub mod registry;
pub mod value_object;

pub use entity::{ChatEvent, ChatEventType};
pub use error::{HistoryError, NicknameError};
pub use history::HistoryStore;
pub use registry::{ConnectionRegistry, PusherChannel};
pub use value_object::{ConnectionId, MessageText, Nickname};
