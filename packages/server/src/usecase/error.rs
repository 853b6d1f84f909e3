//! UseCase 層のエラー型

use thiserror::Error;

/// イベントのブロードキャストに失敗した
///
/// History Store への保存失敗はここには含めません（警告ログのみで配信を続けるため）。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishError {
    #[error("failed to serialize chat event: {0}")]
    Serialization(String),
}
