//! ドメイン層のエラー型

use thiserror::Error;

/// Nickname の検証エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NicknameError {
    #[error("nickname is missing or blank")]
    Empty,
}

/// History Store の操作エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// ストアに到達できない、またはコマンドが失敗した
    #[error("history store unavailable: {0}")]
    Unavailable(String),

    /// ストアの応答がタイムアウトした
    #[error("history store timed out after {0} ms")]
    Timeout(u64),

    /// イベントのシリアライズに失敗した
    #[error("failed to serialize chat event: {0}")]
    Serialization(String),
}
