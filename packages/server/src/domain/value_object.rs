//! 値オブジェクト

use std::fmt;

use uuid::Uuid;

use super::error::NicknameError;

/// チャット参加者の表示名
///
/// 前後の空白を取り除いた、空でない文字列です。
/// 匿名チャットなので一意性は要求しません。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Nickname(String);

impl Nickname {
    pub fn new(value: impl AsRef<str>) -> Result<Self, NicknameError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(NicknameError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Nickname {
    type Error = NicknameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Nickname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// クライアントから送られたメッセージ本文（trim 済み、空でない）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageText(String);

impl MessageText {
    /// 受信したフレームから本文を作る
    ///
    /// trim した結果が空なら `None` を返します（エラーではなく no-op）。
    pub fn from_frame(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Connection Registry 内で接続を識別する ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nickname_is_trimmed() {
        // テスト項目: Nickname は前後の空白が取り除かれる
        // given (前提条件):
        let raw = "  alice ";

        // when (操作):
        let nickname = Nickname::new(raw);

        // then (期待する結果):
        assert_eq!(nickname.unwrap().as_str(), "alice");
    }

    #[test]
    fn test_nickname_rejects_empty_and_blank() {
        // テスト項目: 空文字列や空白のみの Nickname は拒否される
        // given (前提条件):
        let candidates = ["", "   ", "\t\n"];

        // when (操作) / then (期待する結果):
        for raw in candidates {
            assert_eq!(Nickname::new(raw), Err(NicknameError::Empty));
        }
    }

    #[test]
    fn test_nickname_keeps_unicode() {
        // テスト項目: 非ラテン文字の Nickname がそのまま保持される
        // given (前提条件):
        let raw = "Вася".to_string();

        // when (操作):
        let nickname = Nickname::try_from(raw);

        // then (期待する結果):
        assert_eq!(nickname.unwrap().to_string(), "Вася");
    }

    #[test]
    fn test_message_text_trims_input() {
        // テスト項目: メッセージ本文は trim される
        // given (前提条件):
        let raw = "  hello world \n";

        // when (操作):
        let text = MessageText::from_frame(raw);

        // then (期待する結果):
        assert_eq!(text.map(MessageText::into_inner), Some("hello world".to_string()));
    }

    #[test]
    fn test_message_text_whitespace_only_is_dropped() {
        // テスト項目: 空白のみのメッセージは None になる
        // given (前提条件):
        let raw = "   ";

        // when (操作):
        let text = MessageText::from_frame(raw);

        // then (期待する結果):
        assert!(text.is_none());
    }

    #[test]
    fn test_connection_ids_are_unique() {
        // テスト項目: 生成される ConnectionId は毎回異なる
        // given (前提条件) / when (操作):
        let first = ConnectionId::generate();
        let second = ConnectionId::generate();

        // then (期待する結果):
        assert_ne!(first, second);
    }
}
