//! UseCase: 接続中の参加者一覧の取得（HTTP API 用）

use std::sync::Arc;

use crate::domain::ConnectionRegistry;

pub struct GetParticipantsUseCase {
    registry: Arc<dyn ConnectionRegistry>,
}

impl GetParticipantsUseCase {
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// 接続中の nickname を昇順で返す（同名の接続はそれぞれ含む）
    pub async fn execute(&self) -> Vec<String> {
        let mut nicknames: Vec<String> = self
            .registry
            .nicknames()
            .await
            .into_iter()
            .map(|n| n.as_str().to_string())
            .collect();
        nicknames.sort();
        nicknames
    }
}
