//! Connection Registry trait 定義
//!
//! 接続中のクライアントとその送信チャンネルを管理し、
//! 全接続へのブロードキャストを提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::value_object::{ConnectionId, Nickname};

/// 接続ごとの送信チャンネル
///
/// 受信側は UI 層の pusher loop が保持し、WebSocket に書き出します。
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Connection Registry trait
///
/// 複数のセッションハンドラから同時に register / deregister / broadcast が呼ばれても安全であること。
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// 接続を登録
    async fn register(&self, id: ConnectionId, nickname: Nickname, sender: PusherChannel);

    /// 接続を登録解除（存在しない ID は無視）
    async fn deregister(&self, id: &ConnectionId);

    /// 呼び出し時点で登録されている全ての接続に送信
    ///
    /// 一部の接続への送信失敗は握りつぶし、他の接続への配信を止めない。
    /// 送信に失敗した接続はその場で登録解除してよい。
    async fn broadcast(&self, content: &str);

    /// 接続中の参加者の nickname 一覧
    async fn nicknames(&self) -> Vec<Nickname>;

    /// 接続数
    async fn count(&self) -> usize;
}
