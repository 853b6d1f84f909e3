//! History Store trait 定義
//!
//! 直近のチャットイベントを保持する、上限付きの順序付きリストへのインターフェース。
//! Redis のリストのように複数プロセスで共有される外部ストアを想定しています。

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::{entity::ChatEvent, error::HistoryError};

/// History Store trait
///
/// ## 保証すべき性質
///
/// - `append` は末尾への追加と先頭からの trim を一つのアトミックな操作として行う
/// - ストアが保持するイベント数は上限を超えない（古いものから削除、FIFO）
/// - 既存のエントリの順序を入れ替えない
#[cfg_attr(test, automock)]
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// イベントをシリアライズして末尾に追加し、上限を超えた分を先頭から削除する
    async fn append(&self, event: &ChatEvent) -> Result<(), HistoryError>;

    /// 直近 `n` 件のシリアライズ済みイベントを古い順に返す
    ///
    /// 保持件数が `n` 未満ならある分だけ返します。
    async fn replay(&self, n: usize) -> Result<Vec<String>, HistoryError>;
}
