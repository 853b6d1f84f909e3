//! Infrastructure 層
//!
//! ドメイン層が定義する trait の具体的な実装を提供します。
//!
//! - `history`: History Store の実装（Redis、インメモリ）
//! - `registry`: Connection Registry の WebSocket 実装
//! - `dto`: HTTP API のレスポンス型

pub mod dto;
pub mod history;
pub mod registry;
