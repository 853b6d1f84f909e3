//! History Store の実装
//!
//! - `redis_store`: Redis のリストを使った実装（複数プロセスで共有）
//! - `in_memory`: プロセス内の VecDeque を使った実装（単一ノード、テスト用）

pub mod in_memory;
pub mod redis_store;

pub use in_memory::InMemoryHistoryStore;
pub use redis_store::RedisHistoryStore;
