//! Data Transfer Objects
//!
//! WebSocket のフレームは `ChatEvent` の JSON そのものなので、ここには HTTP API の型だけを置きます。

pub mod http;
