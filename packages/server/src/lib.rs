//! NoteHub anonymous chat relay.
//!
//! Clients join over WebSocket with a nickname, receive the most recent
//! history, and exchange messages that are persisted to a bounded history
//! store and broadcast to every live connection.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
