//! Shared utilities for the NoteHub chat server and client.

pub mod logger;
pub mod time;
