//! CLI client for the NoteHub anonymous chat room.

pub mod error;
mod formatter;
mod runner;
mod session;
mod ui;

pub use formatter::MessageFormatter;
pub use runner::run_client;
