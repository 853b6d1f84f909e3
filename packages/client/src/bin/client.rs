//! Interactive CLI client for the NoteHub anonymous chat room.
//!
//! Joins the room under a nickname, prints the replayed history and live
//! events, and sends each stdin line as a chat message.
//! Reconnects on disconnection (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin notehub-chat-client -- --nickname Alice
//! cargo run --bin notehub-chat-client -- -n Bob -u ws://127.0.0.1:8080/ws/anon-chat
//! ```

use clap::Parser;

use notehub_chat_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "notehub-chat-client")]
#[command(about = "CLI client for the NoteHub anonymous chat room", long_about = None)]
struct Args {
    /// Nickname shown to other participants (need not be unique)
    #[arg(short = 'n', long)]
    nickname: String,

    /// WebSocket endpoint of the chat server
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws/anon-chat")]
    url: String,
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_CRATE_NAME"), env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = notehub_chat_client::run_client(args.url, args.nickname).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
