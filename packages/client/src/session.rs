//! WebSocket client session management.

use futures_util::{
    SinkExt, StreamExt,
    stream::{SplitSink, SplitStream},
};
use notehub_chat_server::domain::ChatEvent;
use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::{net::TcpStream, sync::mpsc};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};
use url::Url;

use super::{error::ClientError, formatter::MessageFormatter, ui::redisplay_prompt};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Build the connect URL with the nickname as query parameter
pub fn build_connect_url(base_url: &str, nickname: &str) -> Result<Url, ClientError> {
    let mut url = Url::parse(base_url)
        .map_err(|e| ClientError::InvalidUrl(base_url.to_string(), e.to_string()))?;
    url.query_pairs_mut().append_pair("nickname", nickname);
    Ok(url)
}

/// Run one chat session until the user quits or the connection drops
///
/// Returns `Ok(())` when the user ends the session (Ctrl+C / Ctrl+D) and
/// `Err(ClientError::ConnectionError)` when the connection is lost.
pub async fn run_client_session(url: &Url, nickname: &str) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url.as_str())
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Joined the chat as '{}'", nickname);
    println!(
        "\nYou are '{}'. Type a line and press Enter to post it. Ctrl+C or Ctrl+D leaves the chat.\n",
        nickname
    );

    let (outgoing, incoming) = ws_stream.split();
    let lines = spawn_line_reader(format!("{}> ", nickname));

    let mut display = tokio::spawn(display_incoming(incoming, nickname.to_string()));
    let mut forward = tokio::spawn(forward_lines(lines, outgoing));

    tokio::select! {
        _ = &mut display => {
            forward.abort();
            Err(ClientError::ConnectionError("server closed the connection".to_string()))
        }
        forwarded = &mut forward => {
            display.abort();
            match forwarded {
                Ok(LineSource::Exhausted) => Ok(()),
                _ => Err(ClientError::ConnectionError("failed to post message".to_string())),
            }
        }
    }
}

/// Why `forward_lines` stopped
enum LineSource {
    /// The user left (Ctrl+C / Ctrl+D)
    Exhausted,
    /// The socket refused a frame
    SocketFailed,
}

/// Print every event from the server until the stream ends
async fn display_incoming(mut incoming: SplitStream<WsStream>, nickname: String) {
    while let Some(frame) = incoming.next().await {
        let text = match frame {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) => {
                tracing::info!("Chat server closed the connection");
                return;
            }
            Ok(_) => continue,
            Err(e) => {
                tracing::warn!("Lost connection to chat server: {}", e);
                return;
            }
        };

        let rendered = ChatEvent::from_json(text.as_str())
            .map(|event| MessageFormatter::format_event(&event, &nickname))
            .unwrap_or_else(|_| MessageFormatter::format_raw_message(text.as_str()));
        print!("{}", rendered);
        redisplay_prompt(&nickname);
    }
}

/// Post each typed line as one text frame
async fn forward_lines(
    mut lines: mpsc::UnboundedReceiver<String>,
    mut outgoing: SplitSink<WsStream, Message>,
) -> LineSource {
    while let Some(line) = lines.recv().await {
        if let Err(e) = outgoing.send(Message::Text(line.into())).await {
            tracing::warn!("Failed to post message: {}", e);
            return LineSource::SocketFailed;
        }
    }
    outgoing.close().await.ok();
    LineSource::Exhausted
}

/// Read stdin lines on a dedicated thread, since rustyline blocks
///
/// Blank lines are skipped here; the server would drop them anyway.
fn spawn_line_reader(prompt: String) -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        let mut editor = match DefaultEditor::new() {
            Ok(editor) => editor,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            let line = match editor.readline(&prompt) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                    tracing::info!("Leaving the chat");
                    return;
                }
                Err(e) => {
                    tracing::error!("Readline error: {}", e);
                    return;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            editor.add_history_entry(line.as_str()).ok();
            if tx.send(line).is_err() {
                return;
            }
        }
    });
    rx
}
