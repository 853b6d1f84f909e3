//! WebSocket connection handlers.
//!
//! Each connection moves through `CONNECTING → ACTIVE → CLOSED`:
//!
//! - CONNECTING: the `nickname` query parameter is validated. A missing or
//!   blank nickname gets its socket closed right after the upgrade.
//! - ACTIVE: the connection is registered, the recent history is replayed to
//!   it, a join event is published, then inbound frames are relayed.
//! - CLOSED: a leave event is persisted, the connection is deregistered and
//!   the remaining connections are notified. This runs once per connection.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, Stream, StreamExt},
};
use serde::Deserialize;
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};

use crate::{domain::Nickname, ui::state::AppState};

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub nickname: Option<String>,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Response {
    match query.nickname.map(Nickname::try_from) {
        Some(Ok(nickname)) => ws.on_upgrade(move |socket| handle_socket(socket, state, nickname)),
        Some(Err(e)) => {
            tracing::warn!("Rejecting chat connection: {}", e);
            ws.on_upgrade(reject_socket)
        }
        None => {
            tracing::warn!("Rejecting chat connection: nickname query parameter is missing");
            ws.on_upgrade(reject_socket)
        }
    }
}

/// Close the socket without sending any event
async fn reject_socket(mut socket: WebSocket) {
    if let Err(e) = socket.send(Message::Close(None)).await {
        tracing::debug!("Failed to close rejected socket: {}", e);
    }
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// This function handles the outbound message flow: events broadcast by any
/// session (via rx channel) are sent to this client's WebSocket connection.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

/// Spawns a task that relays inbound text frames through `SendMessageUseCase`.
///
/// The task ends when the client closes the connection, the stream ends, or
/// the transport reports an error. All three are treated as a disconnect.
/// `stop` is only observed between frames, so a frame that is being published
/// is always both persisted and broadcast.
fn receiver_loop<S>(
    mut receiver: S,
    state: Arc<AppState>,
    nickname: Nickname,
    mut stop: oneshot::Receiver<()>,
) -> JoinHandle<()>
where
    S: Stream<Item = Result<Message, axum::Error>> + Send + Unpin + 'static,
{
    tokio::spawn(async move {
        loop {
            let msg = tokio::select! {
                biased;
                _ = &mut stop => {
                    tracing::debug!("Outbound side of '{}' is gone, stop relaying", nickname);
                    break;
                }
                msg = receiver.next() => msg,
            };

            let msg = match msg {
                Some(Ok(msg)) => msg,
                Some(Err(e)) => {
                    tracing::warn!("WebSocket error from '{}': {}", nickname, e);
                    break;
                }
                None => break,
            };

            match msg {
                Message::Text(text) => {
                    match state
                        .send_message_usecase
                        .execute(&nickname, text.as_str())
                        .await
                    {
                        Ok(Some(_)) => {
                            tracing::debug!("Relayed message from '{}'", nickname);
                        }
                        Ok(None) => {
                            tracing::debug!("Ignored blank message from '{}'", nickname);
                        }
                        Err(e) => {
                            tracing::warn!("Failed to relay message from '{}': {}", nickname, e);
                        }
                    }
                }
                Message::Close(_) => {
                    tracing::info!("Client '{}' requested close", nickname);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                _ => {}
            }
        }
    })
}

/// Send the history backlog straight to the socket, before any live traffic.
///
/// Returns `false` if the socket is already gone.
async fn replay_backlog(
    sender: &mut SplitSink<WebSocket, Message>,
    backlog: Vec<String>,
    nickname: &Nickname,
) -> bool {
    let count = backlog.len();
    for entry in backlog {
        if let Err(e) = sender.send(Message::Text(entry.into())).await {
            tracing::warn!("Failed to replay history to '{}': {}", nickname, e);
            return false;
        }
    }
    tracing::debug!("Replayed {} history event(s) to '{}'", count, nickname);
    true
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, nickname: Nickname) {
    let (mut sender, receiver) = socket.split();

    // Create a channel for this connection to receive broadcasts
    let (tx, rx) = mpsc::unbounded_channel();

    // Register and fetch the backlog. Broadcasts from now on queue up in rx.
    let session = state
        .join_chat_usecase
        .execute(nickname.clone(), tx)
        .await;
    let connection_id = session.connection_id;
    tracing::info!(
        "Client '{}' connected and registered as '{}'",
        nickname,
        connection_id
    );

    let replayed = replay_backlog(&mut sender, session.backlog, &nickname).await;

    match state.join_chat_usecase.announce_joined(&nickname).await {
        Ok(_) => tracing::info!("Broadcasted join event for '{}'", nickname),
        Err(e) => tracing::warn!("Failed to broadcast join event for '{}': {}", nickname, e),
    }

    if replayed {
        let (stop_tx, stop_rx) = oneshot::channel();
        let mut send_task = pusher_loop(rx, sender);
        let mut recv_task = receiver_loop(receiver, state.clone(), nickname.clone(), stop_rx);

        let pusher_ended_first = tokio::select! {
            _ = &mut recv_task => false,
            _ = &mut send_task => true,
        };

        // The pusher can be aborted at any point. The receiver is asked to stop
        // and then awaited, so it never dies halfway through a publish.
        if pusher_ended_first {
            let _ = stop_tx.send(());
            if let Err(e) = recv_task.await {
                tracing::warn!("Receive task of '{}' failed: {}", nickname, e);
            }
        } else {
            send_task.abort();
        }
    }

    match state
        .leave_chat_usecase
        .execute(&connection_id, &nickname)
        .await
    {
        Ok(_) => tracing::info!(
            "Client '{}' disconnected and removed from registry",
            nickname
        ),
        Err(e) => tracing::warn!("Failed to broadcast leave event for '{}': {}", nickname, e),
    }
}
