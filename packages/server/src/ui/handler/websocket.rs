//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, InboundEvent},
    infrastructure::dto::websocket::ClientMessage,
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// Relayed events from room peers arrive on `rx` in the order they were
/// routed, and are written to this connection in that same order.
///
/// # Arguments
///
/// * `rx` - Channel receiver for events relayed from peers
/// * `sender` - WebSocket sink to send messages to this connection
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

/// Handle one text frame from a connection.
///
/// Malformed frames are dropped with a warning and the connection stays open.
async fn handle_text(state: &AppState, connection_id: &ConnectionId, text: &str) {
    let message = match serde_json::from_str::<ClientMessage>(text) {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!(
                "Dropping malformed frame from '{}': {}",
                connection_id.as_str(),
                e
            );
            return;
        }
    };

    // Convert DTO -> Domain Event
    let event = match InboundEvent::try_from(message) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!(
                "Dropping invalid frame from '{}': {}",
                connection_id.as_str(),
                e
            );
            return;
        }
    };

    match event {
        InboundEvent::Join { room } => {
            let token = room.short().to_string();
            match state.join_room_usecase.execute(connection_id, room).await {
                Ok(Some(previous)) => tracing::info!(
                    "Connection '{}' moved from room '{}…' to '{}…'",
                    connection_id.as_str(),
                    previous.short(),
                    token
                ),
                Ok(None) => tracing::info!(
                    "Connection '{}' joined room '{}…'",
                    connection_id.as_str(),
                    token
                ),
                Err(e) => tracing::warn!("Failed to join room '{}…': {}", token, e),
            }
        }
        relayable => {
            if let Some((room, outbound)) = relayable.into_relay() {
                state
                    .relay_event_usecase
                    .execute(connection_id, room, outbound)
                    .await;
            }
        }
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    // Create a channel for this connection to receive relayed events
    let (tx, rx) = mpsc::unbounded_channel();

    // Use ConnectParticipantUseCase to register the connection
    // (register_client is called inside the UseCase)
    let connection = match state.connect_participant_usecase.execute(tx).await {
        Ok(connection) => connection,
        Err(e) => {
            tracing::error!("Failed to register connection: {}", e);
            return;
        }
    };
    let connection_id = connection.id;
    tracing::info!("Connection '{}' opened", connection_id.as_str());

    let (sender, mut receiver) = socket.split();

    let state_clone = state.clone();
    let connection_id_clone = connection_id.clone();

    // Spawn a task to receive events from this connection
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received text: {}", text.as_str());
                    handle_text(&state_clone, &connection_id_clone, text.as_str()).await;
                }
                Message::Binary(_) => {
                    tracing::warn!(
                        "Dropping binary frame from '{}'",
                        connection_id_clone.as_str()
                    );
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!(
                        "Connection '{}' requested close",
                        connection_id_clone.as_str()
                    );
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to push relayed events to this connection
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Use DisconnectParticipantUseCase to clean up (peers are not notified)
    match state
        .disconnect_participant_usecase
        .execute(&connection_id)
        .await
    {
        Ok(Some(room)) => tracing::info!(
            "Connection '{}' closed and left room '{}…'",
            connection_id.as_str(),
            room.short()
        ),
        Ok(None) => tracing::info!(
            "Connection '{}' closed without joining a room",
            connection_id.as_str()
        ),
        Err(e) => tracing::warn!(
            "Failed to disconnect '{}': {}",
            connection_id.as_str(),
            e
        ),
    }
}
