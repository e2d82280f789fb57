//! HTTP endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::Html,
};

use crate::{
    infrastructure::dto::http::{HealthDto, NewRoomDto},
    ui::state::AppState,
    usecase::CreateRoomUseCase,
};
use coderoom_shared::time::timestamp_to_rfc3339;

/// Mint a fresh room token
pub async fn new_room(
    State(state): State<Arc<AppState>>,
) -> Result<Json<NewRoomDto>, StatusCode> {
    match state.create_room_usecase.execute() {
        Ok(room) => {
            tracing::info!("Room '{}…' minted", room.short());
            let url = CreateRoomUseCase::room_path(&room);
            Ok(Json(NewRoomDto {
                room: room.into_string(),
                url,
            }))
        }
        Err(e) => {
            tracing::error!("Failed to create room: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthDto> {
    let stats = state.get_server_stats_usecase.execute().await;
    Json(HealthDto {
        status: "ok".to_string(),
        rooms: stats.rooms,
        connections: stats.connections,
        started_at: timestamp_to_rfc3339(state.started_at.value()),
    })
}

/// Serve the application shell for a room.
///
/// Only the 36-character hyphenated hex shape is accepted. Whether the room
/// currently has members is not checked.
pub async fn room_page(Path(room): Path<String>) -> Result<Html<String>, StatusCode> {
    if !is_room_token_shape(&room) {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Html(render_room_page(&room)))
}

fn is_room_token_shape(value: &str) -> bool {
    value.len() == 36 && value.chars().all(|c| c.is_ascii_hexdigit() || c == '-')
}

fn render_room_page(room: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Coderoom {room}</title>
</head>
<body>
  <h1>Coderoom</h1>
  <p>Room: <code id="room">{room}</code></p>
  <p>Share this page to edit together, or join from a terminal:</p>
  <pre>coderoom-client --room {room}</pre>
  <p>WebSocket endpoint: <code>/ws</code>, first frame <code>{{"type":"join","room":"{room}"}}</code></p>
</body>
</html>
"#
    )
}
