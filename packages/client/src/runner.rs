//! Client execution logic with reconnection support.

use std::time::Duration;

use coderoom_server::infrastructure::dto::http::NewRoomDto;

use crate::{
    domain::{should_attempt_reconnect, websocket_url},
    error::ClientError,
    synchronizer::Synchronizer,
};

use super::{
    formatter::MessageFormatter,
    session::run_client_session,
    ui::{prompt, spawn_input_reader},
};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Client settings taken from the command line
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// HTTP base URL of the server
    pub url: String,
    /// Room to join; a new one is minted when absent
    pub room: Option<String>,
    /// Initial language
    pub lang: String,
    /// Quiescence window for local edits
    pub debounce: Duration,
}

/// Mint a room through `GET /new`
async fn create_room(base_url: &str) -> Result<String, ClientError> {
    let url = format!("{}/new", base_url.trim_end_matches('/'));
    let response = reqwest::get(&url)
        .await
        .map_err(|e| ClientError::RoomCreation(e.to_string()))?
        .error_for_status()
        .map_err(|e| ClientError::RoomCreation(e.to_string()))?;
    let dto: NewRoomDto = response
        .json()
        .await
        .map_err(|e| ClientError::RoomCreation(e.to_string()))?;
    tracing::info!("Created room '{}'", dto.room);
    Ok(dto.room)
}

/// Run the Coderoom client with reconnection logic
pub async fn run_client(config: ClientConfig) -> Result<(), ClientError> {
    let ws_url = websocket_url(&config.url)?;
    let room = match config.room {
        Some(room) => room,
        None => create_room(&config.url).await?,
    };

    print!("{}", MessageFormatter::format_welcome(&room, &config.url));

    let prompt = prompt(&room);
    let mut sync = Synchronizer::new(room, config.lang, config.debounce);
    let mut input_rx = spawn_input_reader(prompt.clone());
    let mut reconnect_count = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} (attempt {}/{})",
            ws_url,
            reconnect_count + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        match run_client_session(&ws_url, &mut sync, &mut input_rx, &prompt).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                // If connection ended normally (user exit), don't reconnect
                return Ok(());
            }
            Err(e) => {
                tracing::warn!("{}", e);
                reconnect_count += 1;

                if !should_attempt_reconnect(&e, reconnect_count, MAX_RECONNECT_ATTEMPTS) {
                    tracing::error!("Giving up after {} attempt(s). Exiting.", reconnect_count);
                    return Err(e);
                }

                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    reconnect_count + 1,
                    MAX_RECONNECT_ATTEMPTS
                );

                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
            }
        }
    }
}
