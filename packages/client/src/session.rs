//! WebSocket client session management.
//!
//! One session is one WebSocket connection. The synchronizer and the input
//! channel are borrowed from the runner so they outlive reconnects.

use futures_util::{SinkExt, StreamExt, stream::SplitSink};
use tokio::{net::TcpStream, sync::mpsc, time::Instant};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};

use coderoom_server::infrastructure::dto::websocket::{ClientMessage, ServerMessage};

use crate::{domain::InputCommand, error::ClientError, synchronizer::Synchronizer};

use super::{formatter::MessageFormatter, ui::redisplay_prompt};

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

fn message_kind(message: &ClientMessage) -> &'static str {
    match message {
        ClientMessage::Join { .. } => "join",
        ClientMessage::CodeChange { .. } => "code_change",
        ClientMessage::LangChange { .. } => "lang_change",
    }
}

async fn send(write: &mut WsSink, message: &ClientMessage) -> Result<(), ClientError> {
    let json = serde_json::to_string(message)
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;
    write.send(Message::Text(json.into())).await.map_err(|e| {
        tracing::warn!("Failed to send {}: {}", message_kind(message), e);
        ClientError::ConnectionLost
    })
}

/// Sleep until the debounce deadline, or forever when nothing is pending.
async fn debounce_fired(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// Run the WebSocket client session
///
/// Returns `Ok(())` when the user quits and an error when the connection
/// could not be opened or was lost.
pub async fn run_client_session(
    ws_url: &str,
    sync: &mut Synchronizer,
    input_rx: &mut mpsc::UnboundedReceiver<InputCommand>,
    prompt: &str,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(ws_url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to {}", ws_url);

    let (mut write, mut read) = ws_stream.split();

    // join は接続のたびに送る（サーバーは再接続を区別しない）
    send(&mut write, &sync.join_message()).await?;
    tracing::info!("Joined room '{}'", sync.room());

    loop {
        tokio::select! {
            message = read.next() => {
                match message {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<ServerMessage>(text.as_str()) {
                            Ok(event) => {
                                let change = sync.apply_remote(event);
                                let notice =
                                    MessageFormatter::format_remote_change(&change, sync.caret());
                                print!("{}", notice);
                                redisplay_prompt(prompt);
                            }
                            Err(e) => tracing::warn!("Ignoring unexpected frame: {}", e),
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::info!("Server closed the connection");
                        return Err(ClientError::ConnectionLost);
                    }
                    Some(Err(e)) => {
                        tracing::warn!("WebSocket read error: {}", e);
                        return Err(ClientError::ConnectionLost);
                    }
                    Some(Ok(_)) => {}
                }
            }
            command = input_rx.recv() => {
                let Some(command) = command else {
                    // 入力スレッドが終了した
                    return Ok(());
                };
                match command {
                    InputCommand::Insert(line) => {
                        sync.insert(&format!("{}\n", line), Instant::now());
                    }
                    InputCommand::Lang(lang) => {
                        let message = sync.set_language(lang);
                        send(&mut write, &message).await?;
                        print!("{}", MessageFormatter::format_sent(message_kind(&message)));
                        redisplay_prompt(prompt);
                    }
                    InputCommand::Caret(offset) => {
                        let caret = sync.set_caret(offset);
                        tracing::debug!("Caret moved to {}", caret);
                    }
                    InputCommand::Clear => sync.clear(Instant::now()),
                    InputCommand::Show => {
                        let view =
                            MessageFormatter::format_buffer(sync.buffer(), sync.caret(), sync.lang());
                        print!("{}", view);
                        redisplay_prompt(prompt);
                    }
                    InputCommand::Quit => {
                        if let Some(message) = sync.flush() {
                            send(&mut write, &message).await?;
                        }
                        write.close().await.ok();
                        return Ok(());
                    }
                    InputCommand::Unknown(line) => {
                        print!("{}", MessageFormatter::format_unknown_command(&line));
                        redisplay_prompt(prompt);
                    }
                }
            }
            _ = debounce_fired(sync.next_deadline()) => {
                if let Some(message) = sync.poll(Instant::now()) {
                    send(&mut write, &message).await?;
                    tracing::debug!(
                        "Sent {} ({} chars)",
                        message_kind(&message),
                        sync.buffer().chars().count()
                    );
                }
            }
        }
    }
}
