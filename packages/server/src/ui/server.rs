//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use coderoom_shared::time::Clock;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    domain::Timestamp,
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRepository},
    usecase::{
        ConnectParticipantUseCase, CreateRoomUseCase, DisconnectParticipantUseCase,
        GetServerStatsUseCase, JoinRoomUseCase, RelayEventUseCase,
    },
};

use super::{
    handler::{health_check, new_room, room_page, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Coderoom relay server
///
/// # Example
///
/// ```ignore
/// let server = Server::with_in_memory_store(Arc::new(SystemClock));
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    /// ConnectParticipantUseCase（接続受付のユースケース）
    connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// DisconnectParticipantUseCase（切断のユースケース）
    disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// JoinRoomUseCase（ルーム参加のユースケース）
    join_room_usecase: Arc<JoinRoomUseCase>,
    /// RelayEventUseCase（イベント中継のユースケース）
    relay_event_usecase: Arc<RelayEventUseCase>,
    /// CreateRoomUseCase（ルーム作成のユースケース）
    create_room_usecase: Arc<CreateRoomUseCase>,
    /// GetServerStatsUseCase（サーバー統計取得のユースケース）
    get_server_stats_usecase: Arc<GetServerStatsUseCase>,
    started_at: Timestamp,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `connect_participant_usecase` - UseCase for accepting connections
    /// * `disconnect_participant_usecase` - UseCase for connection cleanup
    /// * `join_room_usecase` - UseCase for room membership
    /// * `relay_event_usecase` - UseCase for fanning out edits
    /// * `create_room_usecase` - UseCase for minting room tokens
    /// * `get_server_stats_usecase` - UseCase for the health endpoint
    /// * `started_at` - Reported by the health endpoint
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        connect_participant_usecase: Arc<ConnectParticipantUseCase>,
        disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
        join_room_usecase: Arc<JoinRoomUseCase>,
        relay_event_usecase: Arc<RelayEventUseCase>,
        create_room_usecase: Arc<CreateRoomUseCase>,
        get_server_stats_usecase: Arc<GetServerStatsUseCase>,
        started_at: Timestamp,
    ) -> Self {
        Self {
            connect_participant_usecase,
            disconnect_participant_usecase,
            join_room_usecase,
            relay_event_usecase,
            create_room_usecase,
            get_server_stats_usecase,
            started_at,
        }
    }

    /// Wire every usecase against the in-memory directory and the WebSocket pusher.
    pub fn with_in_memory_store(clock: Arc<dyn Clock>) -> Self {
        // 1. Repository / MessagePusher
        let repository = Arc::new(InMemoryRoomRepository::default());
        let message_pusher = Arc::new(WebSocketMessagePusher::default());

        // 2. UseCases
        let connect_participant_usecase = Arc::new(ConnectParticipantUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            clock.clone(),
        ));
        let disconnect_participant_usecase = Arc::new(DisconnectParticipantUseCase::new(
            repository.clone(),
            message_pusher.clone(),
        ));
        let join_room_usecase = Arc::new(JoinRoomUseCase::new(repository.clone()));
        let relay_event_usecase = Arc::new(RelayEventUseCase::new(
            repository.clone(),
            message_pusher.clone(),
        ));
        let create_room_usecase = Arc::new(CreateRoomUseCase::new());
        let get_server_stats_usecase = Arc::new(GetServerStatsUseCase::new(repository));

        Self::new(
            connect_participant_usecase,
            disconnect_participant_usecase,
            join_room_usecase,
            relay_event_usecase,
            create_room_usecase,
            get_server_stats_usecase,
            Timestamp::new(clock.now_millis()),
        )
    }

    /// Build the router without binding a socket.
    pub fn router(self) -> Router {
        let app_state = Arc::new(AppState {
            connect_participant_usecase: self.connect_participant_usecase,
            disconnect_participant_usecase: self.disconnect_participant_usecase,
            join_room_usecase: self.join_room_usecase,
            relay_event_usecase: self.relay_event_usecase,
            create_room_usecase: self.create_room_usecase,
            get_server_stats_usecase: self.get_server_stats_usecase,
            started_at: self.started_at,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/new", get(new_room))
            .route("/api/health", get(health_check))
            .route("/{room}", get(room_page))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Serve on an already bound listener until a shutdown signal arrives.
    pub async fn serve(self, listener: TcpListener) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        tracing::info!("Coderoom server listening on {}", listener.local_addr()?);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Run the relay server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Create a room at: http://{}/new", bind_addr);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener).await
    }
}
