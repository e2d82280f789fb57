//! Server state shared by every handler.

use std::sync::Arc;

use crate::{
    domain::Timestamp,
    usecase::{
        ConnectParticipantUseCase, CreateRoomUseCase, DisconnectParticipantUseCase,
        GetServerStatsUseCase, JoinRoomUseCase, RelayEventUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// ConnectParticipantUseCase（接続受付のユースケース）
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// DisconnectParticipantUseCase（切断のユースケース）
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// JoinRoomUseCase（ルーム参加のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// RelayEventUseCase（イベント中継のユースケース）
    pub relay_event_usecase: Arc<RelayEventUseCase>,
    /// CreateRoomUseCase（ルーム作成のユースケース）
    pub create_room_usecase: Arc<CreateRoomUseCase>,
    /// GetServerStatsUseCase（サーバー統計取得のユースケース）
    pub get_server_stats_usecase: Arc<GetServerStatsUseCase>,
    /// Server start time
    pub started_at: Timestamp,
}
