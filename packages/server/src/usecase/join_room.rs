//! UseCase: ルーム参加処理
//!
//! join は fire-and-forget であり、参加者にもルームの他のメンバーにも通知しない。
//! サーバーはルームの内容を保持しないため、途中参加者への初期同期も行わない。

use std::sync::Arc;

use crate::domain::{ConnectionId, RepositoryError, RoomRepository, RoomToken};

use super::error::JoinRoomError;

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 接続をルームに参加させる
    ///
    /// # Returns
    ///
    /// * `Ok(Some(RoomToken))` - 以前のルームから移動した（そのルームのトークン）
    /// * `Ok(None)` - 初めての参加、または既に同じルームにいた
    /// * `Err(JoinRoomError)` - 接続が登録されていない
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        room: RoomToken,
    ) -> Result<Option<RoomToken>, JoinRoomError> {
        self.repository
            .join_room(connection_id, room)
            .await
            .map_err(|e| match e {
                RepositoryError::ConnectionNotFound(id) => JoinRoomError::ConnectionNotFound(id),
                other => JoinRoomError::Repository(other),
            })
    }
}
