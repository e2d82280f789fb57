//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 切断した接続がディレクトリと MessagePusher の両方から取り除かれること
//!
//! ### どのような状況を想定しているか
//! - 正常系：ルーム参加中の接続の切断（ルームのメンバーから外れる）
//! - エッジケース：最後のメンバーの切断（ルーム自体が消える）
//! - 異常系：存在しない接続の切断試行
//!
//! 切断は他の参加者に通知しない（部分配信の通知も行わない）。

use std::sync::Arc;

use coderoom_shared::time::timestamp_to_rfc3339;

use crate::domain::{ConnectionId, MessagePusher, RepositoryError, RoomRepository, RoomToken};

use super::error::DisconnectError;

/// 切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 切断を実行
    ///
    /// 送信チャンネルを先に登録解除するため、進行中のファンアウトが
    /// この接続を対象に含んでいても配信時にスキップされる。
    ///
    /// # Returns
    ///
    /// * `Ok(Some(RoomToken))` - 切断した接続が参加していたルーム
    /// * `Ok(None)` - ルーム未参加のまま切断した
    /// * `Err(DisconnectError)` - 接続が登録されていない
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<Option<RoomToken>, DisconnectError> {
        self.message_pusher.unregister_client(connection_id).await;

        let connection = self
            .repository
            .remove_connection(connection_id)
            .await
            .map_err(|e| match e {
                RepositoryError::ConnectionNotFound(id) => DisconnectError::ConnectionNotFound(id),
                other => DisconnectError::Repository(other),
            })?;

        tracing::debug!(
            "Connection '{}' removed (connected since {})",
            connection.id.as_str(),
            timestamp_to_rfc3339(connection.connected_at.value())
        );

        Ok(connection.room)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{Connection, ConnectionIdFactory, Timestamp},
        infrastructure::{
            message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRepository,
        },
    };

    fn token(value: &str) -> RoomToken {
        RoomToken::new(value.to_string()).unwrap()
    }

    async fn connect_and_join(
        repository: &InMemoryRoomRepository,
        room: Option<&str>,
    ) -> ConnectionId {
        let id = ConnectionIdFactory::generate().unwrap();
        repository
            .register_connection(Connection::new(id.clone(), Timestamp::new(1000)))
            .await
            .unwrap();
        if let Some(room) = room {
            repository.join_room(&id, token(room)).await.unwrap();
        }
        id
    }

    fn create_usecase(repository: Arc<InMemoryRoomRepository>) -> DisconnectParticipantUseCase {
        DisconnectParticipantUseCase::new(repository, Arc::new(WebSocketMessagePusher::default()))
    }

    #[tokio::test]
    async fn test_disconnect_removes_member_from_room() {
        // テスト項目: 切断した接続はルームのメンバーから外れる
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::default());
        let usecase = create_usecase(repository.clone());
        let alice = connect_and_join(&repository, Some("abc123")).await;
        let bob = connect_and_join(&repository, Some("abc123")).await;

        // when (操作):
        let result = usecase.execute(&alice).await;

        // then (期待する結果):
        assert_eq!(result, Ok(Some(token("abc123"))));
        assert_eq!(repository.member_ids(&token("abc123")).await, vec![bob]);
        assert_eq!(repository.count_connections().await, 1);
    }

    #[tokio::test]
    async fn test_disconnect_last_member_drops_room() {
        // テスト項目: 最後のメンバーが切断するとルームが消える
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::default());
        let usecase = create_usecase(repository.clone());
        let alice = connect_and_join(&repository, Some("abc123")).await;

        // when (操作):
        usecase.execute(&alice).await.unwrap();

        // then (期待する結果):
        assert_eq!(repository.count_rooms().await, 0);
    }

    #[tokio::test]
    async fn test_disconnect_without_room() {
        // テスト項目: ルーム未参加の接続の切断は None を返す
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::default());
        let usecase = create_usecase(repository.clone());
        let alice = connect_and_join(&repository, None).await;

        // when (操作):
        let result = usecase.execute(&alice).await;

        // then (期待する結果):
        assert_eq!(result, Ok(None));
        assert_eq!(repository.count_connections().await, 0);
    }

    #[tokio::test]
    async fn test_disconnect_nonexistent_connection() {
        // テスト項目: 存在しない接続の切断試行がエラーになる
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::default());
        let usecase = create_usecase(repository.clone());
        let ghost = ConnectionIdFactory::generate().unwrap();

        // when (操作):
        let result = usecase.execute(&ghost).await;

        // then (期待する結果):
        assert!(matches!(result, Err(DisconnectError::ConnectionNotFound(_))));
    }
}
