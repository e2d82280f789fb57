//! UseCase: 接続受付処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - 新しい接続への ID 付与、ディレクトリへの登録、送信チャンネルの登録
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規接続はどのルームにも属さない状態で登録される
//! - 正常系：複数の接続がそれぞれ別の ID を受け取る

use std::sync::Arc;

use coderoom_shared::time::Clock;

use crate::domain::{
    Connection, ConnectionIdFactory, MessagePusher, PusherChannel, RepositoryError,
    RoomRepository, Timestamp,
};

use super::error::ConnectError;

/// 接続受付のユースケース
pub struct ConnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// 接続時刻の取得元
    clock: Arc<dyn Clock>,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
        }
    }

    /// 接続を登録する
    ///
    /// # Arguments
    ///
    /// * `sender` - この接続へのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(Connection)` - 登録された接続（ルーム未参加）
    /// * `Err(ConnectError)` - 登録失敗
    pub async fn execute(&self, sender: PusherChannel) -> Result<Connection, ConnectError> {
        let id = ConnectionIdFactory::generate().map_err(|_| ConnectError::IdGenerationFailed)?;
        let connection = Connection::new(id.clone(), Timestamp::new(self.clock.now_millis()));

        self.repository
            .register_connection(connection.clone())
            .await
            .map_err(|e| match e {
                RepositoryError::DuplicateConnection(id) => ConnectError::DuplicateConnection(id),
                other => ConnectError::Repository(other),
            })?;

        self.message_pusher.register_client(id, sender).await;

        Ok(connection)
    }
}
