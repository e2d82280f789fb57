//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! プロセス内の `RoomDirectory` を唯一の所有者として一つの Mutex で保持します。
//! 永続化は行いません（プロセス終了とともにルームは消える）。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    Connection, ConnectionId, Delivery, MessagePusher, OutboundEvent, RepositoryError,
    RoomDirectory, RoomRepository, RoomToken, relay,
};

/// インメモリ Room Repository 実装
pub struct InMemoryRoomRepository {
    /// ルームディレクトリ（全ルーム・全接続）
    directory: Arc<Mutex<RoomDirectory>>,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new(directory: Arc<Mutex<RoomDirectory>>) -> Self {
        Self { directory }
    }
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(RoomDirectory::new())))
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn register_connection(&self, connection: Connection) -> Result<(), RepositoryError> {
        let mut directory = self.directory.lock().await;
        directory.register(connection)
    }

    async fn join_room(
        &self,
        connection_id: &ConnectionId,
        room: RoomToken,
    ) -> Result<Option<RoomToken>, RepositoryError> {
        let mut directory = self.directory.lock().await;
        directory.join(connection_id, room)
    }

    async fn remove_connection(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<Connection, RepositoryError> {
        let mut directory = self.directory.lock().await;
        directory.disconnect(connection_id)
    }

    async fn plan_deliveries(
        &self,
        source: &ConnectionId,
        explicit_room: Option<RoomToken>,
        event: OutboundEvent,
    ) -> Vec<Delivery> {
        let directory = self.directory.lock().await;
        relay::route(source, explicit_room, event, &directory)
    }

    async fn push_to_current_members(
        &self,
        deliveries: Vec<Delivery>,
        message_pusher: &dyn MessagePusher,
    ) -> usize {
        // 送信が終わるまでロックを保持する（送信はチャンネルへの投入のみでブロックしない）
        let directory = self.directory.lock().await;
        let planned = deliveries.len();
        let current = relay::retain_current(deliveries, &directory);
        if current.len() < planned {
            tracing::debug!(
                "{} planned target(s) left the room before delivery",
                planned - current.len()
            );
        }
        message_pusher.deliver(current).await
    }

    async fn count_rooms(&self) -> usize {
        let directory = self.directory.lock().await;
        directory.room_count()
    }

    async fn count_connections(&self) -> usize {
        let directory = self.directory.lock().await;
        directory.connection_count()
    }
}

#[cfg(test)]
impl InMemoryRoomRepository {
    /// 接続が現在参加しているルーム
    pub async fn room_of(&self, connection_id: &ConnectionId) -> Option<RoomToken> {
        let directory = self.directory.lock().await;
        directory.room_of(connection_id).cloned()
    }

    /// ルームのメンバー ID
    pub async fn member_ids(&self, room: &RoomToken) -> Vec<ConnectionId> {
        let directory = self.directory.lock().await;
        directory.members(room)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ConnectionIdFactory, Language, Timestamp},
        infrastructure::message_pusher::WebSocketMessagePusher,
    };
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - InMemoryRoomRepository の登録・参加・削除
    // - plan_deliveries がロック下でスナップショットを返すこと
    //
    // 【なぜこのテストが必要か】
    // - Repository は UseCase から呼ばれるルームディレクトリの唯一の入口
    // - 配信リスト作成後のメンバー変更が配信対象に影響しないことを保証する
    // ========================================

    fn create_test_repository() -> InMemoryRoomRepository {
        InMemoryRoomRepository::default()
    }

    async fn connect(repo: &InMemoryRoomRepository) -> ConnectionId {
        let id = ConnectionIdFactory::generate().unwrap();
        repo.register_connection(Connection::new(id.clone(), Timestamp::new(1000)))
            .await
            .unwrap();
        id
    }

    fn token(value: &str) -> RoomToken {
        RoomToken::new(value.to_string()).unwrap()
    }

    fn code_update() -> OutboundEvent {
        OutboundEvent::CodeUpdate {
            code: "print(1)".to_string(),
            lang: Language::new("python".to_string()),
        }
    }

    #[tokio::test]
    async fn test_register_and_join() {
        // テスト項目: 登録した接続がルームに参加できる
        // given (前提条件):
        let repo = create_test_repository();
        let alice = connect(&repo).await;

        // when (操作):
        let previous = repo.join_room(&alice, token("abc123")).await.unwrap();

        // then (期待する結果):
        assert!(previous.is_none());
        assert_eq!(repo.room_of(&alice).await, Some(token("abc123")));
        assert_eq!(repo.member_ids(&token("abc123")).await, vec![alice]);
        assert_eq!(repo.count_rooms().await, 1);
        assert_eq!(repo.count_connections().await, 1);
    }

    #[tokio::test]
    async fn test_remove_connection_cleans_up_room() {
        // テスト項目: 接続を削除すると空になったルームも消える
        // given (前提条件):
        let repo = create_test_repository();
        let alice = connect(&repo).await;
        repo.join_room(&alice, token("abc123")).await.unwrap();

        // when (操作):
        let removed = repo.remove_connection(&alice).await.unwrap();

        // then (期待する結果):
        assert_eq!(removed.id, alice);
        assert_eq!(repo.count_rooms().await, 0);
        assert_eq!(repo.count_connections().await, 0);
    }

    #[tokio::test]
    async fn test_remove_nonexistent_connection() {
        // テスト項目: 存在しない接続の削除はエラーを返す
        // given (前提条件):
        let repo = create_test_repository();
        let ghost = ConnectionIdFactory::generate().unwrap();

        // when (操作):
        let result = repo.remove_connection(&ghost).await;

        // then (期待する結果):
        assert!(matches!(result, Err(RepositoryError::ConnectionNotFound(_))));
    }

    #[tokio::test]
    async fn test_plan_deliveries_is_snapshot() {
        // テスト項目: 配信リスト作成後に参加・退出が起きても、作成済みのリストは変わらない
        // given (前提条件):
        let repo = create_test_repository();
        let alice = connect(&repo).await;
        let bob = connect(&repo).await;
        let charlie = connect(&repo).await;
        repo.join_room(&alice, token("abc123")).await.unwrap();
        repo.join_room(&bob, token("abc123")).await.unwrap();

        // when (操作):
        let deliveries = repo.plan_deliveries(&alice, None, code_update()).await;
        repo.remove_connection(&bob).await.unwrap();
        repo.join_room(&charlie, token("abc123")).await.unwrap();

        // then (期待する結果):
        assert_eq!(deliveries.len(), 1);
        assert_eq!(deliveries[0].target, bob);
    }

    #[tokio::test]
    async fn test_push_skips_member_who_moved_after_planning() {
        // テスト項目: 配信リスト作成後に別ルームへ移動した接続には古いルームのイベントが届かない
        // given (前提条件):
        let repo = create_test_repository();
        let pusher = WebSocketMessagePusher::default();
        let mut receivers = Vec::new();
        let mut ids = Vec::new();
        for _ in 0..3 {
            let id = connect(&repo).await;
            let (tx, rx) = mpsc::unbounded_channel();
            pusher.register_client(id.clone(), tx).await;
            repo.join_room(&id, token("room-1")).await.unwrap();
            ids.push(id);
            receivers.push(rx);
        }
        let (alice, bob, charlie) = (ids[0].clone(), ids[1].clone(), ids[2].clone());
        let deliveries = repo.plan_deliveries(&alice, None, code_update()).await;
        assert_eq!(deliveries.len(), 2);

        // when (操作): bob が配信前に room-2 へ移動する
        repo.join_room(&bob, token("room-2")).await.unwrap();
        let delivered = repo.push_to_current_members(deliveries, &pusher).await;

        // then (期待する結果):
        assert_eq!(delivered, 1);
        assert_eq!(repo.room_of(&bob).await, Some(token("room-2")));
        assert!(receivers[1].try_recv().is_err());
        assert!(receivers[2].try_recv().is_ok());
        assert!(receivers[0].try_recv().is_err());
        assert_eq!(repo.room_of(&charlie).await, Some(token("room-1")));
    }
}
