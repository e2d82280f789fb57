//! Repository trait 定義
//!
//! ドメイン層が必要とするルームディレクトリへのアクセスインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    Connection, ConnectionId, Delivery, MessagePusher, OutboundEvent, RepositoryError, RoomToken,
};

/// Room Repository trait
///
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
///
/// 実装はディレクトリ全体を一つのロックで守り、各メソッドはロックを保持したまま
/// 完結しなければならない。`plan_deliveries` が返す配信リストはその時点の
/// スナップショットであり、配信中のメンバー変更の影響を受けない。
/// 実際の送信は `push_to_current_members` がロック下で再確認してから行う。
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// 新しい接続を登録（どのルームにも属さない状態）
    async fn register_connection(&self, connection: Connection) -> Result<(), RepositoryError>;

    /// 接続をルームに参加させる。以前のルームから抜けた場合はそのトークンを返す
    async fn join_room(
        &self,
        connection_id: &ConnectionId,
        room: RoomToken,
    ) -> Result<Option<RoomToken>, RepositoryError>;

    /// 接続を削除し、所属ルームからも外す
    async fn remove_connection(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<Connection, RepositoryError>;

    /// 送信元以外のルームメンバーへの配信リストを作成
    async fn plan_deliveries(
        &self,
        source: &ConnectionId,
        explicit_room: Option<RoomToken>,
        event: OutboundEvent,
    ) -> Vec<Delivery>;

    /// 配信リストのうち、今もそのルームにいる接続だけに送信し、送信できた件数を返す
    ///
    /// メンバーの確認と送信は同じロックの下で行うため、その間に別ルームへ
    /// 移動・切断した接続に古いルームのイベントが届くことはない。
    async fn push_to_current_members(
        &self,
        deliveries: Vec<Delivery>,
        message_pusher: &dyn MessagePusher,
    ) -> usize;

    /// 存在するルーム数を取得
    async fn count_rooms(&self) -> usize;

    /// 接続中のクライアント数を取得
    async fn count_connections(&self) -> usize;
}
