//! UseCase: イベント中継処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelayEventUseCase::execute() メソッド
//! - code_change / lang_change を送信元以外のルームメンバーへファンアウトする
//!
//! ### なぜこのテストが必要か
//! - 送信元への折り返し（エコー）が無いことを保証
//! - ルーム間でイベントが漏れないことを保証
//! - 途中参加者に過去のイベントが再送されないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：同じルームの他メンバー全員に届く
//! - エッジケース：ルーム未参加かつルーム未指定（黙って破棄）
//! - エッジケース：送信元しかいないルーム（配信対象なし）

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, OutboundEvent, RoomRepository, RoomToken};

/// イベント中継のユースケース
pub struct RelayEventUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl RelayEventUseCase {
    /// 新しい RelayEventUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// イベントを中継する
    ///
    /// 配信対象はディレクトリのロック下でスナップショットとして確定する。
    /// 送信時には再びロックを取り、その時点でもルームに残っている接続にだけ送る。
    ///
    /// # Arguments
    ///
    /// * `source` - 送信元の接続
    /// * `explicit_room` - イベントに明示されたルーム（無ければ送信元の参加中ルーム）
    /// * `event` - ピアに届けるイベント
    ///
    /// # Returns
    ///
    /// 配信リストに載った接続 ID のリスト（ルームが解決できなければ空）
    pub async fn execute(
        &self,
        source: &ConnectionId,
        explicit_room: Option<RoomToken>,
        event: OutboundEvent,
    ) -> Vec<ConnectionId> {
        let kind = event.kind();
        let deliveries = self
            .repository
            .plan_deliveries(source, explicit_room, event)
            .await;

        if deliveries.is_empty() {
            tracing::debug!(
                "No peers to receive {} from '{}', discarding",
                kind,
                source.as_str()
            );
            return Vec::new();
        }

        let targets: Vec<ConnectionId> = deliveries.iter().map(|d| d.target.clone()).collect();
        let delivered = self
            .repository
            .push_to_current_members(deliveries, self.message_pusher.as_ref())
            .await;
        tracing::debug!(
            "Relayed {} from '{}' to {}/{} peers",
            kind,
            source.as_str(),
            delivered,
            targets.len()
        );

        targets
    }
}
