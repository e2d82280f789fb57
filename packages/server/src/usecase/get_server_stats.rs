//! UseCase: サーバー統計取得処理

use std::sync::Arc;

use crate::domain::RoomRepository;

/// 集計値のみ（ルームトークンは含めない）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerStats {
    pub rooms: usize,
    pub connections: usize,
}

/// サーバー統計取得のユースケース
pub struct GetServerStatsUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl GetServerStatsUseCase {
    /// 新しい GetServerStatsUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> ServerStats {
        ServerStats {
            rooms: self.repository.count_rooms().await,
            connections: self.repository.count_connections().await,
        }
    }
}
