//! UseCase: ルーム作成処理
//!
//! ルームはトークンを発行するだけで、ディレクトリには何も登録しない。
//! 実体は最初の join で暗黙的に作られる。

use crate::domain::{RoomToken, RoomTokenFactory};

use super::error::CreateRoomError;

/// ルーム作成のユースケース
#[derive(Debug, Default)]
pub struct CreateRoomUseCase;

impl CreateRoomUseCase {
    pub fn new() -> Self {
        Self
    }

    /// 新しいルームトークンを発行
    pub fn execute(&self) -> Result<RoomToken, CreateRoomError> {
        RoomTokenFactory::generate().map_err(|_| CreateRoomError::TokenGenerationFailed)
    }

    /// ルームページへのパス
    pub fn room_path(room: &RoomToken) -> String {
        format!("/{}", room.as_str())
    }
}
