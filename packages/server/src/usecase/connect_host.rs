//! UseCase: ホスト登録処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectHostUseCase::execute() メソッド
//! - 接続時のルーム登録（新規作成、ID の衝突）
//!
//! ### どのような状況を想定しているか
//! - 正常系：未使用のルーム ID での接続
//! - 異常系：既にホストがいるルーム ID での接続（登録されない）
//! - エッジケース：空文字列のルーム ID

use std::sync::Arc;

use signal_relay_shared::time::now_millis;

use crate::domain::{Connection, RegisterOutcome, Room, RoomId, RoomRepository, Timestamp};

use super::error::ConnectError;

/// ホスト登録のユースケース
pub struct ConnectHostUseCase {
    /// Repository（ルーム登録簿の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl ConnectHostUseCase {
    /// 新しい ConnectHostUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 接続をルームのホストとして登録する
    ///
    /// # Returns
    ///
    /// * `Ok(())` - ルームを作成した
    /// * `Err(ConnectError::RoomAlreadyExists)` - 既存のホストがいるため登録しなかった
    pub async fn execute(
        &self,
        room_id: RoomId,
        connection: Connection,
    ) -> Result<(), ConnectError> {
        let created_at = Timestamp::new(now_millis());
        let room = Room::new(room_id.clone(), connection, created_at);

        match self.repository.register(room).await {
            RegisterOutcome::Created => {
                tracing::info!(room_id = %room_id, "Room created");
                Ok(())
            }
            RegisterOutcome::Conflict => Err(ConnectError::RoomAlreadyExists(room_id)),
        }
    }
}
