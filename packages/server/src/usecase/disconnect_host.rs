//! UseCase: 切断処理
//!
//! 接続が閉じたとき（クライアント起因、ネットワーク障害、サーバー停止のいずれでも）、
//! その接続が開いたときのルーム ID で登録を解除する。

use std::sync::Arc;

use crate::domain::{ConnectionId, RoomId, RoomRepository};

/// 切断のユースケース
pub struct DisconnectHostUseCase {
    /// Repository（ルーム登録簿の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl DisconnectHostUseCase {
    /// 新しい DisconnectHostUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 切断を実行
    ///
    /// # Returns
    ///
    /// ルームを削除した場合は `true`。ホストでなかった接続（ID 衝突で登録されなかった接続）
    /// では何もせず `false` を返す。
    pub async fn execute(&self, room_id: &RoomId, connection_id: ConnectionId) -> bool {
        let removed = self.repository.unregister(room_id, connection_id).await;
        if removed {
            tracing::info!(room_id = %room_id, connection_id = %connection_id, "Room deleted");
        } else {
            tracing::debug!(
                room_id = %room_id,
                connection_id = %connection_id,
                "Closed connection was not hosting a room"
            );
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{Connection, Room, Timestamp},
        infrastructure::repository::InMemoryRoomRepository,
    };
    use tokio::sync::mpsc;

    fn room_id(id: &str) -> RoomId {
        RoomId::new(id.to_string())
    }

    async fn register_host(repository: &InMemoryRoomRepository, id: &str) -> ConnectionId {
        let (tx, _rx) = mpsc::unbounded_channel();
        let connection = Connection::new(ConnectionId::generate(), tx);
        let connection_id = connection.id();
        repository
            .register(Room::new(room_id(id), connection, Timestamp::new(0)))
            .await;
        connection_id
    }

    #[tokio::test]
    async fn test_disconnect_host_removes_room() {
        // テスト項目: ホストの切断でルームが即座に利用不可になる
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        let host_id = register_host(&repository, "alpha").await;
        let usecase = DisconnectHostUseCase::new(repository.clone());

        // when (操作):
        let removed = usecase.execute(&room_id("alpha"), host_id).await;

        // then (期待する結果):
        assert!(removed);
        assert!(repository.lookup(&room_id("alpha")).await.is_none());
    }

    #[tokio::test]
    async fn test_disconnect_conflicting_connection_keeps_host() {
        // テスト項目: ID 衝突で登録されなかった接続の切断は、本来のホストに影響しない
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        let host_id = register_host(&repository, "alpha").await;
        let usecase = DisconnectHostUseCase::new(repository.clone());

        // when (操作):
        let removed = usecase
            .execute(&room_id("alpha"), ConnectionId::generate())
            .await;

        // then (期待する結果):
        assert!(!removed);
        let host = repository.lookup(&room_id("alpha")).await;
        assert_eq!(host.map(|c| c.id()), Some(host_id));
    }

    #[tokio::test]
    async fn test_disconnect_unknown_room_is_noop() {
        let repository = Arc::new(InMemoryRoomRepository::new());
        let usecase = DisconnectHostUseCase::new(repository);

        assert!(
            !usecase
                .execute(&room_id("ghost"), ConnectionId::generate())
                .await
        );
    }
}
