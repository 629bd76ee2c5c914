//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! 単一の Mutex で保護した HashMap をインメモリの登録簿として使用します。
//! プロセス再起動をまたいだ永続化は行いません。

use std::collections::{HashMap, hash_map::Entry};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Connection, ConnectionId, RegisterOutcome, Room, RoomId, RoomRepository};

/// インメモリ Room Repository 実装
#[derive(Default)]
pub struct InMemoryRoomRepository {
    /// Key: room id, Value: そのルームのホストを保持する Room
    rooms: Mutex<HashMap<RoomId, Room>>,
}

impl InMemoryRoomRepository {
    /// 空の InMemoryRoomRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn register(&self, room: Room) -> RegisterOutcome {
        let mut rooms = self.rooms.lock().await;
        match rooms.entry(room.id.clone()) {
            Entry::Occupied(_) => RegisterOutcome::Conflict,
            Entry::Vacant(entry) => {
                entry.insert(room);
                RegisterOutcome::Created
            }
        }
    }

    async fn lookup(&self, room_id: &RoomId) -> Option<Connection> {
        let rooms = self.rooms.lock().await;
        rooms.get(room_id).map(|room| room.host.clone())
    }

    async fn unregister(&self, room_id: &RoomId, owner: ConnectionId) -> bool {
        let mut rooms = self.rooms.lock().await;
        match rooms.get(room_id) {
            Some(room) if room.host.id() == owner => {
                rooms.remove(room_id);
                true
            }
            _ => false,
        }
    }

    async fn list(&self) -> Vec<Room> {
        let rooms = self.rooms.lock().await;
        let mut list: Vec<Room> = rooms.values().cloned().collect();
        list.sort_by(|a, b| a.id.cmp(&b.id));
        list
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::Timestamp;
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - register / lookup / unregister / list の基本操作
    // - 同じ ID への二重登録が Conflict になり、既存の登録が上書きされないこと
    // - ホスト以外による unregister が何もしないこと（冪等性）
    //
    // 【なぜこのテストが必要か】
    // - ルーム ID ごとにホストは高々 1 つという不変条件の中核
    // - 異なる ID への並行登録が互いに干渉しないことを保証する
    // ========================================

    fn create_test_room(id: &str) -> Room {
        let (tx, _rx) = mpsc::unbounded_channel();
        Room::new(
            RoomId::new(id.to_string()),
            Connection::new(ConnectionId::generate(), tx),
            Timestamp::new(0),
        )
    }

    #[tokio::test]
    async fn test_register_creates_room() {
        // テスト項目: 未登録の ID は Created になり lookup で取得できる
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        let room = create_test_room("alpha");
        let host_id = room.host.id();

        // when (操作):
        let outcome = repo.register(room).await;

        // then (期待する結果):
        assert_eq!(outcome, RegisterOutcome::Created);
        let found = repo.lookup(&RoomId::new("alpha".to_string())).await;
        assert_eq!(found.map(|c| c.id()), Some(host_id));
    }

    #[tokio::test]
    async fn test_register_conflict_keeps_existing_host() {
        // テスト項目: 同じ ID の二重登録は Conflict になり、既存のホストは置き換わらない
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        let first = create_test_room("alpha");
        let first_host = first.host.id();
        repo.register(first).await;

        // when (操作):
        let outcome = repo.register(create_test_room("alpha")).await;

        // then (期待する結果):
        assert_eq!(outcome, RegisterOutcome::Conflict);
        let found = repo.lookup(&RoomId::new("alpha".to_string())).await;
        assert_eq!(found.map(|c| c.id()), Some(first_host));
        assert_eq!(repo.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_lookup_missing_room() {
        let repo = InMemoryRoomRepository::new();
        let found = repo.lookup(&RoomId::new("nowhere".to_string())).await;
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_unregister_by_host_removes_room() {
        // テスト項目: ホスト自身の unregister でルームが削除され、再登録が Created になる
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        let room = create_test_room("alpha");
        let room_id = room.id.clone();
        let host_id = room.host.id();
        repo.register(room).await;

        // when (操作):
        let removed = repo.unregister(&room_id, host_id).await;

        // then (期待する結果):
        assert!(removed);
        assert!(repo.lookup(&room_id).await.is_none());
        assert_eq!(
            repo.register(create_test_room("alpha")).await,
            RegisterOutcome::Created
        );
    }

    #[tokio::test]
    async fn test_unregister_by_non_host_is_noop() {
        // テスト項目: ホストでない接続による unregister は何もしない
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        let room = create_test_room("alpha");
        let room_id = room.id.clone();
        repo.register(room).await;

        // when (操作):
        let removed = repo.unregister(&room_id, ConnectionId::generate()).await;

        // then (期待する結果):
        assert!(!removed);
        assert!(repo.lookup(&room_id).await.is_some());
    }

    #[tokio::test]
    async fn test_unregister_missing_room_is_idempotent() {
        // テスト項目: 存在しないルームの unregister はエラーにならない（冪等性）
        let repo = InMemoryRoomRepository::new();
        let room_id = RoomId::new("ghost".to_string());

        assert!(!repo.unregister(&room_id, ConnectionId::generate()).await);
        assert!(!repo.unregister(&room_id, ConnectionId::generate()).await);
    }

    #[tokio::test]
    async fn test_list_is_sorted_by_id() {
        let repo = InMemoryRoomRepository::new();
        repo.register(create_test_room("charlie")).await;
        repo.register(create_test_room("alpha")).await;
        repo.register(create_test_room("bravo")).await;

        let ids: Vec<String> = repo
            .list()
            .await
            .into_iter()
            .map(|room| room.id.into_string())
            .collect();

        assert_eq!(ids, vec!["alpha", "bravo", "charlie"]);
    }

    #[tokio::test]
    async fn test_concurrent_registration_of_distinct_ids() {
        // テスト項目: 異なる ID への並行登録は全て Created になる
        // given (前提条件):
        let repo = Arc::new(InMemoryRoomRepository::new());

        // when (操作):
        let handles: Vec<_> = (0..32)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.register(create_test_room(&format!("room-{i}"))).await })
            })
            .collect();

        // then (期待する結果):
        for handle in handles {
            assert_eq!(handle.await.unwrap(), RegisterOutcome::Created);
        }
        assert_eq!(repo.list().await.len(), 32);
    }

    #[tokio::test]
    async fn test_concurrent_registration_of_same_id() {
        // テスト項目: 同じ ID への並行登録は Created が 1 件だけになる
        let repo = Arc::new(InMemoryRoomRepository::new());

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.register(create_test_room("alpha")).await })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap() == RegisterOutcome::Created {
                created += 1;
            }
        }
        assert_eq!(created, 1);
    }
}
