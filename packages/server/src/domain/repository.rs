//! Room Registry trait 定義
//!
//! ドメイン層が必要とするルーム登録簿のインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{Connection, ConnectionId, RegisterOutcome, Room, RoomId};

/// Room Registry trait
///
/// ルーム ID からホスト接続へのプロセス全体の対応表。
/// 各操作は単独でアトミックだが、複数操作をまたぐトランザクションは存在しない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// ルームを登録する
    ///
    /// 同じ ID のルームが既に存在する場合は何も保存せず `Conflict` を返す。
    async fn register(&self, room: Room) -> RegisterOutcome;

    /// ルーム ID に紐づくホスト接続を取得
    async fn lookup(&self, room_id: &RoomId) -> Option<Connection>;

    /// ルームを削除する
    ///
    /// `owner` がそのルームのホストである場合のみ削除し、削除したかどうかを返す。
    /// 存在しない ID に対しては何もしない（冪等）。
    async fn unregister(&self, room_id: &RoomId, owner: ConnectionId) -> bool;

    /// 登録中の全ルームを ID 順で取得
    async fn list(&self) -> Vec<Room>;
}
