//! Value objects.

use std::fmt;

use uuid::Uuid;

/// Room identifier, supplied by the connecting party.
///
/// Any string is accepted; the empty string is a valid (if degenerate) room id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for RoomId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of one accepted relay connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unix timestamp in milliseconds (UTC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_id_accepts_empty_string() {
        // テスト項目: 空文字列もルーム ID として有効
        let room_id = RoomId::new(String::new());
        assert_eq!(room_id.as_str(), "");
    }

    #[test]
    fn test_room_id_accepts_long_value() {
        // テスト項目: 長いルーム ID もそのまま保持される（長さの制限は無い）
        // given (前提条件):
        let value = "a".repeat(4096);

        // when (操作):
        let room_id = RoomId::from(value.clone());

        // then (期待する結果):
        assert_eq!(room_id.into_string(), value);
    }

    #[test]
    fn test_connection_ids_are_unique() {
        assert_ne!(ConnectionId::generate(), ConnectionId::generate());
    }
}
