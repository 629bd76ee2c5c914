//! UseCase 層のエラー型

use thiserror::Error;

use crate::{domain::RoomId, infrastructure::dto::conversion::DecodeError};

/// ホスト登録のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    /// 同じ ID のルームに既にホストがいる
    #[error("room '{0}' already has a host")]
    RoomAlreadyExists(RoomId),
}

/// シグナル転送のエラー（いずれも送信者には通知されない）
#[derive(Debug, Error)]
pub enum RouteError {
    /// ペイロードが解釈できない
    #[error("malformed payload: {0}")]
    Malformed(#[from] DecodeError),

    /// 転送対象外の type
    #[error("unknown signal type '{0}'")]
    UnknownSignalType(String),

    /// 宛先ルームが存在しない
    #[error("room '{0}' not found")]
    RoomNotFound(RoomId),

    /// 転送メッセージのシリアライズに失敗
    #[error("failed to encode forwarded message: {0}")]
    Encode(#[source] serde_json::Error),
}
