//! UseCase: シグナル転送処理（Signal Router）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RouteSignalUseCase::execute() メソッド
//! - ペイロードの解釈、宛先ルームの解決、ホストへの転送
//!
//! ### なぜこのテストが必要か
//! - 転送先は常にペイロード内の `data.roomId` のホストのみ（送信者は見ない）
//! - 宛先が無い・Open でない場合は黙って破棄され、誤った相手には届かないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：登録済みルームのホストへ転送
//! - 異常系：不正な JSON、未知の type、存在しないルーム
//! - エッジケース：ホストが切断処理中（Closing）

use std::sync::Arc;

use crate::{
    domain::{PushError, RoomRepository, Signal},
    infrastructure::dto::{conversion::decode_signal, websocket::ServerSignal},
};

use super::error::RouteError;

/// 転送結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// ホストの送信キューに積んだ
    Delivered,
    /// ホストは登録済みだが送信できる状態ではなかった
    Skipped(PushError),
}

/// シグナル転送のユースケース
pub struct RouteSignalUseCase {
    /// Repository（ルーム登録簿の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl RouteSignalUseCase {
    /// 新しい RouteSignalUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 受信したテキストフレームを宛先ルームのホストへ転送する
    ///
    /// # Arguments
    ///
    /// * `text` - 受信した生のペイロード
    ///
    /// # Returns
    ///
    /// * `Ok(RouteOutcome)` - 宛先ホストが見つかった
    /// * `Err(RouteError)` - 破棄された理由（呼び出し側でログに記録する）
    pub async fn execute(&self, text: &str) -> Result<RouteOutcome, RouteError> {
        // 1. ペイロードを解釈
        let (room_id, data) = match decode_signal(text)? {
            Signal::Message { room_id, data } => (room_id, data),
            Signal::Unknown { kind } => return Err(RouteError::UnknownSignalType(kind)),
        };

        // 2. 宛先ルームのホストを取得
        let Some(host) = self.repository.lookup(&room_id).await else {
            return Err(RouteError::RoomNotFound(room_id));
        };

        // 3. data 全体を message として包んで転送
        let payload = ServerSignal::Message(data)
            .to_json()
            .map_err(RouteError::Encode)?;
        match host.push(payload) {
            Ok(()) => {
                tracing::debug!(room_id = %room_id, host = %host.id(), "Forwarded message");
                Ok(RouteOutcome::Delivered)
            }
            Err(e) => Ok(RouteOutcome::Skipped(e)),
        }
    }
}
