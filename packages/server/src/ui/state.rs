//! Server state shared by the handlers.

use std::sync::Arc;

use tokio::sync::watch;

use crate::usecase::{
    ConnectHostUseCase, DisconnectHostUseCase, ListRoomsUseCase, RouteSignalUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectHostUseCase（ホスト登録のユースケース）
    pub connect_host_usecase: Arc<ConnectHostUseCase>,
    /// DisconnectHostUseCase（切断のユースケース）
    pub disconnect_host_usecase: Arc<DisconnectHostUseCase>,
    /// RouteSignalUseCase（シグナル転送のユースケース）
    pub route_signal_usecase: Arc<RouteSignalUseCase>,
    /// ListRoomsUseCase（ルーム一覧取得のユースケース）
    pub list_rooms_usecase: Arc<ListRoomsUseCase>,
    /// Flips to `true` when the server starts shutting down
    pub shutdown: watch::Receiver<bool>,
}
