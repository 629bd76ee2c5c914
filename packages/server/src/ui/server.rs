//! Server execution logic.

use std::{future::Future, net::SocketAddr, sync::Arc};

use axum::{Router, routing::get};
use tokio::{net::TcpListener, sync::watch};
use tower_http::trace::TraceLayer;

use crate::usecase::{
    ConnectHostUseCase, DisconnectHostUseCase, ListRoomsUseCase, RouteSignalUseCase,
};

use super::{
    config::ServerConfig,
    error::ServerError,
    handler::{
        http::{get_rooms, health_check},
        websocket::websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Host that binds every IPv4 interface
const UNSPECIFIED_HOST: &str = "0.0.0.0";

/// Addresses the relay can be reached on when bound to `host`.
///
/// A wildcard bind is expanded to the address of every local interface.
fn listening_addresses(host: &str) -> Vec<String> {
    let mut addresses = vec![host.to_string()];
    if host != UNSPECIFIED_HOST {
        return addresses;
    }
    match if_addrs::get_if_addrs() {
        Ok(interfaces) => addresses.extend(
            interfaces
                .iter()
                .filter(|iface| iface.ip().is_ipv4())
                .map(|iface| iface.ip().to_string()),
        ),
        Err(e) => tracing::warn!("Failed to enumerate network interfaces: {}", e),
    }
    addresses
}

/// WebSocket signaling relay server
///
/// This struct encapsulates the use cases the handlers need and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let repository = Arc::new(InMemoryRoomRepository::new());
/// let server = Server::new(
///     Arc::new(ConnectHostUseCase::new(repository.clone())),
///     Arc::new(DisconnectHostUseCase::new(repository.clone())),
///     Arc::new(RouteSignalUseCase::new(repository.clone())),
///     Arc::new(ListRoomsUseCase::new(repository)),
/// );
/// server.run(&config).await?;
/// ```
pub struct Server {
    /// ConnectHostUseCase（ホスト登録のユースケース）
    connect_host_usecase: Arc<ConnectHostUseCase>,
    /// DisconnectHostUseCase（切断のユースケース）
    disconnect_host_usecase: Arc<DisconnectHostUseCase>,
    /// RouteSignalUseCase（シグナル転送のユースケース）
    route_signal_usecase: Arc<RouteSignalUseCase>,
    /// ListRoomsUseCase（ルーム一覧取得のユースケース）
    list_rooms_usecase: Arc<ListRoomsUseCase>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(
        connect_host_usecase: Arc<ConnectHostUseCase>,
        disconnect_host_usecase: Arc<DisconnectHostUseCase>,
        route_signal_usecase: Arc<RouteSignalUseCase>,
        list_rooms_usecase: Arc<ListRoomsUseCase>,
    ) -> Self {
        Self {
            connect_host_usecase,
            disconnect_host_usecase,
            route_signal_usecase,
            list_rooms_usecase,
        }
    }

    /// Build the axum router. `shutdown` tells open relay connections to close.
    pub fn router(self, shutdown: watch::Receiver<bool>) -> Router {
        let app_state = Arc::new(AppState {
            connect_host_usecase: self.connect_host_usecase,
            disconnect_host_usecase: self.disconnect_host_usecase,
            route_signal_usecase: self.route_signal_usecase,
            list_rooms_usecase: self.list_rooms_usecase,
            shutdown,
        });

        Router::new()
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            // WebSocket エンドポイント（その他の全パス）
            .fallback(websocket_handler)
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the relay with the given configuration until Ctrl+C / SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is inconsistent, the server fails to bind,
    /// or TLS material cannot be loaded.
    pub async fn run(self, config: &ServerConfig) -> Result<(), ServerError> {
        let tls = config.tls()?;
        let bind_addr = config.bind_addr();

        match tls {
            None => {
                let listener = TcpListener::bind(&bind_addr).await?;
                tracing::info!(
                    addresses = ?listening_addresses(&config.host),
                    "WebSocket signaling relay listening on {}",
                    listener.local_addr()?
                );
                tracing::info!("Connect to: ws://{}/?room=<room id>", bind_addr);
                tracing::info!("Press Ctrl+C to shutdown gracefully");
                self.serve(listener, shutdown_signal()).await
            }
            #[cfg(feature = "tls")]
            Some(tls) => {
                let addr: SocketAddr = tokio::net::lookup_host(&bind_addr)
                    .await?
                    .next()
                    .ok_or_else(|| {
                        std::io::Error::new(
                            std::io::ErrorKind::AddrNotAvailable,
                            format!("cannot resolve {bind_addr}"),
                        )
                    })?;
                tracing::info!(
                    addresses = ?listening_addresses(&config.host),
                    "WebSocket signaling relay listening on {} (TLS)",
                    addr
                );
                tracing::info!("Connect to: wss://{}/?room=<room id>", bind_addr);
                tracing::info!("Press Ctrl+C to shutdown gracefully");
                super::tls::serve_tls(self, addr, &tls, shutdown_signal()).await
            }
            #[cfg(not(feature = "tls"))]
            Some(_) => Err(ServerError::TlsUnsupported),
        }
    }

    /// Serve plain WebSocket on `listener` until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let app = self.router(shutdown_rx);

        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            shutdown.await;
            // Upgraded sockets are not tracked by axum; close them explicitly
            let _ = shutdown_tx.send(true);
        })
        .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
