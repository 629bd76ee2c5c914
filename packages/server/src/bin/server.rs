//! WebSocket signaling relay server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin signal-relay-server
//! cargo run --bin signal-relay-server -- --host 0.0.0.0 --port 3000
//! PORT=3000 LOG_FORMAT=json cargo run --bin signal-relay-server
//! ```

use std::sync::Arc;

use clap::Parser;
use signal_relay_server::{
    infrastructure::repository::InMemoryRoomRepository,
    ui::{Server, ServerConfig},
    usecase::{ConnectHostUseCase, DisconnectHostUseCase, ListRoomsUseCase, RouteSignalUseCase},
};
use signal_relay_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    // Initialize tracing
    setup_logger(
        &["signal_relay_server", "signal_relay_shared", "tower_http"],
        &config.log_level,
        config.log_format,
    );

    // Initialize dependencies in order:
    // 1. Repository (room registry, lives as long as the server)
    // 2. UseCases
    // 3. Server
    let repository = Arc::new(InMemoryRoomRepository::new());

    let connect_host_usecase = Arc::new(ConnectHostUseCase::new(repository.clone()));
    let disconnect_host_usecase = Arc::new(DisconnectHostUseCase::new(repository.clone()));
    let route_signal_usecase = Arc::new(RouteSignalUseCase::new(repository.clone()));
    let list_rooms_usecase = Arc::new(ListRoomsUseCase::new(repository));

    let server = Server::new(
        connect_host_usecase,
        disconnect_host_usecase,
        route_signal_usecase,
        list_rooms_usecase,
    );
    if let Err(e) = server.run(&config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
