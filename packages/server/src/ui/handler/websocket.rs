//! WebSocket connection handlers.
//!
//! One task pair per connection: a reader that routes inbound frames and a writer that
//! drains the connection's outbound channel. Registration happens once the socket is
//! upgraded, unregistration once either task ends.

use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{
        ConnectInfo, Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade, rejection::WebSocketUpgradeRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use serde::Deserialize;
use tokio::sync::{mpsc, watch};
use tracing::Instrument;

use crate::{
    domain::{Connection, ConnectionId, ConnectionState, PusherChannel, RoomId},
    infrastructure::dto::websocket::ServerSignal,
    ui::state::AppState,
    usecase::{ConnectError, ConnectHostUseCase, RouteError, RouteOutcome, RouteSignalUseCase},
};

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    /// Room to host; missing means the empty room id
    #[serde(default)]
    pub room: String,
}

pub async fn websocket_handler(
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
    State(state): State<Arc<AppState>>,
    ConnectInfo(remote_addr): ConnectInfo<SocketAddr>,
    Query(query): Query<ConnectQuery>,
) -> Response {
    let ws = match ws {
        Ok(ws) => ws,
        Err(e) => {
            tracing::debug!(%remote_addr, "Rejecting non-upgradable request: {}", e);
            return (StatusCode::BAD_REQUEST, "Bad Request").into_response();
        }
    };

    let room_id = RoomId::from(query.room);

    ws.on_failed_upgrade(move |e| {
        tracing::warn!(%remote_addr, "WebSocket upgrade failed: {}", e);
    })
    .on_upgrade(move |socket| {
        let connection_id = ConnectionId::generate();
        let span = tracing::info_span!(
            "connection",
            connection_id = %connection_id,
            room_id = %room_id
        );
        handle_socket(socket, state, room_id, connection_id, remote_addr).instrument(span)
    })
}

/// Resolves once the server asks connections to close (or the server state is gone).
async fn wait_for_shutdown(mut shutdown: watch::Receiver<bool>) {
    let _ = shutdown.wait_for(|stop| *stop).await;
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// On server shutdown a close frame is sent and the task ends.
///
/// # Arguments
///
/// * `rx` - Channel receiver for outbound frames of this connection
/// * `sender` - WebSocket sink to send messages to this client
/// * `shutdown` - Server shutdown flag
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
    shutdown: watch::Receiver<bool>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(
        async move {
            let shutdown = wait_for_shutdown(shutdown);
            tokio::pin!(shutdown);

            loop {
                tokio::select! {
                    msg = rx.recv() => {
                        let Some(msg) = msg else { break };
                        if let Err(e) = sender.send(Message::Text(msg.into())).await {
                            tracing::debug!("Failed to write frame: {}", e);
                            break;
                        }
                    }
                    _ = &mut shutdown => {
                        tracing::info!("Server shutting down, closing connection");
                        let _ = sender.send(Message::Close(None)).await;
                        break;
                    }
                }
            }
        }
        .in_current_span(),
    )
}

/// Queue a server notice on the outbound channel, logging instead of failing.
///
/// Writes to the channel directly, so it works before the connection is `Open`.
fn queue_notice(tx: &PusherChannel, signal: &ServerSignal) {
    let json = match signal.to_json() {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to encode {:?}: {}", signal, e);
            return;
        }
    };
    if tx.send(json).is_err() {
        tracing::warn!("Failed to send {:?}: outbound channel closed", signal);
    }
}

/// Register the connection as host of `room_id` and queue its acknowledgment.
///
/// The connection stays `Connecting` until the notices are queued, so a message routed
/// to it in the meantime is skipped rather than delivered ahead of `connected`.
async fn open_connection(
    usecase: &ConnectHostUseCase,
    room_id: RoomId,
    connection_id: ConnectionId,
    tx: PusherChannel,
) -> Connection {
    let connection = Connection::new(connection_id, tx.clone());

    match usecase.execute(room_id, connection.clone()).await {
        Ok(()) => {}
        Err(ConnectError::RoomAlreadyExists(_)) => {
            // Stays open but is never bound, so it receives no routed traffic
            tracing::warn!("Room already has a host; connection will not receive messages");
            queue_notice(&tx, &ServerSignal::room_exists());
        }
    }
    queue_notice(&tx, &ServerSignal::Connected);

    connection.transition(ConnectionState::Open);
    connection
}

/// Route one inbound payload; every failure is logged and the frame dropped.
async fn route_inbound(usecase: &RouteSignalUseCase, text: &str) {
    match usecase.execute(text).await {
        Ok(RouteOutcome::Delivered) => {}
        Ok(RouteOutcome::Skipped(reason)) => {
            tracing::debug!("Target host cannot receive, message skipped: {}", reason);
        }
        Err(e @ (RouteError::Malformed(_) | RouteError::Encode(_))) => {
            tracing::error!(error = %e, "Error processing message");
        }
        Err(RouteError::UnknownSignalType(kind)) => {
            tracing::warn!(signal_type = %kind, "Unknown signal type");
        }
        Err(RouteError::RoomNotFound(target)) => {
            tracing::warn!(target_room_id = %target, "Room not found");
        }
    }
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    room_id: RoomId,
    connection_id: ConnectionId,
    remote_addr: SocketAddr,
) {
    let (sender, mut receiver) = socket.split();

    let (tx, rx) = mpsc::unbounded_channel();
    tracing::info!(%remote_addr, "New connection");

    // Spawn a task to drain this connection's outbound channel
    let mut send_task = pusher_loop(rx, sender, state.shutdown.clone());

    // Register as host of the requested room, then go Open
    let connection = open_connection(
        &state.connect_host_usecase,
        room_id.clone(),
        connection_id,
        tx,
    )
    .await;

    // Spawn a task to receive messages from this client
    let route_signal_usecase = state.route_signal_usecase.clone();
    let mut recv_task = tokio::spawn(
        async move {
            while let Some(msg) = receiver.next().await {
                let msg = match msg {
                    Ok(msg) => msg,
                    Err(e) => {
                        tracing::warn!("WebSocket error: {}", e);
                        break;
                    }
                };

                match msg {
                    Message::Text(text) => {
                        tracing::debug!("Received text: {}", text.as_str());
                        route_inbound(&route_signal_usecase, text.as_str()).await;
                    }
                    Message::Binary(bytes) => match std::str::from_utf8(&bytes) {
                        Ok(text) => route_inbound(&route_signal_usecase, text).await,
                        Err(e) => {
                            tracing::error!("Error processing message: binary frame is not UTF-8: {}", e);
                        }
                    },
                    Message::Close(_) => {
                        tracing::info!("Client requested close");
                        break;
                    }
                    // Ping/pong is handled automatically by the WebSocket protocol
                    Message::Ping(_) | Message::Pong(_) => {}
                }
            }
        }
        .in_current_span(),
    );

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    connection.transition(ConnectionState::Closing);
    state
        .disconnect_host_usecase
        .execute(&room_id, connection_id)
        .await;
    connection.transition(ConnectionState::Closed);

    tracing::info!("Connection closed");
}
