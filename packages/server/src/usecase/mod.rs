//! UseCase layer: connection lifecycle and signal routing.

mod connect_host;
mod disconnect_host;
mod error;
mod list_rooms;
mod route_signal;

pub use connect_host::ConnectHostUseCase;
pub use disconnect_host::DisconnectHostUseCase;
pub use error::{ConnectError, RouteError};
pub use list_rooms::ListRoomsUseCase;
pub use route_signal::{RouteOutcome, RouteSignalUseCase};
