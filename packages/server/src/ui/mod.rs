//! UI layer: axum server, handlers and process configuration.

pub mod config;
pub mod error;
mod handler;
mod server;
mod signal;
pub mod state;
mod tls;

pub use config::{ServerConfig, TlsConfig};
pub use error::{ConfigError, ServerError};
pub use server::Server;
pub use signal::shutdown_signal;
