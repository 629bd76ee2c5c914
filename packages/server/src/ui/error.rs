//! Errors of the process boundary (configuration, listener, TLS).

use thiserror::Error;

/// Invalid process configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Only one of certificate / key was supplied
    #[error("TLS needs both a certificate file and a key file")]
    IncompleteTls,
}

/// Errors that stop the server
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Bind, accept or TLS file I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TLS was configured but the binary was built without the `tls` feature
    #[error("TLS requested but this build has no TLS support (enable the `tls` feature)")]
    TlsUnsupported,
}
