//! Command line / environment configuration.

use std::path::PathBuf;

use clap::Parser;
use signal_relay_shared::logger::LogFormat;

use super::error::ConfigError;

/// Signal relay server options. Every flag can also be set through its environment variable.
#[derive(Parser, Debug, Clone)]
#[command(name = "signal-relay-server")]
#[command(about = "WebSocket signaling relay: one host per room", long_about = None)]
pub struct ServerConfig {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Default log level (overridden by RUST_LOG)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log output format: pretty or json
    #[arg(long, env = "LOG_FORMAT", default_value = "pretty")]
    pub log_format: LogFormat,

    /// PEM certificate served over TLS
    #[arg(long, env = "TLS_CERT_FILE")]
    pub tls_cert_file: Option<PathBuf>,

    /// PEM private key matching the certificate
    #[arg(long, env = "TLS_KEY_FILE")]
    pub tls_key_file: Option<PathBuf>,

    /// Additional PEM CA bundles, comma separated
    #[arg(long, env = "TLS_CA_FILES", value_delimiter = ',')]
    pub tls_ca_files: Vec<PathBuf>,
}

/// Certificate material for TLS serving
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsConfig {
    pub cert_file: PathBuf,
    pub key_file: PathBuf,
    pub ca_files: Vec<PathBuf>,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// TLS settings, `None` when TLS is disabled.
    pub fn tls(&self) -> Result<Option<TlsConfig>, ConfigError> {
        match (&self.tls_cert_file, &self.tls_key_file) {
            (Some(cert_file), Some(key_file)) => Ok(Some(TlsConfig {
                cert_file: cert_file.clone(),
                key_file: key_file.clone(),
                ca_files: self.tls_ca_files.clone(),
            })),
            (None, None) => Ok(None),
            _ => Err(ConfigError::IncompleteTls),
        }
    }
}
