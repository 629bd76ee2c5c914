//! TLS serving through axum-server and rustls.
//!
//! Only the serving half depends on the `tls` feature; certificate chain assembly is
//! always compiled.

#[cfg(feature = "tls")]
use std::{future::Future, net::SocketAddr, time::Duration};

#[cfg(feature = "tls")]
use axum_server::{Handle, tls_rustls::RustlsConfig};
#[cfg(feature = "tls")]
use tokio::sync::watch;

#[cfg(feature = "tls")]
use super::{config::TlsConfig, error::ServerError, server::Server};

/// Upper bound on waiting for in-flight requests after shutdown is requested
#[cfg(feature = "tls")]
const GRACEFUL_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

/// Append every CA bundle to the served certificate, one PEM block per line run.
///
/// A bundle without a trailing newline would glue its `END` marker to the next
/// `BEGIN` marker, so a separator is inserted where needed.
#[cfg_attr(not(feature = "tls"), allow(dead_code))]
pub(super) fn build_cert_chain<I>(cert: Vec<u8>, ca_bundles: I) -> Vec<u8>
where
    I: IntoIterator<Item = Vec<u8>>,
{
    let mut cert_chain = cert;
    for ca in ca_bundles {
        if !cert_chain.is_empty() && !cert_chain.ends_with(b"\n") {
            cert_chain.push(b'\n');
        }
        cert_chain.extend_from_slice(&ca);
    }
    cert_chain
}

/// Read the certificate, appending every CA bundle to the served chain.
#[cfg(feature = "tls")]
async fn load_rustls_config(tls: &TlsConfig) -> Result<RustlsConfig, ServerError> {
    let cert = tokio::fs::read(&tls.cert_file).await?;
    let mut ca_bundles = Vec::with_capacity(tls.ca_files.len());
    for ca_file in &tls.ca_files {
        ca_bundles.push(tokio::fs::read(ca_file).await?);
    }
    let cert_chain = build_cert_chain(cert, ca_bundles);
    let key = tokio::fs::read(&tls.key_file).await?;

    Ok(RustlsConfig::from_pem(cert_chain, key).await?)
}

#[cfg(feature = "tls")]
pub(super) async fn serve_tls<F>(
    server: Server,
    addr: SocketAddr,
    tls: &TlsConfig,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let rustls_config = load_rustls_config(tls).await?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let app = server.router(shutdown_rx);

    let handle = Handle::new();
    let shutdown_handle = handle.clone();
    tokio::spawn(async move {
        shutdown.await;
        let _ = shutdown_tx.send(true);
        shutdown_handle.graceful_shutdown(Some(GRACEFUL_SHUTDOWN_TIMEOUT));
    });

    axum_server::bind_rustls(addr, rustls_config)
        .handle(handle)
        .serve(app.into_make_service_with_connect_info::<SocketAddr>())
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
