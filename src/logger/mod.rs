//! Logger module
//!
//! Thin facade over `tracing` so call sites name the event they report:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Delivery failures and other operator-facing errors

mod format;

pub use format::AccessLogEntry;

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over `logging.level`. Should be called once
/// at application startup.
pub fn init(config: &Config) -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .map_err(|e| format!("Invalid log level '{}': {e}", config.logging.level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| format!("Failed to install logger: {e}"))
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    tracing::info!("======================================");
    tracing::info!("Contact relay started");
    tracing::info!("Listening on: http://{addr}");
    tracing::info!(
        "Mail relay: {}:{} (secure: {})",
        config.mail.host,
        config.mail.port,
        config.mail.secure
    );
    tracing::info!("Max body size: {} bytes", config.http.max_body_size);
    if let Some(workers) = config.server.workers {
        tracing::info!("Worker threads: {workers}");
    }
    if let Some(max) = config.performance.max_connections {
        tracing::info!("Max connections: {max}");
    }
    if config.mail.escape_html {
        tracing::info!("HTML escaping of submitted fields: enabled");
    }
    tracing::info!("======================================");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    tracing::debug!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    tracing::error!("Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    tracing::error!("{message}");
}

pub fn log_warning(message: &str) {
    tracing::warn!("{message}");
}

/// Operator-facing record of a failed submission; never sent to the client
pub fn log_request_failed(err: &impl std::fmt::Display) {
    tracing::error!(target: "contact_relay::delivery", "Error: {err}");
}

pub fn log_delivered(reply_to: &str) {
    tracing::debug!(target: "contact_relay::delivery", "Email delivered (reply-to: {reply_to})");
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    tracing::info!(target: "contact_relay::access", "{}", entry.format(format));
}

pub fn log_shutdown_requested(signal: &str) {
    tracing::info!("[Shutdown] {signal} received, no longer accepting connections");
}

pub fn log_shutdown_complete(remaining: usize) {
    if remaining == 0 {
        tracing::info!("[Shutdown] All connections closed");
    } else {
        tracing::warn!("[Shutdown] Timed out with {remaining} connection(s) still open");
    }
}
