use std::sync::Arc;

mod config;
mod contact;
mod error;
mod handler;
mod http;
mod logger;
mod mailer;
mod server;

use crate::config::{AppState, Config};
use crate::mailer::SmtpMailSender;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env is fine; the environment may already be populated
    let dotenv_path = dotenvy::dotenv().ok();

    let config_path = config_path_from_args(std::env::args().skip(1))
        .unwrap_or_else(|| crate::config::DEFAULT_CONFIG_PATH.to_string());
    let cfg = Config::load_from(&config_path)?;
    logger::init(&cfg)?;

    if let Some(path) = dotenv_path {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let mailer = Arc::new(SmtpMailSender::new(&cfg.mail)?);
    let listener = server::create_listener(addr)?;

    logger::log_server_start(&addr, &cfg);

    let state = Arc::new(AppState::new(cfg, mailer));
    server::run(listener, state, server::wait_for_shutdown()).await;
    Ok(())
}

/// Extract the config file path from `-c <path>` / `--config <path>`
fn config_path_from_args(mut args: impl Iterator<Item = String>) -> Option<String> {
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-c" | "--config" => return args.next(),
            other => {
                if let Some(path) = other.strip_prefix("--config=") {
                    return Some(path.to_string());
                }
            }
        }
    }
    None
}
