mod config;
mod handler;
mod http;
mod logger;
mod model;
mod routing;
mod server;

use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Notify;

use crate::config::{AppState, Config};
use crate::model::LoadError;
use crate::routing::FileSnapshot;

/// Anything that stops the server from coming up
#[derive(Debug, Error)]
enum StartupError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] ::config::ConfigError),
    #[error("{0}")]
    Address(String),
    #[error("failed to open log files: {0}")]
    Logger(#[source] std::io::Error),
    #[error("failed to load maps: {0}")]
    Game(#[from] LoadError),
    #[error("web root {path} is not readable: {source}")]
    WebRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to bind listener: {0}")]
    Bind(#[source] std::io::Error),
    #[error("failed to register signal handlers: {0}")]
    Signal(#[source] std::io::Error),
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config::DEFAULT_CONFIG_PATH.to_string());
    let cfg = Config::load_from(&config_path).map_err(StartupError::from)?;
    logger::init(&cfg).map_err(StartupError::Logger)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))?;
    Ok(())
}

async fn async_main(cfg: Config) -> Result<(), StartupError> {
    let addr = cfg.get_socket_addr().map_err(StartupError::Address)?;

    let game = model::load_game(&cfg.game.config_file)?;
    let snapshot = FileSnapshot::capture(&cfg.game.www_root).map_err(|source| {
        StartupError::WebRoot {
            path: cfg.game.www_root.clone(),
            source,
        }
    })?;

    if snapshot.is_empty() {
        logger::log_warning(&format!(
            "Web root {} contains no files; only the map API will answer",
            cfg.game.www_root.display()
        ));
    }

    let listener = server::create_reusable_listener(addr).map_err(StartupError::Bind)?;
    logger::log_server_start(&addr, &cfg, game.maps().len(), snapshot.len());

    let state = Arc::new(AppState::new(cfg, game, snapshot));
    let shutdown = Arc::new(Notify::new());
    server::start_signal_handler(Arc::clone(&shutdown)).map_err(StartupError::Signal)?;

    server::start_server_loop(listener, state, shutdown).await;
    logger::log_server_stop();
    Ok(())
}
