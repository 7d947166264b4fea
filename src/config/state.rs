// Application state module
// Everything a request needs, loaded once at startup and read-only afterwards

use super::types::Config;
use crate::model::Game;
use crate::routing::{FileSnapshot, RouteContext};

/// Application state
pub struct AppState {
    pub config: Config,
    pub game: Game,
    pub snapshot: FileSnapshot,
}

impl AppState {
    pub const fn new(config: Config, game: Game, snapshot: FileSnapshot) -> Self {
        Self {
            config,
            game,
            snapshot,
        }
    }

    pub const fn route_context(&self) -> RouteContext<'_> {
        RouteContext {
            game: &self.game,
            snapshot: &self.snapshot,
        }
    }

    pub const fn access_log_enabled(&self) -> bool {
        self.config.logging.access_log
    }
}
