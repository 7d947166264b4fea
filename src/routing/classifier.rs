//! Route classifier
//!
//! Decides the intent of a normalized request target. Rules are checked in
//! order and the first match wins:
//!
//! 1. not under `/api/`: static file, resolved by the path guard
//! 2. exactly `/api/v1/maps`: map listing
//! 3. `/api/v1/maps` followed by anything: map lookup by the last segment
//! 4. anything else under `/api/`: unknown route

use super::intent::{Intent, IntentKind};
use super::path_guard::{self, FileSnapshot, Verdict};
use crate::http::{normalize_target, FileExtension, RequestMethod};
use crate::logger;
use crate::model::Game;

pub const API_PREFIX: &str = "/api/";
pub const MAPS_ENDPOINT: &str = "/api/v1/maps";

/// Read-only data the classifier consults
#[derive(Clone, Copy)]
pub struct RouteContext<'a> {
    pub game: &'a Game,
    pub snapshot: &'a FileSnapshot,
}

/// Normalize the raw target, then classify it
pub fn classify_request(raw_target: &str, method: RequestMethod, ctx: RouteContext<'_>) -> Intent {
    match normalize_target(raw_target) {
        Ok(target) => classify(&target, method, ctx),
        Err(e) => {
            logger::log_warning(&format!("Malformed request target '{raw_target}': {e}"));
            Intent::new(IntentKind::MalformedTarget, method)
        }
    }
}

/// Classify a normalized target
pub fn classify(target: &str, method: RequestMethod, ctx: RouteContext<'_>) -> Intent {
    let kind = if !target.starts_with(API_PREFIX) {
        classify_file(target, ctx.snapshot)
    } else if target == MAPS_ENDPOINT {
        IntentKind::ListMaps
    } else if target.len() > MAPS_ENDPOINT.len() && target.starts_with(MAPS_ENDPOINT) {
        classify_map(target, ctx.game)
    } else {
        IntentKind::UnknownRoute
    };
    Intent::new(kind, method)
}

fn classify_file(target: &str, snapshot: &FileSnapshot) -> IntentKind {
    match path_guard::resolve(target, snapshot) {
        Verdict::Root => IntentKind::StaticFile {
            path: snapshot.index_path(),
            extension: FileExtension::Html,
        },
        Verdict::Inside(path) => {
            let extension = FileExtension::from_path(&path);
            IntentKind::StaticFile { path, extension }
        }
        Verdict::NotFound => IntentKind::FileNotFound,
        Verdict::OutsideRoot => IntentKind::FileOutsideRoot,
    }
}

fn classify_map(target: &str, game: &Game) -> IntentKind {
    let id = target.rsplit('/').next().unwrap_or_default();
    match game.find_map(id) {
        Some(map) => IntentKind::MapById(map.id().clone()),
        None => IntentKind::MapNotFound(id.to_string()),
    }
}
