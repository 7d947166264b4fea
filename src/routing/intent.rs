//! Classified meaning of a request

use std::path::PathBuf;

use crate::http::{FileExtension, RequestMethod};
use crate::model::MapId;

/// What a request asks for, decided once by the classifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentKind {
    /// Serve a file from the web root
    StaticFile {
        path: PathBuf,
        extension: FileExtension,
    },
    FileNotFound,
    FileOutsideRoot,
    ListMaps,
    /// A map known to exist in the model
    MapById(MapId),
    /// Map lookup with an id the model does not know
    MapNotFound(String),
    UnknownRoute,
    /// The raw target failed to decode
    MalformedTarget,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intent {
    pub kind: IntentKind,
    pub method: RequestMethod,
}

impl Intent {
    pub const fn new(kind: IntentKind, method: RequestMethod) -> Self {
        Self { kind, method }
    }

    /// Short label for logs
    pub const fn label(&self) -> &'static str {
        match self.kind {
            IntentKind::StaticFile { .. } => "static_file",
            IntentKind::FileNotFound => "file_not_found",
            IntentKind::FileOutsideRoot => "file_outside_root",
            IntentKind::ListMaps => "list_maps",
            IntentKind::MapById(_) => "map_by_id",
            IntentKind::MapNotFound(_) => "map_not_found",
            IntentKind::UnknownRoute => "unknown_route",
            IntentKind::MalformedTarget => "malformed_target",
        }
    }
}
