//! Response builder
//!
//! Turns a classified intent into exactly one `HttpResponse`. Every branch
//! produces a well-formed response; nothing here can fail the request.

use hyper::StatusCode;
use serde::Serialize;
use std::path::Path;
use tokio::fs::File;

use crate::http::mime::{APPLICATION_JSON, TEXT_PLAIN};
use crate::http::{FileExtension, FileResponse, HttpResponse, RequestMethod, TextResponse};
use crate::logger;
use crate::model::wire::{MapDoc, MapSummary};
use crate::model::Game;
use crate::routing::{Intent, IntentKind};

pub const FILE_NOT_FOUND_MESSAGE: &str = "Your file not found";
pub const FILE_OUTSIDE_ROOT_MESSAGE: &str = "Your file is outside root category";
pub const MALFORMED_TARGET_MESSAGE: &str = "Malformed request target";

/// Fixed JSON error body
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: &'static str,
    pub message: &'static str,
}

pub const MAP_NOT_FOUND: ApiError = ApiError {
    code: "mapNotFound",
    message: "Map not found",
};

pub const BAD_REQUEST: ApiError = ApiError {
    code: "badRequest",
    message: "Bad request",
};

/// Build the response for an intent
pub async fn build(intent: Intent, game: &Game) -> HttpResponse {
    let method = intent.method;
    match intent.kind {
        IntentKind::ListMaps => {
            let maps: Vec<MapSummary<'_>> = game.maps().iter().map(MapSummary::from).collect();
            json_response(StatusCode::OK, &maps, method)
        }
        IntentKind::MapById(id) => match game.find_map(id.as_str()) {
            Some(map) => json_response(StatusCode::OK, &MapDoc::from(map), method),
            None => json_response(StatusCode::NOT_FOUND, &MAP_NOT_FOUND, method),
        },
        IntentKind::MapNotFound(_) => json_response(StatusCode::NOT_FOUND, &MAP_NOT_FOUND, method),
        IntentKind::UnknownRoute => json_response(StatusCode::BAD_REQUEST, &BAD_REQUEST, method),
        IntentKind::StaticFile { path, extension } => file_response(&path, extension, method).await,
        IntentKind::FileNotFound => {
            text_response(StatusCode::NOT_FOUND, FILE_NOT_FOUND_MESSAGE, method)
        }
        IntentKind::FileOutsideRoot => {
            text_response(StatusCode::BAD_REQUEST, FILE_OUTSIDE_ROOT_MESSAGE, method)
        }
        IntentKind::MalformedTarget => {
            text_response(StatusCode::BAD_REQUEST, MALFORMED_TARGET_MESSAGE, method)
        }
    }
}

/// Build JSON response
fn json_response<T: Serialize>(status: StatusCode, body: &T, method: RequestMethod) -> HttpResponse {
    match serde_json::to_string(body) {
        Ok(json) => HttpResponse::Text(TextResponse::new(status, APPLICATION_JSON, json, method)),
        Err(e) => {
            logger::log_error(&format!("Failed to serialize response: {e}"));
            HttpResponse::Text(TextResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                APPLICATION_JSON,
                r#"{"code":"internalError","message":"Internal server error"}"#.to_string(),
                method,
            ))
        }
    }
}

fn text_response(status: StatusCode, message: &str, method: RequestMethod) -> HttpResponse {
    HttpResponse::Text(TextResponse::new(
        status,
        TEXT_PLAIN,
        message.to_string(),
        method,
    ))
}

/// Open the file for GET, only size it for HEAD
///
/// A file that was in the snapshot but cannot be opened now still answers
/// 200 with an empty body.
async fn file_response(path: &Path, extension: FileExtension, method: RequestMethod) -> HttpResponse {
    let content_type = extension.content_type();
    if method == RequestMethod::Other {
        return HttpResponse::File(FileResponse::empty(content_type));
    }

    let response = match open_file(path).await {
        Ok((file, len)) if method == RequestMethod::Get => FileResponse::new(content_type, file, len),
        Ok((_, len)) => FileResponse::headers_only(content_type, len),
        Err(e) => {
            logger::log_error(&format!(
                "Failed to open file '{}': {e}",
                path.display()
            ));
            FileResponse::empty(content_type)
        }
    };
    HttpResponse::File(response)
}

async fn open_file(path: &Path) -> std::io::Result<(File, u64)> {
    let file = File::open(path).await?;
    let len = file.metadata().await?.len();
    Ok((file, len))
}
