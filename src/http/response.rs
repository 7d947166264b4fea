//! HTTP response building module
//!
//! A response is one of exactly two shapes: an in-memory text body or an
//! open file streamed to the client. Both convert into a hyper response.

use futures_util::TryStreamExt;
use http_body_util::combinators::UnsyncBoxBody;
use http_body_util::{BodyExt, Empty, Full, StreamBody};
use hyper::body::{Bytes, Frame};
use hyper::header::{CONTENT_LENGTH, CONTENT_TYPE};
use hyper::{Response, StatusCode};
use tokio::fs::File;
use tokio_util::io::ReaderStream;

use super::RequestMethod;

/// Body type handed to hyper
pub type ResponseBody = UnsyncBoxBody<Bytes, std::io::Error>;

#[derive(Debug)]
pub enum HttpResponse {
    Text(TextResponse),
    File(FileResponse),
}

/// Response with an in-memory text or JSON body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextResponse {
    status: StatusCode,
    content_type: &'static str,
    body: String,
    content_length: usize,
}

impl TextResponse {
    /// Build a text response for `method`
    ///
    /// GET carries the body. HEAD keeps the GET `Content-Length` with an
    /// empty body. Any other method gets an empty body of length zero.
    pub fn new(
        status: StatusCode,
        content_type: &'static str,
        body: String,
        method: RequestMethod,
    ) -> Self {
        let (body, content_length) = match method {
            RequestMethod::Get => {
                let len = body.len();
                (body, len)
            }
            RequestMethod::Head => (String::new(), body.len()),
            RequestMethod::Other => (String::new(), 0),
        };
        Self {
            status,
            content_type,
            body,
            content_length,
        }
    }

    pub const fn status(&self) -> StatusCode {
        self.status
    }

    pub const fn content_type(&self) -> &'static str {
        self.content_type
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub const fn content_length(&self) -> usize {
        self.content_length
    }
}

/// Response whose body is streamed from an open file
///
/// The handle is owned by the response and then by the body stream; it is
/// closed when the body is fully sent or dropped.
#[derive(Debug)]
pub struct FileResponse {
    status: StatusCode,
    content_type: &'static str,
    file: Option<File>,
    content_length: u64,
}

impl FileResponse {
    pub const fn new(content_type: &'static str, file: File, content_length: u64) -> Self {
        Self {
            status: StatusCode::OK,
            content_type,
            file: Some(file),
            content_length,
        }
    }

    /// Headers of a file response without the body (HEAD)
    pub const fn headers_only(content_type: &'static str, content_length: u64) -> Self {
        Self {
            status: StatusCode::OK,
            content_type,
            file: None,
            content_length,
        }
    }

    pub const fn empty(content_type: &'static str) -> Self {
        Self::headers_only(content_type, 0)
    }

    pub const fn status(&self) -> StatusCode {
        self.status
    }

    pub const fn content_type(&self) -> &'static str {
        self.content_type
    }

    pub const fn content_length(&self) -> u64 {
        self.content_length
    }

    pub const fn has_body(&self) -> bool {
        self.file.is_some()
    }
}

impl HttpResponse {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Text(r) => r.status(),
            Self::File(r) => r.status(),
        }
    }

    pub const fn content_type(&self) -> &'static str {
        match self {
            Self::Text(r) => r.content_type(),
            Self::File(r) => r.content_type(),
        }
    }

    pub const fn content_length(&self) -> u64 {
        match self {
            Self::Text(r) => r.content_length() as u64,
            Self::File(r) => r.content_length(),
        }
    }

    /// Bytes the body actually carries, as opposed to the `Content-Length` header
    pub fn body_len(&self) -> u64 {
        match self {
            Self::Text(r) => r.body().len() as u64,
            Self::File(r) if r.has_body() => r.content_length(),
            Self::File(_) => 0,
        }
    }

    /// Convert into a hyper response, moving the file handle into the body
    pub fn into_hyper(self) -> Response<ResponseBody> {
        let status = self.status();
        let content_type = self.content_type();
        let content_length = self.content_length();

        let body = match self {
            Self::Text(r) if r.body.is_empty() => empty_body(),
            Self::Text(r) => Full::new(Bytes::from(r.body))
                .map_err(|never| match never {})
                .boxed_unsync(),
            Self::File(FileResponse {
                file: Some(file), ..
            }) => StreamBody::new(ReaderStream::new(file).map_ok(Frame::data)).boxed_unsync(),
            Self::File(_) => empty_body(),
        };

        Response::builder()
            .status(status)
            .header(CONTENT_TYPE, content_type)
            .header(CONTENT_LENGTH, content_length)
            .body(body)
            .unwrap_or_else(|e| {
                log_build_error(status.as_str(), &e);
                Response::new(empty_body())
            })
    }
}

fn empty_body() -> ResponseBody {
    Empty::<Bytes>::new()
        .map_err(|never| match never {})
        .boxed_unsync()
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
