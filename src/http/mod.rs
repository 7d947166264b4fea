//! HTTP protocol layer module
//!
//! Target decoding, Content-Type lookup and the response shapes shared by
//! the request pipeline. Nothing here knows about maps or routes.

pub mod mime;
pub mod response;
pub mod target;

use hyper::Method;

pub use mime::FileExtension;
pub use response::{FileResponse, HttpResponse, ResponseBody, TextResponse};
pub use target::normalize_target;

/// Request method as seen by the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Head,
    Other,
}

impl From<&Method> for RequestMethod {
    fn from(method: &Method) -> Self {
        match *method {
            Method::GET => Self::Get,
            Method::HEAD => Self::Head,
            _ => Self::Other,
        }
    }
}
