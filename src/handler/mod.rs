//! Request handler module
//!
//! `router` adapts hyper requests to the pipeline, `builder` turns a
//! classified intent into a response.

pub mod builder;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
