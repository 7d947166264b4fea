//! Request routing module
//!
//! Classifies a request into an intent and guards static file access.

pub mod classifier;
pub mod intent;
pub mod path_guard;

pub use classifier::{classify_request, RouteContext};
pub use intent::{Intent, IntentKind};
pub use path_guard::FileSnapshot;
