//! Search service backends
//!
//! A backend answers two questions: the initial query (first page plus
//! aggregate statistics) and follow-up pages addressed by a zero-based start
//! index.

pub mod backend;
pub mod errors;
pub mod google_books;
pub mod proxy;
pub mod types;

pub use backend::{BackendConfig, BackendFactory, SearchBackend};
pub use errors::{SearchError, SearchResult};
pub use types::*;
