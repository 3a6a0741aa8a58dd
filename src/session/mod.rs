//! Search session management
//!
//! This module owns the paging state machine: the per-query page cache, the
//! fetch controller that fills it, and the window calculator used to build
//! pagination controls.

pub mod cache;
pub mod controller;
pub mod display;
pub mod state;
pub mod window;

pub use controller::{ControllerOptions, FetchOutcome, SearchController};
pub use display::DisplaySurface;
pub use state::Phase;
