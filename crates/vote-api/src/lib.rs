//! # Vote API
//!
//! HTTP handlers, session gating, page rendering and the router.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod state;
pub mod transport;
pub mod views;

pub use router::build_router;
pub use state::AppState;
