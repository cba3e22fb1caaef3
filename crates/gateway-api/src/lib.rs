//! # Gateway API
//! 
//! HTTP handlers, body extractor, error mapping, HTML pages and router of
//! the mock gateway.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod pages;
pub mod response;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
