//! HTTP server: shared state, extractors, router and builder

pub mod builder;
pub mod extract;
pub mod router;
pub mod state;

pub use builder::ServerBuilder;
pub use router::build_router;
pub use state::AppState;
