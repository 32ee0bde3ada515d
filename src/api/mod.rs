//! API Module
//!
//! HTTP handlers and routing for the rate hub REST API. Read handlers go
//! through their cache partition when the partition's consumer flag is
//! enabled; mutation handlers write to the registries and invalidate
//! through the coordinator before responding.

pub mod banks;
pub mod currencies;
pub mod rates;
pub mod routes;
pub mod state;
pub mod system;

pub use routes::create_router;
pub use state::AppState;
