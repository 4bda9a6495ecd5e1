//! Web layer for the buoy server.
//!
//! JSON endpoints for registering stations and reading their snapshots.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
