//! Web layer for the fuel station finder.
//!
//! Provides the map page and the HTTP endpoints it drives: searching,
//! sorting, settings, routes and navigation hand-off.

mod dto;
mod navigate;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use navigate::directions_url;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
