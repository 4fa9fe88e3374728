//! Polarity API
//!
//! Thin HTTP boundary over the sentiment model and the local explainer:
//! request validation, status and health reporting, and the `/predict` and
//! `/explain` endpoints.

pub mod cli;
pub mod config;
pub mod routes;
pub mod state;

pub use config::{LoadFailureMode, ServiceConfig};
pub use routes::create_router;
pub use state::AppState;
