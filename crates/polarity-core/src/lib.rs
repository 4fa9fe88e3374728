//! Polarity Core
//!
//! Core types, traits, and utilities shared across Polarity components.
//!
//! This crate provides:
//! - The shared `Error` type and `Result` alias
//! - Sentiment label and prediction types, including the label and
//!   confidence derivation rules used everywhere in the system

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{Explanation, Prediction, Sentiment, TokenWeight};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{Explanation, Prediction, Sentiment, TokenWeight};
}
