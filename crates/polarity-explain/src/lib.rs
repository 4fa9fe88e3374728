//! Polarity Explain
//!
//! Local interpretability for the sentiment classifier: perturbs a single
//! input's tokens, re-classifies the variants through a caller-supplied batch
//! probability adapter, fits a locally-weighted linear surrogate, and renders
//! the resulting per-token attributions.
//!
//! The explainer never sees the model directly; the adapter closure is the
//! only seam between the two crates.

pub mod explainer;
mod linalg;
pub mod render;

pub use explainer::TextExplainer;
pub use render::render_html;
