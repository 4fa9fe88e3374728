//! Polarity Model
//!
//! Everything between raw request text and a class-probability pair:
//! - Deterministic text normalization matching the training-time cleaning
//! - The fitted TF-IDF vectorizer
//! - The fitted logistic regression classifier
//! - Artifact loading and the assembled [`SentimentModel`]
//!
//! All state is loaded once at startup and read-only afterwards.

pub mod artifacts;
pub mod classifier;
pub mod model;
pub mod text;
pub mod vectorizer;

pub use artifacts::{load_model, ArtifactPaths};
pub use classifier::LogisticClassifier;
pub use model::SentimentModel;
pub use text::normalize;
pub use vectorizer::TfidfVectorizer;
