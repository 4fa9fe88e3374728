//! TF-IDF feature vectorizer
//!
//! The vocabulary and idf table are fitted offline; this module only applies
//! the fitted transform. Tokens outside the vocabulary contribute nothing.

use polarity_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Fitted TF-IDF vectorizer loaded from a persisted artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// Word to feature index mapping
    pub vocabulary: HashMap<String, usize>,

    /// Inverse document frequency per feature index
    pub idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Number of features the transform produces
    pub fn dims(&self) -> usize {
        self.idf.len()
    }

    /// Check internal consistency after deserialization.
    pub fn validate(&self) -> Result<()> {
        if self.vocabulary.len() != self.idf.len() {
            return Err(Error::artifact(format!(
                "vectorizer vocabulary has {} entries but idf table has {}",
                self.vocabulary.len(),
                self.idf.len()
            )));
        }
        for (word, &idx) in &self.vocabulary {
            if idx >= self.idf.len() {
                return Err(Error::artifact(format!(
                    "vocabulary entry '{word}' maps to out-of-range index {idx}"
                )));
            }
        }
        Ok(())
    }

    /// Transform normalized text into an L2-normalized tf-idf vector.
    pub fn transform(&self, text: &str) -> Vec<f64> {
        let mut vector = vec![0.0; self.dims()];

        for token in text.split_whitespace() {
            if let Some(&idx) = self.vocabulary.get(token) {
                vector[idx] += 1.0;
            }
        }

        for (idx, value) in vector.iter_mut().enumerate() {
            *value *= self.idf[idx];
        }

        let norm: f64 = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in vector.iter_mut() {
                *value /= norm;
            }
        }

        vector
    }
}
