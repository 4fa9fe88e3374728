//! Logistic regression sentiment classifier
//!
//! Applies fitted coefficients to a feature vector and returns the
//! class-probability pair `(p_negative, p_positive)`.

use polarity_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Fitted binary logistic regression loaded from a persisted artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticClassifier {
    /// One coefficient per feature
    pub weights: Vec<f64>,

    /// Intercept term
    pub intercept: f64,

    /// Class names in probability order
    #[serde(default = "default_classes")]
    pub classes: Vec<String>,
}

fn default_classes() -> Vec<String> {
    vec!["negative".to_string(), "positive".to_string()]
}

impl LogisticClassifier {
    /// Number of features this classifier expects
    pub fn dims(&self) -> usize {
        self.weights.len()
    }

    /// Probability pair `(p_negative, p_positive)` for one feature vector.
    ///
    /// The vector's dimensionality must match the fitted coefficients; the
    /// artifact loader checks this once at startup, so the per-request path
    /// returns an error only on programmer misuse.
    pub fn predict_probabilities(&self, features: &[f64]) -> Result<(f64, f64)> {
        if features.len() != self.weights.len() {
            return Err(Error::internal(format!(
                "feature vector has {} dims, classifier expects {}",
                features.len(),
                self.weights.len()
            )));
        }

        let z: f64 = self
            .weights
            .iter()
            .zip(features)
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept;

        let p_positive = sigmoid(z);
        Ok((1.0 - p_positive, p_positive))
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
