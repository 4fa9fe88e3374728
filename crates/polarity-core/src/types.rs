//! Shared prediction and explanation types

use serde::{Deserialize, Serialize};

/// Binary sentiment label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
}

impl Sentiment {
    /// Derive the label from the positive-class probability.
    ///
    /// Positive iff `p_positive > 0.5`; exactly 0.5 is Negative, so the
    /// decision rule has no ambiguous region.
    pub fn from_probability(p_positive: f64) -> Self {
        if p_positive > 0.5 {
            Self::Positive
        } else {
            Self::Negative
        }
    }

    /// Scaled distance of the positive-class probability from the 0.5
    /// decision boundary: 0 at the boundary, 1 at full certainty.
    ///
    /// Clamped defensively since classifier output is only analytically
    /// bounded when probabilities are exact.
    pub fn confidence(p_positive: f64) -> f64 {
        ((p_positive - 0.5).abs() * 2.0).clamp(0.0, 1.0)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point prediction with calibrated confidence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub sentiment: Sentiment,
    pub confidence: f64,
    pub probability_positive: f64,
    pub probability_negative: f64,
}

impl Prediction {
    /// Derive a prediction from a `(p_negative, p_positive)` pair.
    pub fn from_probabilities(p_negative: f64, p_positive: f64) -> Self {
        Self {
            sentiment: Sentiment::from_probability(p_positive),
            confidence: Sentiment::confidence(p_positive),
            probability_positive: p_positive,
            probability_negative: p_negative,
        }
    }
}

/// A single token attribution produced by the explainer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenWeight {
    pub word: String,
    pub weight: f64,
}

/// Local explanation of one prediction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explanation {
    pub sentiment: Sentiment,
    pub tokens: Vec<TokenWeight>,
    pub html: String,
}
