//! The assembled sentiment model: normalize → vectorize → classify
//!
//! Read-only after construction; one instance is shared across all request
//! handlers behind an `Arc` with no locking.

use crate::classifier::LogisticClassifier;
use crate::text::normalize;
use crate::vectorizer::TfidfVectorizer;
use polarity_core::{Prediction, Result};

#[derive(Debug)]
pub struct SentimentModel {
    vectorizer: TfidfVectorizer,
    classifier: LogisticClassifier,
    source: String,
}

impl SentimentModel {
    /// Assemble a model from already-loaded parts.
    ///
    /// `source` is the artifact identifier reported by the health endpoint.
    pub fn from_parts(
        vectorizer: TfidfVectorizer,
        classifier: LogisticClassifier,
        source: impl Into<String>,
    ) -> Self {
        Self {
            vectorizer,
            classifier,
            source: source.into(),
        }
    }

    /// Artifact identifier for health reporting
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Class probabilities `(p_negative, p_positive)` for text that has
    /// already been normalized. Used by the explanation adapter, whose
    /// perturbed variants are built from normalized tokens.
    pub fn probabilities_normalized(&self, text: &str) -> Result<(f64, f64)> {
        let features = self.vectorizer.transform(text);
        self.classifier.predict_probabilities(&features)
    }

    /// Class probabilities for raw text.
    pub fn probabilities(&self, raw_text: &str) -> Result<(f64, f64)> {
        self.probabilities_normalized(&normalize(raw_text))
    }

    /// Point prediction with label and calibrated confidence.
    pub fn predict(&self, raw_text: &str) -> Result<Prediction> {
        let (p_negative, p_positive) = self.probabilities(raw_text)?;
        let prediction = Prediction::from_probabilities(p_negative, p_positive);
        tracing::debug!(
            sentiment = %prediction.sentiment,
            confidence = prediction.confidence,
            "prediction computed"
        );
        Ok(prediction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polarity_core::Sentiment;
    use std::collections::HashMap;

    fn toy_model() -> SentimentModel {
        let mut vocabulary = HashMap::new();
        vocabulary.insert("love".to_string(), 0);
        vocabulary.insert("hate".to_string(), 1);
        let vectorizer = TfidfVectorizer {
            vocabulary,
            idf: vec![1.0, 1.0],
        };
        let classifier = LogisticClassifier {
            weights: vec![3.0, -3.0],
            intercept: 0.0,
            classes: vec!["negative".to_string(), "positive".to_string()],
        };
        SentimentModel::from_parts(vectorizer, classifier, "test")
    }

    #[test]
    fn test_predict_positive() {
        let p = toy_model().predict("I LOVE this!").unwrap();
        assert_eq!(p.sentiment, Sentiment::Positive);
        assert!(p.probability_positive > 0.5);
        assert!(p.confidence > 0.0);
    }

    #[test]
    fn test_predict_negative() {
        let p = toy_model().predict("I hate this").unwrap();
        assert_eq!(p.sentiment, Sentiment::Negative);
        assert!(p.probability_positive < 0.5);
    }

    #[test]
    fn test_unknown_text_sits_on_the_boundary() {
        let p = toy_model().predict("entirely unfamiliar words").unwrap();
        assert_eq!(p.probability_positive, 0.5);
        assert_eq!(p.confidence, 0.0);
        assert_eq!(p.sentiment, Sentiment::Negative);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let p = toy_model().predict("love and hate mixed").unwrap();
        assert!((p.probability_positive + p.probability_negative - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_confidence_in_unit_interval() {
        for text in ["love love love", "hate", "meh", ""] {
            let p = toy_model().predict(text).unwrap();
            assert!((0.0..=1.0).contains(&p.confidence), "text: {text}");
        }
    }
}
