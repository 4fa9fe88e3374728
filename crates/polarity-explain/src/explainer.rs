//! Perturbation-based local explanation of a single text classification
//!
//! Approximates the classifier's behavior near one input by masking random
//! subsets of its tokens, re-classifying every variant through a batch
//! probability adapter supplied by the caller, and fitting a locally-weighted
//! ridge surrogate whose coefficients are the per-token attributions.

use crate::linalg::weighted_ridge_fit;
use polarity_core::{Error, Result, TokenWeight};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

/// Number of perturbed variants classified per explanation, including the
/// unperturbed instance. This bounds the cost of one explanation: the batch
/// adapter is invoked exactly once with this many texts.
const NUM_SAMPLES: usize = 500;

/// Maximum number of attributed tokens returned
const MAX_FEATURES: usize = 10;

/// Width of the exponential proximity kernel over mask distance
const KERNEL_WIDTH: f64 = 25.0;

/// Ridge penalty for the surrogate fit
const RIDGE_LAMBDA: f64 = 1.0;

/// Local explainer for binary text classifiers.
///
/// Stateless apart from an optional RNG seed; one instance is shared across
/// all requests.
pub struct TextExplainer {
    seed: Option<u64>,
}

impl TextExplainer {
    pub fn new() -> Self {
        Self { seed: None }
    }

    /// Deterministic sampling, for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// Explain one instance.
    ///
    /// `text` is the normalized input; its whitespace tokens are the
    /// interpretable features (all occurrences of a word share one feature).
    /// `classifier_fn` maps a batch of candidate texts to `(p_negative,
    /// p_positive)` pairs and is the sole integration point with the model.
    ///
    /// Returns up to [`MAX_FEATURES`] `(token, weight)` pairs ranked by the
    /// magnitude of the surrogate's fitted coefficients, descending. Input
    /// with no extractable tokens yields an empty list, not an error.
    pub fn explain_instance<F>(&self, text: &str, classifier_fn: F) -> Result<Vec<TokenWeight>>
    where
        F: Fn(&[String]) -> Result<Vec<(f64, f64)>>,
    {
        let occurrences: Vec<&str> = text.split_whitespace().collect();

        let mut feature_index: HashMap<&str, usize> = HashMap::new();
        let mut features: Vec<&str> = Vec::new();
        for &word in &occurrences {
            if !feature_index.contains_key(word) {
                feature_index.insert(word, features.len());
                features.push(word);
            }
        }

        let n_features = features.len();
        if n_features == 0 {
            tracing::debug!("no extractable tokens, returning empty explanation");
            return Ok(Vec::new());
        }

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        // Sample 0 is the unperturbed instance; every other sample
        // deactivates a uniformly chosen number of token features.
        let mut masks: Vec<Vec<f64>> = Vec::with_capacity(NUM_SAMPLES);
        masks.push(vec![1.0; n_features]);
        for _ in 1..NUM_SAMPLES {
            let mut mask = vec![1.0; n_features];
            let deactivate = rng.gen_range(1..=n_features);
            for idx in rand::seq::index::sample(&mut rng, n_features, deactivate) {
                mask[idx] = 0.0;
            }
            masks.push(mask);
        }

        let texts: Vec<String> = masks
            .iter()
            .map(|mask| {
                occurrences
                    .iter()
                    .filter(|&&word| mask[feature_index[word]] > 0.0)
                    .copied()
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();

        let probabilities = classifier_fn(&texts)?;
        if probabilities.len() != masks.len() {
            return Err(Error::explanation(format!(
                "classifier adapter returned {} results for {} samples",
                probabilities.len(),
                masks.len()
            )));
        }

        // Regress the positive-class probability on the masks, weighting
        // samples by proximity to the unperturbed instance.
        let targets: Vec<f64> = probabilities.iter().map(|&(_, p_pos)| p_pos).collect();
        let sample_weights: Vec<f64> = masks.iter().map(|m| proximity_weight(m)).collect();

        let beta = weighted_ridge_fit(&masks, &targets, &sample_weights, RIDGE_LAMBDA)?;

        let mut attributions: Vec<TokenWeight> = features
            .iter()
            .zip(beta.iter().skip(1))
            .map(|(word, &weight)| TokenWeight {
                word: (*word).to_string(),
                weight,
            })
            .collect();

        attributions.sort_by(|a, b| {
            b.weight
                .abs()
                .partial_cmp(&a.weight.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        attributions.truncate(MAX_FEATURES);

        Ok(attributions)
    }
}

impl Default for TextExplainer {
    fn default() -> Self {
        Self::new()
    }
}

/// Exponential kernel over the cosine distance between a mask and the
/// all-ones mask of the unperturbed instance.
fn proximity_weight(mask: &[f64]) -> f64 {
    let active: f64 = mask.iter().sum();
    let total = mask.len() as f64;
    let cosine_similarity = (active / total).sqrt();
    let distance = 1.0 - cosine_similarity;
    (-(distance * distance) / (KERNEL_WIDTH * KERNEL_WIDTH)).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fake classifier: probability of positive rises with each occurrence
    /// of "good" and falls with "awful".
    fn lexicon_probabilities(texts: &[String]) -> Result<Vec<(f64, f64)>> {
        Ok(texts
            .iter()
            .map(|t| {
                let score: f64 = t
                    .split_whitespace()
                    .map(|w| match w {
                        "good" => 2.0,
                        "awful" => -2.0,
                        _ => 0.0,
                    })
                    .sum();
                let p_pos = 1.0 / (1.0 + (-score).exp());
                (1.0 - p_pos, p_pos)
            })
            .collect())
    }

    #[test]
    fn test_influential_token_ranks_first() {
        let explainer = TextExplainer::with_seed(7);
        let tokens = explainer
            .explain_instance("such a good day today", lexicon_probabilities)
            .unwrap();

        assert!(!tokens.is_empty());
        assert_eq!(tokens[0].word, "good");
        assert!(tokens[0].weight > 0.0);
    }

    #[test]
    fn test_opposing_tokens_get_opposite_signs() {
        let explainer = TextExplainer::with_seed(11);
        let tokens = explainer
            .explain_instance("good service awful food", lexicon_probabilities)
            .unwrap();

        let good = tokens.iter().find(|t| t.word == "good").unwrap();
        let awful = tokens.iter().find(|t| t.word == "awful").unwrap();
        assert!(good.weight > 0.0);
        assert!(awful.weight < 0.0);
    }

    #[test]
    fn test_at_most_ten_tokens_returned() {
        let explainer = TextExplainer::with_seed(3);
        let text = "one two three four five six seven eight nine ten eleven twelve";
        let tokens = explainer
            .explain_instance(text, lexicon_probabilities)
            .unwrap();
        assert!(tokens.len() <= 10);
        assert!(!tokens.is_empty());
    }

    #[test]
    fn test_degenerate_input_yields_empty_list() {
        let explainer = TextExplainer::with_seed(1);
        let tokens = explainer
            .explain_instance("", lexicon_probabilities)
            .unwrap();
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_single_token_instance() {
        let explainer = TextExplainer::with_seed(5);
        let tokens = explainer
            .explain_instance("good", lexicon_probabilities)
            .unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].word, "good");
        assert!(tokens[0].weight > 0.0);
    }

    #[test]
    fn test_mismatched_adapter_output_is_an_error() {
        let explainer = TextExplainer::with_seed(2);
        let result =
            explainer.explain_instance("some words here", |_texts| Ok(vec![(0.5, 0.5)]));
        assert!(result.is_err());
    }
}
