//! Shared application state
//!
//! Built once before serving begins and never mutated afterwards: the model
//! is write-once read-only, so handlers share it through plain `Arc`s with
//! no locking.

use metrics_exporter_prometheus::PrometheusHandle;
use polarity_explain::TextExplainer;
use polarity_model::SentimentModel;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Loaded model, or `None` when artifact loading failed and the service
    /// runs in degraded mode
    pub model: Option<Arc<SentimentModel>>,

    /// Local explainer shared across requests
    pub explainer: Arc<TextExplainer>,

    /// Prometheus recorder handle for the /metrics endpoint; absent in tests
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(model: Option<Arc<SentimentModel>>, metrics: Option<PrometheusHandle>) -> Self {
        Self {
            model,
            explainer: Arc::new(TextExplainer::new()),
            metrics,
        }
    }

    pub fn model_loaded(&self) -> bool {
        self.model.is_some()
    }
}
