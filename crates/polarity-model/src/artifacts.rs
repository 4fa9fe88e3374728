//! Artifact loading for the fitted vectorizer and classifier
//!
//! Both artifacts are opaque JSON blobs produced by an offline training run.
//! They are loaded exactly once at process start and never reloaded; a load
//! failure puts the service into degraded mode (or aborts startup, depending
//! on configuration) rather than being retried.

use crate::classifier::LogisticClassifier;
use crate::model::SentimentModel;
use crate::vectorizer::TfidfVectorizer;
use polarity_core::{Error, Result};
use std::path::{Path, PathBuf};

/// Locations of the two persisted model artifacts
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub vectorizer: PathBuf,
    pub classifier: PathBuf,
}

impl ArtifactPaths {
    /// Conventional layout: `<dir>/vectorizer.json` + `<dir>/classifier.json`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            vectorizer: dir.join("vectorizer.json"),
            classifier: dir.join("classifier.json"),
        }
    }
}

/// Load both artifacts and assemble a ready-to-serve model.
///
/// Checks that the classifier's coefficient count matches the vectorizer's
/// feature count; a mismatch means the two artifacts are from different
/// training runs and the pair is unusable.
pub fn load_model(paths: &ArtifactPaths) -> Result<SentimentModel> {
    let vectorizer: TfidfVectorizer = read_artifact(&paths.vectorizer)?;
    vectorizer.validate()?;

    let classifier: LogisticClassifier = read_artifact(&paths.classifier)?;

    if classifier.dims() != vectorizer.dims() {
        return Err(Error::artifact(format!(
            "classifier expects {} features but vectorizer produces {}",
            classifier.dims(),
            vectorizer.dims()
        )));
    }

    let source = paths.classifier.display().to_string();
    tracing::info!(
        source = %source,
        features = vectorizer.dims(),
        "model artifacts loaded"
    );

    Ok(SentimentModel::from_parts(vectorizer, classifier, source))
}

fn read_artifact<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(Error::artifact(format!(
            "artifact file not found: {}",
            path.display()
        )));
    }
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| Error::artifact(format!("failed to parse {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, content: &str) {
        let mut f = std::fs::File::create(dir.join(name)).unwrap();
        f.write_all(content.as_bytes()).unwrap();
    }

    #[test]
    fn test_load_model_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            dir.path(),
            "vectorizer.json",
            r#"{"vocabulary": {"good": 0, "bad": 1}, "idf": [1.0, 1.0]}"#,
        );
        write_file(
            dir.path(),
            "classifier.json",
            r#"{"weights": [2.0, -2.0], "intercept": 0.0, "classes": ["negative", "positive"]}"#,
        );

        let model = load_model(&ArtifactPaths::in_dir(dir.path())).unwrap();
        let prediction = model.predict("such a good day").unwrap();
        assert_eq!(prediction.sentiment, polarity_core::Sentiment::Positive);
    }

    #[test]
    fn test_missing_artifact_is_an_artifact_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_model(&ArtifactPaths::in_dir(dir.path())).unwrap_err();
        assert!(matches!(err, Error::Artifact(_)));
    }

    #[test]
    fn test_dimension_mismatch_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            dir.path(),
            "vectorizer.json",
            r#"{"vocabulary": {"good": 0, "bad": 1}, "idf": [1.0, 1.0]}"#,
        );
        write_file(
            dir.path(),
            "classifier.json",
            r#"{"weights": [2.0], "intercept": 0.0}"#,
        );

        let err = load_model(&ArtifactPaths::in_dir(dir.path())).unwrap_err();
        assert!(matches!(err, Error::Artifact(_)));
    }

    #[test]
    fn test_malformed_json_is_an_artifact_error() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "vectorizer.json", "{not json");
        write_file(dir.path(), "classifier.json", "{}");

        let err = load_model(&ArtifactPaths::in_dir(dir.path())).unwrap_err();
        assert!(matches!(err, Error::Artifact(_)));
    }
}
