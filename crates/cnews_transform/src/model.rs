use std::collections::HashMap;
use std::path::Path;

use cnews_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// TF-IDF vectorizer restored from an externally trained artifact. Only the
/// `transform` direction is implemented; fitting happens outside this
/// repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// Token to feature-index mapping.
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per feature index.
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Map a preprocessed (whitespace-joined) token string to an
    /// L2-normalized tf-idf feature vector. Out-of-vocabulary tokens are
    /// ignored.
    pub fn transform(&self, text: &str) -> Vec<f64> {
        let mut features = vec![0.0; self.idf.len()];
        for token in text.split_whitespace() {
            if let Some(&index) = self.vocabulary.get(token) {
                features[index] += 1.0;
            }
        }

        for (value, idf) in features.iter_mut().zip(&self.idf) {
            *value *= idf;
        }

        let norm = features.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in &mut features {
                *value /= norm;
            }
        }

        features
    }

    pub fn n_features(&self) -> usize {
        self.idf.len()
    }
}

/// Linear classifier restored from an externally trained artifact: one
/// weight row and intercept per class, prediction by argmax score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearClassifier {
    classes: Vec<String>,
    weights: Vec<Vec<f64>>,
    intercepts: Vec<f64>,
}

impl LinearClassifier {
    pub fn predict(&self, features: &[f64]) -> Result<&str> {
        let mut best: Option<(usize, f64)> = None;
        for (index, (weights, intercept)) in
            self.weights.iter().zip(&self.intercepts).enumerate()
        {
            if weights.len() != features.len() {
                return Err(Error::Model(format!(
                    "feature length {} does not match classifier weights {}",
                    features.len(),
                    weights.len()
                )));
            }
            let score: f64 = weights
                .iter()
                .zip(features)
                .map(|(w, f)| w * f)
                .sum::<f64>()
                + intercept;
            match best {
                Some((_, best_score)) if best_score >= score => {}
                _ => best = Some((index, score)),
            }
        }

        let (index, _) =
            best.ok_or_else(|| Error::Model("classifier has no classes".to_string()))?;
        Ok(&self.classes[index])
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}

/// The pre-trained sentiment model: a vectorizer and a classifier loaded
/// once at startup from fixed artifact paths. A missing or malformed
/// artifact is a fatal constructor error, never a per-record one.
#[derive(Debug)]
pub struct SentimentModel {
    vectorizer: TfidfVectorizer,
    classifier: LinearClassifier,
}

impl SentimentModel {
    pub fn load(model_path: &Path, vectorizer_path: &Path) -> Result<Self> {
        let classifier: LinearClassifier = load_artifact(model_path)?;
        let vectorizer: TfidfVectorizer = load_artifact(vectorizer_path)?;

        if classifier
            .weights
            .iter()
            .any(|row| row.len() != vectorizer.n_features())
        {
            return Err(Error::Model(format!(
                "classifier weights do not match vectorizer features ({})",
                vectorizer.n_features()
            )));
        }

        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    pub fn new(vectorizer: TfidfVectorizer, classifier: LinearClassifier) -> Self {
        Self {
            vectorizer,
            classifier,
        }
    }

    /// Classify preprocessed text, returning the single predicted label.
    pub fn classify(&self, preprocessed: &str) -> Result<String> {
        let features = self.vectorizer.transform(preprocessed);
        Ok(self.classifier.predict(&features)?.to_string())
    }

    pub fn labels(&self) -> &[String] {
        self.classifier.classes()
    }
}

fn load_artifact<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let bytes = std::fs::read(path).map_err(|e| {
        Error::Model(format!("failed to load artifact {}: {}", path.display(), e))
    })?;
    serde_json::from_slice(&bytes).map_err(|e| {
        Error::Model(format!("malformed artifact {}: {}", path.display(), e))
    })
}


#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_vectorizer_transform() {
        let model = test_fixtures::model();
        let features = model.vectorizer.transform("bitcoin record high");
        assert_eq!(features.len(), 6);
        let norm: f64 = features.iter().map(|v| v * v).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_vectorizer_ignores_unknown_tokens() {
        let model = test_fixtures::model();
        let features = model.vectorizer.transform("completely unknown words");
        assert!(features.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_classify() {
        let model = test_fixtures::model();
        assert_eq!(model.classify("bitcoin record high").unwrap(), "positive");
        assert_eq!(model.classify("bitcoin crash loss").unwrap(), "negative");
        assert_eq!(model.classify("market").unwrap(), "neutral");
    }

    #[test]
    fn test_classify_label_in_label_set() {
        let model = test_fixtures::model();
        let label = model.classify("bitcoin").unwrap();
        assert!(model.labels().contains(&label));
    }

    #[test]
    fn test_load_round_trip() {
        let dir = tempdir().unwrap();
        let (model_path, vectorizer_path) = test_fixtures::write_artifacts(dir.path());
        let model = SentimentModel::load(&model_path, &vectorizer_path).unwrap();
        assert_eq!(model.labels().len(), 3);
        assert_eq!(model.classify("bitcoin record high").unwrap(), "positive");
    }

    #[test]
    fn test_load_missing_artifact_is_fatal() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        let err = SentimentModel::load(&missing, &missing).unwrap_err();
        assert!(matches!(err, cnews_core::Error::Model(_)));
    }
}
