use std::path::PathBuf;
use std::time::Duration;

/// Immutable pipeline settings, built once in the binary and passed by
/// reference to each component.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Listing page for the crypto topic.
    pub site_url: String,
    /// Origin used to rewrite relative article links.
    pub origin: String,
    /// Literal markers stripped from the start of article content.
    pub unwanted_start: Vec<String>,
    /// Literal markers that truncate article content (marker and everything
    /// after it is dropped).
    pub unwanted_end: Vec<String>,
    /// Serialized classifier artifact.
    pub model_path: PathBuf,
    /// Serialized vectorizer artifact.
    pub vectorizer_path: PathBuf,
    /// Local cache directory for linguistic resources.
    pub resource_dir: PathBuf,
    /// Per-request HTTP timeout.
    pub request_timeout: Duration,
    /// Pause between per-article fetches.
    pub article_delay: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            site_url: "https://finance.yahoo.com/topic/crypto/".to_string(),
            origin: "https://finance.yahoo.com".to_string(),
            unwanted_start: [
                "News",
                "Life",
                "Entertainment",
                "Finance",
                "Sports",
                "New on Yahoo",
                "Yahoo Finance",
                "We are experiencing some temporary issues.",
                "The market data on this page is currently delayed.",
                "Please bear with us as we address this and restore your personalized lists.",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            unwanted_end: ["Recommended Stories", "Sign in to access your portfolio"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            model_path: PathBuf::from("models/sentiment_classifier.json"),
            vectorizer_path: PathBuf::from("models/tfidf_vectorizer.json"),
            resource_dir: PathBuf::from("resources"),
            request_timeout: Duration::from_secs(10),
            article_delay: Duration::from_secs(1),
        }
    }
}
