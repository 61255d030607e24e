use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An article as produced by the fetcher. `content` and `date` stay `None`
/// when the per-article fetch fails; the record itself is still returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawArticle {
    pub title: String,
    pub link: String,
    pub content: Option<String>,
    pub date: Option<String>,
}

impl RawArticle {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            content: None,
            date: None,
        }
    }
}

/// A fully transformed record, ready for persistence. The (date, title)
/// pair is the natural key of the persisted row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformedArticle {
    pub title: String,
    pub link: String,
    pub content: String,
    pub preprocessed_content: String,
    pub date: Option<DateTime<Utc>>,
    pub sentiment: String,
}
