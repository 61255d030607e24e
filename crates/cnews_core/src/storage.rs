use async_trait::async_trait;

use crate::types::TransformedArticle;
use crate::Result;

/// Result of inserting a single row. Duplicate keys are an outcome, not an
/// error: the loader logs them as skips and keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    Duplicate,
}

#[async_trait]
pub trait NewsStore: Send + Sync {
    /// Insert one transformed article. Returns `Duplicate` when the
    /// (date, title) primary key already exists.
    async fn insert_article(&self, article: &TransformedArticle) -> Result<InsertOutcome>;

    /// Close the underlying connection pool.
    async fn close(&self);
}
