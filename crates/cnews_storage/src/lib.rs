pub mod backends;

pub use backends::{PostgresStore, SqliteStore};

use cnews_core::{InsertOutcome, NewsStore, Result, TransformedArticle};
use tracing::{info, warn};

/// Counts for one load batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub inserted: usize,
    pub skipped: usize,
}

/// Insert the transformed records one at a time over a single store.
///
/// Duplicate (date, title) keys are logged as skips and never abort the
/// batch; the same goes for rows whose date failed to parse, since they
/// cannot satisfy the primary key.
pub async fn load_data_to_db(
    store: &dyn NewsStore,
    data: &[TransformedArticle],
) -> Result<LoadReport> {
    let mut report = LoadReport::default();

    for article in data {
        let Some(date) = article.date else {
            warn!("skipping {:?}: no publication date", article.title);
            report.skipped += 1;
            continue;
        };

        match store.insert_article(article).await? {
            InsertOutcome::Inserted => report.inserted += 1,
            InsertOutcome::Duplicate => {
                info!(
                    "skipping {:?} ({}) as it already exists in the database",
                    article.title, date
                );
                report.skipped += 1;
            }
        }
    }

    info!(
        "load complete: {} inserted, {} skipped",
        report.inserted, report.skipped
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    fn article(title: &str) -> TransformedArticle {
        TransformedArticle {
            title: title.to_string(),
            link: "https://finance.yahoo.com/news/bitcoin-hits-high".to_string(),
            content: "Bitcoin reached a new all-time high...".to_string(),
            preprocessed_content: "bitcoin reach new all time high".to_string(),
            date: Some(Utc.with_ymd_and_hms(2024, 12, 15, 10, 0, 0).unwrap()),
            sentiment: "positive".to_string(),
        }
    }

    #[tokio::test]
    async fn test_load_skips_duplicates() {
        let dir = tempdir().unwrap();
        let store = SqliteStore::new_with_path(&dir.path().join("test.db"))
            .await
            .unwrap();

        let data = vec![
            article("Bitcoin Hits All-Time High"),
            article("Bitcoin Hits All-Time High"),
            article("Ethereum Update"),
        ];

        let report = load_data_to_db(&store, &data).await.unwrap();
        assert_eq!(report.inserted, 2);
        assert_eq!(report.skipped, 1);
        store.close().await;
    }

    #[tokio::test]
    async fn test_load_skips_rows_without_date() {
        let dir = tempdir().unwrap();
        let store = SqliteStore::new_with_path(&dir.path().join("test.db"))
            .await
            .unwrap();

        let mut dateless = article("No Date");
        dateless.date = None;

        let report = load_data_to_db(&store, &[dateless]).await.unwrap();
        assert_eq!(report.inserted, 0);
        assert_eq!(report.skipped, 1);
        store.close().await;
    }

    #[tokio::test]
    async fn test_load_empty_batch() {
        let dir = tempdir().unwrap();
        let store = SqliteStore::new_with_path(&dir.path().join("test.db"))
            .await
            .unwrap();
        let report = load_data_to_db(&store, &[]).await.unwrap();
        assert_eq!(report, LoadReport::default());
        store.close().await;
    }
}
