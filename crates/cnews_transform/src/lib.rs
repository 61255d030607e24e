pub mod model;
pub mod preprocess;
pub mod resources;

use chrono::{DateTime, NaiveDateTime, Utc};
use cnews_core::{Error, RawArticle, Result, Settings, TransformedArticle};
use tracing::info;

pub use model::SentimentModel;
pub use preprocess::Preprocessor;

/// Format of machine-readable article dates on the site.
const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// Transforms raw articles: filters incomplete records, parses dates,
/// preprocesses content and classifies sentiment.
///
/// Construction loads the model artifacts and ensures the linguistic
/// resources, both fatal on failure; per-record work never is.
pub struct NewsTransformer {
    preprocessor: Preprocessor,
    model: SentimentModel,
}

impl NewsTransformer {
    pub async fn new(settings: &Settings) -> Result<Self> {
        resources::ensure_resources(&settings.resource_dir).await?;
        let stop_words = resources::load_stop_words(&settings.resource_dir)?;
        let lemmas = resources::load_lemmas(&settings.resource_dir)?;
        let model = SentimentModel::load(&settings.model_path, &settings.vectorizer_path)?;

        Ok(Self {
            preprocessor: Preprocessor::new(stop_words, lemmas),
            model,
        })
    }

    pub fn from_parts(preprocessor: Preprocessor, model: SentimentModel) -> Self {
        Self {
            preprocessor,
            model,
        }
    }

    /// Preprocess and classify the fetched articles. Records without
    /// content are dropped; every other absent field normalizes to empty
    /// text.
    pub fn transform_news(&self, raw_data: Vec<RawArticle>) -> Result<Vec<TransformedArticle>> {
        let mut transformed = Vec::new();

        for article in raw_data {
            let Some(content) = article.content else {
                continue;
            };

            let date = parse_article_date(article.date.as_deref().unwrap_or(""))?;
            let preprocessed_content = self.preprocessor.preprocess(&content);
            let sentiment = self.model.classify(&preprocessed_content)?;

            transformed.push(TransformedArticle {
                title: article.title,
                link: article.link,
                content,
                preprocessed_content,
                date,
                sentiment,
            });
        }

        info!("data cleaned and classified, {} records", transformed.len());
        Ok(transformed)
    }

    pub fn labels(&self) -> &[String] {
        self.model.labels()
    }
}

/// Parse an article date in the site's fixed format. Empty input is an
/// absent timestamp, not an error; a malformed non-empty date is.
pub fn parse_article_date(date: &str) -> Result<Option<DateTime<Utc>>> {
    if date.is_empty() {
        return Ok(None);
    }

    NaiveDateTime::parse_from_str(date, DATE_FORMAT)
        .map(|naive| Some(naive.and_utc()))
        .map_err(|e| Error::Transform(format!("invalid article date {:?}: {}", date, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn transformer() -> NewsTransformer {
        let stop_words = ["a", "an", "the", "is", "of", "to", "and", "on"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let lemmas = [("reached", "reach")]
            .iter()
            .map(|(form, lemma)| (form.to_string(), lemma.to_string()))
            .collect();
        NewsTransformer::from_parts(
            Preprocessor::new(stop_words, lemmas),
            model::test_fixtures::model(),
        )
    }

    #[test]
    fn test_parse_article_date() {
        let parsed = parse_article_date("2024-12-15T10:00:00.000000Z").unwrap();
        assert_eq!(parsed, Some(Utc.with_ymd_and_hms(2024, 12, 15, 10, 0, 0).unwrap()));
    }

    #[test]
    fn test_parse_article_date_empty_is_absent() {
        assert_eq!(parse_article_date("").unwrap(), None);
    }

    #[test]
    fn test_parse_article_date_malformed_is_error() {
        assert!(parse_article_date("December 15, 2024").is_err());
    }

    #[test]
    fn test_transform_drops_records_without_content() {
        let t = transformer();
        let raw = vec![
            RawArticle::new("No Content", "https://finance.yahoo.com/news/no-content"),
            RawArticle {
                title: "Bitcoin Hits All-Time High".to_string(),
                link: "https://finance.yahoo.com/news/bitcoin-hits-high".to_string(),
                content: Some("Bitcoin reached a new all-time high...".to_string()),
                date: Some("2024-12-15T10:00:00.000000Z".to_string()),
            },
        ];

        let transformed = t.transform_news(raw).unwrap();
        assert_eq!(transformed.len(), 1);
        assert_eq!(transformed[0].title, "Bitcoin Hits All-Time High");
    }

    #[test]
    fn test_transform_end_to_end_record() {
        let t = transformer();
        let raw = vec![RawArticle {
            title: "Bitcoin Hits All-Time High".to_string(),
            link: "https://finance.yahoo.com/news/bitcoin-hits-high".to_string(),
            content: Some("Bitcoin reached a new all-time high...".to_string()),
            date: Some("2024-12-15T10:00:00.000000Z".to_string()),
        }];

        let transformed = t.transform_news(raw).unwrap();
        assert_eq!(transformed.len(), 1);
        let record = &transformed[0];
        assert!(!record.preprocessed_content.is_empty());
        assert!(t.labels().contains(&record.sentiment));
        assert_eq!(
            record.date,
            Some(Utc.with_ymd_and_hms(2024, 12, 15, 10, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_transform_absent_date_normalizes_to_none() {
        let t = transformer();
        let raw = vec![RawArticle {
            title: "Bitcoin Hits All-Time High".to_string(),
            link: "https://finance.yahoo.com/news/bitcoin-hits-high".to_string(),
            content: Some("Bitcoin reached a new all-time high...".to_string()),
            date: None,
        }];

        let transformed = t.transform_news(raw).unwrap();
        assert_eq!(transformed[0].date, None);
    }
}
