use async_trait::async_trait;
use cnews_core::{Error, InsertOutcome, NewsStore, Result, TransformedArticle};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use std::path::Path;

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS yahoo_news (
        date TIMESTAMP NOT NULL,
        title TEXT NOT NULL,
        link TEXT,
        content TEXT,
        preprocessed_content TEXT,
        sentiment TEXT,
        PRIMARY KEY (date, title)
    )
"#;

/// SQLite-backed store for local runs and tests. Same schema and insert
/// semantics as the Postgres backend.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn new_with_path(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(|e| Error::Database(format!("failed to connect to database: {}", e)))?;

        sqlx::query(SCHEMA)
            .execute(&pool)
            .await
            .map_err(|e| Error::Database(format!("failed to create table: {}", e)))?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl NewsStore for SqliteStore {
    async fn insert_article(&self, article: &TransformedArticle) -> Result<InsertOutcome> {
        let result = sqlx::query(
            r#"
            INSERT INTO yahoo_news
            (date, title, link, content, preprocessed_content, sentiment)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(article.date)
        .bind(&article.title)
        .bind(&article.link)
        .bind(&article.content)
        .bind(&article.preprocessed_content)
        .bind(&article.sentiment)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(InsertOutcome::Inserted),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Ok(InsertOutcome::Duplicate)
            }
            Err(e) => Err(Error::Database(format!("failed to insert article: {}", e))),
        }
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
