use async_trait::async_trait;
use cnews_core::{Error, InsertOutcome, NewsStore, Result, TransformedArticle};
use sqlx::postgres::PgPool;

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS yahoo_news (
        date TIMESTAMPTZ NOT NULL,
        title TEXT NOT NULL,
        link TEXT,
        content TEXT,
        preprocessed_content TEXT,
        sentiment TEXT,
        PRIMARY KEY (date, title)
    )
"#;

/// Postgres-backed store. Connection parameters come from the `DB_SERVER`,
/// `DB_NAME`, `DB_USER` and `DB_PASSWORD` environment variables.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub async fn from_env() -> Result<Self> {
        let server = env_var("DB_SERVER")?;
        let database = env_var("DB_NAME")?;
        let user = env_var("DB_USER")?;
        let password = env_var("DB_PASSWORD")?;

        let url = format!("postgres://{}:{}@{}/{}", user, password, server, database);
        Self::new_with_url(&url).await
    }

    pub async fn new_with_url(url: &str) -> Result<Self> {
        let pool = PgPool::connect(url)
            .await
            .map_err(|e| Error::Database(format!("failed to connect to database: {}", e)))?;

        sqlx::query(SCHEMA)
            .execute(&pool)
            .await
            .map_err(|e| Error::Database(format!("failed to create table: {}", e)))?;

        Ok(Self { pool })
    }
}

fn env_var(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| Error::Database(format!("{} is not set", name)))
}

#[async_trait]
impl NewsStore for PostgresStore {
    async fn insert_article(&self, article: &TransformedArticle) -> Result<InsertOutcome> {
        let result = sqlx::query(
            r#"
            INSERT INTO yahoo_news
            (date, title, link, content, preprocessed_content, sentiment)
            VALUES ($1, $2, $3, $4, $5, $6)
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
