use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Scraping error: {0}")]
    Scraping(String),

    #[error("Transform error: {0}")]
    Transform(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Resource error: {0}")]
    Resource(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
