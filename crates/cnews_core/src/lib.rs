pub mod config;
pub mod error;
pub mod storage;
pub mod types;

pub use config::Settings;
pub use error::Error;
pub use storage::{InsertOutcome, NewsStore};
pub use types::{RawArticle, TransformedArticle};

pub type Result<T> = std::result::Result<T, Error>;
