use clap::Parser;
use cnews_core::{NewsStore, Result, Settings};
use cnews_scraper::YahooNewsScraper;
use cnews_storage::{load_data_to_db, PostgresStore, SqliteStore};
use cnews_transform::NewsTransformer;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "cnews", about = "Scrape, classify and store crypto news", long_about = None)]
struct Cli {
    /// Storage backend: postgres (connection from DB_* environment
    /// variables) or sqlite.
    #[arg(long, default_value = "postgres")]
    storage: String,
    /// Database file used by the sqlite backend.
    #[arg(long, default_value = "cnews.db")]
    database: PathBuf,
}

async fn create_store(cli: &Cli) -> Result<Box<dyn NewsStore>> {
    match cli.storage.as_str() {
        "postgres" => Ok(Box::new(PostgresStore::from_env().await?)),
        "sqlite" => Ok(Box::new(SqliteStore::new_with_path(&cli.database).await?)),
        other => Err(cnews_core::Error::Database(format!(
            "unknown storage backend: {}",
            other
        ))),
    }
}

async fn run(cli: Cli, settings: Settings) -> Result<()> {
    // Model artifacts and linguistic resources load before any fetch;
    // their absence is fatal for the whole run.
    let transformer = NewsTransformer::new(&settings).await?;

    let scraper = YahooNewsScraper::new(&settings)?;
    let raw_data = match scraper.fetch_news().await {
        Ok(raw_data) => raw_data,
        Err(e) => {
            error!("error fetching news: {}", e);
            return Ok(());
        }
    };

    let transformed = match transformer.transform_news(raw_data) {
        Ok(transformed) => transformed,
        Err(e) => {
            error!("error transforming news: {}", e);
            return Ok(());
        }
    };

    let store = match create_store(&cli).await {
        Ok(store) => store,
        Err(e) => {
            error!("error connecting to database: {}", e);
            return Ok(());
        }
    };

    match load_data_to_db(store.as_ref(), &transformed).await {
        Ok(report) => info!(
            "data loaded successfully into the database ({} inserted, {} skipped)",
            report.inserted, report.skipped
        ),
        Err(e) => error!("error loading data: {}", e),
    }
    store.close().await;

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let settings = Settings::default();

    if let Err(e) = run(cli, settings).await {
        error!("run aborted: {}", e);
        std::process::exit(1);
    }
}
