pub mod yahoo;

pub use yahoo::YahooNewsScraper;
