use cnews_core::{RawArticle, Result, Settings};
use scraper::{Html, Selector};
use tracing::{error, info, warn};

/// Scrapes cryptocurrency news articles from the Yahoo Finance crypto
/// topic page.
pub struct YahooNewsScraper {
    client: reqwest::Client,
    settings: Settings,
}

impl YahooNewsScraper {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .build()?;
        Ok(Self {
            client,
            settings: settings.clone(),
        })
    }

    /// Fetches the article listing, then the content and publication date of
    /// each article, pacing requests with a fixed delay between articles.
    ///
    /// Listing entries whose per-article fetches fail keep `None` in the
    /// corresponding field; the run never aborts on a single article.
    pub async fn fetch_news(&self) -> Result<Vec<RawArticle>> {
        let mut articles = self.fetch_listing().await;
        let total = articles.len();

        for (i, article) in articles.iter_mut().enumerate() {
            info!("fetching article {}/{}: {}", i + 1, total, article.title);
            article.content = self
                .fetch_article_content(&article.link, &article.title)
                .await;
            article.date = self.fetch_article_date(&article.link).await;
            tokio::time::sleep(self.settings.article_delay).await;
        }

        info!("crypto news fetched and processed successfully");
        Ok(articles)
    }

    /// Fetch titles and links from the listing page. A transport error or
    /// non-success status yields an empty list, logged, never raised.
    async fn fetch_listing(&self) -> Vec<RawArticle> {
        let response = match self.client.get(&self.settings.site_url).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("an error occurred while fetching {}: {}", self.settings.site_url, e);
                return Vec::new();
            }
        };

        if !response.status().is_success() {
            error!("failed to fetch listing page: {}", response.status());
            return Vec::new();
        }

        match response.text().await {
            Ok(html) => parse_listing(&html, &self.settings.origin),
            Err(e) => {
                error!("failed to read listing page body: {}", e);
                Vec::new()
            }
        }
    }

    async fn fetch_article_content(&self, url: &str, title: &str) -> Option<String> {
        let html = self.fetch_page(url).await?;
        extract_content(&html, title, &self.settings)
    }

    async fn fetch_article_date(&self, url: &str) -> Option<String> {
        let html = self.fetch_page(url).await?;
        let date = extract_date(&html);
        if date.is_none() {
            warn!("no usable <time> tag found for article at {}", url);
        }
        date
    }

    async fn fetch_page(&self, url: &str) -> Option<String> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("failed to fetch page at {}: {}", url, e);
                return None;
            }
        };

        if !response.status().is_success() {
            error!("failed to fetch page at {}: {}", url, response.status());
            return None;
        }

        match response.text().await {
            Ok(html) => Some(html),
            Err(e) => {
                error!("failed to read page body at {}: {}", url, e);
                None
            }
        }
    }
}

/// Extract (title, link) pairs from the listing HTML. Containers missing a
/// link or title are skipped; relative links are rewritten against the
/// site origin. Zero containers is an empty list, not an error.
fn parse_listing(html: &str, origin: &str) -> Vec<RawArticle> {
    let document = Html::parse_document(html);
    let section_selector = Selector::parse(r#"section[role="article"]"#).unwrap();
    let link_selector = Selector::parse("a[aria-label][href]").unwrap();
    let title_selector = Selector::parse("h3").unwrap();

    let mut articles = Vec::new();
    for section in document.select(&section_selector) {
        let link = section
            .select(&link_selector)
            .next()
            .and_then(|el| el.value().attr("href"));
        let title = section
            .select(&title_selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string());

        if let (Some(link), Some(title)) = (link, title) {
            let link = if link.starts_with("http") {
                link.to_string()
            } else {
                format!("{}{}", origin, link)
            };
            articles.push(RawArticle::new(title, link));
        }
    }

    articles
}

/// Extract and clean the main content of an article page: the trimmed text
/// of heading and paragraph elements, with configured boilerplate markers
/// stripped and the title line dropped when it leads the content.
fn extract_content(html: &str, title: &str, settings: &Settings) -> Option<String> {
    let document = Html::parse_document(html);
    let content_selector = Selector::parse("p, h1, h2, h3, h4, h5, h6").unwrap();

    let mut content = document
        .select(&content_selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    // Boilerplate before the article body.
    for unwanted in &settings.unwanted_start {
        if let Some(rest) = content.strip_prefix(unwanted.as_str()) {
            content = rest.trim().to_string();
        }
    }

    // Boilerplate after the article body: drop the marker and everything
    // following it.
    for unwanted in &settings.unwanted_end {
        if let Some(idx) = content.find(unwanted.as_str()) {
            content.truncate(idx);
            content = content.trim().to_string();
        }
    }

    // The first line repeats the title on most article pages.
    if content.lines().next() == Some(title) {
        content = content
            .lines()
            .skip(1)
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string();
    }

    if content.is_empty() {
        None
    } else {
        Some(content)
    }
}

/// Extract the publication date from an article page: the first `time`
/// element, preferring its machine-readable `datetime` attribute over its
/// visible text.
fn extract_date(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let time_selector = Selector::parse("time").unwrap();

    let time = document.select(&time_selector).next()?;
    if let Some(datetime) = time.value().attr("datetime") {
        return Some(datetime.to_string());
    }

    let text = time.text().collect::<String>().trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
