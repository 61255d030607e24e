use std::collections::{HashMap, HashSet};
use std::path::Path;

use cnews_core::{Error, Result};
use tracing::info;

pub const STOPWORDS_FILE: &str = "stopwords-en.txt";
pub const LEMMA_FILE: &str = "lemmatization-en.txt";

const STOPWORDS_URL: &str =
    "https://raw.githubusercontent.com/stopwords-iso/stopwords-en/master/stopwords-en.txt";
const LEMMA_URL: &str =
    "https://raw.githubusercontent.com/michmech/lemmatization-lists/master/lemmatization-en.txt";

/// Ensure the linguistic resources are present in the local cache
/// directory, downloading each one once if absent. A resource that can
/// neither be found nor fetched is a fatal startup error.
pub async fn ensure_resources(dir: &Path) -> Result<()> {
    tokio::fs::create_dir_all(dir).await?;

    for (file, url) in [(STOPWORDS_FILE, STOPWORDS_URL), (LEMMA_FILE, LEMMA_URL)] {
        let path = dir.join(file);
        if path.exists() {
            continue;
        }

        info!("downloading linguistic resource {} from {}", file, url);
        let response = reqwest::get(url)
            .await
            .map_err(|e| Error::Resource(format!("failed to download {}: {}", file, e)))?;
        if !response.status().is_success() {
            return Err(Error::Resource(format!(
                "failed to download {}: {}",
                file,
                response.status()
            )));
        }
        let body = response
            .text()
            .await
            .map_err(|e| Error::Resource(format!("failed to read {}: {}", file, e)))?;
        tokio::fs::write(&path, body).await?;
    }

    info!("linguistic resources present in {}", dir.display());
    Ok(())
}

/// Load the stop-word list: one word per line.
pub fn load_stop_words(dir: &Path) -> Result<HashSet<String>> {
    let path = dir.join(STOPWORDS_FILE);
    let text = std::fs::read_to_string(&path).map_err(|e| {
        Error::Resource(format!("failed to read {}: {}", path.display(), e))
    })?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Load the lemmatization dictionary: tab-separated `lemma<TAB>form` lines,
/// inverted here into a form-to-lemma lookup.
pub fn load_lemmas(dir: &Path) -> Result<HashMap<String, String>> {
    let path = dir.join(LEMMA_FILE);
    let text = std::fs::read_to_string(&path).map_err(|e| {
        Error::Resource(format!("failed to read {}: {}", path.display(), e))
    })?;

    let mut lemmas = HashMap::new();
    for line in text.lines() {
        if let Some((lemma, form)) = line.trim().split_once('\t') {
            lemmas.insert(form.to_string(), lemma.to_string());
        }
    }
    Ok(lemmas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_stop_words() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(STOPWORDS_FILE), "a\nthe\n\nis\n").unwrap();
        let words = load_stop_words(dir.path()).unwrap();
        assert_eq!(words.len(), 3);
        assert!(words.contains("the"));
    }

    #[test]
    fn test_load_lemmas() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(LEMMA_FILE),
            "reach\treached\nprice\tprices\n",
        )
        .unwrap();
        let lemmas = load_lemmas(dir.path()).unwrap();
        assert_eq!(lemmas.get("reached").map(String::as_str), Some("reach"));
        assert_eq!(lemmas.get("prices").map(String::as_str), Some("price"));
    }

    #[test]
    fn test_load_missing_resource_is_fatal() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            load_stop_words(dir.path()),
            Err(cnews_core::Error::Resource(_))
        ));
    }

    #[tokio::test]
    async fn test_ensure_resources_skips_cached_files() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(STOPWORDS_FILE), "a\n").unwrap();
        std::fs::write(dir.path().join(LEMMA_FILE), "reach\treached\n").unwrap();
        // Both files cached, so no network access happens.
        ensure_resources(dir.path()).await.unwrap();
        assert_eq!(
            std::fs::read_to_string(dir.path().join(STOPWORDS_FILE)).unwrap(),
            "a\n"
        );
    }
}
