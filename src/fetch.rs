use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use tracing::info;

use crate::page::Page;
use crate::settings::Settings;

pub fn http_client(settings: &Settings) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_str(&settings.accept_language).context("Invalid accept_language")?,
    );
    reqwest::Client::builder()
        .user_agent(settings.user_agent.as_str())
        .default_headers(headers)
        .timeout(Duration::from_secs(settings.timeout_secs))
        .build()
        .context("Failed to build HTTP client")
}

/// Load a page from an `http(s)://` URL or from a saved file plus its URL path.
pub async fn load_page(client: &reqwest::Client, source: &str, path: Option<&str>) -> Result<Page> {
    if source.starts_with("http://") || source.starts_with("https://") {
        return fetch_page(client, source).await;
    }
    let Some(path) = path else {
        bail!("--path is required when reading {} from disk", source);
    };
    read_page(Path::new(source), path)
}

pub async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<Page> {
    let start = Instant::now();
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to fetch {}", url))?
        .error_for_status()
        .with_context(|| format!("Bad response from {}", url))?;
    let final_url = response.url().to_string();
    let markup = response.text().await.context("Failed to read page body")?;
    info!(
        url,
        bytes = markup.len(),
        latency_ms = start.elapsed().as_millis() as u64,
        "fetched page"
    );
    Page::from_url(&final_url, &markup)
}

pub fn read_page(file: &Path, path: &str) -> Result<Page> {
    let markup = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    Ok(Page::parse(path, &markup))
}
