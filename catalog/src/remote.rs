use anyhow::Error;
use reqwest::Client;

use crate::CatalogItem;

/// Fetches a fresh catalog snapshot. No caching: every call observes the
/// currently published document.
pub async fn fetch_catalog(client: &Client, url: &str) -> Result<Vec<CatalogItem>, Error> {
    let response = client.get(url).send().await?;
    let bytes = response.bytes().await?;

    let items = serde_json::from_slice(&bytes)?;

    Ok(items)
}
