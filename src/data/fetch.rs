use crate::data::document::MapDocument;
use std::future::Future;

/// Awaits a raw JSON document from any fetch collaborator, then normalizes
/// it into a [`MapDocument`].
///
/// This is the single suspension point of a map's startup: the caller
/// awaits it once and defers all layer construction until it resolves. On
/// failure the map container stays in its pre-render state; no retry is
/// performed here.
pub async fn load_document<F>(fetch: F, base: &str) -> crate::Result<MapDocument>
where
    F: Future<Output = crate::Result<serde_json::Value>>,
{
    let value = fetch.await?;
    MapDocument::from_value(value, base)
}

/// Fetches and normalizes a map data document over HTTP.
pub async fn fetch_document(url: &str, base: &str) -> crate::Result<MapDocument> {
    log::debug!("fetching map document from {url}");
    load_document(
        async {
            let value = reqwest::get(url).await?.error_for_status()?.json().await?;
            Ok(value)
        },
        base,
    )
    .await
}
