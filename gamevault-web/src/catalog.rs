//! Web catalog source: fetches the game list from static assets.
//!
//! The bundled copy doubles as the first-paint catalog and as the fallback
//! when the network fetch fails.

use gamevault_core::catalog::parse_games;
use gamevault_core::{CatalogError, CatalogSource, Game, StoreConfig};

pub const CATALOG_URL: &str = "/static/data/games.json";

const BUNDLED_GAMES: &str = include_str!("../static/data/games.json");
const BUNDLED_CONFIG: &str = include_str!("../static/data/config.json");

#[derive(Debug, thiserror::Error)]
pub enum WebCatalogError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Unexpected HTTP status {0}")]
    Status(u16),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Catalog embedded in the wasm bundle.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebCatalog;

impl CatalogSource for WebCatalog {
    type Error = WebCatalogError;

    fn load_games(&self) -> Result<Vec<Game>, Self::Error> {
        Ok(parse_games(BUNDLED_GAMES)?)
    }
}

/// Store config bundled with the assets, defaults when it fails to parse.
#[must_use]
pub fn bundled_config() -> StoreConfig {
    StoreConfig::from_json(BUNDLED_CONFIG).unwrap_or_else(|err| {
        log::warn!("bundled config rejected: {err}");
        StoreConfig::default()
    })
}

/// Fetch the live catalog over HTTP.
///
/// # Errors
///
/// Returns an error when the request fails, the status is not 200, or the
/// body is not a valid catalog.
#[cfg(target_arch = "wasm32")]
#[allow(clippy::future_not_send)]
pub async fn fetch_catalog(url: &str) -> Result<Vec<Game>, WebCatalogError> {
    use crate::dom;
    let network = |err: wasm_bindgen::JsValue| WebCatalogError::Network(dom::js_error_message(&err));
    let resp = dom::fetch_response(url).await.map_err(network)?;
    if resp.status() != 200 {
        return Err(WebCatalogError::Status(resp.status()));
    }
    let body = dom::response_text(&resp).await.map_err(network)?;
    Ok(parse_games(&body)?)
}

/// Live catalog, or the bundled one when the fetch fails.
#[cfg(target_arch = "wasm32")]
#[allow(clippy::future_not_send)]
pub async fn load_catalog() -> Vec<Game> {
    match fetch_catalog(CATALOG_URL).await {
        Ok(games) => games,
        Err(err) => {
            crate::dom::console_error(&format!("catalog fetch failed, using bundled copy: {err}"));
            WebCatalog.load_games().unwrap_or_default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_and_config_load() {
        let games = WebCatalog.load_games().expect("bundled catalog");
        assert!(games.iter().any(|g| g.id == 28));
        assert_eq!(bundled_config().items_per_page, 8);
    }
}
