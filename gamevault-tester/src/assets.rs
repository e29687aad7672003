//! Catalog and store config the scenarios run against.
use anyhow::{Context, Result};
use gamevault_core::{CatalogSource, Game, StaticCatalog, StoreConfig};
use std::fs;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct TesterAssets {
    pub catalog: Arc<Vec<Game>>,
    pub config: StoreConfig,
}

impl TesterAssets {
    /// Bundled catalog and config unless overridden by file paths.
    pub fn load(catalog: Option<&Path>, config: Option<&Path>) -> Result<Self> {
        let source = match catalog {
            Some(path) => StaticCatalog::new(
                fs::read_to_string(path)
                    .with_context(|| format!("failed to read catalog {}", path.display()))?,
            ),
            None => StaticCatalog::bundled(),
        };
        let games = source.load_games().context("catalog did not parse")?;
        anyhow::ensure!(!games.is_empty(), "catalog has no games");

        let config = match config {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                StoreConfig::from_json(&raw)
                    .with_context(|| format!("invalid config {}", path.display()))?
            }
            None => StoreConfig::default_config(),
        };
        log::info!("loaded {} games", games.len());
        Ok(Self {
            catalog: Arc::new(games),
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_assets_load() {
        let assets = TesterAssets::load(None, None).unwrap();
        assert_eq!(assets.catalog.len(), 32);
        assert_eq!(assets.config.items_per_page, 8);
    }

    #[test]
    fn missing_catalog_file_is_reported() {
        let err = TesterAssets::load(Some(Path::new("/no/such/catalog.json")), None).unwrap_err();
        assert!(err.to_string().contains("failed to read catalog"));
    }
}
