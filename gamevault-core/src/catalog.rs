//! Catalog records and storefront browsing queries.
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::config::StoreConfig;
use crate::numbers::dollars_to_cents;
use crate::pricing::is_discounted;

/// Catalog identity of a game.
pub type GameId = u32;

/// Category label that disables category filtering.
pub const ALL_CATEGORIES: &str = "All";

/// A single catalog entry. Immutable reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: GameId,
    pub title: String,
    pub category: String,
    /// Catalog baseline rating (0-5)
    pub rating: f64,
    pub cover_image: String,
    pub release_date: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_upcoming: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trailer_url: Option<String>,
}

impl Game {
    /// Current price in cents.
    #[must_use]
    pub fn price_cents(&self) -> i64 {
        dollars_to_cents(self.price)
    }

    /// Pre-discount price in cents, or the current price when not discounted.
    #[must_use]
    pub fn original_price_cents(&self) -> i64 {
        self.original_price.map_or_else(|| self.price_cents(), dollars_to_cents)
    }

    #[must_use]
    pub fn matches_search(&self, needle: &str) -> bool {
        needle.is_empty() || self.title.to_lowercase().contains(&needle.to_lowercase())
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Duplicate game id {0} in catalog")]
    DuplicateId(GameId),
}

/// Read-only source of catalog records.
pub trait CatalogSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the full catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be read or decoded.
    fn load_games(&self) -> Result<Vec<Game>, Self::Error>;
}

/// Catalog backed by an in-memory JSON document.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    json: String,
}

impl StaticCatalog {
    pub fn new(json: impl Into<String>) -> Self {
        Self { json: json.into() }
    }

    /// Catalog shipped with the web assets.
    #[must_use]
    pub fn bundled() -> Self {
        Self::new(include_str!("../../gamevault-web/static/data/games.json"))
    }
}

impl CatalogSource for StaticCatalog {
    type Error = CatalogError;

    fn load_games(&self) -> Result<Vec<Game>, Self::Error> {
        parse_games(&self.json)
    }
}

/// Decode a catalog document, rejecting duplicate ids.
///
/// # Errors
///
/// Returns an error on malformed JSON or when two records share an id.
pub fn parse_games(json: &str) -> Result<Vec<Game>, CatalogError> {
    let games: Vec<Game> = serde_json::from_str(json)?;
    let mut seen = HashSet::with_capacity(games.len());
    for game in &games {
        if !seen.insert(game.id) {
            return Err(CatalogError::DuplicateId(game.id));
        }
    }
    Ok(games)
}

/// Distinct categories in first-seen order.
#[must_use]
pub fn categories(games: &[Game]) -> Vec<String> {
    let mut seen = HashSet::new();
    games
        .iter()
        .filter(|g| seen.insert(g.category.as_str()))
        .map(|g| g.category.clone())
        .collect()
}

#[must_use]
pub fn find_game(games: &[Game], id: GameId) -> Option<&Game> {
    games.iter().find(|g| g.id == id)
}

/// Storefront listing the grid is currently showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrowseView {
    #[default]
    Home,
    Favorites,
    OnSale,
    NewReleases,
}

/// Filters applied to the catalog grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    pub view: BrowseView,
    pub category: String,
    pub search: String,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            view: BrowseView::Home,
            category: ALL_CATEGORIES.to_string(),
            search: String::new(),
        }
    }
}

impl CatalogQuery {
    #[must_use]
    pub fn matches(&self, game: &Game, favorites: &[GameId], cfg: &StoreConfig) -> bool {
        let category_ok = self.category == ALL_CATEGORIES || game.category == self.category;
        if !category_ok || !game.matches_search(&self.search) {
            return false;
        }
        match self.view {
            BrowseView::Home => true,
            BrowseView::Favorites => favorites.contains(&game.id),
            BrowseView::OnSale => is_discounted(game.id, cfg),
            BrowseView::NewReleases => is_new_release(&game.release_date, cfg),
        }
    }

    /// Games passing the query, catalog order preserved.
    #[must_use]
    pub fn apply<'a>(
        &self,
        games: &'a [Game],
        favorites: &[GameId],
        cfg: &StoreConfig,
    ) -> Vec<&'a Game> {
        games
            .iter()
            .filter(|g| self.matches(g, favorites, cfg))
            .collect()
    }
}

#[must_use]
pub fn is_new_release(release_date: &str, cfg: &StoreConfig) -> bool {
    cfg.new_release_years
        .iter()
        .any(|year| release_date.contains(year.as_str()))
}

/// One page of a filtered listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    pub items: Vec<&'a Game>,
    /// 1-based, clamped into `1..=total_pages`
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl Page<'_> {
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.number > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.number < self.total_pages
    }
}

/// Slice `items` into the requested 1-based page.
#[must_use]
pub fn paginate<'a>(items: &[&'a Game], page: usize, per_page: usize) -> Page<'a> {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);
    let number = page.clamp(1, total_pages.max(1));
    let start = (number - 1) * per_page;
    let end = (start + per_page).min(total_items);
    Page {
        items: items.get(start..end).map(<[_]>::to_vec).unwrap_or_default(),
        number,
        total_pages,
        total_items,
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::Game;

    pub fn game(id: u32, title: &str, price: f64) -> Game {
        Game {
            id,
            title: title.to_string(),
            category: "Action".to_string(),
            rating: 4.0,
            cover_image: format!("https://img.example/{id}.jpg"),
            release_date: "2024-05-01".to_string(),
            price,
            original_price: None,
            is_upcoming: None,
            trailer_url: None,
        }
    }

    pub fn game_released(id: u32, release_date: &str) -> Game {
        Game {
            release_date: release_date.to_string(),
            ..game(id, &format!("Game {id}"), 20.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::game;
    use super::*;

    #[test]
    fn bundled_catalog_decodes_with_camel_case_fields() {
        let games = StaticCatalog::bundled().load_games().unwrap();
        assert!(games.len() >= 30);
        let free = find_game(&games, 28).expect("free game present");
        assert!(!free.cover_image.is_empty());
        assert!(games.iter().any(|g| g.is_upcoming == Some(true)));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let json = r#"[
            {"id":1,"title":"A","category":"RPG","rating":4,"coverImage":"","releaseDate":"2020","price":1},
            {"id":1,"title":"B","category":"RPG","rating":4,"coverImage":"","releaseDate":"2020","price":1}
        ]"#;
        assert!(matches!(parse_games(json), Err(CatalogError::DuplicateId(1))));
    }

    #[test]
    fn categories_keep_first_seen_order() {
        let mut a = game(1, "A", 1.0);
        a.category = "RPG".into();
        let b = game(2, "B", 1.0);
        let mut c = game(3, "C", 1.0);
        c.category = "RPG".into();
        assert_eq!(categories(&[a, b, c]), vec!["RPG", "Action"]);
    }

    #[test]
    fn query_filters_by_view_category_and_search() {
        let cfg = StoreConfig::default();
        let mut old = game(3, "Old Sale", 10.0);
        old.release_date = "2019-01-01".into();
        let games = vec![game(1, "Alpha Strike", 10.0), game(2, "Beta", 10.0), old];

        let search = CatalogQuery {
            search: "alpha".into(),
            ..CatalogQuery::default()
        };
        assert_eq!(search.apply(&games, &[], &cfg).len(), 1);

        let sale = CatalogQuery {
            view: BrowseView::OnSale,
            ..CatalogQuery::default()
        };
        let ids: Vec<_> = sale.apply(&games, &[], &cfg).iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![3]);

        let fresh = CatalogQuery {
            view: BrowseView::NewReleases,
            ..CatalogQuery::default()
        };
        assert_eq!(fresh.apply(&games, &[], &cfg).len(), 2);

        let favs = CatalogQuery {
            view: BrowseView::Favorites,
            category: "Action".into(),
            ..CatalogQuery::default()
        };
        assert_eq!(favs.apply(&games, &[2], &cfg)[0].id, 2);

        let other = CatalogQuery {
            category: "Puzzle".into(),
            ..CatalogQuery::default()
        };
        assert!(other.apply(&games, &[], &cfg).is_empty());
    }

    #[test]
    fn pagination_clamps_page_numbers() {
        let games: Vec<Game> = (1..=19).map(|id| game(id, "G", 1.0)).collect();
        let refs: Vec<&Game> = games.iter().collect();

        let first = paginate(&refs, 0, 8);
        assert_eq!(first.number, 1);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.items.len(), 8);
        assert!(!first.has_prev());

        let last = paginate(&refs, 99, 8);
        assert_eq!(last.number, 3);
        assert_eq!(last.items.len(), 3);
        assert_eq!(last.items[0].id, 17);
        assert!(!last.has_next());

        let empty = paginate(&[], 2, 8);
        assert_eq!(empty.total_pages, 0);
        assert_eq!(empty.number, 1);
        assert!(empty.items.is_empty());
    }
}
