//! Wishlist entries and the wishlist listing.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::catalog::{Game, GameId};
use crate::config::StoreConfig;

/// A game the user is tracking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistEntry {
    #[serde(flatten)]
    pub game: Game,
    pub added_at: DateTime<Utc>,
    pub is_released: bool,
    /// Release alert subscription
    #[serde(default)]
    pub notify_on_release: bool,
}

impl WishlistEntry {
    #[must_use]
    pub fn new(game: Game, added_at: DateTime<Utc>, cfg: &StoreConfig) -> Self {
        let is_released = is_released(&game.release_date, cfg);
        Self {
            game,
            added_at,
            is_released,
            notify_on_release: false,
        }
    }

    #[must_use]
    pub const fn id(&self) -> GameId {
        self.game.id
    }
}

/// A game counts as released unless its date mentions an unreleased year.
#[must_use]
pub fn is_released(release_date: &str, cfg: &StoreConfig) -> bool {
    !cfg.unreleased_years
        .iter()
        .any(|year| release_date.contains(year.as_str()))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WishlistFilter {
    #[default]
    All,
    Released,
    Upcoming,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WishlistSort {
    #[default]
    Recent,
    Name,
    /// Cheapest first
    Price,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WishlistQuery {
    pub search: String,
    pub filter: WishlistFilter,
    pub sort: WishlistSort,
}

impl WishlistQuery {
    #[must_use]
    pub fn apply<'a>(&self, wishlist: &'a [WishlistEntry]) -> Vec<&'a WishlistEntry> {
        let mut rows: Vec<&WishlistEntry> = wishlist
            .iter()
            .filter(|entry| entry.game.matches_search(&self.search))
            .filter(|entry| match self.filter {
                WishlistFilter::All => true,
                WishlistFilter::Released => entry.is_released,
                WishlistFilter::Upcoming => !entry.is_released,
            })
            .collect();
        match self.sort {
            WishlistSort::Recent => rows.sort_by(|a, b| b.added_at.cmp(&a.added_at)),
            WishlistSort::Name => rows.sort_by(|a, b| a.game.title.cmp(&b.game.title)),
            WishlistSort::Price => rows.sort_by(|a, b| {
                a.game
                    .price
                    .partial_cmp(&b.game.price)
                    .unwrap_or(Ordering::Equal)
            }),
        }
        rows
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistStats {
    pub released: usize,
    pub upcoming: usize,
}

impl WishlistStats {
    #[must_use]
    pub fn of(wishlist: &[WishlistEntry]) -> Self {
        let released = wishlist.iter().filter(|e| e.is_released).count();
        Self {
            released,
            upcoming: wishlist.len() - released,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::{game, game_released};
    use chrono::{Duration, TimeZone};

    fn at(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap() + Duration::minutes(minutes)
    }

    #[test]
    fn release_year_decides_released_flag() {
        let cfg = StoreConfig::default();
        assert!(!is_released("2027-01-01", &cfg));
        assert!(!is_released("Q3 2026", &cfg));
        assert!(is_released("2024-05-01", &cfg));
        assert!(!WishlistEntry::new(game_released(7, "2027-01-01"), at(0), &cfg).is_released);
        assert!(WishlistEntry::new(game_released(7, "2024-05-01"), at(0), &cfg).is_released);
    }

    #[test]
    fn filter_sort_and_stats() {
        let cfg = StoreConfig::default();
        let list = vec![
            WishlistEntry::new(game(1, "Cheap", 5.0), at(0), &cfg),
            WishlistEntry::new(game_released(2, "2026-11-19"), at(3), &cfg),
            WishlistEntry::new(game(3, "Pricey", 70.0), at(1), &cfg),
        ];
        let recent = WishlistQuery::default().apply(&list);
        assert_eq!(recent[0].id(), 2);

        let by_price = WishlistQuery {
            filter: WishlistFilter::Released,
            sort: WishlistSort::Price,
            ..WishlistQuery::default()
        };
        let ids: Vec<_> = by_price.apply(&list).iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec![1, 3]);

        let upcoming = WishlistQuery {
            filter: WishlistFilter::Upcoming,
            ..WishlistQuery::default()
        };
        assert_eq!(upcoming.apply(&list).len(), 1);
        assert_eq!(
            WishlistStats::of(&list),
            WishlistStats {
                released: 2,
                upcoming: 1
            }
        );
    }
}
