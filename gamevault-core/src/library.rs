//! Owned games and the library listing.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::catalog::{Game, GameId};
use crate::install::InstallState;

/// A purchased game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryEntry {
    #[serde(flatten)]
    pub game: Game,
    pub purchased_at: DateTime<Utc>,
    pub is_installed: bool,
    /// 0-100
    pub install_progress: u8,
}

impl LibraryEntry {
    #[must_use]
    pub const fn purchased(game: Game, purchased_at: DateTime<Utc>) -> Self {
        Self {
            game,
            purchased_at,
            is_installed: false,
            install_progress: 0,
        }
    }

    #[must_use]
    pub const fn id(&self) -> GameId {
        self.game.id
    }

    #[must_use]
    pub const fn install_state(&self) -> InstallState {
        InstallState::from_parts(self.is_installed, self.install_progress)
    }

    #[must_use]
    pub const fn is_installing(&self) -> bool {
        matches!(self.install_state(), InstallState::Installing(_))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LibraryFilter {
    #[default]
    All,
    Installed,
    NotInstalled,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LibrarySort {
    /// Most recently purchased first
    #[default]
    Recent,
    Name,
    /// Highest user rating (catalog baseline when unrated) first
    Rating,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryQuery {
    pub search: String,
    pub filter: LibraryFilter,
    pub sort: LibrarySort,
}

impl LibraryQuery {
    #[must_use]
    pub fn apply<'a>(
        &self,
        library: &'a [LibraryEntry],
        ratings: &HashMap<GameId, u8>,
    ) -> Vec<&'a LibraryEntry> {
        let mut rows: Vec<&LibraryEntry> = library
            .iter()
            .filter(|entry| entry.game.matches_search(&self.search))
            .filter(|entry| match self.filter {
                LibraryFilter::All => true,
                LibraryFilter::Installed => entry.is_installed,
                LibraryFilter::NotInstalled => !entry.is_installed,
            })
            .collect();
        match self.sort {
            LibrarySort::Recent => rows.sort_by(|a, b| b.purchased_at.cmp(&a.purchased_at)),
            LibrarySort::Name => rows.sort_by(|a, b| a.game.title.cmp(&b.game.title)),
            LibrarySort::Rating => rows.sort_by(|a, b| {
                let score = |e: &LibraryEntry| {
                    ratings
                        .get(&e.id())
                        .map_or(e.game.rating, |vote| f64::from(*vote))
                };
                score(b).partial_cmp(&score(a)).unwrap_or(Ordering::Equal)
            }),
        }
        rows
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryStats {
    pub installed: usize,
    pub total: usize,
}

impl LibraryStats {
    #[must_use]
    pub fn of(library: &[LibraryEntry]) -> Self {
        Self {
            installed: library.iter().filter(|e| e.is_installed).count(),
            total: library.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::game;
    use chrono::{Duration, TimeZone};

    fn entry(id: GameId, title: &str, minutes: i64, installed: bool) -> LibraryEntry {
        let base = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        LibraryEntry {
            is_installed: installed,
            install_progress: if installed { 100 } else { 0 },
            ..LibraryEntry::purchased(game(id, title, 10.0), base + Duration::minutes(minutes))
        }
    }

    #[test]
    fn recent_sort_puts_newest_first() {
        let lib = vec![entry(1, "B", 0, false), entry(2, "A", 5, true)];
        let rows = LibraryQuery::default().apply(&lib, &HashMap::new());
        assert_eq!(rows[0].id(), 2);
    }

    #[test]
    fn filters_and_name_sort() {
        let lib = vec![
            entry(1, "Zeta", 0, true),
            entry(2, "Alpha", 1, false),
            entry(3, "Beta", 2, true),
        ];
        let query = LibraryQuery {
            filter: LibraryFilter::Installed,
            sort: LibrarySort::Name,
            ..LibraryQuery::default()
        };
        let titles: Vec<_> = query
            .apply(&lib, &HashMap::new())
            .iter()
            .map(|e| e.game.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Beta", "Zeta"]);

        let pending = LibraryQuery {
            filter: LibraryFilter::NotInstalled,
            search: "ALP".into(),
            ..LibraryQuery::default()
        };
        assert_eq!(pending.apply(&lib, &HashMap::new()).len(), 1);
        assert_eq!(LibraryStats::of(&lib), LibraryStats { installed: 2, total: 3 });
    }

    #[test]
    fn rating_sort_prefers_user_votes() {
        let lib = vec![entry(1, "A", 0, false), entry(2, "B", 0, false)];
        let ratings = HashMap::from([(1, 5_u8), (2, 1_u8)]);
        let query = LibraryQuery {
            sort: LibrarySort::Rating,
            ..LibraryQuery::default()
        };
        assert_eq!(query.apply(&lib, &ratings)[0].id(), 1);
        let flipped = HashMap::from([(1, 1_u8)]);
        assert_eq!(query.apply(&lib, &flipped)[0].id(), 2);
    }

    #[test]
    fn install_state_tracks_progress() {
        let mut e = entry(1, "A", 0, false);
        assert!(!e.is_installing());
        e.install_progress = 35;
        assert!(e.is_installing());
        assert_eq!(e.install_state(), InstallState::Installing(35));
    }
}
