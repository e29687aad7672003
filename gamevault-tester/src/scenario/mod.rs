//! Scripted storefront scenarios.
//!
//! Each scenario gets a fresh session per iteration, seeded from the CLI
//! seed plus the iteration index, so any failure can be replayed exactly.
use anyhow::Result;
use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use gamevault_core::{Game, NoticeQueue, SessionStore, SteppingClock, StoreConfig, Storefront};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;

pub mod session;
pub mod timed;

/// Timed scenarios tick at most this often so a run stays fast.
pub const TIMED_TICK_CAP_MS: u32 = 2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExpectationError {
    #[error("{what}: expected {expected}, got {actual}")]
    Mismatch {
        what: &'static str,
        expected: String,
        actual: String,
    },
    #[error("{0}")]
    Violated(String),
}

/// Fail with a labelled mismatch unless `actual == expected`.
pub fn expect_eq<T: PartialEq + std::fmt::Debug>(
    what: &'static str,
    actual: T,
    expected: T,
) -> Result<(), ExpectationError> {
    if actual == expected {
        Ok(())
    } else {
        Err(ExpectationError::Mismatch {
            what,
            expected: format!("{expected:?}"),
            actual: format!("{actual:?}"),
        })
    }
}

/// Fail with `message` unless `cond` holds.
pub fn expect(cond: bool, message: impl Into<String>) -> Result<(), ExpectationError> {
    if cond {
        Ok(())
    } else {
        Err(ExpectationError::Violated(message.into()))
    }
}

#[derive(Debug, Clone)]
pub struct ScenarioCtx {
    pub seed: u64,
    pub catalog: Arc<Vec<Game>>,
    pub config: StoreConfig,
    pub verbose: bool,
}

impl ScenarioCtx {
    pub fn rng(&self) -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(self.seed)
    }

    /// Session with a deterministic clock that advances one second per read.
    pub fn session(&self) -> SessionStore {
        let start = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).single().unwrap_or_default();
        SessionStore::with_parts(
            self.config.clone(),
            Box::new(SteppingClock::new(start, ChronoDuration::seconds(1))),
            NoticeQueue::new(),
            self.seed,
        )
    }

    pub fn storefront(&self) -> Storefront {
        Storefront::from_parts(self.catalog.as_ref().clone(), self.session())
    }

    /// Released catalog games, storefront-priced.
    pub fn released(&self, front: &Storefront) -> Vec<Game> {
        self.catalog
            .iter()
            .filter(|g| gamevault_core::wishlist::is_released(&g.release_date, &self.config))
            .filter_map(|g| front.priced_game(g.id))
            .collect()
    }

    pub fn upcoming(&self) -> Vec<&Game> {
        self.catalog
            .iter()
            .filter(|g| !gamevault_core::wishlist::is_released(&g.release_date, &self.config))
            .collect()
    }
}

pub type ScenarioFuture = Pin<Box<dyn Future<Output = Result<()>>>>;

#[derive(Clone, Copy)]
pub enum Runner {
    /// Drives a storefront synchronously, ticking installs by hand.
    Session(fn(&ScenarioCtx, &mut Storefront) -> Result<()>),
    /// Needs the tokio install driver; runs inside a `LocalSet`.
    Timed(fn(ScenarioCtx) -> ScenarioFuture),
}

#[derive(Clone, Copy)]
pub struct Scenario {
    pub key: &'static str,
    pub description: &'static str,
    pub runner: Runner,
}

const SCENARIOS: &[Scenario] = &[
    Scenario {
        key: "smoke",
        description: "Sign in, buy one game, see it in the library",
        runner: Runner::Session(session::smoke),
    },
    Scenario {
        key: "cart-dedupe",
        description: "Every released game can be carted exactly once",
        runner: Runner::Session(session::cart_dedupe),
    },
    Scenario {
        key: "checkout",
        description: "Card validation, processing phase and purchase",
        runner: Runner::Session(session::checkout),
    },
    Scenario {
        key: "install",
        description: "Installs finish at 100 and never overshoot",
        runner: Runner::Session(session::install),
    },
    Scenario {
        key: "reinstall",
        description: "Restarting an install supersedes the old ticker",
        runner: Runner::Session(session::reinstall),
    },
    Scenario {
        key: "uninstall-race",
        description: "Uninstalling mid-install leaves the old ticker stale",
        runner: Runner::Session(session::uninstall_race),
    },
    Scenario {
        key: "auth-gate",
        description: "Signed-out mutations are rejected and prompt sign-in",
        runner: Runner::Session(session::auth_gate),
    },
    Scenario {
        key: "logout-reset",
        description: "Logout clears every collection",
        runner: Runner::Session(session::logout_reset),
    },
    Scenario {
        key: "wishlist-release",
        description: "Unreleased wishlist games cannot be carted",
        runner: Runner::Session(session::wishlist_release),
    },
    Scenario {
        key: "driven-install",
        description: "Tokio ticker drives an install to completion",
        runner: Runner::Timed(timed::driven_install),
    },
    Scenario {
        key: "driven-uninstall",
        description: "Uninstall stops a running tokio ticker",
        runner: Runner::Timed(timed::driven_uninstall),
    },
];

pub fn list_scenarios() -> impl Iterator<Item = (&'static str, &'static str)> {
    SCENARIOS.iter().map(|s| (s.key, s.description))
}

pub fn get_scenario(name: &str) -> Option<Scenario> {
    let name = name.to_lowercase();
    SCENARIOS.iter().copied().find(|s| s.key == name)
}

/// Expand `all` into every registered scenario key.
pub fn expand_scenarios(names: &[String]) -> Vec<String> {
    let mut out: Vec<String> = names.iter().filter(|n| *n != "all").cloned().collect();
    if names.iter().any(|n| n == "all") {
        for (key, _) in list_scenarios() {
            if !out.iter().any(|n| n == key) {
                out.push(key.to_string());
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_expands_without_duplicates() {
        let names = expand_scenarios(&["smoke".to_string(), "all".to_string()]);
        assert_eq!(names.len(), SCENARIOS.len());
        assert_eq!(names[0], "smoke");
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert!(get_scenario("Auth-Gate").is_some());
        assert!(get_scenario("nope").is_none());
    }

    #[test]
    fn expectation_errors_render() {
        let err = expect_eq("cart size", 2, 1).unwrap_err();
        assert_eq!(err.to_string(), "cart size: expected 1, got 2");
        assert!(expect(true, "fine").is_ok());
    }
}
