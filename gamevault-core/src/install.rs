//! Simulated download/install progress.
//!
//! Every started install receives an [`InstallTicket`]. The simulator only
//! advances the ticket whose generation is currently active for that game, so
//! a timer that outlives a restart, an uninstall, or a logout observes
//! [`TickOutcome::Stale`] and must stop without touching the library.
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::catalog::GameId;
use crate::config::StoreConfig;
use crate::numbers::round_percent;

pub const INSTALL_COMPLETE: u8 = 100;

/// Handle for one running install ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstallTicket {
    pub game_id: GameId,
    pub generation: u64,
}

/// Install lifecycle of a library entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstallState {
    NotInstalled,
    Installing(u8),
    Installed,
}

impl InstallState {
    #[must_use]
    pub const fn from_parts(is_installed: bool, progress: u8) -> Self {
        if is_installed {
            Self::Installed
        } else if progress > 0 && progress < INSTALL_COMPLETE {
            Self::Installing(progress)
        } else {
            Self::NotInstalled
        }
    }

    #[must_use]
    pub const fn progress(self) -> u8 {
        match self {
            Self::NotInstalled => 0,
            Self::Installing(p) => p,
            Self::Installed => INSTALL_COMPLETE,
        }
    }
}

/// Result of advancing a ticket by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still installing; carries the rounded progress (1..=99)
    Progress(u8),
    /// Reached 100; the ticket is retired
    Completed,
    /// Ticket was superseded or cancelled; nothing changed
    Stale,
}

impl TickOutcome {
    /// Whether the host timer should keep running.
    #[must_use]
    pub const fn keep_ticking(self) -> bool {
        matches!(self, Self::Progress(_))
    }
}

#[derive(Debug, Clone)]
struct ActiveInstall {
    generation: u64,
    progress: f64,
}

/// Per-game progress tickers with generation-guarded cancellation.
#[derive(Debug, Clone)]
pub struct InstallSimulator {
    rng: ChaCha20Rng,
    step_min: f64,
    step_max: f64,
    next_generation: u64,
    active: HashMap<GameId, ActiveInstall>,
}

impl InstallSimulator {
    #[must_use]
    pub fn new(seed: u64, cfg: &StoreConfig) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
            step_min: cfg.install_step_min,
            step_max: cfg.install_step_max,
            next_generation: 0,
            active: HashMap::new(),
        }
    }

    /// Start (or restart) the ticker for `game_id` from zero.
    /// Any previous ticket for the same game becomes stale.
    pub fn start(&mut self, game_id: GameId) -> InstallTicket {
        self.next_generation = self.next_generation.wrapping_add(1);
        let generation = self.next_generation;
        if self
            .active
            .insert(
                game_id,
                ActiveInstall {
                    generation,
                    progress: 0.0,
                },
            )
            .is_some()
        {
            log::debug!("install ticker for game {game_id} superseded");
        }
        InstallTicket {
            game_id,
            generation,
        }
    }

    /// Stop the ticker for `game_id`. Returns whether one was running.
    pub fn cancel(&mut self, game_id: GameId) -> bool {
        self.active.remove(&game_id).is_some()
    }

    pub fn cancel_all(&mut self) {
        self.active.clear();
    }

    #[must_use]
    pub fn is_current(&self, ticket: InstallTicket) -> bool {
        self.active
            .get(&ticket.game_id)
            .is_some_and(|run| run.generation == ticket.generation)
    }

    #[must_use]
    pub fn active_ticket(&self, game_id: GameId) -> Option<InstallTicket> {
        self.active.get(&game_id).map(|run| InstallTicket {
            game_id,
            generation: run.generation,
        })
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Advance `ticket` by one uniformly random step.
    pub fn tick(&mut self, ticket: InstallTicket) -> TickOutcome {
        let Some(run) = self.active.get_mut(&ticket.game_id) else {
            return TickOutcome::Stale;
        };
        if run.generation != ticket.generation {
            return TickOutcome::Stale;
        }
        run.progress += self.rng.gen_range(self.step_min..self.step_max);
        if run.progress >= f64::from(INSTALL_COMPLETE) {
            self.active.remove(&ticket.game_id);
            return TickOutcome::Completed;
        }
        TickOutcome::Progress(round_percent(run.progress).clamp(1, INSTALL_COMPLETE - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simulator() -> InstallSimulator {
        InstallSimulator::new(7, &StoreConfig::default())
    }

    #[test]
    fn ticks_until_complete_without_exceeding_bounds() {
        let mut sim = simulator();
        let ticket = sim.start(5);
        let mut last = 0;
        let mut ticks = 0;
        loop {
            ticks += 1;
            match sim.tick(ticket) {
                TickOutcome::Progress(p) => {
                    assert!(p >= last && p < INSTALL_COMPLETE);
                    last = p;
                }
                TickOutcome::Completed => break,
                TickOutcome::Stale => panic!("ticket went stale mid-install"),
            }
        }
        // 5..20 per tick needs between 5 and 20 ticks to reach 100
        assert!((5..=20).contains(&ticks));
        assert_eq!(sim.tick(ticket), TickOutcome::Stale);
        assert_eq!(sim.active_count(), 0);
    }

    #[test]
    fn restart_supersedes_previous_ticket() {
        let mut sim = simulator();
        let first = sim.start(3);
        assert!(sim.tick(first).keep_ticking());
        let second = sim.start(3);
        assert_ne!(first, second);
        assert_eq!(sim.tick(first), TickOutcome::Stale);
        assert!(sim.is_current(second));
        assert_eq!(sim.active_ticket(3), Some(second));
    }

    #[test]
    fn cancel_makes_ticket_stale() {
        let mut sim = simulator();
        let ticket = sim.start(9);
        assert!(sim.cancel(9));
        assert!(!sim.cancel(9));
        assert_eq!(sim.tick(ticket), TickOutcome::Stale);
    }

    #[test]
    fn same_seed_same_progress() {
        let mut a = simulator();
        let mut b = simulator();
        let ta = a.start(1);
        let tb = b.start(1);
        for _ in 0..3 {
            assert_eq!(a.tick(ta), b.tick(tb));
        }
    }

    #[test]
    fn state_from_parts() {
        assert_eq!(InstallState::from_parts(false, 0), InstallState::NotInstalled);
        assert_eq!(InstallState::from_parts(false, 40), InstallState::Installing(40));
        assert_eq!(InstallState::from_parts(true, 100), InstallState::Installed);
        assert_eq!(InstallState::Installing(12).progress(), 12);
    }
}
