//! Scenarios that hand installs to the tokio driver instead of ticking by hand.
use anyhow::{Context, Result};
use gamevault_core::driver::drive_install;
use gamevault_core::install::INSTALL_COMPLETE;
use gamevault_core::{Game, InstallTicket, SessionStore, TickOutcome};
use rand::seq::SliceRandom;
use std::cell::RefCell;
use std::rc::Rc;

use super::{ScenarioCtx, ScenarioFuture, TIMED_TICK_CAP_MS, expect, expect_eq};

type SharedStore = Rc<RefCell<SessionStore>>;

/// Owned game with an install already started, on a fast tick interval.
fn started_install(ctx: &ScenarioCtx) -> Result<(SharedStore, InstallTicket, Game)> {
    let mut ctx = ctx.clone();
    ctx.config.install_tick_ms = ctx.config.install_tick_ms.clamp(1, TIMED_TICK_CAP_MS);
    let front = ctx.storefront();
    let game = ctx
        .released(&front)
        .choose(&mut ctx.rng())
        .cloned()
        .context("catalog has no released games")?;

    let mut store = ctx.session();
    store.login("Ada", "ada@x.com")?;
    store.add_to_cart(game.clone())?;
    store.purchase_games();
    let ticket = store.install_game(game.id)?;
    Ok((Rc::new(RefCell::new(store)), ticket, game))
}

pub fn driven_install(ctx: ScenarioCtx) -> ScenarioFuture {
    Box::pin(async move {
        let (store, ticket, game) = started_install(&ctx)?;
        let outcome = drive_install(store.clone(), ticket).await;
        expect_eq("outcome", outcome, TickOutcome::Completed)?;

        let store = store.borrow();
        let entry = store.library_entry(game.id).context("library entry vanished")?;
        expect(entry.is_installed, "driver finished but game not installed")?;
        expect_eq("progress", entry.install_progress, INSTALL_COMPLETE)?;
        expect(store.active_install(game.id).is_none(), "ticker still registered")?;
        Ok(())
    })
}

pub fn driven_uninstall(ctx: ScenarioCtx) -> ScenarioFuture {
    Box::pin(async move {
        let (store, ticket, game) = started_install(&ctx)?;
        let handle = tokio::task::spawn_local(drive_install(store.clone(), ticket));
        // let the driver start and park on its first interval tick
        tokio::task::yield_now().await;
        store.borrow_mut().uninstall_game(game.id)?;
        let outcome = handle.await.context("install driver panicked")?;
        expect_eq("outcome", outcome, TickOutcome::Stale)?;

        let store = store.borrow();
        let entry = store.library_entry(game.id).context("library entry vanished")?;
        expect(!entry.is_installed, "uninstalled game reported installed")?;
        expect_eq("progress", entry.install_progress, 0)?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::TesterAssets;

    fn ctx(seed: u64) -> ScenarioCtx {
        let assets = TesterAssets::load(None, None).unwrap();
        ScenarioCtx {
            seed,
            catalog: assets.catalog,
            config: assets.config,
            verbose: false,
        }
    }

    #[tokio::test(flavor = "current_thread")]
    async fn timed_scenarios_pass_inside_local_set() {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                driven_install(ctx(3)).await.unwrap();
                driven_uninstall(ctx(3)).await.unwrap();
            })
            .await;
    }
}
