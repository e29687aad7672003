//! Scenarios that drive the store directly, ticking installs by hand.
use anyhow::{Context, Result};
use gamevault_core::{
    CheckoutError, CheckoutPhase, Game, InstallTicket, PaymentForm, Severity, StoreError,
    Storefront, TickOutcome, install::INSTALL_COMPLETE,
};
use rand::Rng;
use rand::seq::SliceRandom;

use super::{ScenarioCtx, expect, expect_eq};

/// Upper bound on ticks before an install counts as stuck.
const MAX_TICKS: usize = 200;

fn sign_in(front: &mut Storefront) -> Result<()> {
    front.session_mut().login("Ada", "ada@x.com")?;
    Ok(())
}

fn pick_released(ctx: &ScenarioCtx, front: &Storefront) -> Result<Game> {
    let mut rng = ctx.rng();
    ctx.released(front)
        .choose(&mut rng)
        .cloned()
        .context("catalog has no released games")
}

fn buy(front: &mut Storefront, id: u32) -> Result<()> {
    front.add_to_cart(id)?;
    front.session_mut().purchase_games();
    Ok(())
}

fn valid_form() -> PaymentForm {
    let mut form = PaymentForm::default();
    form.set_card_name("Ada Lovelace");
    form.set_card_number("4242 4242 4242 4242");
    form.set_expiry("12/29");
    form.set_cvv("123");
    form
}

/// Tick until the ticker stops, checking progress never moves backwards
/// or past completion. Returns the final outcome and tick count.
fn run_ticker(front: &mut Storefront, ticket: InstallTicket) -> Result<(TickOutcome, usize)> {
    let mut last = 0;
    for ticks in 1..=MAX_TICKS {
        let outcome = front.session_mut().tick_install(ticket);
        let progress = front
            .session()
            .library_entry(ticket.game_id)
            .map_or(0, |e| e.install_progress);
        expect(progress <= INSTALL_COMPLETE, format!("progress overshot to {progress}"))?;
        expect(
            progress >= last || outcome == TickOutcome::Stale,
            format!("progress went backwards {last} -> {progress}"),
        )?;
        last = progress;
        if !outcome.keep_ticking() {
            return Ok((outcome, ticks));
        }
    }
    anyhow::bail!("install of {} still running after {MAX_TICKS} ticks", ticket.game_id)
}

pub fn smoke(ctx: &ScenarioCtx, front: &mut Storefront) -> Result<()> {
    let game = pick_released(ctx, front)?;
    sign_in(front)?;
    front.add_to_cart(game.id)?;
    expect_eq("purchased", front.session_mut().purchase_games(), 1)?;

    let session = front.session();
    expect_eq("library size", session.library().len(), 1)?;
    let entry = &session.library()[0];
    expect_eq("library id", entry.id(), game.id)?;
    expect(!entry.is_installed, "fresh purchase is installed")?;
    expect(session.cart().is_empty(), "cart not empty after purchase")?;
    Ok(())
}

pub fn cart_dedupe(ctx: &ScenarioCtx, front: &mut Storefront) -> Result<()> {
    let mut games = ctx.released(front);
    games.shuffle(&mut ctx.rng());
    sign_in(front)?;
    for game in &games {
        front.add_to_cart(game.id)?;
        expect_eq(
            "second add",
            front.add_to_cart(game.id),
            Err(StoreError::AlreadyInCart(game.id)),
        )?;
    }
    expect_eq("cart size", front.session().cart().len(), games.len())?;
    let totals = front.session().cart_totals();
    expect(
        totals.total_cents <= totals.original_total_cents,
        "cart total exceeds original total",
    )?;
    Ok(())
}

pub fn checkout(ctx: &ScenarioCtx, front: &mut Storefront) -> Result<()> {
    let mut rng = ctx.rng();
    let released = ctx.released(front);
    let count = rng.gen_range(1..=released.len().min(4));
    let picks: Vec<u32> = released.choose_multiple(&mut rng, count).map(|g| g.id).collect();
    sign_in(front)?;

    expect_eq(
        "empty cart checkout",
        front.session_mut().begin_checkout(&valid_form()),
        Err(StoreError::Checkout(CheckoutError::EmptyCart)),
    )?;
    for &id in &picks {
        front.add_to_wishlist(id)?;
        front.add_to_cart(id)?;
    }
    expect_eq(
        "blank form",
        front.session_mut().begin_checkout(&PaymentForm::default()),
        Err(StoreError::Checkout(CheckoutError::CardNumber)),
    )?;
    expect_eq("start", front.session_mut().begin_checkout(&valid_form()), Ok(count))?;
    expect_eq(
        "phase",
        front.session().checkout_phase(),
        CheckoutPhase::Processing { count },
    )?;
    expect_eq(
        "double submit",
        front.session_mut().begin_checkout(&valid_form()),
        Err(StoreError::Checkout(CheckoutError::AlreadyProcessing)),
    )?;

    front.session_mut().drain_notices();
    expect_eq("complete", front.session_mut().complete_checkout(), Some(count))?;
    let session = front.session();
    expect_eq("library size", session.library().len(), count)?;
    expect(session.cart().is_empty(), "cart not empty after checkout")?;
    expect(session.wishlist().is_empty(), "purchased games left on wishlist")?;
    expect_eq(
        "success notice",
        session.sink().last().map(|n| n.severity),
        Some(Severity::Success),
    )?;
    expect_eq("second complete", front.session_mut().complete_checkout(), None)?;
    Ok(())
}

pub fn install(ctx: &ScenarioCtx, front: &mut Storefront) -> Result<()> {
    let game = pick_released(ctx, front)?;
    sign_in(front)?;
    buy(front, game.id)?;
    let ticket = front.session_mut().install_game(game.id)?;
    let (outcome, ticks) = run_ticker(front, ticket)?;
    expect_eq("outcome", outcome, TickOutcome::Completed)?;
    let entry = front
        .session()
        .library_entry(game.id)
        .context("library entry vanished")?;
    expect(entry.is_installed, "install did not finish")?;
    expect_eq("final progress", entry.install_progress, INSTALL_COMPLETE)?;
    if ctx.verbose {
        println!("     install of {} took {ticks} ticks", game.title);
    }
    Ok(())
}

pub fn reinstall(ctx: &ScenarioCtx, front: &mut Storefront) -> Result<()> {
    let game = pick_released(ctx, front)?;
    sign_in(front)?;
    buy(front, game.id)?;
    let first = front.session_mut().install_game(game.id)?;
    front.session_mut().tick_install(first);
    front.session_mut().tick_install(first);
    let second = front.session_mut().install_game(game.id)?;
    expect(second.generation > first.generation, "restart reused a generation")?;
    expect_eq("old ticket", front.session_mut().tick_install(first), TickOutcome::Stale)?;
    let (outcome, _) = run_ticker(front, second)?;
    expect_eq("new ticket", outcome, TickOutcome::Completed)?;
    Ok(())
}

pub fn uninstall_race(ctx: &ScenarioCtx, front: &mut Storefront) -> Result<()> {
    let game = pick_released(ctx, front)?;
    sign_in(front)?;
    buy(front, game.id)?;
    let ticket = front.session_mut().install_game(game.id)?;
    front.session_mut().tick_install(ticket);
    front.session_mut().uninstall_game(game.id)?;
    for _ in 0..5 {
        expect_eq("late tick", front.session_mut().tick_install(ticket), TickOutcome::Stale)?;
    }
    let entry = front
        .session()
        .library_entry(game.id)
        .context("library entry vanished")?;
    expect(!entry.is_installed, "uninstalled game reported installed")?;
    expect_eq("progress", entry.install_progress, 0)?;
    expect(
        front.session().active_install(game.id).is_none(),
        "ticker still registered",
    )?;
    Ok(())
}

pub fn auth_gate(ctx: &ScenarioCtx, front: &mut Storefront) -> Result<()> {
    let game = pick_released(ctx, front)?;
    expect_eq("cart", front.add_to_cart(game.id), Err(StoreError::NotAuthenticated))?;
    expect_eq(
        "wishlist",
        front.add_to_wishlist(game.id),
        Err(StoreError::NotAuthenticated),
    )?;
    expect_eq(
        "favorite",
        front.session_mut().toggle_favorite(game.id),
        Err(StoreError::NotAuthenticated),
    )?;
    expect_eq(
        "rating",
        front.session_mut().rate_game(game.id, 4),
        Err(StoreError::NotAuthenticated),
    )?;

    let session = front.session();
    expect(session.auth_prompt_open(), "sign-in prompt not requested")?;
    expect(session.cart().is_empty(), "cart changed")?;
    expect(session.wishlist().is_empty(), "wishlist changed")?;
    expect(session.favorites().is_empty(), "favorites changed")?;
    expect(session.ratings().is_empty(), "ratings changed")?;
    let notices = front.session_mut().drain_notices();
    expect_eq("notices", notices.len(), 4)?;
    expect(
        notices.iter().all(|n| n.severity == Severity::Error),
        "gate notice was not an error",
    )?;
    Ok(())
}

pub fn logout_reset(ctx: &ScenarioCtx, front: &mut Storefront) -> Result<()> {
    let mut rng = ctx.rng();
    let released = ctx.released(front);
    let picks: Vec<u32> = released.choose_multiple(&mut rng, 3).map(|g| g.id).collect();
    let &[owned, carted, wished] = picks.as_slice() else {
        anyhow::bail!("catalog needs at least three released games");
    };
    sign_in(front)?;
    buy(front, owned)?;
    let ticket = front.session_mut().install_game(owned)?;
    front.add_to_cart(carted)?;
    front.add_to_wishlist(wished)?;
    front.session_mut().toggle_favorite(wished)?;
    front.session_mut().rate_game(owned, 5)?;

    front.session_mut().logout();
    let session = front.session();
    expect(session.user().is_none(), "user still signed in")?;
    expect(session.cart().is_empty(), "cart kept")?;
    expect(session.library().is_empty(), "library kept")?;
    expect(session.wishlist().is_empty(), "wishlist kept")?;
    expect(session.favorites().is_empty(), "favorites kept")?;
    expect(session.ratings().is_empty(), "ratings kept")?;
    expect_eq("ticker", front.session_mut().tick_install(ticket), TickOutcome::Stale)?;
    Ok(())
}

pub fn wishlist_release(ctx: &ScenarioCtx, front: &mut Storefront) -> Result<()> {
    let mut rng = ctx.rng();
    let upcoming = ctx
        .upcoming()
        .choose(&mut rng)
        .map(|g| g.id)
        .context("catalog has no upcoming games")?;
    let released = pick_released(ctx, front)?;
    sign_in(front)?;
    front.add_to_wishlist(upcoming)?;
    front.add_to_wishlist(released.id)?;

    let stats = front.session().wishlist_stats();
    expect_eq("released", stats.released, 1)?;
    expect_eq("upcoming", stats.upcoming, 1)?;
    expect_eq(
        "cart upcoming",
        front.session_mut().add_wishlist_entry_to_cart(upcoming),
        Err(StoreError::NotReleased(upcoming)),
    )?;
    front.session_mut().add_wishlist_entry_to_cart(released.id)?;
    expect(front.session().is_in_cart(released.id), "released game not carted")?;

    expect_eq("alert on", front.session_mut().toggle_release_alert(upcoming), Ok(true))?;
    expect_eq("alert off", front.session_mut().toggle_release_alert(upcoming), Ok(false))?;
    Ok(())
}
