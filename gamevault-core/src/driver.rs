//! Tokio-driven install ticker for hosts without a browser event loop.
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::install::{InstallTicket, TickOutcome};
use crate::notify::NotificationSink;
use crate::session::SessionStore;

/// Tick `ticket` on the configured interval until it completes or goes stale.
///
/// Must run on a single-threaded runtime (or inside a `LocalSet`) since the
/// store is shared through `Rc<RefCell<_>>`. The borrow is released between
/// ticks so other tasks may mutate the store, including uninstalling.
pub async fn drive_install<N: NotificationSink>(
    store: Rc<RefCell<SessionStore<N>>>,
    ticket: InstallTicket,
) -> TickOutcome {
    let tick_ms = u64::from(store.borrow().config().install_tick_ms);
    let mut interval = tokio::time::interval(Duration::from_millis(tick_ms));
    // first tick of a tokio interval fires immediately
    interval.tick().await;
    loop {
        interval.tick().await;
        let outcome = store.borrow_mut().tick_install(ticket);
        if !outcome.keep_ticking() {
            return outcome;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::game;
    use crate::config::StoreConfig;

    fn owned_store() -> Rc<RefCell<SessionStore>> {
        let mut store = SessionStore::new(StoreConfig::default(), 11);
        store.login("Ada", "ada@x.com").unwrap();
        store.add_to_cart(game(4, "D", 1.0)).unwrap();
        store.purchase_games();
        Rc::new(RefCell::new(store))
    }

    #[tokio::test(start_paused = true)]
    async fn drives_install_to_completion() {
        let store = owned_store();
        let ticket = store.borrow_mut().install_game(4).unwrap();
        let outcome = drive_install(store.clone(), ticket).await;
        assert_eq!(outcome, TickOutcome::Completed);
        let store = store.borrow();
        let entry = store.library_entry(4).unwrap();
        assert!(entry.is_installed);
        assert_eq!(entry.install_progress, 100);
    }

    #[tokio::test(start_paused = true)]
    async fn uninstall_stops_running_driver() {
        let store = owned_store();
        let ticket = store.borrow_mut().install_game(4).unwrap();
        let local = tokio::task::LocalSet::new();
        let outcome = local
            .run_until(async {
                let handle = tokio::task::spawn_local(drive_install(store.clone(), ticket));
                tokio::time::sleep(Duration::from_millis(1_100)).await;
                store.borrow_mut().uninstall_game(4).unwrap();
                handle.await
            })
            .await
            .unwrap();
        assert_eq!(outcome, TickOutcome::Stale);
        let store = store.borrow();
        let entry = store.library_entry(4).unwrap();
        assert!(!entry.is_installed);
        assert_eq!(entry.install_progress, 0);
    }
}
