use chrono::{Duration, TimeZone, Utc};
use gamevault_core::{
    CatalogSource, Game, NoticeQueue, SessionStore, Severity, StaticCatalog, SteppingClock,
    StoreConfig, StoreError, TickOutcome,
};

fn game(id: u32, price: f64, release_date: &str) -> Game {
    Game {
        id,
        title: format!("Game {id}"),
        category: "Action".to_string(),
        rating: 4.2,
        cover_image: String::new(),
        release_date: release_date.to_string(),
        price,
        original_price: None,
        is_upcoming: None,
        trailer_url: None,
    }
}

fn store(seed: u64) -> SessionStore {
    let start = Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap();
    SessionStore::with_parts(
        StoreConfig::default(),
        Box::new(SteppingClock::new(start, Duration::milliseconds(250))),
        NoticeQueue::new(),
        seed,
    )
}

#[test]
fn ada_buys_game_five() {
    let mut s = store(1);
    s.login("Ada", "ada@x.com").unwrap();
    s.add_to_cart(game(5, 10.0, "2024-01-01")).unwrap();
    assert_eq!(s.purchase_games(), 1);
    assert_eq!(s.library().len(), 1);
    assert_eq!(s.library()[0].id(), 5);
    assert!(!s.library()[0].is_installed);
    assert!(s.cart().is_empty());
}

#[test]
fn every_catalog_game_can_be_carted_once() {
    let games = StaticCatalog::bundled().load_games().unwrap();
    let mut s = store(2);
    s.login("Ada", "ada@x.com").unwrap();
    for g in &games {
        s.add_to_cart(g.clone()).unwrap();
        assert_eq!(
            s.add_to_cart(g.clone()),
            Err(StoreError::AlreadyInCart(g.id))
        );
    }
    assert_eq!(s.cart().len(), games.len());
}

#[test]
fn installs_finish_for_many_seeds_and_never_exceed_100() {
    for seed in 0..50 {
        let mut s = store(seed);
        s.login("Ada", "ada@x.com").unwrap();
        s.add_to_cart(game(1, 5.0, "2020")).unwrap();
        s.purchase_games();
        let ticket = s.install_game(1).unwrap();
        let mut ticks = 0;
        loop {
            ticks += 1;
            let outcome = s.tick_install(ticket);
            let progress = s.library_entry(1).map_or(0, |e| e.install_progress);
            assert!(progress <= 100, "seed {seed} overshot: {progress}");
            if outcome == TickOutcome::Completed {
                break;
            }
            assert!(ticks < 25, "seed {seed} never finished");
        }
        assert!(s.library_entry(1).is_some_and(|e| e.is_installed));
    }
}

#[test]
fn gate_leaves_state_unchanged_and_prompts() {
    let mut s = store(3);
    let g = game(9, 1.0, "2024");
    let _ = s.add_to_wishlist(g.clone());
    let _ = s.add_to_cart(g);
    let _ = s.toggle_favorite(9);
    let _ = s.rate_game(9, 3);
    assert!(s.auth_prompt_open());
    assert!(s.wishlist().is_empty());
    assert!(s.cart().is_empty());
    assert!(s.favorites().is_empty());
    assert!(s.ratings().is_empty());
    assert!(
        s.drain_notices()
            .iter()
            .all(|notice| notice.severity == Severity::Error)
    );
}

#[test]
fn wishlist_release_years() {
    let mut s = store(4);
    s.login("Ada", "ada@x.com").unwrap();
    s.add_to_wishlist(game(7, 30.0, "2027-01-01")).unwrap();
    assert!(!s.wishlist()[0].is_released);
    s.remove_from_wishlist(7);
    s.add_to_wishlist(game(7, 30.0, "2024-05-01")).unwrap();
    assert!(s.wishlist()[0].is_released);
    assert_eq!(s.wishlist_stats().released, 1);
}
