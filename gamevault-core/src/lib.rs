//! GameVault storefront core
//!
//! Platform-agnostic session logic for the GameVault digital game store:
//! catalog browsing, cart and simulated checkout, library with simulated
//! installs, wishlist, favorites, ratings and a mock sign-in.
//! This crate has no UI or platform-specific dependencies.

pub mod catalog;
pub mod checkout;
pub mod clock;
pub mod config;
#[cfg(feature = "async")]
pub mod driver;
pub mod install;
pub mod library;
pub mod notify;
pub mod numbers;
pub mod pricing;
pub mod session;
pub mod wishlist;

// Re-export commonly used types
pub use catalog::{
    ALL_CATEGORIES, BrowseView, CatalogError, CatalogQuery, CatalogSource, Game, GameId, Page,
    StaticCatalog, categories, paginate,
};
pub use checkout::{CheckoutError, CheckoutPhase, PaymentForm};
pub use clock::{Clock, SteppingClock, SystemClock};
pub use config::{ConfigError, StoreConfig};
pub use install::{InstallState, InstallTicket, TickOutcome};
pub use library::{LibraryEntry, LibraryFilter, LibraryQuery, LibrarySort, LibraryStats};
pub use notify::{LogSink, Notice, NoticeQueue, NotificationSink, Severity};
pub use pricing::{CartTotals, blended_rating, discount_percent, storefront_price};
pub use session::{SessionStore, StoreError, User};
pub use wishlist::{WishlistEntry, WishlistFilter, WishlistQuery, WishlistSort, WishlistStats};

/// A loaded catalog bound to one session store.
#[derive(Debug)]
pub struct Storefront<N: NotificationSink = NoticeQueue> {
    catalog: Vec<Game>,
    session: SessionStore<N>,
}

impl Storefront<NoticeQueue> {
    /// Load the catalog from `source` and open a fresh session.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded.
    pub fn open<C: CatalogSource>(source: &C, cfg: StoreConfig, seed: u64) -> Result<Self, C::Error> {
        let catalog = source.load_games()?;
        log::info!("catalog loaded with {} games", catalog.len());
        Ok(Self::from_parts(catalog, SessionStore::new(cfg, seed)))
    }
}

impl<N: NotificationSink> Storefront<N> {
    pub const fn from_parts(catalog: Vec<Game>, session: SessionStore<N>) -> Self {
        Self { catalog, session }
    }

    #[must_use]
    pub fn catalog(&self) -> &[Game] {
        &self.catalog
    }

    /// Swap in a freshly fetched catalog; session state is kept.
    pub fn set_catalog(&mut self, catalog: Vec<Game>) {
        log::info!("catalog replaced with {} games", catalog.len());
        self.catalog = catalog;
    }

    #[must_use]
    pub const fn session(&self) -> &SessionStore<N> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionStore<N> {
        &mut self.session
    }

    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        categories(&self.catalog)
    }

    /// Catalog entry with its storefront price applied.
    #[must_use]
    pub fn priced_game(&self, id: GameId) -> Option<Game> {
        catalog::find_game(&self.catalog, id)
            .map(|game| storefront_price(game, self.session.config()))
    }

    /// One page of the catalog grid.
    #[must_use]
    pub fn browse(&self, query: &CatalogQuery, page: usize) -> Page<'_> {
        let cfg = self.session.config();
        let hits = query.apply(&self.catalog, self.session.favorites(), cfg);
        paginate(&hits, page, cfg.items_per_page)
    }

    /// Put a catalog game in the cart at its storefront price.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for unknown ids, otherwise anything
    /// [`SessionStore::add_to_cart`] rejects.
    pub fn add_to_cart(&mut self, id: GameId) -> Result<(), StoreError> {
        let game = self.priced_game(id).ok_or(StoreError::NotFound(id))?;
        self.session.add_to_cart(game)
    }

    /// Put a catalog game on the wishlist at its storefront price.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for unknown ids, otherwise anything
    /// [`SessionStore::add_to_wishlist`] rejects.
    pub fn add_to_wishlist(&mut self, id: GameId) -> Result<(), StoreError> {
        let game = self.priced_game(id).ok_or(StoreError::NotFound(id))?;
        self.session.add_to_wishlist(game)
    }
}
