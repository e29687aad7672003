//! Session state store: favorites, cart, library, wishlist, ratings and auth.
//!
//! Every mutation is validated up front. A rejected operation leaves the
//! state untouched, pushes a notice to the sink and returns a [`StoreError`].
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::catalog::{Game, GameId};
use crate::checkout::{CheckoutError, CheckoutPhase, PaymentForm};
use crate::clock::{Clock, SystemClock};
use crate::config::StoreConfig;
use crate::install::{INSTALL_COMPLETE, InstallSimulator, InstallTicket, TickOutcome};
use crate::library::{LibraryEntry, LibraryStats};
use crate::notify::{Notice, NoticeQueue, NotificationSink, Severity};
use crate::pricing::{CartTotals, blended_rating};
use crate::wishlist::{WishlistEntry, WishlistStats};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Signed-in user. No credentials are checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("You need to sign in first.")]
    NotAuthenticated,
    #[error("Game {0} is already in your library.")]
    AlreadyOwned(GameId),
    #[error("Game {0} is already in your cart.")]
    AlreadyInCart(GameId),
    #[error("Game {0} is already on your wishlist.")]
    AlreadyInWishlist(GameId),
    #[error("Game {0} was not found.")]
    NotFound(GameId),
    #[error("Game {0} has not been released yet.")]
    NotReleased(GameId),
    #[error("Name and email are required.")]
    InvalidCredentials,
    #[error("Checkout failed: {0}")]
    Checkout(#[from] CheckoutError),
}

/// Which operation hit the sign-in gate; picks the prompt text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gate {
    Favorite,
    Cart,
    Wishlist,
    Rating,
}

impl Gate {
    const fn prompt(self) -> &'static str {
        match self {
            Self::Favorite => "Sign in to add favorites.",
            Self::Cart => "Sign in to make a purchase.",
            Self::Wishlist => "Sign in to add games to your wishlist.",
            Self::Rating => "Sign in to rate games.",
        }
    }
}

/// Single authority over all mutable session state.
#[derive(Debug)]
pub struct SessionStore<N: NotificationSink = NoticeQueue> {
    cfg: StoreConfig,
    clock: Box<dyn Clock>,
    sink: N,
    user: Option<User>,
    auth_prompt_open: bool,
    favorites: Vec<GameId>,
    cart: Vec<Game>,
    ratings: HashMap<GameId, u8>,
    library: Vec<LibraryEntry>,
    wishlist: Vec<WishlistEntry>,
    installer: InstallSimulator,
    checkout: CheckoutPhase,
    // cart contents captured when payment began
    pending: Vec<Game>,
}

impl SessionStore<NoticeQueue> {
    /// Store with the system clock and a buffering notice queue.
    #[must_use]
    pub fn new(cfg: StoreConfig, seed: u64) -> Self {
        Self::with_parts(cfg, Box::new(SystemClock), NoticeQueue::new(), seed)
    }

    /// Take every pending notice, oldest first.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.sink.drain()
    }
}

impl<N: NotificationSink> SessionStore<N> {
    pub fn with_parts(cfg: StoreConfig, clock: Box<dyn Clock>, sink: N, seed: u64) -> Self {
        let installer = InstallSimulator::new(seed, &cfg);
        Self {
            cfg,
            clock,
            sink,
            user: None,
            auth_prompt_open: false,
            favorites: Vec::new(),
            cart: Vec::new(),
            ratings: HashMap::new(),
            library: Vec::new(),
            wishlist: Vec::new(),
            installer,
            checkout: CheckoutPhase::Editing,
            pending: Vec::new(),
        }
    }

    fn notify(&mut self, severity: Severity, message: impl Into<String>) {
        self.sink.notify(Notice::new(severity, message));
    }

    fn reject(&mut self, severity: Severity, message: &str, err: StoreError) -> StoreError {
        log::warn!("rejected: {err}");
        self.notify(severity, message);
        err
    }

    fn require_user(&mut self, gate: Gate) -> Result<(), StoreError> {
        if self.user.is_some() {
            return Ok(());
        }
        self.auth_prompt_open = true;
        Err(self.reject(Severity::Error, gate.prompt(), StoreError::NotAuthenticated))
    }

    // --- auth -----------------------------------------------------------

    fn sign_in(&mut self, name: &str, email: &str, greeting: String) -> Result<&User, StoreError> {
        let (name, email) = (name.trim(), email.trim());
        if name.is_empty() || email.is_empty() {
            return Err(self.reject(
                Severity::Error,
                "Please enter your name and email.",
                StoreError::InvalidCredentials,
            ));
        }
        let user = User {
            id: self.clock.now().timestamp_millis().to_string(),
            name: name.to_string(),
            email: email.to_string(),
        };
        log::info!("user {} signed in", user.id);
        self.auth_prompt_open = false;
        self.notify(Severity::Success, greeting);
        Ok(self.user.insert(user))
    }

    /// Sign in with any non-empty name and email.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidCredentials`] when either field is blank.
    pub fn login(&mut self, name: &str, email: &str) -> Result<&User, StoreError> {
        let greeting = format!("Welcome back, {}!", name.trim());
        self.sign_in(name, email, greeting)
    }

    /// Create an account; behaves like [`Self::login`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidCredentials`] when either field is blank.
    pub fn register(&mut self, name: &str, email: &str) -> Result<&User, StoreError> {
        let greeting = format!("Your account is ready. Welcome, {}!", name.trim());
        self.sign_in(name, email, greeting)
    }

    /// Full session reset.
    pub fn logout(&mut self) {
        self.user = None;
        self.cart.clear();
        self.library.clear();
        self.wishlist.clear();
        self.favorites.clear();
        self.ratings.clear();
        self.installer.cancel_all();
        self.checkout = CheckoutPhase::Editing;
        self.pending.clear();
        log::info!("session reset on logout");
        self.notify(Severity::Info, "Signed out.");
    }

    pub fn set_auth_prompt(&mut self, open: bool) {
        self.auth_prompt_open = open;
    }

    // --- favorites & ratings --------------------------------------------

    /// Flip `id` in the favorites set. Returns whether it is now a favorite.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotAuthenticated`] when nobody is signed in.
    pub fn toggle_favorite(&mut self, id: GameId) -> Result<bool, StoreError> {
        self.require_user(Gate::Favorite)?;
        if let Some(pos) = self.favorites.iter().position(|fav| *fav == id) {
            self.favorites.remove(pos);
            self.notify(Severity::Info, "Removed from favorites.");
            Ok(false)
        } else {
            self.favorites.push(id);
            self.notify(Severity::Success, "Added to favorites!");
            Ok(true)
        }
    }

    /// Store a star rating, clamped into `1..=5`. Returns the stored value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotAuthenticated`] when nobody is signed in.
    pub fn rate_game(&mut self, id: GameId, rating: u8) -> Result<u8, StoreError> {
        self.require_user(Gate::Rating)?;
        let stars = rating.clamp(MIN_RATING, MAX_RATING);
        self.ratings.insert(id, stars);
        self.notify(Severity::Success, format!("You rated this game {stars} stars!"));
        Ok(stars)
    }

    // --- cart -----------------------------------------------------------

    /// Append a priced snapshot of `game` to the cart.
    ///
    /// # Errors
    ///
    /// Rejects when signed out, when the game is owned, or already in the cart.
    pub fn add_to_cart(&mut self, game: Game) -> Result<(), StoreError> {
        self.require_user(Gate::Cart)?;
        if self.is_in_library(game.id) {
            return Err(self.reject(
                Severity::Warning,
                "This game is already in your library!",
                StoreError::AlreadyOwned(game.id),
            ));
        }
        if self.is_in_cart(game.id) {
            return Err(self.reject(
                Severity::Warning,
                "This game is already in your cart!",
                StoreError::AlreadyInCart(game.id),
            ));
        }
        log::debug!("cart += {}", game.id);
        self.notify(Severity::Success, format!("{} added to cart!", game.title));
        self.cart.push(game);
        Ok(())
    }

    /// Remove `id` from the cart. Returns whether anything was removed.
    pub fn remove_from_cart(&mut self, id: GameId) -> bool {
        let before = self.cart.len();
        self.cart.retain(|game| game.id != id);
        let removed = self.cart.len() != before;
        if removed {
            self.notify(Severity::Info, "Item removed from cart.");
        }
        removed
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    /// Move every cart item into the library in one step.
    /// Returns how many games were purchased.
    pub fn purchase_games(&mut self) -> usize {
        let games = std::mem::take(&mut self.cart);
        self.purchase(games)
    }

    fn purchase(&mut self, games: Vec<Game>) -> usize {
        let purchased_at = self.clock.now();
        let purchased: Vec<LibraryEntry> = games
            .into_iter()
            .map(|game| LibraryEntry::purchased(game, purchased_at))
            .collect();
        let count = purchased.len();
        self.wishlist
            .retain(|wish| !purchased.iter().any(|entry| entry.id() == wish.id()));
        self.library.extend(purchased);
        log::info!("purchased {count} game(s); library now {}", self.library.len());
        count
    }

    // --- checkout -------------------------------------------------------

    /// Validate the payment form and enter the processing phase.
    /// Returns the number of games being bought.
    ///
    /// # Errors
    ///
    /// Rejects an empty cart, a checkout already in flight, or a form that
    /// fails its formatting checks.
    pub fn begin_checkout(&mut self, form: &PaymentForm) -> Result<usize, StoreError> {
        let checked = if self.checkout.is_processing() {
            Err(CheckoutError::AlreadyProcessing)
        } else if self.cart.is_empty() {
            Err(CheckoutError::EmptyCart)
        } else {
            form.validate()
        };
        if let Err(err) = checked {
            return Err(self.reject(Severity::Error, &err.to_string(), err.into()));
        }
        self.pending = self.cart.clone();
        let count = self.pending.len();
        self.checkout = CheckoutPhase::Processing { count };
        log::debug!("checkout processing {count} item(s)");
        Ok(count)
    }

    /// Finish the simulated payment: purchase the games that were in the cart
    /// when it began and report success. Items added to the cart meanwhile
    /// stay there. Does nothing unless a checkout is processing.
    pub fn complete_checkout(&mut self) -> Option<usize> {
        if !self.checkout.is_processing() {
            return None;
        }
        let mut paid_for = std::mem::take(&mut self.pending);
        paid_for.retain(|game| !self.is_in_library(game.id));
        self.cart
            .retain(|game| !paid_for.iter().any(|paid| paid.id == game.id));
        let count = self.purchase(paid_for);
        self.checkout = CheckoutPhase::Succeeded { count };
        self.notify(
            Severity::Success,
            "Payment successful! Your games were added to your library.",
        );
        Some(count)
    }

    pub fn reset_checkout(&mut self) {
        self.checkout = CheckoutPhase::Editing;
        self.pending.clear();
    }

    // --- library & install ----------------------------------------------

    fn entry_mut(&mut self, id: GameId) -> Option<&mut LibraryEntry> {
        self.library.iter_mut().find(|entry| entry.id() == id)
    }

    /// Restart the install ticker for an owned game from zero. An installed
    /// game stays installed while it reinstalls.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when `id` is not in the library.
    pub fn install_game(&mut self, id: GameId) -> Result<InstallTicket, StoreError> {
        let Some(entry) = self.entry_mut(id) else {
            return Err(self.reject(
                Severity::Warning,
                "That game is not in your library.",
                StoreError::NotFound(id),
            ));
        };
        entry.install_progress = 0;
        let ticket = self.installer.start(id);
        log::debug!("install started for {id} (generation {})", ticket.generation);
        self.notify(Severity::Info, "Installation started...");
        Ok(ticket)
    }

    /// Advance one install ticker. Stale tickets change nothing.
    pub fn tick_install(&mut self, ticket: InstallTicket) -> TickOutcome {
        if self.entry_mut(ticket.game_id).is_none() {
            self.installer.cancel(ticket.game_id);
            return TickOutcome::Stale;
        }
        let outcome = self.installer.tick(ticket);
        let Some(entry) = self.entry_mut(ticket.game_id) else {
            return TickOutcome::Stale;
        };
        match outcome {
            TickOutcome::Progress(progress) => entry.install_progress = progress,
            TickOutcome::Completed => {
                entry.install_progress = INSTALL_COMPLETE;
                entry.is_installed = true;
                log::info!("install finished for {}", ticket.game_id);
                self.notify(Severity::Success, "Installation complete!");
            }
            TickOutcome::Stale => {}
        }
        outcome
    }

    /// Stop any running ticker for `id` and mark it not installed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when `id` is not in the library.
    pub fn uninstall_game(&mut self, id: GameId) -> Result<(), StoreError> {
        if self.installer.cancel(id) {
            log::debug!("cancelled running install for {id}");
        }
        let Some(entry) = self.entry_mut(id) else {
            return Err(self.reject(
                Severity::Warning,
                "That game is not in your library.",
                StoreError::NotFound(id),
            ));
        };
        entry.is_installed = false;
        entry.install_progress = 0;
        self.notify(Severity::Info, "Game uninstalled.");
        Ok(())
    }

    // --- wishlist -------------------------------------------------------

    /// Track `game` on the wishlist.
    ///
    /// # Errors
    ///
    /// Rejects when signed out, when the game is owned, or already listed.
    pub fn add_to_wishlist(&mut self, game: Game) -> Result<(), StoreError> {
        self.require_user(Gate::Wishlist)?;
        if self.is_in_library(game.id) {
            return Err(self.reject(
                Severity::Warning,
                "This game is already in your library!",
                StoreError::AlreadyOwned(game.id),
            ));
        }
        if self.is_in_wishlist(game.id) {
            return Err(self.reject(
                Severity::Warning,
                "This game is already on your wishlist!",
                StoreError::AlreadyInWishlist(game.id),
            ));
        }
        let entry = WishlistEntry::new(game, self.clock.now(), &self.cfg);
        self.notify(
            Severity::Success,
            format!("{} added to your wishlist!", entry.game.title),
        );
        self.wishlist.push(entry);
        Ok(())
    }

    /// Returns whether anything was removed.
    pub fn remove_from_wishlist(&mut self, id: GameId) -> bool {
        let before = self.wishlist.len();
        self.wishlist.retain(|entry| entry.id() != id);
        let removed = self.wishlist.len() != before;
        if removed {
            self.notify(Severity::Info, "Removed from your wishlist.");
        }
        removed
    }

    /// Move a released wishlist game into the cart.
    ///
    /// # Errors
    ///
    /// Rejects unknown or unreleased entries, then anything
    /// [`Self::add_to_cart`] rejects.
    pub fn add_wishlist_entry_to_cart(&mut self, id: GameId) -> Result<(), StoreError> {
        let Some(entry) = self.wishlist.iter().find(|entry| entry.id() == id) else {
            return Err(self.reject(
                Severity::Warning,
                "That game is not on your wishlist.",
                StoreError::NotFound(id),
            ));
        };
        if !entry.is_released {
            return Err(self.reject(
                Severity::Warning,
                "This game has not been released yet!",
                StoreError::NotReleased(id),
            ));
        }
        let game = entry.game.clone();
        self.add_to_cart(game)
    }

    /// Flip the release alert for a wishlist entry. Returns the new setting.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when `id` is not on the wishlist.
    pub fn toggle_release_alert(&mut self, id: GameId) -> Result<bool, StoreError> {
        let Some(entry) = self.wishlist.iter_mut().find(|entry| entry.id() == id) else {
            return Err(self.reject(
                Severity::Warning,
                "That game is not on your wishlist.",
                StoreError::NotFound(id),
            ));
        };
        entry.notify_on_release = !entry.notify_on_release;
        let enabled = entry.notify_on_release;
        if enabled {
            self.notify(Severity::Success, "Release alert enabled!");
        } else {
            self.notify(Severity::Info, "Release alert turned off.");
        }
        Ok(enabled)
    }

    // --- queries --------------------------------------------------------

    #[must_use]
    pub fn is_in_library(&self, id: GameId) -> bool {
        self.library.iter().any(|entry| entry.id() == id)
    }

    #[must_use]
    pub fn is_in_wishlist(&self, id: GameId) -> bool {
        self.wishlist.iter().any(|entry| entry.id() == id)
    }

    #[must_use]
    pub fn is_in_cart(&self, id: GameId) -> bool {
        self.cart.iter().any(|game| game.id == id)
    }

    #[must_use]
    pub fn is_favorite(&self, id: GameId) -> bool {
        self.favorites.contains(&id)
    }

    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub const fn auth_prompt_open(&self) -> bool {
        self.auth_prompt_open
    }

    #[must_use]
    pub fn favorites(&self) -> &[GameId] {
        &self.favorites
    }

    #[must_use]
    pub fn cart(&self) -> &[Game] {
        &self.cart
    }

    #[must_use]
    pub fn library(&self) -> &[LibraryEntry] {
        &self.library
    }

    #[must_use]
    pub fn library_entry(&self, id: GameId) -> Option<&LibraryEntry> {
        self.library.iter().find(|entry| entry.id() == id)
    }

    #[must_use]
    pub fn wishlist(&self) -> &[WishlistEntry] {
        &self.wishlist
    }

    #[must_use]
    pub const fn ratings(&self) -> &HashMap<GameId, u8> {
        &self.ratings
    }

    #[must_use]
    pub fn user_rating(&self, id: GameId) -> Option<u8> {
        self.ratings.get(&id).copied()
    }

    /// Catalog rating blended with the user's own vote.
    #[must_use]
    pub fn displayed_rating(&self, game: &Game) -> f64 {
        blended_rating(game.rating, self.user_rating(game.id), &self.cfg)
    }

    #[must_use]
    pub fn cart_totals(&self) -> CartTotals {
        CartTotals::from_items(&self.cart)
    }

    #[must_use]
    pub fn library_stats(&self) -> LibraryStats {
        LibraryStats::of(&self.library)
    }

    #[must_use]
    pub fn wishlist_stats(&self) -> WishlistStats {
        WishlistStats::of(&self.wishlist)
    }

    #[must_use]
    pub const fn checkout_phase(&self) -> CheckoutPhase {
        self.checkout
    }

    #[must_use]
    pub const fn config(&self) -> &StoreConfig {
        &self.cfg
    }

    #[must_use]
    pub fn active_install(&self, id: GameId) -> Option<InstallTicket> {
        self.installer.active_ticket(id)
    }

    #[must_use]
    pub const fn sink(&self) -> &N {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut N {
        &mut self.sink
    }
}
