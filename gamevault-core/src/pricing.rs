//! Storefront pricing and derived display values.
use serde::{Deserialize, Serialize};

use crate::catalog::{Game, GameId};
use crate::config::StoreConfig;
use crate::numbers::{i64_to_f64, round_percent};

#[must_use]
pub fn is_free_game(id: GameId, cfg: &StoreConfig) -> bool {
    id == cfg.free_game_id
}

#[must_use]
pub fn is_discounted(id: GameId, cfg: &StoreConfig) -> bool {
    cfg.sale_modulus != 0 && id % cfg.sale_modulus == 0
}

/// Snapshot of `game` carrying the price shown on the storefront.
///
/// The free game of the week costs nothing; sale titles are floored to whole
/// dollars after the sale multiplier. `original_price` always carries the
/// catalog price so views can render the strike-through.
#[must_use]
pub fn storefront_price(game: &Game, cfg: &StoreConfig) -> Game {
    let final_price = if is_free_game(game.id, cfg) {
        0.0
    } else if is_discounted(game.id, cfg) {
        (game.price * cfg.sale_multiplier).floor()
    } else {
        game.price
    };
    Game {
        price: final_price,
        original_price: Some(game.price),
        ..game.clone()
    }
}

/// Rounded percentage saved between `original_cents` and `price_cents`.
#[must_use]
pub fn discount_percent(original_cents: i64, price_cents: i64) -> u8 {
    if original_cents <= 0 || price_cents >= original_cents {
        return 0;
    }
    let saved = i64_to_f64(original_cents - price_cents);
    round_percent(saved / i64_to_f64(original_cents) * 100.0)
}

/// Catalog baseline blended with a single user vote.
#[must_use]
pub fn blended_rating(baseline: f64, user_vote: Option<u8>, cfg: &StoreConfig) -> f64 {
    match user_vote {
        Some(vote) => {
            let weight = cfg.rating_blend_weight;
            baseline.mul_add(weight, f64::from(vote)) / (weight + 1.0)
        }
        None => baseline,
    }
}

/// One-decimal rendering used next to the star icon.
#[must_use]
pub fn format_rating(rating: f64) -> String {
    format!("{rating:.1}")
}

/// Money summary of a cart, in cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    pub total_cents: i64,
    pub original_total_cents: i64,
    pub discount_cents: i64,
    /// Whole percent saved against the original total
    pub discount_rate: u8,
}

impl CartTotals {
    #[must_use]
    pub fn from_items(items: &[Game]) -> Self {
        let total_cents: i64 = items.iter().map(Game::price_cents).sum();
        let original_total_cents: i64 = items.iter().map(Game::original_price_cents).sum();
        let discount_cents = original_total_cents - total_cents;
        Self {
            total_cents,
            original_total_cents,
            discount_cents,
            discount_rate: discount_percent(original_total_cents, total_cents),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::game;

    #[test]
    fn free_game_costs_nothing_and_keeps_original_price() {
        let cfg = StoreConfig::default();
        let priced = storefront_price(&game(28, "Free", 69.99), &cfg);
        assert!(priced.price.abs() < f64::EPSILON);
        assert_eq!(priced.original_price, Some(69.99));
    }

    #[test]
    fn sale_titles_are_floored_after_multiplier() {
        let cfg = StoreConfig::default();
        let priced = storefront_price(&game(9, "Sale", 59.99), &cfg);
        assert!((priced.price - 47.0).abs() < f64::EPSILON);
        let full = storefront_price(&game(10, "Full", 59.99), &cfg);
        assert!((full.price - 59.99).abs() < f64::EPSILON);
    }

    #[test]
    fn discount_percent_handles_edges() {
        assert_eq!(discount_percent(5999, 4700), 22);
        assert_eq!(discount_percent(0, 0), 0);
        assert_eq!(discount_percent(1000, 1000), 0);
        assert_eq!(discount_percent(1000, 0), 100);
    }

    #[test]
    fn blended_rating_leans_on_baseline() {
        let cfg = StoreConfig::default();
        assert!((blended_rating(4.5, None, &cfg) - 4.5).abs() < f64::EPSILON);
        let blended = blended_rating(4.0, Some(1), &cfg);
        assert_eq!(format_rating(blended), "3.9");
        assert_eq!(format_rating(blended_rating(5.0, Some(5), &cfg)), "5.0");
    }

    #[test]
    fn cart_totals_sum_discounts() {
        let cfg = StoreConfig::default();
        let items = vec![
            storefront_price(&game(3, "Sale", 50.0), &cfg),
            storefront_price(&game(4, "Full", 10.0), &cfg),
        ];
        let totals = CartTotals::from_items(&items);
        assert_eq!(totals.total_cents, 5000);
        assert_eq!(totals.original_total_cents, 6000);
        assert_eq!(totals.discount_cents, 1000);
        assert_eq!(totals.discount_rate, 17);
        assert_eq!(CartTotals::from_items(&[]), CartTotals::default());
    }
}
