use gamevault_core::numbers::format_price;
use gamevault_core::pricing::{discount_percent, format_rating};
use gamevault_core::{Game, GameId};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    /// Storefront-priced game
    pub game: Game,
    pub rating: f64,
    #[prop_or_default]
    pub favorite: bool,
    #[prop_or_default]
    pub owned: bool,
    #[prop_or_default]
    pub in_cart: bool,
    #[prop_or_default]
    pub on_open: Callback<GameId>,
    #[prop_or_default]
    pub on_favorite: Callback<GameId>,
    #[prop_or_default]
    pub on_add_to_cart: Callback<GameId>,
}

/// Price line with the struck-through original when discounted.
#[must_use]
pub fn price_tag(game: &Game) -> Html {
    let price = game.price_cents();
    let original = game.original_price_cents();
    if price == 0 {
        return html! { <span class="price price--free">{"Free"}</span> };
    }
    if price < original {
        let pct = discount_percent(original, price);
        html! {
            <span class="price">
                <span class="badge badge-success">{ format!("-{pct}%") }</span>
                <s class="price__original">{ format_price(original) }</s>
                <strong>{ format_price(price) }</strong>
            </span>
        }
    } else {
        html! { <span class="price"><strong>{ format_price(price) }</strong></span> }
    }
}

#[function_component(GameCard)]
pub fn game_card(props: &Props) -> Html {
    let id = props.game.id;
    let emit = |cb: &Callback<GameId>| {
        let cb = cb.clone();
        Callback::from(move |_| cb.emit(id))
    };
    let upcoming = props.game.is_upcoming.unwrap_or(false);
    let action = if props.owned {
        html! { <span class="badge badge-neutral">{"In library"}</span> }
    } else if upcoming {
        html! { <span class="badge badge-secondary">{"Coming soon"}</span> }
    } else if props.in_cart {
        html! { <span class="badge badge-info">{"In cart"}</span> }
    } else {
        html! {
            <button type="button" class="btn btn-primary btn-sm" onclick={emit(&props.on_add_to_cart)}>
                {"Add to cart"}
            </button>
        }
    };
    html! {
        <article class="card game-card" data-game-id={id.to_string()}>
            <button type="button" class="game-card__cover" onclick={emit(&props.on_open)}>
                <img src={props.game.cover_image.clone()} alt={props.game.title.clone()} loading="lazy" />
            </button>
            <div class="card-body">
                <div class="game-card__meta">
                    <span class="badge">{ props.game.category.clone() }</span>
                    <span class="game-card__rating">{ format!("★ {}", format_rating(props.rating)) }</span>
                </div>
                <h3 class="card-title">{ props.game.title.clone() }</h3>
                <div class="card-actions">
                    { price_tag(&props.game) }
                    <button
                        type="button"
                        class={classes!("btn", "btn-ghost", "btn-sm", props.favorite.then_some("favorite--on"))}
                        aria-pressed={props.favorite.to_string()}
                        aria-label="Favorite"
                        onclick={emit(&props.on_favorite)}
                    >
                        { if props.favorite { "♥" } else { "♡" } }
                    </button>
                    { action }
                </div>
            </div>
        </article>
    }
}
