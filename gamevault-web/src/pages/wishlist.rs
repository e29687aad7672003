//! Wishlist with release filter, sort order, release alerts and cart moves.
use crate::components::field::{Choice, SelectField, TextField};
use crate::components::game_card::price_tag;
use crate::state::use_vault;
use crate::view::View;
use gamevault_core::{GameId, WishlistFilter, WishlistQuery, WishlistSort};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    #[prop_or_default]
    pub on_navigate: Callback<View>,
}

fn filter_from(value: &str) -> WishlistFilter {
    match value {
        "released" => WishlistFilter::Released,
        "upcoming" => WishlistFilter::Upcoming,
        _ => WishlistFilter::All,
    }
}

fn sort_from(value: &str) -> WishlistSort {
    match value {
        "name" => WishlistSort::Name,
        "price" => WishlistSort::Price,
        _ => WishlistSort::Recent,
    }
}

const fn filter_value(filter: WishlistFilter) -> &'static str {
    match filter {
        WishlistFilter::All => "all",
        WishlistFilter::Released => "released",
        WishlistFilter::Upcoming => "upcoming",
    }
}

const fn sort_value(sort: WishlistSort) -> &'static str {
    match sort {
        WishlistSort::Recent => "recent",
        WishlistSort::Name => "name",
        WishlistSort::Price => "price",
    }
}

#[function_component(WishlistPage)]
pub fn wishlist_page(props: &Props) -> Html {
    let ctx = use_vault();
    let query = use_state(WishlistQuery::default);

    let (rows, stats) = ctx.read(|front| {
        let session = front.session();
        let rows: Vec<_> = query
            .apply(session.wishlist())
            .into_iter()
            .map(|entry| (entry.clone(), session.is_in_cart(entry.id())))
            .collect();
        (rows, session.wishlist_stats())
    });

    if stats.released + stats.upcoming == 0 {
        let to_store = {
            let nav = props.on_navigate.clone();
            Callback::from(move |_| nav.emit(View::Home))
        };
        return html! {
            <section class="wishlist wishlist--empty">
                <h1>{"Your wishlist is empty"}</h1>
                <p>{"Save games you are waiting for and get an alert when they launch."}</p>
                <button type="button" class="btn" onclick={to_store}>{"Browse the store"}</button>
            </section>
        };
    }

    let update = |change: fn(&mut WishlistQuery, &str)| {
        let query = query.clone();
        Callback::from(move |raw: String| {
            let mut next = (*query).clone();
            change(&mut next, &raw);
            query.set(next);
        })
    };
    let on_remove = {
        let ctx = ctx.clone();
        Callback::from(move |id: GameId| {
            ctx.act(|front| front.session_mut().remove_from_wishlist(id));
        })
    };
    let on_alert = {
        let ctx = ctx.clone();
        Callback::from(move |id: GameId| {
            let _ = ctx.act(|front| front.session_mut().toggle_release_alert(id));
        })
    };
    let on_cart = {
        let ctx = ctx.clone();
        Callback::from(move |id: GameId| {
            let _ = ctx.act(|front| front.session_mut().add_wishlist_entry_to_cart(id));
        })
    };

    let filter_choices = vec![
        Choice::new("all", "All"),
        Choice::new("released", "Released"),
        Choice::new("upcoming", "Upcoming"),
    ];
    let sort_choices = vec![
        Choice::new("recent", "Recently added"),
        Choice::new("name", "Name"),
        Choice::new("price", "Price"),
    ];

    html! {
        <section class="wishlist" aria-labelledby="wishlist-heading">
            <div class="wishlist__toolbar">
                <h1 id="wishlist-heading">{"Wishlist"}</h1>
                <span class="wishlist__stats">{ format!("{} released, {} upcoming", stats.released, stats.upcoming) }</span>
                <TextField id="wishlist-search" label="Search" value={query.search.clone()} oninput={update(|q, raw| q.search = raw.to_string())} />
                <SelectField id="wishlist-filter" label="Show" value={filter_value(query.filter)} choices={filter_choices} on_change={update(|q, raw| q.filter = filter_from(raw))} />
                <SelectField id="wishlist-sort" label="Sort by" value={sort_value(query.sort)} choices={sort_choices} on_change={update(|q, raw| q.sort = sort_from(raw))} />
            </div>
            if rows.is_empty() {
                <p class="wishlist__empty">{"No games match your filters."}</p>
            }
            <ul class="wishlist__items">
                { for rows.iter().map(|(entry, in_cart)| {
                    let id = entry.id();
                    let emit = |cb: &Callback<GameId>| {
                        let cb = cb.clone();
                        Callback::from(move |_| cb.emit(id))
                    };
                    let buy = if !entry.is_released {
                        html! { <span class="badge badge-secondary">{ format!("Coming {}", entry.game.release_date) }</span> }
                    } else if *in_cart {
                        html! { <span class="badge badge-info">{"In cart"}</span> }
                    } else {
                        html! { <button type="button" class="btn btn-primary btn-sm" onclick={emit(&on_cart)}>{"Add to cart"}</button> }
                    };
                    let alert_label = if entry.notify_on_release { "Alert on" } else { "Notify me" };
                    html! {
                        <li key={id} class="wishlist__item" data-game-id={id.to_string()}>
                            <img src={entry.game.cover_image.clone()} alt={entry.game.title.clone()} />
                            <div class="wishlist__info">
                                <h3>{ entry.game.title.clone() }</h3>
                                <span class="badge">{ entry.game.category.clone() }</span>
                                { price_tag(&entry.game) }
                            </div>
                            <div class="wishlist__controls">
                                if !entry.is_released {
                                    <button
                                        type="button"
                                        class="btn btn-ghost btn-sm"
                                        aria-pressed={entry.notify_on_release.to_string()}
                                        onclick={emit(&on_alert)}
                                    >
                                        { alert_label }
                                    </button>
                                }
                                { buy }
                                <button type="button" class="btn btn-ghost btn-sm" aria-label={format!("Remove {}", entry.game.title)} onclick={emit(&on_remove)}>
                                    {"Remove"}
                                </button>
                            </div>
                        </li>
                    }
                }) }
            </ul>
        </section>
    }
}
