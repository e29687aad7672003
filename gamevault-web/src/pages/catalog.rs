//! Store grid: category and search filters over the current browse view,
//! paginated, with the detail dialog for the selected game.
use crate::components::field::{Choice, SelectField, TextField};
use crate::components::game_card::GameCard;
use crate::components::game_detail::GameDetail;
use crate::components::pagination::Pagination;
use crate::state::use_vault;
use gamevault_core::{ALL_CATEGORIES, BrowseView, CatalogQuery, GameId};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub view: BrowseView,
}

const fn heading(view: BrowseView) -> &'static str {
    match view {
        BrowseView::Home => "All games",
        BrowseView::Favorites => "Your favorites",
        BrowseView::OnSale => "On sale",
        BrowseView::NewReleases => "New releases",
    }
}

#[function_component(CatalogPage)]
pub fn catalog_page(props: &Props) -> Html {
    let ctx = use_vault();
    let category = use_state(|| ALL_CATEGORIES.to_string());
    let search = use_state(String::new);
    let page = use_state(|| 1_usize);
    let selected = use_state(|| None::<GameId>);

    {
        let page = page.clone();
        use_effect_with(props.view, move |_| {
            page.set(1);
            || {}
        });
    }

    let on_category = {
        let (category, page) = (category.clone(), page.clone());
        Callback::from(move |value: String| {
            category.set(value);
            page.set(1);
        })
    };
    let on_search = {
        let (search, page) = (search.clone(), page.clone());
        Callback::from(move |value: String| {
            search.set(value);
            page.set(1);
        })
    };
    let on_page = {
        let page = page.clone();
        Callback::from(move |n: usize| page.set(n))
    };
    let on_open = {
        let selected = selected.clone();
        Callback::from(move |id: GameId| selected.set(Some(id)))
    };
    let on_close = {
        let selected = selected.clone();
        Callback::from(move |()| selected.set(None))
    };
    let on_favorite = {
        let ctx = ctx.clone();
        Callback::from(move |id: GameId| {
            let _ = ctx.act(|front| front.session_mut().toggle_favorite(id));
        })
    };
    let on_add_to_cart = {
        let ctx = ctx.clone();
        Callback::from(move |id: GameId| {
            let _ = ctx.act(|front| front.add_to_cart(id));
        })
    };
    let on_wishlist = {
        let ctx = ctx.clone();
        Callback::from(move |id: GameId| {
            let _ = ctx.act(|front| front.add_to_wishlist(id));
        })
    };
    let on_rate = {
        let ctx = ctx.clone();
        Callback::from(move |(id, stars): (GameId, u8)| {
            let _ = ctx.act(|front| front.session_mut().rate_game(id, stars));
        })
    };

    let query = CatalogQuery {
        view: props.view,
        category: (*category).clone(),
        search: (*search).clone(),
    };
    let choices: Vec<Choice> = std::iter::once(ALL_CATEGORIES.to_string())
        .chain(ctx.read(|front| front.categories()))
        .map(|c| Choice::new(c.clone(), c))
        .collect();

    let (cards, current, total_pages, total_items) = ctx.read(|front| {
        let listing = front.browse(&query, *page);
        let session = front.session();
        let cards: Vec<Html> = listing
            .items
            .iter()
            .filter_map(|game| front.priced_game(game.id))
            .map(|game| {
                let id = game.id;
                let rating = session.displayed_rating(&game);
                html! {
                    <GameCard
                        key={id}
                        favorite={session.is_favorite(id)}
                        owned={session.is_in_library(id)}
                        in_cart={session.is_in_cart(id)}
                        rating={rating}
                        game={game}
                        on_open={on_open.clone()}
                        on_favorite={on_favorite.clone()}
                        on_add_to_cart={on_add_to_cart.clone()}
                    />
                }
            })
            .collect();
        (cards, listing.number, listing.total_pages, listing.total_items)
    });

    let detail = (*selected).and_then(|id| {
        ctx.read(|front| {
            let session = front.session();
            front.priced_game(id).map(|game| {
                let rating = session.displayed_rating(&game);
                html! {
                    <GameDetail
                        rating={rating}
                        user_rating={session.user_rating(id)}
                        owned={session.is_in_library(id)}
                        in_wishlist={session.is_in_wishlist(id)}
                        game={game}
                        on_close={on_close.clone()}
                        on_buy={on_add_to_cart.clone()}
                        on_wishlist={on_wishlist.clone()}
                        on_rate={on_rate.clone()}
                    />
                }
            })
        })
    });

    let empty = if props.view == BrowseView::Favorites {
        "You have no favorite games yet."
    } else {
        "No games match your filters."
    };

    html! {
        <section class="catalog" aria-labelledby="catalog-heading">
            <div class="catalog__toolbar">
                <h1 id="catalog-heading">{ heading(props.view) }</h1>
                <span class="catalog__count">{ format!("{total_items} games") }</span>
                <TextField id="catalog-search" label="Search" placeholder="Search games" value={(*search).clone()} oninput={on_search} />
                <SelectField id="catalog-category" label="Category" value={(*category).clone()} choices={choices} on_change={on_category} />
            </div>
            if cards.is_empty() {
                <p class="catalog__empty">{ empty }</p>
            } else {
                <div class="catalog__grid">{ for cards }</div>
            }
            <Pagination current={current} total_pages={total_pages} on_change={on_page} />
            { detail.unwrap_or_default() }
        </section>
    }
}
