//! Detail dialog: trailer for upcoming games, purchase actions and the
//! user's star vote for released ones.
use super::game_card::price_tag;
use super::modal::Modal;
use super::star_rating::StarRating;
use gamevault_core::pricing::format_rating;
use gamevault_core::{Game, GameId};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub game: Game,
    pub rating: f64,
    #[prop_or_default]
    pub user_rating: Option<u8>,
    #[prop_or_default]
    pub owned: bool,
    #[prop_or_default]
    pub in_wishlist: bool,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub on_buy: Callback<GameId>,
    #[prop_or_default]
    pub on_wishlist: Callback<GameId>,
    #[prop_or_default]
    pub on_rate: Callback<(GameId, u8)>,
}

#[function_component(GameDetail)]
pub fn game_detail(props: &Props) -> Html {
    let game = &props.game;
    let id = game.id;
    let upcoming = game.is_upcoming.unwrap_or(false);

    let on_buy = {
        let (cb, close) = (props.on_buy.clone(), props.on_close.clone());
        Callback::from(move |_| {
            cb.emit(id);
            close.emit(());
        })
    };
    let on_wishlist = {
        let cb = props.on_wishlist.clone();
        Callback::from(move |_| cb.emit(id))
    };
    let on_rate = {
        let cb = props.on_rate.clone();
        Callback::from(move |stars: u8| cb.emit((id, stars)))
    };

    let media = if upcoming {
        game.trailer_url.as_ref().map_or_else(
            || html! { <div class="detail__trailer detail__trailer--pending">{"Trailer coming soon"}</div> },
            |url| html! {
                <iframe class="detail__trailer" src={url.clone()} title={format!("{} trailer", game.title)} allow="fullscreen" />
            },
        )
    } else {
        html! { <img class="detail__cover" src={game.cover_image.clone()} alt={game.title.clone()} /> }
    };

    let wishlist_label = if props.in_wishlist { "On your wishlist" } else { "Add to wishlist" };
    let purchase = if upcoming {
        html! {}
    } else if props.owned {
        html! { <span class="badge badge-neutral">{"In library"}</span> }
    } else {
        html! { <button id="detail-buy" type="button" class="btn btn-primary" onclick={on_buy}>{"Buy now"}</button> }
    };
    let vote = if upcoming {
        html! {}
    } else {
        html! {
            <section class="detail__vote">
                <h3>{"Your rating"}</h3>
                <StarRating value={props.user_rating.unwrap_or(0)} on_rate={on_rate} />
            </section>
        }
    };

    html! {
        <Modal open=true title={game.title.clone()} on_close={props.on_close.clone()}>
            <div class="detail">
                { media }
                <p class="detail__meta">
                    <span class="badge">{ game.category.clone() }</span>
                    { if upcoming { html! { <span class="badge badge-secondary">{"Coming soon"}</span> } } else { html! {} } }
                    <span>{ format!("Release: {}", game.release_date) }</span>
                    <span>{ format!("★ {}", format_rating(props.rating)) }</span>
                </p>
                { vote }
                <div class="detail__actions">
                    { if upcoming { html! {} } else { price_tag(game) } }
                    <button id="detail-wishlist" type="button" class="btn" disabled={props.in_wishlist || props.owned} onclick={on_wishlist}>
                        { wishlist_label }
                    </button>
                    { purchase }
                </div>
            </div>
        </Modal>
    }
}
