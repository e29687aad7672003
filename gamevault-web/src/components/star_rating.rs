use gamevault_core::session::MAX_RATING;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    /// Stars currently lit, 0 when the user has not voted
    pub value: u8,
    #[prop_or_default]
    pub read_only: bool,
    #[prop_or_default]
    pub on_rate: Callback<u8>,
}

#[function_component(StarRating)]
pub fn star_rating(props: &Props) -> Html {
    html! {
        <div class="rating" role="radiogroup" aria-label="Your rating">
            { for (1..=MAX_RATING).map(|star| {
                let onclick = {
                    let cb = props.on_rate.clone();
                    Callback::from(move |_| cb.emit(star))
                };
                let mut class = classes!("rating__star");
                if star <= props.value {
                    class.push("rating__star--lit");
                }
                html! {
                    <button
                        type="button"
                        {class}
                        role="radio"
                        aria-checked={(star == props.value).to_string()}
                        aria-label={format!("{star} star rating")}
                        disabled={props.read_only}
                        {onclick}
                    >
                        {"★"}
                    </button>
                }
            }) }
        </div>
    }
}
