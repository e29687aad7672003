use crate::view::View;
use gamevault_core::User;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub current: View,
    pub user: Option<User>,
    pub cart_count: usize,
    pub on_navigate: Callback<View>,
    pub on_sign_in: Callback<()>,
    pub on_sign_out: Callback<()>,
}

#[function_component(Header)]
pub fn header(p: &Props) -> Html {
    let nav_item = |view: View| {
        let onclick = {
            let cb = p.on_navigate.clone();
            Callback::from(move |_| cb.emit(view))
        };
        let mut class = classes!("nav__item");
        if view == p.current {
            class.push("nav__item--active");
        }
        let label = if view == View::Cart && p.cart_count > 0 {
            format!("{} ({})", view.label(), p.cart_count)
        } else {
            view.label().to_string()
        };
        html! {
            <button type="button" {class} aria-current={(view == p.current).then_some("page")} {onclick}>
                { label }
            </button>
        }
    };
    let account = p.user.as_ref().map_or_else(
        || {
            let cb = p.on_sign_in.clone();
            html! {
                <button id="sign-in-btn" type="button" class="btn btn-primary" onclick={Callback::from(move |_| cb.emit(()))}>
                    {"Sign in"}
                </button>
            }
        },
        |user| {
            let cb = p.on_sign_out.clone();
            html! {
                <div class="header__account">
                    <span class="header__user">{ user.name.clone() }</span>
                    <button id="sign-out-btn" type="button" class="btn btn-ghost" onclick={Callback::from(move |_| cb.emit(()))}>
                        {"Sign out"}
                    </button>
                </div>
            }
        },
    );
    html! {
        <header role="banner" class="header">
            <div class="header__brand">{"GameVault"}</div>
            <nav aria-label="Store sections" class="header__nav">
                { for View::NAV.into_iter().map(nav_item) }
            </nav>
            { account }
        </header>
    }
}
