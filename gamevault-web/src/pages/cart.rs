//! Cart listing, totals and the simulated card checkout.
use crate::components::field::TextField;
use crate::components::game_card::price_tag;
use crate::state::use_vault;
use crate::view::View;
use gamevault_core::numbers::format_price;
use gamevault_core::{CheckoutPhase, GameId, PaymentForm};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    #[prop_or_default]
    pub on_navigate: Callback<View>,
}

#[function_component(CartPage)]
pub fn cart_page(props: &Props) -> Html {
    let ctx = use_vault();
    let form = use_state(PaymentForm::default);
    let paying = use_state(|| false);

    let phase = ctx.read(|front| front.session().checkout_phase());
    if let CheckoutPhase::Succeeded { count } = phase {
        let on_done = {
            let (ctx, nav, form, paying) = (
                ctx.clone(),
                props.on_navigate.clone(),
                form.clone(),
                paying.clone(),
            );
            Callback::from(move |_| {
                ctx.act(|front| front.session_mut().reset_checkout());
                form.set(PaymentForm::default());
                paying.set(false);
                nav.emit(View::Library);
            })
        };
        return html! {
            <section class="cart cart--done" aria-live="polite">
                <h1>{"Payment successful"}</h1>
                <p>{ format!("{count} game(s) were added to your library.") }</p>
                <button id="go-library" type="button" class="btn btn-primary" onclick={on_done}>{"Go to library"}</button>
            </section>
        };
    }

    let (rows, totals) = ctx.read(|front| {
        let session = front.session();
        (session.cart().to_vec(), session.cart_totals())
    });
    if rows.is_empty() {
        let to_store = {
            let nav = props.on_navigate.clone();
            Callback::from(move |_| nav.emit(View::Home))
        };
        return html! {
            <section class="cart cart--empty">
                <h1>{"Your cart is empty"}</h1>
                <button type="button" class="btn" onclick={to_store}>{"Browse the store"}</button>
            </section>
        };
    }

    let on_remove = {
        let ctx = ctx.clone();
        Callback::from(move |id: GameId| {
            ctx.act(|front| front.session_mut().remove_from_cart(id));
        })
    };
    let on_clear = {
        let ctx = ctx.clone();
        Callback::from(move |_| ctx.act(|front| front.session_mut().clear_cart()))
    };
    let on_pay = {
        let paying = paying.clone();
        Callback::from(move |_| paying.set(true))
    };
    let edit = |apply: fn(&mut PaymentForm, &str)| {
        let form = form.clone();
        Callback::from(move |raw: String| {
            let mut next = (*form).clone();
            apply(&mut next, &raw);
            form.set(next);
        })
    };
    let on_submit = {
        let (ctx, form) = (ctx.clone(), form.clone());
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            ctx.checkout(&form);
        })
    };
    let processing = phase.is_processing();

    let checkout = if *paying {
        html! {
            <form id="checkout-form" class="checkout" onsubmit={on_submit}>
                <h2>{"Payment details"}</h2>
                <TextField id="card-name" label="Name on card" value={form.card_name.clone()} disabled={processing} oninput={edit(PaymentForm::set_card_name)} />
                <TextField id="card-number" label="Card number" placeholder="0000 0000 0000 0000" value={form.card_number.clone()} disabled={processing} oninput={edit(PaymentForm::set_card_number)} />
                <TextField id="card-expiry" label="Expiry" placeholder="MM/YY" value={form.expiry.clone()} disabled={processing} oninput={edit(PaymentForm::set_expiry)} />
                <TextField id="card-cvv" label="CVV" placeholder="123" value={form.cvv.clone()} disabled={processing} oninput={edit(PaymentForm::set_cvv)} />
                <button id="checkout-submit" type="submit" class="btn btn-primary w-full" disabled={processing}>
                    { if processing { "Processing payment...".to_string() } else { format!("Pay {}", format_price(totals.total_cents)) } }
                </button>
            </form>
        }
    } else {
        html! {
            <button id="checkout-open" type="button" class="btn btn-primary w-full" onclick={on_pay}>{"Proceed to checkout"}</button>
        }
    };

    html! {
        <section class="cart" aria-labelledby="cart-heading">
            <h1 id="cart-heading">{ format!("Cart ({})", rows.len()) }</h1>
            <ul class="cart__items">
                { for rows.iter().map(|game| {
                    let id = game.id;
                    let remove = {
                        let cb = on_remove.clone();
                        Callback::from(move |_| cb.emit(id))
                    };
                    html! {
                        <li key={id} class="cart__item">
                            <img src={game.cover_image.clone()} alt={game.title.clone()} />
                            <span class="cart__title">{ game.title.clone() }</span>
                            { price_tag(game) }
                            <button type="button" class="btn btn-ghost btn-sm" aria-label={format!("Remove {}", game.title)} disabled={processing} onclick={remove}>
                                {"Remove"}
                            </button>
                        </li>
                    }
                }) }
            </ul>
            <aside class="cart__summary">
                <dl>
                    <dt>{"Original total"}</dt>
                    <dd>{ format_price(totals.original_total_cents) }</dd>
                    if totals.discount_cents > 0 {
                        <dt>{ format!("Discount ({}%)", totals.discount_rate) }</dt>
                        <dd class="cart__discount">{ format!("-{}", format_price(totals.discount_cents)) }</dd>
                    }
                    <dt>{"Total"}</dt>
                    <dd class="cart__total">{ format_price(totals.total_cents) }</dd>
                </dl>
                { checkout }
                <button id="cart-clear" type="button" class="btn btn-ghost" disabled={processing} onclick={on_clear}>{"Clear cart"}</button>
            </aside>
        </section>
    }
}
