use gamevault_core::{PaymentForm, Storefront, TickOutcome};
use gamevault_web::app::{Shell, VaultProvider};
use gamevault_web::catalog::{WebCatalog, bundled_config};
use gamevault_web::state::{SharedVault, VaultState};
use gamevault_web::view::View;
use futures::executor::block_on;
use yew::prelude::*;
use yew::LocalServerRenderer;

#[derive(Properties, PartialEq)]
struct HarnessProps {
    vault: SharedVault,
    view: View,
}

#[function_component(Harness)]
fn harness(props: &HarnessProps) -> Html {
    html! {
        <VaultProvider vault={Some(props.vault.clone())}>
            <Shell initial_view={props.view} />
        </VaultProvider>
    }
}

fn vault(setup: impl FnOnce(&mut Storefront)) -> SharedVault {
    let mut front = Storefront::open(&WebCatalog, bundled_config(), 7).expect("bundled catalog");
    setup(&mut front);
    let mut state = VaultState::new(front);
    let _ = state.apply(|_| ());
    SharedVault::new(state)
}

fn signed_in(front: &mut Storefront) {
    front.session_mut().login("Ada", "ada@x.com").expect("login");
}

fn render(vault: SharedVault, view: View) -> String {
    block_on(LocalServerRenderer::<Harness>::with_props(HarnessProps { vault, view }).render())
}

#[test]
fn home_shows_first_page_of_catalog() {
    let html = render(vault(|_| {}), View::Home);
    assert_eq!(html.matches("data-game-id=").count(), 8);
    assert!(html.contains("32 games"));
    assert!(html.contains("Pagination"));
    assert!(html.contains("sign-in-btn"));
}

#[test]
fn gated_action_opens_sign_in_and_toasts() {
    let html = render(
        vault(|front| {
            let _ = front.add_to_cart(1);
        }),
        View::Home,
    );
    assert!(html.contains("auth-form"));
    assert!(html.contains("alert-error"));
}

#[test]
fn cart_lists_items_and_totals() {
    let html = render(
        vault(|front| {
            signed_in(front);
            front.add_to_cart(3).expect("add sale game");
            front.add_to_cart(9).expect("add free game");
        }),
        View::Cart,
    );
    assert!(html.contains("Cart (2)"));
    assert!(html.contains("$47.00"));
    assert!(html.contains("Free"));
    assert!(html.contains("checkout-open"));
}

#[test]
fn finished_checkout_shows_success() {
    let html = render(
        vault(|front| {
            signed_in(front);
            front.add_to_cart(5).expect("add");
            let mut form = PaymentForm::default();
            form.set_card_name("Ada Lovelace");
            form.set_card_number("4242424242424242");
            form.set_expiry("1229");
            form.set_cvv("123");
            front.session_mut().begin_checkout(&form).expect("valid form");
            front.session_mut().complete_checkout();
        }),
        View::Cart,
    );
    assert!(html.contains("Payment successful"));
    assert!(html.contains("go-library"));
}

#[test]
fn library_reflects_install_state() {
    let html = render(
        vault(|front| {
            signed_in(front);
            front.add_to_cart(5).expect("add");
            front.session_mut().purchase_games();
        }),
        View::Library,
    );
    assert!(html.contains("0 of 1 installed"));
    assert!(html.contains("Install"));

    let html = render(
        vault(|front| {
            signed_in(front);
            front.add_to_cart(5).expect("add");
            front.session_mut().purchase_games();
            let ticket = front.session_mut().install_game(5).expect("owned");
            while front.session_mut().tick_install(ticket) != TickOutcome::Completed {}
        }),
        View::Library,
    );
    assert!(html.contains("1 of 1 installed"));
    assert!(html.contains("Ready to play"));
}

#[test]
fn pending_install_counts_as_installing() {
    let html = render(
        vault(|front| {
            signed_in(front);
            front.add_to_cart(5).expect("add");
            front.session_mut().purchase_games();
            front.session_mut().install_game(5).expect("owned");
        }),
        View::Library,
    );
    assert!(html.contains("Installing 0%"));
}

#[test]
fn wishlist_separates_upcoming_games() {
    let html = render(
        vault(|front| {
            signed_in(front);
            front.add_to_wishlist(22).expect("wishlist upcoming");
            front.add_to_wishlist(14).expect("wishlist released");
        }),
        View::Wishlist,
    );
    assert!(html.contains("1 released, 1 upcoming"));
    assert!(html.contains("Notify me"));
    assert!(html.contains("Add to cart"));
}

#[test]
fn empty_library_links_back_to_store() {
    let html = render(vault(signed_in), View::Library);
    assert!(html.contains("Your library is empty"));
}
