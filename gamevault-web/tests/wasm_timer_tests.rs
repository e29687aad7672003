#![cfg(target_arch = "wasm32")]

use gamevault_core::{CheckoutPhase, PaymentForm, StoreConfig, Storefront};
use gamevault_web::app::VaultProvider;
use gamevault_web::catalog::WebCatalog;
use gamevault_web::dom;
use gamevault_web::state::{SharedVault, VaultState, use_vault};
use wasm_bindgen_test::*;
use yew::prelude::*;

wasm_bindgen_test_configure!(run_in_browser);

const CHECKOUT_DELAY_MS: u32 = 20;

fn mount_point() -> web_sys::Element {
    let doc = web_sys::window()
        .and_then(|w| w.document())
        .expect("document");
    let root = doc.create_element("div").expect("create root");
    doc.body()
        .expect("document body")
        .append_child(&root)
        .expect("append root");
    root
}

fn paying_vault() -> SharedVault {
    let cfg = StoreConfig {
        checkout_delay_ms: CHECKOUT_DELAY_MS,
        ..StoreConfig::default()
    };
    let mut front = Storefront::open(&WebCatalog, cfg, 11).expect("bundled catalog");
    front.session_mut().login("Ada", "ada@x.com").expect("login");
    front.add_to_cart(5).expect("add");
    SharedVault::new(VaultState::new(front))
}

#[function_component(PayOnMount)]
fn pay_on_mount() -> Html {
    let ctx = use_vault();
    use_effect_with((), move |()| {
        let mut form = PaymentForm::default();
        form.set_card_name("Ada Lovelace");
        form.set_card_number("4242424242424242");
        form.set_expiry("1229");
        form.set_cvv("123");
        assert!(ctx.checkout(&form));
        || {}
    });
    html! {}
}

#[derive(Properties, PartialEq)]
struct HarnessProps {
    vault: SharedVault,
}

#[function_component(Harness)]
fn harness(props: &HarnessProps) -> Html {
    html! {
        <VaultProvider vault={Some(props.vault.clone())}>
            <PayOnMount />
        </VaultProvider>
    }
}

#[wasm_bindgen_test]
async fn sleep_resolves_after_the_delay() {
    dom::sleep_ms(5).await.expect("timer fires");
}

#[wasm_bindgen_test]
async fn checkout_completes_once_the_timer_fires() {
    let vault = paying_vault();
    yew::Renderer::<Harness>::with_root_and_props(
        mount_point(),
        HarnessProps {
            vault: vault.clone(),
        },
    )
    .render();

    dom::sleep_ms(CHECKOUT_DELAY_MS * 10).await.expect("timer fires");

    let state = vault.0.borrow();
    let session = state.storefront.session();
    assert_eq!(session.checkout_phase(), CheckoutPhase::Succeeded { count: 1 });
    assert!(session.is_in_library(5));
    assert!(session.cart().is_empty());
}

#[wasm_bindgen_test]
fn report_accepts_plain_and_error_values() {
    dom::report("checkout timer", &wasm_bindgen::JsValue::from_str("boom"));
    dom::report("checkout timer", &js_sys::Error::new("kaboom").into());
    assert_eq!(
        dom::js_error_message(&js_sys::Error::new("kaboom").into()),
        "kaboom"
    );
}
