use crate::catalog::{WebCatalog, bundled_config};
use crate::components::auth_modal::{AuthModal, AuthMode, Credentials};
use crate::components::header::Header;
use crate::components::toast::ToastStackView;
use crate::pages::cart::CartPage;
use crate::pages::catalog::CatalogPage;
use crate::pages::library::LibraryPage;
use crate::pages::wishlist::WishlistPage;
use crate::state::{Revision, SharedVault, VaultContext, VaultState, use_vault};
use crate::view::View;
use gamevault_core::{SessionStore, Storefront};
use yew::prelude::*;

#[cfg(target_arch = "wasm32")]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn session_seed() -> u64 {
    js_sys::Date::now().max(0.0) as u64
}

#[cfg(not(target_arch = "wasm32"))]
const fn session_seed() -> u64 {
    0
}

/// Storefront over the bundled catalog; empty when the bundle is unreadable.
#[must_use]
pub fn fallback_storefront() -> Storefront {
    let cfg = bundled_config();
    let seed = session_seed();
    Storefront::open(&WebCatalog, cfg.clone(), seed).unwrap_or_else(|err| {
        log::error!("bundled catalog unreadable: {err}");
        Storefront::from_parts(Vec::new(), SessionStore::new(cfg, seed))
    })
}

#[derive(Properties, PartialEq)]
pub struct VaultProviderProps {
    /// Pre-built state; a fresh storefront is opened when absent.
    #[prop_or_default]
    pub vault: Option<SharedVault>,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(VaultProvider)]
pub fn vault_provider(props: &VaultProviderProps) -> Html {
    let shared = use_state(|| {
        props
            .vault
            .clone()
            .unwrap_or_else(|| SharedVault::new(VaultState::new(fallback_storefront())))
    });
    let revision = use_reducer(Revision::default);
    let ctx = VaultContext::new(shared.0.clone(), revision);

    #[cfg(target_arch = "wasm32")]
    {
        let ctx = ctx.clone();
        use_effect_with((), move |()| {
            wasm_bindgen_futures::spawn_local(async move {
                let games = crate::catalog::load_catalog().await;
                if !games.is_empty() {
                    ctx.act(|front| front.set_catalog(games));
                }
            });
            || {}
        });
    }

    html! {
        <ContextProvider<VaultContext> context={ctx}>
            { for props.children.iter() }
        </ContextProvider<VaultContext>>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct ShellProps {
    #[prop_or_default]
    pub initial_view: View,
}

#[function_component(Shell)]
pub fn shell(props: &ShellProps) -> Html {
    let ctx = use_vault();
    let view = use_state(|| props.initial_view);

    let (user, cart_count, auth_open) = ctx.read(|front| {
        let session = front.session();
        (
            session.user().cloned(),
            session.cart().len(),
            session.auth_prompt_open(),
        )
    });

    let on_navigate = {
        let (ctx, view) = (ctx.clone(), view.clone());
        Callback::from(move |target: View| {
            let signed_in = ctx.read(|front| front.session().user().is_some());
            if target.needs_user() && !signed_in {
                ctx.act(|front| front.session_mut().set_auth_prompt(true));
            } else {
                view.set(target);
            }
        })
    };
    let on_sign_in = {
        let ctx = ctx.clone();
        Callback::from(move |()| ctx.act(|front| front.session_mut().set_auth_prompt(true)))
    };
    let on_sign_out = {
        let (ctx, view) = (ctx.clone(), view.clone());
        Callback::from(move |()| {
            ctx.act(|front| front.session_mut().logout());
            view.set(View::Home);
        })
    };
    let on_auth_close = {
        let ctx = ctx.clone();
        Callback::from(move |()| ctx.act(|front| front.session_mut().set_auth_prompt(false)))
    };
    let on_auth_submit = {
        let ctx = ctx.clone();
        Callback::from(move |(mode, creds): (AuthMode, Credentials)| {
            let _ = ctx.act(|front| {
                let session = front.session_mut();
                match mode {
                    AuthMode::Login => session.login(&creds.name, &creds.email).map(|_| ()),
                    AuthMode::Register => session.register(&creds.name, &creds.email).map(|_| ()),
                }
            });
        })
    };
    let on_dismiss = {
        let ctx = ctx.clone();
        Callback::from(move |id: u64| ctx.dismiss_toast(id))
    };

    let page = match *view {
        View::Cart => html! { <CartPage on_navigate={on_navigate.clone()} /> },
        View::Library => html! { <LibraryPage on_navigate={on_navigate.clone()} /> },
        View::Wishlist => html! { <WishlistPage on_navigate={on_navigate.clone()} /> },
        other => html! { <CatalogPage view={other.browse().unwrap_or_default()} /> },
    };

    html! {
        <>
            <Header
                current={*view}
                user={user}
                cart_count={cart_count}
                on_navigate={on_navigate}
                on_sign_in={on_sign_in}
                on_sign_out={on_sign_out}
            />
            <main id="main" class="container">
                { page }
            </main>
            <AuthModal open={auth_open} on_close={on_auth_close} on_submit={on_auth_submit} />
            <ToastStackView toasts={ctx.toasts()} on_dismiss={on_dismiss} />
        </>
    }
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <VaultProvider>
            <Shell />
        </VaultProvider>
    }
}
