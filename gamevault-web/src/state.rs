//! Shared storefront state handed to every view through a Yew context.
use gamevault_core::{GameId, Notice, PaymentForm, Severity, Storefront};
use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;

/// Toasts beyond this count push out the oldest one.
pub const MAX_TOASTS: usize = 4;
pub const TOAST_TTL_MS: u32 = 4_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct ToastStack {
    next_id: u64,
    items: Vec<Toast>,
}

impl ToastStack {
    pub fn push(&mut self, notice: Notice) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Toast {
            id,
            severity: notice.severity,
            message: notice.message,
        });
        if self.items.len() > MAX_TOASTS {
            let overflow = self.items.len() - MAX_TOASTS;
            self.items.drain(..overflow);
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|toast| toast.id != id);
        self.items.len() != before
    }

    #[must_use]
    pub fn items(&self) -> &[Toast] {
        &self.items
    }
}

/// Storefront plus the toasts its notices turned into.
#[derive(Debug)]
pub struct VaultState {
    pub storefront: Storefront,
    pub toasts: ToastStack,
}

impl VaultState {
    #[must_use]
    pub fn new(storefront: Storefront) -> Self {
        Self {
            storefront,
            toasts: ToastStack::default(),
        }
    }

    /// Run a storefront mutation and move its notices onto the toast stack.
    /// Returns the mutation result and the ids of the new toasts.
    pub fn apply<R>(&mut self, f: impl FnOnce(&mut Storefront) -> R) -> (R, Vec<u64>) {
        let out = f(&mut self.storefront);
        let fresh = self
            .storefront
            .session_mut()
            .drain_notices()
            .into_iter()
            .map(|notice| self.toasts.push(notice))
            .collect();
        (out, fresh)
    }
}

/// Handle to a vault built outside the component tree.
#[derive(Debug, Clone)]
pub struct SharedVault(pub Rc<RefCell<VaultState>>);

impl SharedVault {
    #[must_use]
    pub fn new(state: VaultState) -> Self {
        Self(Rc::new(RefCell::new(state)))
    }
}

impl PartialEq for SharedVault {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Bumped after every mutation so context consumers re-render.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Revision(pub u64);

impl Reducible for Revision {
    type Action = ();

    fn reduce(self: Rc<Self>, (): ()) -> Rc<Self> {
        Rc::new(Self(self.0.wrapping_add(1)))
    }
}

#[derive(Clone)]
pub struct VaultContext {
    state: Rc<RefCell<VaultState>>,
    revision: UseReducerHandle<Revision>,
}

impl PartialEq for VaultContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state) && self.revision.0 == other.revision.0
    }
}

impl VaultContext {
    #[must_use]
    pub const fn new(state: Rc<RefCell<VaultState>>, revision: UseReducerHandle<Revision>) -> Self {
        Self { state, revision }
    }

    pub fn read<R>(&self, f: impl FnOnce(&Storefront) -> R) -> R {
        f(&self.state.borrow().storefront)
    }

    pub fn act<R>(&self, f: impl FnOnce(&mut Storefront) -> R) -> R {
        let (out, fresh) = self.state.borrow_mut().apply(f);
        for id in fresh {
            self.schedule_dismiss(id);
        }
        self.revision.dispatch(());
        out
    }

    #[must_use]
    pub fn toasts(&self) -> Vec<Toast> {
        self.state.borrow().toasts.items().to_vec()
    }

    pub fn dismiss_toast(&self, id: u64) {
        if self.state.borrow_mut().toasts.dismiss(id) {
            self.revision.dispatch(());
        }
    }

    /// Start installing an owned game and keep ticking it in the background.
    pub fn install(&self, id: GameId) {
        let started = self.act(|front| front.session_mut().install_game(id).ok());
        if let Some(ticket) = started {
            self.spawn_install(ticket);
        }
    }

    /// Validate the payment form; on success finish the purchase after the
    /// simulated processing delay. Returns whether processing started.
    pub fn checkout(&self, form: &PaymentForm) -> bool {
        let started = self.act(|front| front.session_mut().begin_checkout(form).is_ok());
        if started {
            self.spawn_checkout_completion();
        }
        started
    }

    #[cfg(target_arch = "wasm32")]
    fn spawn_install(&self, ticket: gamevault_core::InstallTicket) {
        let ctx = self.clone();
        let tick_ms = self.read(|front| front.session().config().install_tick_ms);
        wasm_bindgen_futures::spawn_local(async move {
            loop {
                if let Err(err) = crate::dom::sleep_ms(tick_ms).await {
                    crate::dom::report("install timer", &err);
                    break;
                }
                let outcome = ctx.act(|front| front.session_mut().tick_install(ticket));
                if !outcome.keep_ticking() {
                    break;
                }
            }
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn spawn_install(&self, ticket: gamevault_core::InstallTicket) {
        log::debug!("no browser timers; install for {} left pending", ticket.game_id);
    }

    #[cfg(target_arch = "wasm32")]
    fn spawn_checkout_completion(&self) {
        let ctx = self.clone();
        let delay_ms = self.read(|front| front.session().config().checkout_delay_ms);
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = crate::dom::sleep_ms(delay_ms).await {
                crate::dom::report("checkout timer", &err);
            }
            ctx.act(|front| front.session_mut().complete_checkout());
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn spawn_checkout_completion(&self) {
        self.act(|front| front.session_mut().complete_checkout());
    }

    #[cfg(target_arch = "wasm32")]
    fn schedule_dismiss(&self, id: u64) {
        let ctx = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = crate::dom::sleep_ms(TOAST_TTL_MS).await {
                crate::dom::report("toast timer", &err);
            }
            ctx.dismiss_toast(id);
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn schedule_dismiss(&self, _id: u64) {}
}

/// The provided vault context. Outside a provider this logs and hands back a
/// throwaway storefront so the view still renders.
#[hook]
pub fn use_vault() -> VaultContext {
    let provided = use_context::<VaultContext>();
    let revision = use_reducer(Revision::default);
    provided.unwrap_or_else(|| {
        log::error!("use_vault called outside of VaultProvider");
        let state = VaultState::new(crate::app::fallback_storefront());
        VaultContext::new(Rc::new(RefCell::new(state)), revision)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamevault_core::{StaticCatalog, StoreConfig};

    fn vault() -> VaultState {
        let front = Storefront::open(&StaticCatalog::bundled(), StoreConfig::default(), 3)
            .expect("bundled catalog");
        VaultState::new(front)
    }

    #[test]
    fn apply_turns_notices_into_toasts() {
        let mut state = vault();
        let (res, fresh) = state.apply(|front| front.add_to_cart(1));
        assert!(res.is_err());
        assert_eq!(fresh.len(), 1);
        assert_eq!(state.toasts.items()[0].severity, Severity::Error);
        assert!(state.storefront.session().auth_prompt_open());
    }

    #[test]
    fn toast_stack_caps_and_dismisses() {
        let mut stack = ToastStack::default();
        let ids: Vec<u64> = (0..6)
            .map(|i| stack.push(Notice::new(Severity::Info, format!("n{i}"))))
            .collect();
        assert_eq!(stack.items().len(), MAX_TOASTS);
        assert_eq!(stack.items()[0].message, "n2");
        assert!(stack.dismiss(ids[5]));
        assert!(!stack.dismiss(ids[0]));
        assert_eq!(stack.items().len(), MAX_TOASTS - 1);
    }
}
