//! Mock sign-in dialog. The password is collected for realism and discarded.
use super::field::TextField;
use super::modal::Modal;
use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

/// Name and email submitted by the dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub name: String,
    pub email: String,
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub open: bool,
    pub on_close: Callback<()>,
    pub on_submit: Callback<(AuthMode, Credentials)>,
    #[prop_or_default]
    pub initial_mode: AuthMode,
}

#[function_component(AuthModal)]
pub fn auth_modal(props: &Props) -> Html {
    let mode = use_state(|| props.initial_mode);
    let name = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);

    let clear = {
        let (name, email, password) = (name.clone(), email.clone(), password.clone());
        move || {
            name.set(String::new());
            email.set(String::new());
            password.set(String::new());
        }
    };
    let switch_to = |target: AuthMode| {
        let mode = mode.clone();
        let clear = clear.clone();
        Callback::from(move |_| {
            mode.set(target);
            clear();
        })
    };
    let on_submit = {
        let cb = props.on_submit.clone();
        let (mode, name, email) = (mode.clone(), name.clone(), email.clone());
        let clear = clear.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            cb.emit((
                *mode,
                Credentials {
                    name: (*name).clone(),
                    email: (*email).clone(),
                },
            ));
            clear();
        })
    };
    let set = |handle: &UseStateHandle<String>| {
        let handle = handle.clone();
        Callback::from(move |value: String| handle.set(value))
    };

    let (name_label, submit_label) = match *mode {
        AuthMode::Login => ("Username", "Sign in"),
        AuthMode::Register => ("Full name", "Create account"),
    };
    let tab_class = |target: AuthMode| {
        let mut class = classes!("tab");
        if *mode == target {
            class.push("tab-active");
        }
        class
    };

    html! {
        <Modal open={props.open} title="Join GameVault" on_close={props.on_close.clone()}>
            <div class="tabs tabs-boxed" role="tablist">
                <button type="button" role="tab" class={tab_class(AuthMode::Login)} onclick={switch_to(AuthMode::Login)}>{"Sign in"}</button>
                <button type="button" role="tab" class={tab_class(AuthMode::Register)} onclick={switch_to(AuthMode::Register)}>{"Register"}</button>
            </div>
            <form id="auth-form" class="auth-form" onsubmit={on_submit}>
                <TextField id="auth-name" label={name_label} value={(*name).clone()} oninput={set(&name)} />
                <TextField id="auth-email" label="Email" input_type="email" placeholder="you@example.com" value={(*email).clone()} oninput={set(&email)} />
                <TextField id="auth-password" label="Password" input_type="password" value={(*password).clone()} oninput={set(&password)} />
                <button id="auth-submit" type="submit" class="btn btn-primary w-full">{ submit_label }</button>
            </form>
        </Modal>
    }
}
