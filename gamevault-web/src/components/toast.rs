use crate::state::Toast;
use gamevault_core::Severity;
use yew::prelude::*;

const fn alert_class(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "alert-success",
        Severity::Error => "alert-error",
        Severity::Info => "alert-info",
        Severity::Warning => "alert-warning",
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub toasts: Vec<Toast>,
    #[prop_or_default]
    pub on_dismiss: Callback<u64>,
}

#[function_component(ToastStackView)]
pub fn toast_stack_view(props: &Props) -> Html {
    html! {
        <div class="toast toast-end" aria-live="polite">
            { for props.toasts.iter().map(|toast| {
                let id = toast.id;
                let onclick = {
                    let cb = props.on_dismiss.clone();
                    Callback::from(move |_| cb.emit(id))
                };
                html! {
                    <div key={id} class={classes!("alert", alert_class(toast.severity))} role="status">
                        <span>{ toast.message.clone() }</span>
                        <button type="button" class="btn btn-ghost btn-xs" aria-label="Dismiss" {onclick}>{"×"}</button>
                    </div>
                }
            }) }
        </div>
    }
}
