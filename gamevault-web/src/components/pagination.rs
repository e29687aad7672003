use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    /// 1-based
    pub current: usize,
    pub total_pages: usize,
    #[prop_or_default]
    pub on_change: Callback<usize>,
}

#[function_component(Pagination)]
pub fn pagination(props: &Props) -> Html {
    if props.total_pages <= 1 {
        return Html::default();
    }
    let current = props.current.clamp(1, props.total_pages);
    let go_to = |page: usize| {
        let cb = props.on_change.clone();
        Callback::from(move |_| cb.emit(page))
    };
    html! {
        <nav class="join pagination" aria-label="Pagination">
            <button class="join-item btn" disabled={current == 1} onclick={go_to(current - 1)}>{"«"}</button>
            { for (1..=props.total_pages).map(|page| {
                let mut class = classes!("join-item", "btn");
                if page == current {
                    class.push("btn-active");
                }
                html! {
                    <button {class} aria-current={(page == current).then_some("page")} onclick={go_to(page)}>
                        { page.to_string() }
                    </button>
                }
            }) }
            <button class="join-item btn" disabled={current == props.total_pages} onclick={go_to(current + 1)}>{"»"}</button>
        </nav>
    }
}
