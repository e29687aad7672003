//! Owned games with search, install filter, sort order and install controls.
use crate::components::field::{Choice, SelectField, TextField};
use crate::state::use_vault;
use crate::view::View;
use gamevault_core::install::INSTALL_COMPLETE;
use gamevault_core::{GameId, InstallState, LibraryFilter, LibraryQuery, LibrarySort};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    #[prop_or_default]
    pub on_navigate: Callback<View>,
}

fn filter_from(value: &str) -> LibraryFilter {
    match value {
        "installed" => LibraryFilter::Installed,
        "not-installed" => LibraryFilter::NotInstalled,
        _ => LibraryFilter::All,
    }
}

fn sort_from(value: &str) -> LibrarySort {
    match value {
        "name" => LibrarySort::Name,
        "rating" => LibrarySort::Rating,
        _ => LibrarySort::Recent,
    }
}

const fn filter_value(filter: LibraryFilter) -> &'static str {
    match filter {
        LibraryFilter::All => "all",
        LibraryFilter::Installed => "installed",
        LibraryFilter::NotInstalled => "not-installed",
    }
}

const fn sort_value(sort: LibrarySort) -> &'static str {
    match sort {
        LibrarySort::Recent => "recent",
        LibrarySort::Name => "name",
        LibrarySort::Rating => "rating",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Layout {
    #[default]
    Grid,
    List,
}

#[function_component(LibraryPage)]
pub fn library_page(props: &Props) -> Html {
    let ctx = use_vault();
    let query = use_state(LibraryQuery::default);
    let layout = use_state(Layout::default);

    let (rows, stats) = ctx.read(|front| {
        let session = front.session();
        let rows: Vec<_> = query
            .apply(session.library(), session.ratings())
            .into_iter()
            .map(|entry| {
                let ticking = session.active_install(entry.id()).is_some();
                (entry.clone(), ticking)
            })
            .collect();
        (rows, session.library_stats())
    });

    if stats.total == 0 {
        let to_store = {
            let nav = props.on_navigate.clone();
            Callback::from(move |_| nav.emit(View::Home))
        };
        return html! {
            <section class="library library--empty">
                <h1>{"Your library is empty"}</h1>
                <p>{"Games you buy will show up here."}</p>
                <button type="button" class="btn" onclick={to_store}>{"Browse the store"}</button>
            </section>
        };
    }

    let update = |change: fn(&mut LibraryQuery, &str)| {
        let query = query.clone();
        Callback::from(move |raw: String| {
            let mut next = (*query).clone();
            change(&mut next, &raw);
            query.set(next);
        })
    };
    let on_install = {
        let ctx = ctx.clone();
        Callback::from(move |id: GameId| ctx.install(id))
    };
    let on_uninstall = {
        let ctx = ctx.clone();
        Callback::from(move |id: GameId| {
            let _ = ctx.act(|front| front.session_mut().uninstall_game(id));
        })
    };
    let set_layout = |target: Layout| {
        let layout = layout.clone();
        Callback::from(move |_| layout.set(target))
    };

    let filter_choices = vec![
        Choice::new("all", "All"),
        Choice::new("installed", "Installed"),
        Choice::new("not-installed", "Not installed"),
    ];
    let sort_choices = vec![
        Choice::new("recent", "Recently purchased"),
        Choice::new("name", "Name"),
        Choice::new("rating", "Rating"),
    ];
    let list_class = match *layout {
        Layout::Grid => "library__items library__items--grid",
        Layout::List => "library__items library__items--list",
    };

    html! {
        <section class="library" aria-labelledby="library-heading">
            <div class="library__toolbar">
                <h1 id="library-heading">{"Library"}</h1>
                <span class="library__stats">{ format!("{} of {} installed", stats.installed, stats.total) }</span>
                <TextField id="library-search" label="Search" value={query.search.clone()} oninput={update(|q, raw| q.search = raw.to_string())} />
                <SelectField id="library-filter" label="Show" value={filter_value(query.filter)} choices={filter_choices} on_change={update(|q, raw| q.filter = filter_from(raw))} />
                <SelectField id="library-sort" label="Sort by" value={sort_value(query.sort)} choices={sort_choices} on_change={update(|q, raw| q.sort = sort_from(raw))} />
                <div class="join" role="group" aria-label="Layout">
                    <button type="button" class="join-item btn btn-sm" aria-pressed={(*layout == Layout::Grid).to_string()} onclick={set_layout(Layout::Grid)}>{"Grid"}</button>
                    <button type="button" class="join-item btn btn-sm" aria-pressed={(*layout == Layout::List).to_string()} onclick={set_layout(Layout::List)}>{"List"}</button>
                </div>
            </div>
            if rows.is_empty() {
                <p class="library__empty">{"No games match your filters."}</p>
            }
            <ul class={list_class}>
                { for rows.iter().map(|(entry, ticking)| {
                    let id = entry.id();
                    let emit = |cb: &Callback<GameId>| {
                        let cb = cb.clone();
                        Callback::from(move |_| cb.emit(id))
                    };
                    let state = match entry.install_state() {
                        // A ticker that has not fired yet still counts as installing.
                        InstallState::NotInstalled if *ticking => InstallState::Installing(0),
                        state => state,
                    };
                    let controls = match state {
                        InstallState::NotInstalled => html! {
                            <button type="button" class="btn btn-primary btn-sm" onclick={emit(&on_install)}>{"Install"}</button>
                        },
                        InstallState::Installing(progress) => html! {
                            <div class="library__progress">
                                <progress class="progress" value={progress.to_string()} max={INSTALL_COMPLETE.to_string()}></progress>
                                <span>{ format!("Installing {progress}%") }</span>
                                <button type="button" class="btn btn-ghost btn-sm" onclick={emit(&on_uninstall)}>{"Cancel"}</button>
                            </div>
                        },
                        InstallState::Installed => html! {
                            <>
                                <span class="badge badge-success">{"Ready to play"}</span>
                                <button type="button" class="btn btn-ghost btn-sm" onclick={emit(&on_uninstall)}>{"Uninstall"}</button>
                            </>
                        },
                    };
                    html! {
                        <li key={id} class="library__item" data-game-id={id.to_string()}>
                            <img src={entry.game.cover_image.clone()} alt={entry.game.title.clone()} />
                            <div class="library__info">
                                <h3>{ entry.game.title.clone() }</h3>
                                <span class="badge">{ entry.game.category.clone() }</span>
                                <span>{ format!("Purchased {}", entry.purchased_at.format("%Y-%m-%d")) }</span>
                            </div>
                            <div class="library__controls">{ controls }</div>
                        </li>
                    }
                }) }
            </ul>
        </section>
    }
}
