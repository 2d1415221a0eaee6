use leptos::prelude::*;

use super::TabStateHandle;

fn item_class(active: bool) -> &'static str {
    if active {
        "detail-tabs__item detail-tabs__item--active"
    } else {
        "detail-tabs__item"
    }
}

/// Row of buttons, one per tab in the handle's list.
#[component]
pub fn TabBar(state: TabStateHandle) -> impl IntoView {
    view! {
        <div class="detail-tabs">
            {state.list().into_iter().map(|tab| {
                let current = tab.clone();
                let target = tab.clone();
                view! {
                    <button
                        type="button"
                        class=move || item_class(state.active() == current)
                        on:click=move |_| state.go_to(&target)
                    >
                        {tab}
                    </button>
                }
            }).collect_view()}
        </div>
    }
}

/// Sub-tab row. Renders nothing while sub-tabs are hidden for the active tab.
#[component]
pub fn SubTabBar(state: TabStateHandle) -> impl IntoView {
    move || {
        state.sub_list().map(|subs| {
            view! {
                <div class="detail-tabs detail-tabs--sub">
                    {subs.into_iter().map(|sub| {
                        view! {
                            <button
                                type="button"
                                class=move || item_class(state.active_sub_tab() == Some(sub))
                                on:click=move |_| state.go_to_sub(sub)
                            >
                                {sub.display_name()}
                            </button>
                        }
                    }).collect_view()}
                </div>
            }
        })
    }
}
