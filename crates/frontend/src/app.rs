use crate::shared::tab_state::{use_tab_state, SubTabBar, TabBar};
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let tabs = use_tab_state("app", "home", ["home", "providers", "settings"]);
    // never persisted, see ScreenPolicies::builtin
    let profile = use_tab_state("profile", "account", ["account", "security"]);

    view! {
        <main class="app-main">
            <TabBar state=tabs />
            <SubTabBar state=tabs />
            <section class="details-section">
                {move || {
                    let sub = tabs.active_sub_tab().map(|s| s.display_name()).unwrap_or("-");
                    format!("{} / {}", tabs.active(), sub)
                }}
            </section>

            <TabBar state=profile />
            <section class="details-section">
                <Show
                    when=move || profile.register_control().is_register_new_user
                    fallback=move || view! {
                        <button type="button" on:click=move |_| profile.show_register()>
                            "Create account"
                        </button>
                    }
                >
                    <button type="button" on:click=move |_| profile.hide_register()>
                        "Back to sign in"
                    </button>
                </Show>
                <label>
                    <input
                        type="checkbox"
                        prop:checked=move || profile.auth_control().is_otp_auth
                        on:change=move |_| profile.switch_auth()
                    />
                    "Sign in with a one-time code"
                </label>
            </section>
        </main>
    }
}
