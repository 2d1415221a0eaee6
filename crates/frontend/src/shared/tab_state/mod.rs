//! Leptos binding for the tab state controller.
//!
//! `use_tab_state` builds a controller backed by `localStorage` (when the
//! browser exposes it) and wraps it in a local signal so that reads made
//! inside views re-run on every change.

mod browser_storage;
mod tab_bar;

pub use browser_storage::BrowserStorage;
pub use tab_bar::{SubTabBar, TabBar};

use std::rc::Rc;

use contracts::shared::tab_state::{
    AuthControl, KeyValueStore, RegisterControl, ScreenPolicies, SubTab, TabStateController,
    TabStateError, TabStateOptions,
};
use leptos::prelude::*;

/// Handle returned to screens. Cheap to copy into closures.
#[derive(Clone, Copy)]
pub struct TabStateHandle {
    controller: RwSignal<TabStateController, LocalStorage>,
}

impl TabStateHandle {
    pub fn active(&self) -> String {
        self.controller.with(|c| c.active().to_string())
    }

    /// The allowed tabs. Fixed for the lifetime of the handle.
    pub fn list(&self) -> Vec<String> {
        self.controller.with_untracked(|c| c.list().to_vec())
    }

    pub fn active_sub_tab(&self) -> Option<SubTab> {
        self.controller.with(|c| c.active_sub_tab())
    }

    pub fn sub_list(&self) -> Option<Vec<SubTab>> {
        self.controller.with(|c| c.sub_list())
    }

    pub fn go_to(&self, tab: &str) {
        self.controller.update(|c| c.go_to(tab));
    }

    pub fn go_to_index(&self, index: usize) -> Result<(), TabStateError> {
        let mut result = Ok(());
        self.controller.update(|c| result = c.go_to_index(index));
        if let Err(e) = &result {
            log::warn!("{e}");
        }
        result
    }

    pub fn go_to_sub(&self, sub: SubTab) {
        self.controller.update(|c| c.go_to_sub(sub));
    }

    pub fn register_control(&self) -> RegisterControl {
        self.controller.with(|c| c.register_control())
    }

    pub fn show_register(&self) {
        self.controller.update(|c| c.show_register());
    }

    pub fn hide_register(&self) {
        self.controller.update(|c| c.hide_register());
    }

    pub fn auth_control(&self) -> AuthControl {
        self.controller.with(|c| c.auth_control())
    }

    pub fn switch_auth(&self) {
        self.controller.update(|c| c.switch_auth());
    }
}

/// Tab state for screen `name` using the built-in screen policies.
pub fn use_tab_state<I, S>(name: &str, default_tab: &str, list: I) -> TabStateHandle
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    use_tab_state_with(
        TabStateOptions::new(name, default_tab, list),
        &ScreenPolicies::builtin(),
    )
}

pub fn use_tab_state_with(options: TabStateOptions, policies: &ScreenPolicies) -> TabStateHandle {
    let store = BrowserStorage::detect().map(|s| Rc::new(s) as Rc<dyn KeyValueStore>);
    if store.is_none() {
        log::debug!("localStorage unavailable, tab state for {} is not persisted", options.name);
    }
    let controller = TabStateController::new(options, store, policies);
    TabStateHandle {
        controller: RwSignal::new_local(controller),
    }
}
