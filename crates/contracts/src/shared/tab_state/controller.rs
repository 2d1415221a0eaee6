use std::fmt;
use std::rc::Rc;

use super::error::TabStateError;
use super::policy::{ScreenPolicies, ScreenPolicy};
use super::record::{storage_key, PersistedTabs};
use super::storage::KeyValueStore;
use super::sub_tab::SubTab;

/// Construction parameters supplied by the owning screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabStateOptions {
    /// Screen identity, also the storage key suffix.
    pub name: String,
    /// Initially active tab. Not checked against `list`.
    pub default_tab: String,
    /// Allowed tab names, in display order.
    pub list: Vec<String>,
}

impl TabStateOptions {
    pub fn new<I, S>(name: &str, default_tab: &str, list: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            default_tab: default_tab.to_string(),
            list: list.into_iter().map(Into::into).collect(),
        }
    }
}

/// Mutable part of the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabState {
    pub active_tab: String,
    pub active_sub_tab: SubTab,
    pub is_register_new_user: bool,
    pub is_otp_auth: bool,
}

/// What consumers get to see. Sub-tab fields are `None` unless the screen
/// shows a sub-tab selector for the active tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabView {
    pub active: String,
    pub list: Vec<String>,
    pub active_sub_tab: Option<SubTab>,
    pub sub_list: Option<Vec<SubTab>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterControl {
    pub is_register_new_user: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthControl {
    pub is_otp_auth: bool,
}

type Observer = Box<dyn FnMut(&TabView)>;

/// Tab selection for one screen, restored from and saved to an optional
/// key-value store.
pub struct TabStateController {
    name: String,
    list: Vec<String>,
    policy: ScreenPolicy,
    store: Option<Rc<dyn KeyValueStore>>,
    state: TabState,
    observers: Vec<Observer>,
}

impl TabStateController {
    pub fn new(
        options: TabStateOptions,
        store: Option<Rc<dyn KeyValueStore>>,
        policies: &ScreenPolicies,
    ) -> Self {
        let TabStateOptions {
            name,
            default_tab,
            list,
        } = options;
        let policy = policies.get(&name);

        let mut controller = Self {
            name,
            list,
            policy,
            store,
            state: TabState {
                active_tab: default_tab,
                active_sub_tab: SubTab::default(),
                is_register_new_user: false,
                is_otp_auth: false,
            },
            observers: Vec::new(),
        };
        controller.restore();
        controller
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn storage_key(&self) -> String {
        storage_key(&self.name)
    }

    pub fn state(&self) -> &TabState {
        &self.state
    }

    pub fn active(&self) -> &str {
        &self.state.active_tab
    }

    pub fn list(&self) -> &[String] {
        &self.list
    }

    pub fn active_sub_tab(&self) -> Option<SubTab> {
        self.shows_sub_tabs().then_some(self.state.active_sub_tab)
    }

    pub fn sub_list(&self) -> Option<Vec<SubTab>> {
        self.shows_sub_tabs().then(SubTab::all)
    }

    pub fn view(&self) -> TabView {
        TabView {
            active: self.state.active_tab.clone(),
            list: self.list.clone(),
            active_sub_tab: self.active_sub_tab(),
            sub_list: self.sub_list(),
        }
    }

    pub fn go_to(&mut self, tab: &str) {
        self.state.active_tab = tab.to_string();
        self.changed();
    }

    /// Out-of-range indexes are rejected and leave the state untouched.
    pub fn go_to_index(&mut self, index: usize) -> Result<(), TabStateError> {
        let tab = self
            .list
            .get(index)
            .cloned()
            .ok_or(TabStateError::IndexOutOfRange {
                index,
                len: self.list.len(),
            })?;
        self.state.active_tab = tab;
        self.changed();
        Ok(())
    }

    pub fn go_to_sub(&mut self, sub: SubTab) {
        self.state.active_sub_tab = sub;
        self.changed();
    }

    pub fn register_control(&self) -> RegisterControl {
        RegisterControl {
            is_register_new_user: self.state.is_register_new_user,
        }
    }

    pub fn show_register(&mut self) {
        self.state.is_register_new_user = true;
    }

    pub fn hide_register(&mut self) {
        self.state.is_register_new_user = false;
    }

    pub fn auth_control(&self) -> AuthControl {
        AuthControl {
            is_otp_auth: self.state.is_otp_auth,
        }
    }

    pub fn switch_auth(&mut self) {
        self.state.is_otp_auth = !self.state.is_otp_auth;
    }

    /// Registers a callback run after every tab or sub-tab change, once the
    /// new selection has been saved.
    pub fn subscribe(&mut self, observer: impl FnMut(&TabView) + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn shows_sub_tabs(&self) -> bool {
        self.policy.shows_sub_tabs(&self.state.active_tab)
    }

    fn changed(&mut self) {
        self.save();
        if self.observers.is_empty() {
            return;
        }
        let view = self.view();
        for observer in self.observers.iter_mut() {
            observer(&view);
        }
    }

    fn restore(&mut self) {
        let Some(store) = &self.store else { return };
        let key = storage_key(&self.name);
        let Some(raw) = store.get(&key) else { return };
        let Some(record) = PersistedTabs::decode(&raw) else {
            log::debug!("ignoring malformed tab record under {key}");
            return;
        };

        if self.list.iter().any(|t| *t == record.active_tab) {
            self.state.active_tab = record.active_tab;
        } else {
            log::debug!(
                "ignoring stored tab '{}' for {}: not in list",
                record.active_tab,
                self.name
            );
        }

        if self.policy.supports_sub_tabs {
            if let Some(sub) = record.active_sub_tab.as_deref().and_then(SubTab::from_code) {
                self.state.active_sub_tab = sub;
            }
        }

        log::debug!(
            "restored {}: tab='{}', sub='{}'",
            self.name,
            self.state.active_tab,
            self.state.active_sub_tab
        );
    }

    fn save(&self) {
        if !self.policy.persists {
            return;
        }
        let Some(store) = &self.store else { return };

        let record = PersistedTabs {
            active_tab: self.state.active_tab.clone(),
            active_sub_tab: self.active_sub_tab().map(|s| s.as_str().to_string()),
        };
        let raw = match record.encode() {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("failed to encode tab record for {}: {e}", self.name);
                return;
            }
        };
        if let Err(e) = store.set(&storage_key(&self.name), &raw) {
            log::warn!("failed to save tab record for {}: {e}", self.name);
        }
    }
}

impl fmt::Debug for TabStateController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabStateController")
            .field("name", &self.name)
            .field("list", &self.list)
            .field("policy", &self.policy)
            .field("has_store", &self.store.is_some())
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::super::error::StorageError;
    use super::super::storage::MemoryStore;
    use super::*;

    const APP_TABS: [&str; 3] = ["home", "providers", "settings"];

    fn controller(name: &str, store: &Rc<MemoryStore>) -> TabStateController {
        let store: Rc<dyn KeyValueStore> = store.clone();
        TabStateController::new(
            TabStateOptions::new(name, "home", APP_TABS),
            Some(store),
            &ScreenPolicies::builtin(),
        )
    }

    struct FailingStore {
        writes: Cell<usize>,
    }

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            self.writes.set(self.writes.get() + 1);
            Err(StorageError::Write("quota exceeded".to_string()))
        }
    }

    #[test]
    fn test_defaults() {
        let store = Rc::new(MemoryStore::new());
        let c = controller("app", &store);
        assert_eq!(c.active(), "home");
        assert_eq!(c.active_sub_tab(), Some(SubTab::New));
        assert!(!c.register_control().is_register_new_user);
        assert!(!c.auth_control().is_otp_auth);
        assert!(store.is_empty());
    }

    #[test]
    fn test_sub_tabs_absent_for_other_screens() {
        let store = Rc::new(MemoryStore::new());
        let mut c = controller("orders", &store);
        for tab in APP_TABS {
            c.go_to(tab);
            let view = c.view();
            assert_eq!(view.active_sub_tab, None);
            assert_eq!(view.sub_list, None);
        }
        c.go_to_sub(SubTab::Done);
        assert_eq!(c.active_sub_tab(), None);
        assert_eq!(
            store.get("tabs-orders").as_deref(),
            Some(r#"{"activeTab":"settings"}"#)
        );
    }

    #[test]
    fn test_app_scenario() {
        let store = Rc::new(MemoryStore::new());
        let mut c = controller("app", &store);

        c.go_to("providers");
        let view = c.view();
        assert_eq!(view.active, "providers");
        assert_eq!(view.active_sub_tab, None);
        assert_eq!(view.sub_list, None);
        assert_eq!(
            store.get("tabs-app").as_deref(),
            Some(r#"{"activeTab":"providers"}"#)
        );

        c.go_to("settings");
        let view = c.view();
        assert_eq!(view.active_sub_tab, Some(SubTab::New));
        assert_eq!(
            view.sub_list,
            Some(vec![
                SubTab::New,
                SubTab::Waiting,
                SubTab::InProgress,
                SubTab::Done
            ])
        );
        assert_eq!(view.list, APP_TABS.map(String::from).to_vec());
    }

    #[test]
    fn test_round_trip_restores_tab_and_sub_tab() {
        let store = Rc::new(MemoryStore::new());
        let mut c = controller("app", &store);
        c.go_to("settings");
        c.go_to_sub(SubTab::Done);
        assert_eq!(
            store.get("tabs-app").as_deref(),
            Some(r#"{"activeTab":"settings","activeSubTab":"done"}"#)
        );

        let restored = controller("app", &store);
        assert_eq!(restored.active(), "settings");
        assert_eq!(restored.active_sub_tab(), Some(SubTab::Done));
    }

    #[test]
    fn test_profile_never_written() {
        let store = Rc::new(MemoryStore::new());
        let mut c = controller("profile", &store);
        c.go_to("settings");
        c.go_to_index(1).unwrap();
        assert!(store.is_empty());
        assert_eq!(c.active(), "providers");
    }

    #[test]
    fn test_profile_still_restores() {
        let store = Rc::new(MemoryStore::new());
        store
            .set("tabs-profile", r#"{"activeTab":"settings"}"#)
            .unwrap();
        let c = controller("profile", &store);
        assert_eq!(c.active(), "settings");
    }

    #[test]
    fn test_stored_tab_outside_list_ignored() {
        let store = Rc::new(MemoryStore::new());
        store
            .set("tabs-app", r#"{"activeTab":"billing","activeSubTab":"waiting"}"#)
            .unwrap();
        let c = controller("app", &store);
        assert_eq!(c.active(), "home");
        assert_eq!(c.active_sub_tab(), Some(SubTab::Waiting));
    }

    #[test]
    fn test_invalid_stored_sub_tab_ignored() {
        let store = Rc::new(MemoryStore::new());
        store
            .set("tabs-app", r#"{"activeTab":"settings","activeSubTab":"archived"}"#)
            .unwrap();
        let c = controller("app", &store);
        assert_eq!(c.active(), "settings");
        assert_eq!(c.active_sub_tab(), Some(SubTab::New));
    }

    #[test]
    fn test_malformed_record_ignored() {
        let store = Rc::new(MemoryStore::new());
        store.set("tabs-app", "{activeTab: settings").unwrap();
        let c = controller("app", &store);
        assert_eq!(c.active(), "home");
        assert_eq!(c.active_sub_tab(), Some(SubTab::New));
    }

    #[test]
    fn test_sub_tab_not_restored_for_other_screens() {
        let store = Rc::new(MemoryStore::new());
        store
            .set("tabs-orders", r#"{"activeTab":"settings","activeSubTab":"done"}"#)
            .unwrap();
        let c = controller("orders", &store);
        assert_eq!(c.active(), "settings");
        assert_eq!(c.state().active_sub_tab, SubTab::New);
    }

    #[test]
    fn test_without_store() {
        let mut c = TabStateController::new(
            TabStateOptions::new("app", "home", APP_TABS),
            None,
            &ScreenPolicies::builtin(),
        );
        c.go_to("settings");
        c.go_to_sub(SubTab::InProgress);
        assert_eq!(c.active(), "settings");
        assert_eq!(c.active_sub_tab(), Some(SubTab::InProgress));
    }

    #[test]
    fn test_go_to_index() {
        let store = Rc::new(MemoryStore::new());
        let mut c = controller("app", &store);
        c.go_to_index(2).unwrap();
        assert_eq!(c.active(), "settings");

        assert_eq!(
            c.go_to_index(3),
            Err(TabStateError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(c.active(), "settings");
    }

    #[test]
    fn test_register_control() {
        let store = Rc::new(MemoryStore::new());
        let mut c = controller("app", &store);
        c.show_register();
        assert!(c.register_control().is_register_new_user);
        c.show_register();
        assert!(c.register_control().is_register_new_user);
        c.hide_register();
        assert!(!c.register_control().is_register_new_user);
    }

    #[test]
    fn test_switch_auth_twice() {
        let store = Rc::new(MemoryStore::new());
        let mut c = controller("app", &store);
        let before = c.auth_control().is_otp_auth;
        c.switch_auth();
        assert_ne!(c.auth_control().is_otp_auth, before);
        c.switch_auth();
        assert_eq!(c.auth_control().is_otp_auth, before);
    }

    #[test]
    fn test_flags_do_not_save() {
        let store = Rc::new(MemoryStore::new());
        let mut c = controller("app", &store);
        c.switch_auth();
        c.show_register();
        assert!(store.is_empty());
    }

    #[test]
    fn test_observers_see_each_change() {
        let store = Rc::new(MemoryStore::new());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut c = controller("app", &store);
        let sink = seen.clone();
        c.subscribe(move |view| sink.borrow_mut().push(view.clone()));

        c.go_to("providers");
        c.go_to_sub(SubTab::Waiting);
        c.switch_auth();
        assert!(c.go_to_index(9).is_err());

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].active, "providers");
        assert_eq!(seen[0].active_sub_tab, None);
        assert_eq!(seen[1].active_sub_tab, None);
    }

    #[test]
    fn test_write_failure_keeps_state() {
        let store = Rc::new(FailingStore {
            writes: Cell::new(0),
        });
        let dyn_store: Rc<dyn KeyValueStore> = store.clone();
        let mut c = TabStateController::new(
            TabStateOptions::new("app", "home", APP_TABS),
            Some(dyn_store),
            &ScreenPolicies::builtin(),
        );
        c.go_to("settings");
        c.go_to_sub(SubTab::Done);
        assert_eq!(store.writes.get(), 2);
        assert_eq!(c.active(), "settings");
        assert_eq!(c.active_sub_tab(), Some(SubTab::Done));
    }
}
