use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::error::PolicyError;

/// Per-screen behaviour switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScreenPolicy {
    /// The screen carries a sub-tab selector.
    pub supports_sub_tabs: bool,
    /// Tab selection is written to the key-value store.
    pub persists: bool,
    /// Tabs on which the sub-tab selector is hidden.
    pub sub_tabs_hidden_on: Vec<String>,
}

impl Default for ScreenPolicy {
    fn default() -> Self {
        Self {
            supports_sub_tabs: false,
            persists: true,
            sub_tabs_hidden_on: Vec::new(),
        }
    }
}

impl ScreenPolicy {
    /// Whether the sub-tab selector is visible while `active_tab` is selected.
    pub fn shows_sub_tabs(&self, active_tab: &str) -> bool {
        self.supports_sub_tabs && !self.sub_tabs_hidden_on.iter().any(|t| t == active_tab)
    }
}

/// Screen name -> policy. Screens missing from the table get [`ScreenPolicy::default`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScreenPolicies {
    screens: HashMap<String, ScreenPolicy>,
}

impl ScreenPolicies {
    /// The table the application ships with: `app` has sub-tabs (hidden on
    /// `providers`) and `profile` is never persisted.
    pub fn builtin() -> Self {
        let mut policies = Self::default();
        policies.insert(
            "app",
            ScreenPolicy {
                supports_sub_tabs: true,
                persists: true,
                sub_tabs_hidden_on: vec!["providers".to_string()],
            },
        );
        policies.insert(
            "profile",
            ScreenPolicy {
                persists: false,
                ..ScreenPolicy::default()
            },
        );
        policies
    }

    /// Parse a table from JSON, e.g. `{"app": {"supportsSubTabs": true}}`.
    pub fn from_json(raw: &str) -> Result<Self, PolicyError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn insert(&mut self, name: impl Into<String>, policy: ScreenPolicy) {
        self.screens.insert(name.into(), policy);
    }

    pub fn get(&self, name: &str) -> ScreenPolicy {
        self.screens.get(name).cloned().unwrap_or_default()
    }
}
