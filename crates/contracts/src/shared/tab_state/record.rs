use serde::{Deserialize, Serialize};

const KEY_PREFIX: &str = "tabs-";

/// Storage key for a screen's record.
pub fn storage_key(name: &str) -> String {
    format!("{KEY_PREFIX}{name}")
}

/// Record written to the key-value store after every tab change.
///
/// Values are kept as raw strings so that an unrecognised sub-tab does not
/// throw away an otherwise usable `activeTab`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedTabs {
    pub active_tab: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_sub_tab: Option<String>,
}

impl PersistedTabs {
    /// Returns `None` for anything that is not a well-formed record.
    pub fn decode(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
