use serde::{Deserialize, Serialize};

/// Secondary selector shown under the tabs of screens that support it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubTab {
    #[default]
    New,
    Waiting,
    InProgress,
    Done,
}

impl SubTab {
    /// Wire value, as stored in the persisted record.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubTab::New => "new",
            SubTab::Waiting => "waiting",
            SubTab::InProgress => "in-progress",
            SubTab::Done => "done",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SubTab::New => "New",
            SubTab::Waiting => "Waiting",
            SubTab::InProgress => "In progress",
            SubTab::Done => "Done",
        }
    }

    /// All sub-tabs in display order.
    pub fn all() -> Vec<SubTab> {
        vec![SubTab::New, SubTab::Waiting, SubTab::InProgress, SubTab::Done]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "new" => Some(SubTab::New),
            "waiting" => Some(SubTab::Waiting),
            "in-progress" => Some(SubTab::InProgress),
            "done" => Some(SubTab::Done),
            _ => None,
        }
    }
}

impl std::fmt::Display for SubTab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
