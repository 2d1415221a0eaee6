//! Tab selection state for a screen.
//!
//! A [`TabStateController`] tracks the active tab of a named screen and, for
//! screens whose [`ScreenPolicy`] enables it, an active [`SubTab`]. When a
//! [`KeyValueStore`] is supplied the selection is restored from the
//! `tabs-<name>` record on creation and written back after every change.

pub mod controller;
pub mod error;
pub mod policy;
pub mod record;
pub mod storage;
pub mod sub_tab;

pub use controller::{
    AuthControl, RegisterControl, TabState, TabStateController, TabStateOptions, TabView,
};
pub use error::{PolicyError, StorageError, TabStateError};
pub use policy::{ScreenPolicies, ScreenPolicy};
pub use record::{storage_key, PersistedTabs};
pub use storage::{KeyValueStore, MemoryStore};
pub use sub_tab::SubTab;
