//! Persisted view state.
//!
//! Each browser instance owns one [`ViewState`] record, stored as a bincode
//! blob under the instance name through a [`StateProvider`]. The browser
//! loads it once when opened and stores it once per render; hosts must
//! serialize requests per (session, instance) pair, nothing here locks
//! across that span.

mod memory;
mod sqlite;

pub use memory::*;
pub use sqlite::*;

use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::error::StateError;
use crate::filter::QuickJump;
use crate::order::OrderStack;

/// Everything a browser instance remembers between requests.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewState {
    /// Current order stack.
    pub order: OrderStack,
    /// Order seeded by `set_default_order`, restored by a reset request.
    pub default_order: Option<OrderStack>,
    pub keyword: Option<String>,
    pub quickjump: QuickJump,
    pub offset: usize,
    /// Chosen page size; `None` until the first render picks one.
    pub per_page: Option<usize>,
    /// Set after the first render. Default orders no longer apply once set.
    pub first_display: bool,
}

/// Backend trait for raw view state storage.
///
/// Implementations handle raw byte storage and retrieval; the
/// [`StateProvider`] wraps them with typed serialization.
pub trait StateStore: Send + Sync {
    /// Get raw bytes for a key.
    fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, StateError>;

    /// Set raw bytes for a key.
    fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), StateError>;

    /// Delete a key.
    fn delete(&self, key: &str) -> Result<(), StateError>;

    /// Get all keys starting with `prefix`.
    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StateError>;
}

/// Typed view state access over a [`StateStore`].
///
/// Cheap to clone. [`StateProvider::scoped`] narrows a provider to one
/// session so instance names only need to be unique per session.
///
/// # Example
///
/// ```
/// use gbrowse_lib::state::{MemoryStore, StateProvider};
///
/// let provider = StateProvider::new(MemoryStore::new());
/// let session = provider.scoped("session-42");
///
/// let mut state = session.load("contacts").unwrap();
/// state.offset = 10;
/// session.store("contacts", &state).unwrap();
/// assert_eq!(session.load("contacts").unwrap().offset, 10);
/// ```
#[derive(Clone)]
pub struct StateProvider {
    store: Arc<dyn StateStore>,
    scope: String,
}

impl StateProvider {
    /// Create a new provider with the given backend.
    pub fn new(store: impl StateStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
            scope: String::new(),
        }
    }

    /// A provider whose keys live under `session`.
    pub fn scoped(&self, session: &str) -> Self {
        Self {
            store: Arc::clone(&self.store),
            scope: format!("{}{}/", self.scope, session),
        }
    }

    fn key(&self, instance: &str) -> String {
        format!("{}{}", self.scope, instance)
    }

    /// Loads the state of `instance`, or defaults on first use.
    ///
    /// A stored blob that no longer decodes is replaced by defaults.
    pub fn load(&self, instance: &str) -> Result<ViewState, StateError> {
        let key = self.key(instance);
        match self.store.get_bytes(&key)? {
            Some(bytes) => match bincode::deserialize(&bytes) {
                Ok(state) => {
                    log::debug!("loaded view state for '{}'", key);
                    Ok(state)
                }
                Err(e) => {
                    log::warn!("discarding undecodable view state for '{}': {}", key, e);
                    Ok(ViewState::default())
                }
            },
            None => Ok(ViewState::default()),
        }
    }

    /// Stores the state of `instance`.
    pub fn store(&self, instance: &str, state: &ViewState) -> Result<(), StateError> {
        let key = self.key(instance);
        let bytes = bincode::serialize(state).map_err(StateError::Serialization)?;
        self.store.set_bytes(&key, bytes)?;
        log::debug!("stored view state for '{}'", key);
        Ok(())
    }

    /// Deletes the state of `instance`.
    pub fn delete(&self, instance: &str) -> Result<(), StateError> {
        self.store.delete(&self.key(instance))
    }

    /// Instance names with stored state directly in this scope.
    pub fn instances(&self) -> Result<Vec<String>, StateError> {
        let mut names: Vec<String> = self
            .store
            .keys_with_prefix(&self.scope)?
            .into_iter()
            .filter_map(|key| key.strip_prefix(&self.scope).map(str::to_string))
            .filter(|name| !name.contains('/'))
            .collect();
        names.sort();
        Ok(names)
    }
}
