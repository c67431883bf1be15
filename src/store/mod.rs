pub mod disk;
pub mod memory;

use crate::core::selection::SelectionList;
use crate::core::state::{ApplicationState, default_favorites};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Key of the main state blob.
pub const STATE_KEY: &str = "currencyAppState";

/// Key of the favorites list, stored apart so it survives a corrupt state blob.
pub const FAVORITES_KEY: &str = "top7FiatCodes";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(#[from] fjall::Error),
    #[error("stored value is not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A durable string key-value store.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Loads and saves the application snapshot. Never fails: reads fall back to
/// defaults and write errors are only logged.
#[derive(Clone)]
pub struct StateStore {
    backend: Arc<dyn KeyValueStore>,
}

impl StateStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// A store that forgets everything when dropped.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(memory::MemoryStore::new()))
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.backend.get(key) {
            Ok(Some(raw)) => Some(raw),
            Ok(None) => {
                debug!("No saved value for {}", key);
                None
            }
            Err(e) => {
                warn!("Failed to read {}: {}", key, e);
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) {
        match self.backend.put(key, value) {
            Ok(()) => debug!("Saved {}", key),
            Err(e) => warn!("Failed to save {}: {}", key, e),
        }
    }

    pub fn load(&self) -> ApplicationState {
        self.read(STATE_KEY)
            .and_then(|raw| match serde_json::from_str(&raw) {
                Ok(state) => Some(state),
                Err(e) => {
                    warn!("Discarding unreadable saved state: {}", e);
                    None
                }
            })
            .unwrap_or_default()
    }

    pub fn save(&self, state: &ApplicationState) {
        match serde_json::to_string(state) {
            Ok(json) => self.write(STATE_KEY, &json),
            Err(e) => warn!("Failed to serialize state: {}", e),
        }
    }

    /// Reads the favorites list. Anything other than a non-empty array of
    /// distinct strings yields the default list.
    pub fn load_favorites(&self) -> SelectionList {
        self.read(FAVORITES_KEY)
            .and_then(|raw| match serde_json::from_str::<SelectionList>(&raw) {
                Ok(list) if !list.is_empty() => Some(list),
                Ok(_) => {
                    warn!("Saved favorites are empty");
                    None
                }
                Err(e) => {
                    warn!("Discarding unreadable favorites: {}", e);
                    None
                }
            })
            .unwrap_or_else(default_favorites)
    }

    pub fn save_favorites(&self, favorites: &SelectionList) {
        match serde_json::to_string(favorites) {
            Ok(json) => self.write(FAVORITES_KEY, &json),
            Err(e) => warn!("Failed to serialize favorites: {}", e),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::state::View;
    use memory::MemoryStore;

    /// Accepts reads, rejects every write.
    pub(crate) struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }

        fn put(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("quota exceeded".to_string()))
        }
    }

    fn store_with(key: &str, value: &str) -> StateStore {
        let backend = MemoryStore::new();
        backend.put(key, value).unwrap();
        StateStore::new(Arc::new(backend))
    }

    #[test]
    fn test_first_run_returns_defaults() {
        let store = StateStore::in_memory();
        assert_eq!(store.load(), ApplicationState::default());
        assert_eq!(store.load_favorites(), default_favorites());
    }

    #[test]
    fn test_save_then_load() {
        let store = StateStore::in_memory();
        let mut state = ApplicationState::default();
        state.view = View::History;
        state.amount = "42.5".to_string();
        state.target_unit_codes = state.target_unit_codes.set_at(0, "BTC").unwrap();
        store.save(&state);

        assert_eq!(store.load(), state);
        // favorites untouched by a state save
        assert_eq!(store.load_favorites(), default_favorites());
    }

    #[test]
    fn test_corrupt_state_falls_back() {
        assert_eq!(
            store_with(STATE_KEY, "{not json").load(),
            ApplicationState::default()
        );
        assert_eq!(
            store_with(STATE_KEY, r#"{"view":0}"#).load(),
            ApplicationState::default()
        );
        assert_eq!(
            store_with(STATE_KEY, "[1,2,3]").load(),
            ApplicationState::default()
        );
    }

    #[test]
    fn test_favorites_survive_corrupt_state() {
        let backend = Arc::new(MemoryStore::new());
        let store = StateStore::new(backend.clone());
        let favorites = default_favorites().set_at(0, "BTC").unwrap();
        store.save_favorites(&favorites);
        backend.put(STATE_KEY, "garbage").unwrap();

        assert_eq!(store.load(), ApplicationState::default());
        assert_eq!(store.load_favorites(), favorites);
    }

    #[test]
    fn test_invalid_favorites_fall_back() {
        for raw in ["[]", "[1, 2]", r#"{"a": 1}"#, r#"["USD", "USD"]"#, "nope", "null"] {
            assert_eq!(
                store_with(FAVORITES_KEY, raw).load_favorites(),
                default_favorites(),
                "{raw}"
            );
        }
    }

    #[test]
    fn test_favorites_of_any_length_are_kept() {
        let store = store_with(FAVORITES_KEY, r#"["CHF", "SEK"]"#);
        let favorites = store.load_favorites();
        assert_eq!(favorites.as_slice(), &["CHF", "SEK"]);
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let store = StateStore::new(Arc::new(ReadOnlyStore));
        store.save(&ApplicationState::default());
        store.save_favorites(&default_favorites());
        assert_eq!(store.load(), ApplicationState::default());
    }
}
