use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

pub(crate) const SESSION_KEY: &str = "gate_club_session";
pub(crate) const FEEDBACK_SOUND_KEY: &str = "gate_club_feedback_sound";

/// String key/value persistence. Writes are best-effort.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `window.localStorage`. Every call is a no-op when storage is unavailable
/// (private mode, sandboxed iframes).
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// In-memory store; clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(Rc<RefCell<HashMap<String, String>>>);

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.0.borrow_mut().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.0.borrow_mut().remove(key);
    }
}

/// Outcome of reading a JSON value: absent and unreadable are different
/// cases for callers that must clean up corrupt entries.
#[derive(Debug, PartialEq)]
pub(crate) enum Stored<T> {
    Missing,
    Corrupt,
    Found(T),
}

pub(crate) fn read_json<T: for<'de> Deserialize<'de>>(
    store: &impl KeyValueStore,
    key: &str,
) -> Stored<T> {
    match store.get(key) {
        None => Stored::Missing,
        Some(json) => match serde_json::from_str(&json) {
            Ok(v) => Stored::Found(v),
            Err(e) => {
                log::warn!("discarding unreadable {key}: {e}");
                Stored::Corrupt
            }
        },
    }
}

pub(crate) fn load_json<T: for<'de> Deserialize<'de>>(
    store: &impl KeyValueStore,
    key: &str,
) -> Option<T> {
    match read_json(store, key) {
        Stored::Found(v) => Some(v),
        _ => None,
    }
}

pub(crate) fn save_json<T: Serialize>(store: &impl KeyValueStore, key: &str, value: &T) {
    if let Ok(json) = serde_json::to_string(value) {
        store.set(key, &json);
    }
}

pub(crate) fn load_flag(store: &impl KeyValueStore, key: &str, default: bool) -> bool {
    store
        .get(key)
        .map(|v| v == "1" || v == "true")
        .unwrap_or(default)
}

pub(crate) fn save_flag(store: &impl KeyValueStore, key: &str, value: bool) {
    store.set(key, if value { "1" } else { "0" });
}
