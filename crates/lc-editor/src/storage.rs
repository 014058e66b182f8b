//! Persistence of the element list.
//!
//! The page mirrors its elements into a string key-value store after
//! every change and reads them back on startup. `KeyValueStore` is the
//! seam: the browser bridge plugs in `localStorage`, tests use
//! `MemoryStore`.

use lc_core::id::ElementId;
use lc_core::model::Element;
use std::collections::HashMap;

/// A string key-value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    /// Returns a message if the backing store rejects the write
    /// (quota exceeded, storage disabled).
    fn set(&mut self, key: &str, value: &str) -> Result<(), String>;

    fn remove(&mut self, key: &str);
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Serialize `elements` as a JSON array under `key`.
///
/// # Errors
/// Returns the serializer or store error message.
pub fn save_elements(
    store: &mut dyn KeyValueStore,
    key: &str,
    elements: &[Element],
) -> Result<(), String> {
    let json = serde_json::to_string(elements).map_err(|e| e.to_string())?;
    store.set(key, &json)
}

/// Read the element list stored under `key`.
///
/// `Ok(None)` when nothing is stored. Ids are rewritten to match each
/// element's position, whatever the stored ids were.
///
/// # Errors
/// Returns the parse error message for malformed JSON or an element of
/// unknown type.
pub fn load_elements(store: &dyn KeyValueStore, key: &str) -> Result<Option<Vec<Element>>, String> {
    let Some(json) = store.get(key) else {
        return Ok(None);
    };
    let mut elements: Vec<Element> = serde_json::from_str(&json).map_err(|e| e.to_string())?;
    for (index, element) in elements.iter_mut().enumerate() {
        element.id = ElementId::new(index);
    }
    Ok(Some(elements))
}
