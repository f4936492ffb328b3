//! Meta store abstraction.
//!
//! Field values live in a flat key-value table per content item. Keys are
//! built by joining the schema path with row indices, e.g. `tabs_0_title`.

use std::collections::HashMap;
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::MetaValue;

/// Content item (post/page) identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u64);

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Read access to per-item meta values.
pub trait MetaStore: Send + Sync {
    /// Get the value stored under `key` for `item`, `None` when absent.
    fn get(&self, item: ItemId, key: &str) -> Option<MetaValue>;
}

impl<S: MetaStore + ?Sized> MetaStore for &S {
    fn get(&self, item: ItemId, key: &str) -> Option<MetaValue> {
        (**self).get(item, key)
    }
}

/// Error loading a meta store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O error reading the store file.
    #[error("Failed to read meta store {}: {source}", path.display())]
    Io {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// JSON parse error.
    #[error("Invalid meta store JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// Top-level key is not a numeric item id.
    #[error("Invalid item id '{0}'")]
    InvalidItemId(String),
}

/// Meta store loaded from a JSON document.
///
/// The document maps item ids to flat key-value objects:
///
/// ```json
/// { "42": { "tabs": 1, "tabs_0_title": "Intro", "tabs_0_content": "Hello" } }
/// ```
#[derive(Debug, Default)]
pub struct JsonMetaStore {
    items: HashMap<ItemId, HashMap<String, MetaValue>>,
}

impl JsonMetaStore {
    /// Parse a store from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the JSON is malformed or an item id is not numeric.
    pub fn from_json_str(json: &str) -> Result<Self, StoreError> {
        Self::from_raw(serde_json::from_str(json)?)
    }

    /// Parse a store from a reader.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the JSON is malformed or an item id is not numeric.
    pub fn from_reader(reader: impl Read) -> Result<Self, StoreError> {
        Self::from_raw(serde_json::from_reader(reader)?)
    }

    /// Load a store from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::from_reader(std::io::BufReader::new(file))?;
        tracing::debug!(path = %path.display(), items = store.items.len(), "Loaded meta store");
        Ok(store)
    }

    fn from_raw(raw: HashMap<String, HashMap<String, MetaValue>>) -> Result<Self, StoreError> {
        let items = raw
            .into_iter()
            .map(|(id, meta)| {
                let id = id
                    .trim()
                    .parse()
                    .map_err(|_| StoreError::InvalidItemId(id.clone()))?;
                Ok((ItemId(id), meta))
            })
            .collect::<Result<_, StoreError>>()?;
        Ok(Self { items })
    }

    /// Number of items in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the store has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl MetaStore for JsonMetaStore {
    fn get(&self, item: ItemId, key: &str) -> Option<MetaValue> {
        self.items.get(&item)?.get(key).cloned()
    }
}
