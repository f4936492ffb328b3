//! Mock meta store for testing.
//!
//! Provides [`MockMetaStore`] for unit testing without a host database.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::store::{ItemId, MetaStore};
use crate::MetaValue;

/// In-memory meta store that counts reads.
///
/// Build it with [`MockMetaStore::with_meta`], one call per stored key, then
/// hand it to a [`Resolver`](crate::Resolver). Requires the `mock` feature
/// outside this crate's own tests.
#[derive(Debug, Default)]
pub struct MockMetaStore {
    values: RwLock<HashMap<(ItemId, String), MetaValue>>,
    reads: AtomicUsize,
}

impl MockMetaStore {
    /// Create a new empty mock store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_meta(
        self,
        item: ItemId,
        key: impl Into<String>,
        value: impl Into<MetaValue>,
    ) -> Self {
        self.set(item, key, value);
        self
    }

    /// Set or replace a value.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn set(&self, item: ItemId, key: impl Into<String>, value: impl Into<MetaValue>) {
        self.values
            .write()
            .unwrap()
            .insert((item, key.into()), value.into());
    }

    /// Number of `get` calls served so far.
    #[must_use]
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }
}

impl MetaStore for MockMetaStore {
    fn get(&self, item: ItemId, key: &str) -> Option<MetaValue> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        self.values
            .read()
            .unwrap()
            .get(&(item, key.to_owned()))
            .cloned()
    }
}
