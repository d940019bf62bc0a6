//! In-memory header store
//!
//! Keeps validated headers keyed by hash behind a read-write lock, so any
//! number of validators can read it concurrently while new headers are
//! added.

use parking_lot::RwLock;
use retarget_core::{Hash, HeaderLookup, HeaderRef};
use std::collections::HashMap;

/// Header store backed by a hash map
#[derive(Default)]
pub struct InMemoryHeaderStore {
    headers: RwLock<HashMap<Hash, HeaderRef>>,
}

impl InMemoryHeaderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a header, replacing any previous entry with the same hash
    pub fn insert(&self, header: HeaderRef) {
        self.headers.write().insert(header.hash, header);
    }

    /// Store a batch of headers under a single write lock
    pub fn extend<I: IntoIterator<Item = HeaderRef>>(&self, headers: I) {
        let mut map = self.headers.write();
        for header in headers {
            map.insert(header.hash, header);
        }
    }

    pub fn get(&self, hash: &Hash) -> Option<HeaderRef> {
        self.headers.read().get(hash).copied()
    }

    pub fn contains(&self, hash: &Hash) -> bool {
        self.headers.read().contains_key(hash)
    }

    pub fn remove(&self, hash: &Hash) -> Option<HeaderRef> {
        self.headers.write().remove(hash)
    }

    pub fn len(&self) -> usize {
        self.headers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.read().is_empty()
    }
}

impl FromIterator<HeaderRef> for InMemoryHeaderStore {
    fn from_iter<I: IntoIterator<Item = HeaderRef>>(iter: I) -> Self {
        let store = Self::new();
        store.extend(iter);
        store
    }
}

impl HeaderLookup for InMemoryHeaderStore {
    fn get_header(&self, hash: &Hash) -> Option<HeaderRef> {
        self.get(hash)
    }
}
