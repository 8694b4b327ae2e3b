use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;

use crate::error::AppResult;

/// Logical catalog store a key belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreNamespace {
    Tracks,
    Artists,
    ArtistNeighbours,
    PersonalTop,
}

impl StoreNamespace {
    fn prefix(&self) -> &'static str {
        match self {
            StoreNamespace::Tracks => "track",
            StoreNamespace::Artists => "artist",
            StoreNamespace::ArtistNeighbours => "artist_neighbours",
            StoreNamespace::PersonalTop => "personal_top",
        }
    }
}

/// Fully qualified key of a catalog record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StoreKey {
    pub namespace: StoreNamespace,
    pub id: i64,
}

impl StoreKey {
    pub fn new(namespace: StoreNamespace, id: i64) -> Self {
        Self { namespace, id }
    }
}

impl Display for StoreKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.namespace.prefix(), self.id)
    }
}

/// Read-only keyed lookup over one catalog store
///
/// `Ok(None)` means the key is cleanly absent. Transport failures must be
/// returned as errors, never folded into `None`.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait KeyedStore: Send + Sync {
    async fn get(&self, id: i64) -> AppResult<Option<Vec<u8>>>;

    /// Store name for logging
    fn name(&self) -> &'static str;
}

/// The four catalog stores the recommenders read from
#[derive(Clone)]
pub struct CatalogStores {
    pub tracks: Arc<dyn KeyedStore>,
    pub artists: Arc<dyn KeyedStore>,
    pub artist_neighbours: Arc<dyn KeyedStore>,
    pub personal_top: Arc<dyn KeyedStore>,
}

/// In-memory store for tests and local runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    name: &'static str,
    entries: HashMap<i64, Vec<u8>>,
}

impl MemoryStore {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: HashMap::new(),
        }
    }

    /// Adds a record, serialized as the catalog stores hold it
    pub fn with_record<T: serde::Serialize>(mut self, id: i64, record: &T) -> AppResult<Self> {
        self.entries.insert(id, super::codec::encode(record)?);
        Ok(self)
    }

    /// Adds raw bytes under `id`
    pub fn with_raw(mut self, id: i64, bytes: impl Into<Vec<u8>>) -> Self {
        self.entries.insert(id, bytes.into());
        self
    }
}

#[async_trait::async_trait]
impl KeyedStore for MemoryStore {
    async fn get(&self, id: i64) -> AppResult<Option<Vec<u8>>> {
        Ok(self.entries.get(&id).cloned())
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
