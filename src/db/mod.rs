pub mod codec;
pub mod redis;
pub mod store;

pub use codec::Decode;
pub use self::redis::{connect, create_redis_client, RedisStore};
pub use store::{CatalogStores, KeyedStore, MemoryStore, StoreKey, StoreNamespace};

use std::sync::Arc;

/// Builds the catalog stores over a single Redis connection
pub fn redis_catalog(conn: ::redis::aio::ConnectionManager) -> CatalogStores {
    CatalogStores {
        tracks: Arc::new(RedisStore::new(conn.clone(), StoreNamespace::Tracks, "tracks")),
        artists: Arc::new(RedisStore::new(conn.clone(), StoreNamespace::Artists, "artists")),
        artist_neighbours: Arc::new(RedisStore::new(
            conn.clone(),
            StoreNamespace::ArtistNeighbours,
            "artist_neighbours",
        )),
        personal_top: Arc::new(RedisStore::new(conn, StoreNamespace::PersonalTop, "personal_top")),
    }
}
