use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use redis::Client;

use crate::db::store::{KeyedStore, StoreKey, StoreNamespace};
use crate::error::AppResult;

/// Creates a Redis client for the catalog stores
pub fn create_redis_client(redis_url: &str) -> anyhow::Result<Client> {
    let client = Client::open(redis_url)?;
    Ok(client)
}

/// Opens a reconnecting connection shared by every store on this client
pub async fn connect(client: Client) -> anyhow::Result<ConnectionManager> {
    let manager = ConnectionManager::new(client).await?;
    Ok(manager)
}

/// Catalog store backed by one key namespace in Redis
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
    namespace: StoreNamespace,
    name: &'static str,
}

impl RedisStore {
    pub fn new(conn: ConnectionManager, namespace: StoreNamespace, name: &'static str) -> Self {
        Self {
            conn,
            namespace,
            name,
        }
    }
}

#[async_trait::async_trait]
impl KeyedStore for RedisStore {
    async fn get(&self, id: i64) -> AppResult<Option<Vec<u8>>> {
        let key = StoreKey::new(self.namespace, id);
        let mut conn = self.conn.clone();

        let value: Option<Vec<u8>> = conn.get(key.to_string()).await.map_err(|e| {
            tracing::warn!(error = %e, store = self.name, key = %key, "Redis get failed");
            e
        })?;

        tracing::trace!(store = self.name, key = %key, hit = value.is_some(), "Store lookup");

        Ok(value)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
