pub mod store;

pub use store::connect;
pub use store::create_redis_client;
pub use store::RedisStore;
