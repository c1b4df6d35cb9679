// Service exports
pub mod cache;
pub mod postgres;
pub mod store;

pub use cache::CachedStore;
pub use postgres::PostgresStore;
pub use store::{InMemoryStore, RecommendationStore, StoreError};
