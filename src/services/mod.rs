// Service exports
pub mod backend;
pub mod cache;
pub mod postgres;

pub use backend::{BackendClient, BackendError};
pub use cache::{CacheError, CacheKey, CacheManager, CacheStats};
pub use postgres::{PostgresClient, PostgresError, RecommendationRecord};
