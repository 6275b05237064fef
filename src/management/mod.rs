mod auth;
mod cache;

pub use auth::TokenManager;
pub use cache::CacheEntry;
pub use cache::CacheError;
pub use cache::LookupCache;
