//! Vitalink Data Layer
//!
//! Persistence for registered users. Records live in Redis in production;
//! an in-memory store backs tests and `serve --memory`.

pub mod client;
pub mod queries;
pub mod store;

pub use client::{init_pool, RedisPool, StoreError, StoreResult};
pub use queries::users;
pub use queries::users::{HealthPatch, UserRow};
pub use store::{MemoryUserStore, RedisUserStore, UserStore};
