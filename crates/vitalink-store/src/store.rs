//! Store abstraction over user records.
//!
//! Handlers receive an `Arc<dyn UserStore>` so the backing store can be
//! swapped without touching request handling.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::client::{RedisPool, StoreError, StoreResult};
use crate::queries::users::{self, HealthPatch, UserRow};

/// Persistence operations for user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a freshly registered user.
    async fn create_user(&self, row: &UserRow) -> StoreResult<()>;

    /// Fetch a user, `StoreError::NotFound` if the id is unknown.
    async fn get_user(&self, user_id: &str) -> StoreResult<UserRow>;

    /// Merge `patch` into a user's vitals as one atomic step and return the
    /// merged row. `StoreError::NotFound` if the id is unknown.
    async fn merge_health(
        &self,
        user_id: &str,
        patch: &HealthPatch,
        updated_at: &str,
    ) -> StoreResult<UserRow>;

    /// All users in registration order.
    async fn list_users(&self) -> StoreResult<Vec<UserRow>>;
}

/// Redis-backed store.
#[derive(Clone)]
pub struct RedisUserStore {
    pool: RedisPool,
}

impl RedisUserStore {
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for RedisUserStore {
    async fn create_user(&self, row: &UserRow) -> StoreResult<()> {
        users::create_user(&self.pool, row).await
    }

    async fn get_user(&self, user_id: &str) -> StoreResult<UserRow> {
        users::get_user(&self.pool, user_id).await
    }

    async fn merge_health(
        &self,
        user_id: &str,
        patch: &HealthPatch,
        updated_at: &str,
    ) -> StoreResult<UserRow> {
        users::merge_health(&self.pool, user_id, patch, updated_at).await
    }

    async fn list_users(&self) -> StoreResult<Vec<UserRow>> {
        users::list_users(&self.pool).await
    }
}

/// Process-local store. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<UserRow>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create_user(&self, row: &UserRow) -> StoreResult<()> {
        self.users.write().await.push(row.clone());
        Ok(())
    }

    async fn get_user(&self, user_id: &str) -> StoreResult<UserRow> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.user_id == user_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("User not found: {}", user_id)))
    }

    async fn merge_health(
        &self,
        user_id: &str,
        patch: &HealthPatch,
        updated_at: &str,
    ) -> StoreResult<UserRow> {
        let mut users = self.users.write().await;
        let existing = users
            .iter_mut()
            .find(|u| u.user_id == user_id)
            .ok_or_else(|| StoreError::NotFound(format!("User not found: {}", user_id)))?;
        patch.apply(existing, updated_at);
        Ok(existing.clone())
    }

    async fn list_users(&self) -> StoreResult<Vec<UserRow>> {
        Ok(self.users.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str) -> UserRow {
        UserRow {
            user_id: id.to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            age: 36,
            contact_number: "+1 555 0100".to_string(),
            gender: "female".to_string(),
            heart_rate: None,
            spo2: None,
            weight: None,
            created_at: "2026-01-01T00:00:00+00:00".to_string(),
            updated_at: "2026-01-01T00:00:00+00:00".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let store = MemoryUserStore::new();
        store.create_user(&row("u1")).await.unwrap();

        let fetched = store.get_user("u1").await.unwrap();
        assert_eq!(fetched, row("u1"));
    }

    #[tokio::test]
    async fn test_get_unknown_is_not_found() {
        let store = MemoryUserStore::new();
        let err = store.get_user("missing").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_merge_health_updates_stored_row() {
        let store = MemoryUserStore::new();
        store.create_user(&row("u1")).await.unwrap();

        let patch = HealthPatch {
            heart_rate: Some(72.0),
            ..HealthPatch::default()
        };
        let merged = store.merge_health("u1", &patch, "later").await.unwrap();

        assert_eq!(merged.heart_rate, Some(72.0));
        assert_eq!(merged.updated_at, "later");
        assert_eq!(store.get_user("u1").await.unwrap(), merged);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 3)]
    async fn test_concurrent_merges_keep_every_field() {
        let store = std::sync::Arc::new(MemoryUserStore::new());
        store.create_user(&row("u1")).await.unwrap();

        let tasks: Vec<_> = [
            HealthPatch { heart_rate: Some(72.0), ..HealthPatch::default() },
            HealthPatch { spo2: Some(98.0), ..HealthPatch::default() },
            HealthPatch { weight: Some(68.0), ..HealthPatch::default() },
        ]
        .into_iter()
        .map(|patch| {
            let store = store.clone();
            tokio::spawn(async move { store.merge_health("u1", &patch, "t").await })
        })
        .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let merged = store.get_user("u1").await.unwrap();
        assert_eq!(merged.heart_rate, Some(72.0));
        assert_eq!(merged.spo2, Some(98.0));
        assert_eq!(merged.weight, Some(68.0));
    }

    #[tokio::test]
    async fn test_merge_unknown_does_not_insert() {
        let store = MemoryUserStore::new();
        let err = store
            .merge_health("ghost", &HealthPatch::default(), "t")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
        assert!(store.list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_keeps_registration_order() {
        let store = MemoryUserStore::new();
        for id in ["a", "b", "c"] {
            store.create_user(&row(id)).await.unwrap();
        }

        let ids: Vec<String> = store
            .list_users()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.user_id)
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
