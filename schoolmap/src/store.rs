//! Record store interface and an in-memory implementation.
//!
//! [`SchoolStore`] is the seam between request handling and persistence.
//! Handlers receive a store handle explicitly, so tests can substitute
//! [`MemoryStore`] or a purpose-built double for the real database.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::{StoreError, StoreResult};
use crate::school::{NewSchool, School};

/// Persistence for school records.
///
/// Records are never updated or deleted once inserted.
#[async_trait]
pub trait SchoolStore: Send + Sync {
    /// Insert one school and return its store-assigned id.
    async fn insert(&self, school: &NewSchool) -> StoreResult<u64>;

    /// Return every stored school. An empty store yields an empty vector,
    /// not an error.
    async fn list_all(&self) -> StoreResult<Vec<School>>;
}

/// Thread-safe in-memory store.
///
/// Ids start at 1 and increase by one per insert. `list_all` returns records
/// in insertion (ascending id) order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<School>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `schools`, keeping their ids.
    pub fn with_schools(schools: Vec<School>) -> Self {
        Self {
            records: RwLock::new(schools),
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SchoolStore for MemoryStore {
    async fn insert(&self, school: &NewSchool) -> StoreResult<u64> {
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        let id = records.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        records.push(school.clone().into_school(id));
        Ok(id)
    }

    async fn list_all(&self) -> StoreResult<Vec<School>> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_school(name: &str, lat: f64, lon: f64) -> NewSchool {
        NewSchool::new(name, "1 Test Road", lat, lon).unwrap()
    }

    #[tokio::test]
    async fn test_empty_store_lists_nothing() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_assigns_ascending_ids() {
        let store = MemoryStore::new();
        let a = store.insert(&new_school("A", 1.0, 1.0)).await.unwrap();
        let b = store.insert(&new_school("B", 2.0, 2.0)).await.unwrap();
        assert_eq!(a, 1);
        assert_eq!(b, 2);
        assert_eq!(store.len(), 2);

        let all = store.list_all().await.unwrap();
        assert_eq!(all[0].id, 1);
        assert_eq!(all[0].name, "A");
        assert_eq!(all[1].id, 2);
        assert_eq!(all[1].latitude, 2.0);
    }

    #[tokio::test]
    async fn test_with_schools_continues_ids() {
        let seeded = new_school("Seed", 0.0, 0.0).into_school(41);
        let store = MemoryStore::with_schools(vec![seeded]);
        let id = store.insert(&new_school("Next", 0.0, 0.0)).await.unwrap();
        assert_eq!(id, 42);
    }

    #[tokio::test]
    async fn test_usable_as_trait_object() {
        let store: std::sync::Arc<dyn SchoolStore> = std::sync::Arc::new(MemoryStore::new());
        store.insert(&new_school("A", 1.0, 1.0)).await.unwrap();
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }
}
