use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::error::{DemoError, Result};
use crate::model::{Entity, EntityId};

/// An in-memory collection of entities.
///
/// Lookups are linear scans in insertion order, so when callers supply
/// duplicate IDs the first stored entity wins.
#[derive(Debug)]
pub struct Collection<T> {
    items: RwLock<Vec<T>>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }
}

impl<T: Entity> Collection<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }

    pub async fn get(&self, id: EntityId) -> Option<T> {
        self.items
            .read()
            .await
            .iter()
            .find(|item| item.id() == id)
            .cloned()
    }

    pub async fn list(&self) -> Vec<T> {
        self.items.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    /// Returns every requested ID that is present. Absent IDs are omitted.
    pub async fn get_many(&self, ids: &[EntityId]) -> HashMap<EntityId, T> {
        let items = self.items.read().await;
        let mut found = HashMap::with_capacity(ids.len());
        for item in items.iter() {
            let id = item.id();
            if ids.contains(&id) {
                found.entry(id).or_insert_with(|| item.clone());
            }
        }
        found
    }

    pub async fn insert(&self, item: T) -> T {
        self.items.write().await.push(item.clone());
        item
    }

    /// Appends an entity built from the next free ID (one past the current
    /// maximum) under a single write lock.
    pub async fn insert_with<F>(&self, build: F) -> Result<T>
    where
        F: FnOnce(EntityId) -> T,
    {
        let mut items = self.items.write().await;
        let next_id = match items.iter().map(Entity::id).max() {
            Some(max) => max.checked_add(1).ok_or(DemoError::IdsExhausted(max))?,
            None => 1,
        };
        let item = build(next_id);
        items.push(item.clone());
        Ok(item)
    }

    /// Applies `apply` to the first entity with `id` and returns the result.
    pub async fn update<F>(&self, id: EntityId, apply: F) -> Option<T>
    where
        F: FnOnce(&mut T),
    {
        let mut items = self.items.write().await;
        let item = items.iter_mut().find(|item| item.id() == id)?;
        apply(item);
        Some(item.clone())
    }

    pub async fn remove(&self, id: EntityId) -> Option<T> {
        let mut items = self.items.write().await;
        let pos = items.iter().position(|item| item.id() == id)?;
        Some(items.remove(pos))
    }
}
