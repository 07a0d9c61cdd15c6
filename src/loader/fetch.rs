use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use super::key::BatchKey;
use super::resolver::{BatchFn, FetchResults};
use crate::model::{Author, Book, Entity, EntityId};
use crate::storage::{Collection, LibraryRepository};

type LoadFuture<V> = Pin<Box<dyn Future<Output = FetchResults<BatchKey, V>> + Send>>;

/// Loads entities by ID through an async lookup over a whole key batch.
pub struct ById<V> {
    lookup: Box<dyn Fn(Vec<BatchKey>) -> LoadFuture<V> + Send + Sync>,
}

impl<V> ById<V> {
    /// Wraps any lookup, e.g. one that reports per-key failures.
    pub fn from_fn<F, Fut>(lookup: F) -> Self
    where
        F: Fn(Vec<BatchKey>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = FetchResults<BatchKey, V>> + Send + 'static,
    {
        Self {
            lookup: Box::new(move |keys| -> LoadFuture<V> { Box::pin(lookup(keys)) }),
        }
    }
}

impl<V> BatchFn for ById<V>
where
    V: Clone + Send + Sync + 'static,
{
    type Key = BatchKey;
    type Value = V;

    fn load(&self, keys: &[BatchKey]) -> impl Future<Output = FetchResults<BatchKey, V>> + Send {
        (self.lookup)(keys.to_vec())
    }
}

async fn fetch_by_id<T>(collection: &Collection<T>, keys: &[BatchKey]) -> FetchResults<BatchKey, T>
where
    T: Entity,
{
    let ids: Vec<EntityId> = keys.iter().map(|key| key.id()).collect();
    collection
        .get_many(&ids)
        .await
        .into_iter()
        .map(|(id, entity)| (BatchKey::from(id), Ok(entity)))
        .collect()
}

/// Loads authors by ID for `Book.authors`.
pub type AuthorsById = ById<Author>;

impl ById<Author> {
    pub fn new(library: Arc<LibraryRepository>) -> Self {
        Self::from_fn(move |keys| {
            let library = Arc::clone(&library);
            async move { fetch_by_id(&library.authors, &keys).await }
        })
    }
}

/// Loads books by ID for `Author.books`.
pub type BooksById = ById<Book>;

impl ById<Book> {
    pub fn new(library: Arc<LibraryRepository>) -> Self {
        Self::from_fn(move |keys| {
            let library = Arc::clone(&library);
            async move { fetch_by_id(&library.books, &keys).await }
        })
    }
}
