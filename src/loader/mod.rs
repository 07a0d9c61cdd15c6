//! Request-scoped batched loading of relation fields.
//!
//! Relation fields such as `Book.authors` do not fetch on their own. They
//! submit foreign keys to the relation's [`BatchedResolver`] and await a
//! [`Deferred`] handle. The first handle awaited closes the batch window
//! after yielding to the executor once (or after [`BatchOptions::delay`]),
//! so sibling fields and other parents at the same depth share one fetch.
//!
//! A fresh [`Loaders`] registry is built for every request; nothing is
//! cached across requests.

mod fetch;
mod key;
mod relation;
mod resolver;

use std::sync::Arc;

pub use fetch::{AuthorsById, BooksById, ById};
pub use key::BatchKey;
pub use relation::{AuthorBooks, BookAuthors, Relation, resolve_relation};
pub use resolver::{
    BatchError, BatchFn, BatchOptions, BatchedResolver, Deferred, FetchResults, LoadError, Loaded,
};

use crate::storage::LibraryRepository;

/// One [`BatchedResolver`] per relation, shared by every field resolver of
/// a single request.
///
/// Clones share the same resolvers.
#[derive(Clone)]
pub struct Loaders {
    pub book_authors: BatchedResolver<AuthorsById>,
    pub author_books: BatchedResolver<BooksById>,
}

impl Loaders {
    /// Relations backed by the library store.
    pub fn new(library: Arc<LibraryRepository>, options: BatchOptions) -> Self {
        Self::with_fetches(
            AuthorsById::new(Arc::clone(&library)),
            BooksById::new(library),
            options,
        )
    }

    pub fn with_fetches(authors: AuthorsById, books: BooksById, options: BatchOptions) -> Self {
        Self {
            book_authors: BatchedResolver::new(BookAuthors::NAME, authors, options),
            author_books: BatchedResolver::new(AuthorBooks::NAME, books, options),
        }
    }

    /// Fetches run so far, per relation name.
    pub fn dispatched_batches(&self) -> [(&'static str, usize); 2] {
        [
            (self.book_authors.name(), self.book_authors.dispatched_batches()),
            (self.author_books.name(), self.author_books.dispatched_batches()),
        ]
    }
}
