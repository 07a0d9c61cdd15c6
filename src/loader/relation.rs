use super::Loaders;
use super::fetch::{AuthorsById, BooksById};
use super::key::BatchKey;
use super::resolver::{BatchFn, BatchedResolver, Deferred};
use crate::model::{Author, Book, EntityId};

/// A relation field resolved through the request's [`Loaders`].
pub trait Relation {
    /// Name used for the resolver and in logs.
    const NAME: &'static str;

    type Parent: Send + Sync;
    type Fetch: BatchFn<Key = BatchKey>;

    fn foreign_keys(parent: &Self::Parent) -> &[EntityId];

    fn resolver(loaders: &Loaders) -> &BatchedResolver<Self::Fetch>;
}

/// `Book.authors`
pub struct BookAuthors;

impl Relation for BookAuthors {
    const NAME: &'static str = "book.authors";

    type Parent = Book;
    type Fetch = AuthorsById;

    fn foreign_keys(parent: &Book) -> &[EntityId] {
        &parent.author_ids
    }

    fn resolver(loaders: &Loaders) -> &BatchedResolver<AuthorsById> {
        &loaders.book_authors
    }
}

/// `Author.books`
pub struct AuthorBooks;

impl Relation for AuthorBooks {
    const NAME: &'static str = "author.books";

    type Parent = Author;
    type Fetch = BooksById;

    fn foreign_keys(parent: &Author) -> &[EntityId] {
        &parent.book_ids
    }

    fn resolver(loaders: &Loaders) -> &BatchedResolver<BooksById> {
        &loaders.author_books
    }
}

/// Submits the parent's foreign keys to the relation's resolver.
///
/// Returns without fetching; awaiting the handle is what eventually closes
/// the batch.
pub fn resolve_relation<R: Relation>(loaders: &Loaders, parent: &R::Parent) -> Deferred<R::Fetch> {
    let keys = R::foreign_keys(parent).iter().copied().map(BatchKey::from);
    R::resolver(loaders).submit(keys)
}
