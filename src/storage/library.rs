use tracing::debug;

use super::Collection;
use crate::model::{Author, Book, EntityId};

/// Fields an update may overwrite. `None` leaves the stored value alone.
#[derive(Debug, Default)]
pub struct BookChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub author_ids: Option<Vec<EntityId>>,
}

#[derive(Debug, Default)]
pub struct AuthorChanges {
    pub name: Option<String>,
    pub book_ids: Option<Vec<EntityId>>,
}

/// Books and authors.
///
/// IDs are supplied by callers and are not checked for uniqueness, and the
/// two sides of the book/author relation are not kept in sync.
#[derive(Debug, Default)]
pub struct LibraryRepository {
    pub books: Collection<Book>,
    pub authors: Collection<Author>,
}

impl LibraryRepository {
    pub fn new(books: Vec<Book>, authors: Vec<Author>) -> Self {
        Self {
            books: Collection::new(books),
            authors: Collection::new(authors),
        }
    }

    pub async fn create_book(&self, book: Book) -> Book {
        debug!(id = book.id, name = %book.name, "creating book");
        self.books.insert(book).await
    }

    pub async fn create_author(&self, author: Author) -> Author {
        debug!(id = author.id, name = %author.name, "creating author");
        self.authors.insert(author).await
    }

    pub async fn update_book(&self, id: EntityId, changes: BookChanges) -> Option<Book> {
        debug!(id, "updating book");
        self.books
            .update(id, |book| {
                if let Some(name) = changes.name {
                    book.name = name;
                }
                if let Some(description) = changes.description {
                    book.description = description;
                }
                if let Some(author_ids) = changes.author_ids {
                    book.author_ids = author_ids;
                }
            })
            .await
    }

    pub async fn update_author(&self, id: EntityId, changes: AuthorChanges) -> Option<Author> {
        debug!(id, "updating author");
        self.authors
            .update(id, |author| {
                if let Some(name) = changes.name {
                    author.name = name;
                }
                if let Some(book_ids) = changes.book_ids {
                    author.book_ids = book_ids;
                }
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_appends_without_uniqueness_check() {
        let library = LibraryRepository::default();
        library
            .create_book(Book::new(1, "Dune".to_string()))
            .await;
        library
            .create_book(Book::new(1, "Dune Messiah".to_string()))
            .await;

        assert_eq!(library.books.len().await, 2);
        assert_eq!(library.books.get(1).await.unwrap().name, "Dune");
    }

    #[tokio::test]
    async fn test_update_book_only_touches_supplied_fields() {
        let library = LibraryRepository::new(
            vec![
                Book::new(1, "Dune".to_string())
                    .with_description("desert".to_string())
                    .with_author_ids(vec![1]),
            ],
            Vec::new(),
        );

        let updated = library
            .update_book(
                1,
                BookChanges {
                    author_ids: Some(vec![1, 2]),
                    ..BookChanges::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Dune");
        assert_eq!(updated.description, "desert");
        assert_eq!(updated.author_ids, vec![1, 2]);
        assert!(
            library
                .update_book(2, BookChanges::default())
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_update_author() {
        let library = LibraryRepository::new(
            Vec::new(),
            vec![Author::new(4, "Frank".to_string())],
        );

        let updated = library
            .update_author(
                4,
                AuthorChanges {
                    name: Some("Frank Herbert".to_string()),
                    book_ids: Some(vec![1]),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Frank Herbert");
        assert_eq!(library.authors.get(4).await.unwrap().book_ids, vec![1]);
    }
}
