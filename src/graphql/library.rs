use std::sync::Arc;

use async_graphql::{Context, EmptySubscription, Object, Schema};

use crate::model::{self, EntityId};
use crate::storage::{AuthorChanges, BookChanges, LibraryRepository};

use super::types::{Author, Book};

pub type LibrarySchema = Schema<LibraryQuery, LibraryMutation, EmptySubscription>;

/// Builds the books/authors schema.
///
/// Relation fields expect a [`Loaders`](crate::loader::Loaders) registry in
/// the request data; attach a fresh one to every request.
pub fn build_library_schema(library: Arc<LibraryRepository>) -> LibrarySchema {
    Schema::build(LibraryQuery, LibraryMutation, EmptySubscription)
        .data(library)
        .finish()
}

fn library<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a Arc<LibraryRepository>> {
    ctx.data::<Arc<LibraryRepository>>()
}

pub struct LibraryQuery;

#[Object]
impl LibraryQuery {
    /// Get book by id
    async fn book(&self, ctx: &Context<'_>, id: EntityId) -> async_graphql::Result<Option<Book>> {
        Ok(library(ctx)?.books.get(id).await.map(Book::from))
    }

    /// Get author by id
    async fn author(
        &self,
        ctx: &Context<'_>,
        id: EntityId,
    ) -> async_graphql::Result<Option<Author>> {
        Ok(library(ctx)?.authors.get(id).await.map(Author::from))
    }

    /// List every book
    async fn books(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Book>> {
        let books = library(ctx)?.books.list().await;
        Ok(books.into_iter().map(Book::from).collect())
    }

    /// List every author
    async fn authors(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Author>> {
        let authors = library(ctx)?.authors.list().await;
        Ok(authors.into_iter().map(Author::from).collect())
    }
}

pub struct LibraryMutation;

#[Object]
impl LibraryMutation {
    /// Create new book
    async fn book(
        &self,
        ctx: &Context<'_>,
        id: EntityId,
        name: String,
        description: Option<String>,
        author_ids: Vec<EntityId>,
    ) -> async_graphql::Result<Book> {
        let mut book = model::Book::new(id, name).with_author_ids(author_ids);
        if let Some(description) = description {
            book = book.with_description(description);
        }
        Ok(library(ctx)?.create_book(book).await.into())
    }

    /// Create new author
    async fn author(
        &self,
        ctx: &Context<'_>,
        id: EntityId,
        name: String,
        book_ids: Option<Vec<EntityId>>,
    ) -> async_graphql::Result<Author> {
        let author = model::Author::new(id, name).with_book_ids(book_ids.unwrap_or_default());
        Ok(library(ctx)?.create_author(author).await.into())
    }

    /// Overwrite the supplied fields of a book
    async fn update_book(
        &self,
        ctx: &Context<'_>,
        id: EntityId,
        name: Option<String>,
        description: Option<String>,
        author_ids: Option<Vec<EntityId>>,
    ) -> async_graphql::Result<Option<Book>> {
        let changes = BookChanges {
            name,
            description,
            author_ids,
        };
        Ok(library(ctx)?.update_book(id, changes).await.map(Book::from))
    }

    /// Overwrite the supplied fields of an author
    async fn update_author(
        &self,
        ctx: &Context<'_>,
        id: EntityId,
        name: Option<String>,
        book_ids: Option<Vec<EntityId>>,
    ) -> async_graphql::Result<Option<Author>> {
        let changes = AuthorChanges { name, book_ids };
        Ok(library(ctx)?
            .update_author(id, changes)
            .await
            .map(Author::from))
    }
}
