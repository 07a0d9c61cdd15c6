use async_graphql::{Context, Object, SimpleObject};

use crate::error::DemoError;
use crate::loader::{AuthorBooks, BatchFn, BookAuthors, Loaders, Relation, resolve_relation};
use crate::model::{self, EntityId};

pub struct Book(pub model::Book);

impl From<model::Book> for Book {
    fn from(book: model::Book) -> Self {
        Self(book)
    }
}

#[Object]
impl Book {
    async fn id(&self) -> EntityId {
        self.0.id
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn description(&self) -> &str {
        &self.0.description
    }

    /// Authors of this book, batched with every other `authors` field of the request
    async fn authors(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Option<Author>>> {
        load_relation::<BookAuthors, _>(ctx, &self.0).await
    }
}

pub struct Author(pub model::Author);

impl From<model::Author> for Author {
    fn from(author: model::Author) -> Self {
        Self(author)
    }
}

#[Object]
impl Author {
    async fn id(&self) -> EntityId {
        self.0.id
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    /// Books by this author, batched with every other `books` field of the request
    async fn books(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Option<Book>>> {
        load_relation::<AuthorBooks, _>(ctx, &self.0).await
    }
}

/// Resolves a relation through the request's loaders. Per-key failures are
/// reported as one field error while the partial list is still returned.
async fn load_relation<R, T>(
    ctx: &Context<'_>,
    parent: &R::Parent,
) -> async_graphql::Result<Vec<Option<T>>>
where
    R: Relation,
    T: From<<R::Fetch as BatchFn>::Value>,
{
    let loaders = ctx
        .data_opt::<Loaders>()
        .ok_or(DemoError::MissingLoaders)?;
    let (values, error) = resolve_relation::<R>(loaders, parent).get().await.into_parts();
    if let Some(error) = error {
        tracing::warn!(
            relation = R::NAME,
            failed = error.messages().len(),
            %error,
            "relation partially failed"
        );
        ctx.add_error(async_graphql::Error::new(error.to_string()).into_server_error(ctx.item.pos));
    }
    Ok(values.into_iter().map(|value| value.map(T::from)).collect())
}

#[derive(SimpleObject)]
pub struct Person {
    pub id: EntityId,
    pub name: String,
    pub age: Option<f64>,
}

impl From<model::Person> for Person {
    fn from(p: model::Person) -> Self {
        Self {
            id: p.id,
            name: p.name,
            age: p.age,
        }
    }
}
