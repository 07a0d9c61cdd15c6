use std::sync::Arc;

use async_graphql::{Context, EmptySubscription, Object, Schema};

use crate::model::EntityId;
use crate::storage::PersonRepository;

use super::types::Person;

pub type PersonSchema = Schema<PersonQuery, PersonMutation, EmptySubscription>;

pub fn build_person_schema(persons: Arc<PersonRepository>) -> PersonSchema {
    Schema::build(PersonQuery, PersonMutation, EmptySubscription)
        .data(persons)
        .finish()
}

fn persons<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a Arc<PersonRepository>> {
    ctx.data::<Arc<PersonRepository>>()
}

pub struct PersonQuery;

#[Object]
impl PersonQuery {
    /// Get person by id
    async fn person(
        &self,
        ctx: &Context<'_>,
        id: EntityId,
    ) -> async_graphql::Result<Option<Person>> {
        Ok(persons(ctx)?.get(id).await.map(Person::from))
    }

    /// Get all persons
    async fn all_persons(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Person>> {
        let all = persons(ctx)?.list().await;
        Ok(all.into_iter().map(Person::from).collect())
    }
}

pub struct PersonMutation;

#[Object]
impl PersonMutation {
    /// Create new person
    async fn create_person(
        &self,
        ctx: &Context<'_>,
        name: String,
        age: Option<f64>,
    ) -> async_graphql::Result<Person> {
        Ok(persons(ctx)?.create(name, age).await?.into())
    }

    /// Update person by id
    async fn update_person(
        &self,
        ctx: &Context<'_>,
        id: EntityId,
        name: Option<String>,
        age: Option<f64>,
    ) -> async_graphql::Result<Option<Person>> {
        Ok(persons(ctx)?.update(id, name, age).await.map(Person::from))
    }

    /// Delete person by id
    async fn delete_person(
        &self,
        ctx: &Context<'_>,
        id: EntityId,
    ) -> async_graphql::Result<Option<Person>> {
        Ok(persons(ctx)?.delete(id).await.map(Person::from))
    }
}
