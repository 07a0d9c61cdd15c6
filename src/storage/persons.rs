use tracing::debug;

use super::Collection;
use crate::error::Result;
use crate::model::{EntityId, Person};

#[derive(Debug, Default)]
pub struct PersonRepository {
    persons: Collection<Person>,
}

impl PersonRepository {
    pub fn new(persons: Vec<Person>) -> Self {
        Self {
            persons: Collection::new(persons),
        }
    }

    pub async fn get(&self, id: EntityId) -> Option<Person> {
        self.persons.get(id).await
    }

    pub async fn list(&self) -> Vec<Person> {
        self.persons.list().await
    }

    /// Stores a new person under the next free ID.
    pub async fn create(&self, name: String, age: Option<f64>) -> Result<Person> {
        let person = self
            .persons
            .insert_with(|id| Person::new(id, name).with_age(age))
            .await?;
        debug!(id = person.id, "created person");
        Ok(person)
    }

    pub async fn update(
        &self,
        id: EntityId,
        name: Option<String>,
        age: Option<f64>,
    ) -> Option<Person> {
        debug!(id, "updating person");
        self.persons
            .update(id, |person| {
                if let Some(name) = name {
                    person.name = name;
                }
                if age.is_some() {
                    person.age = age;
                }
            })
            .await
    }

    pub async fn delete(&self, id: EntityId) -> Option<Person> {
        debug!(id, "deleting person");
        self.persons.remove(id).await
    }
}
