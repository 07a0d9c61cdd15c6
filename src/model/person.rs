use super::{Entity, EntityId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: EntityId,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<f64>,
}

impl Person {
    pub fn new(id: EntityId, name: String) -> Self {
        Self {
            id,
            name,
            age: None,
        }
    }

    pub fn with_age(mut self, age: Option<f64>) -> Self {
        self.age = age;
        self
    }
}

impl Entity for Person {
    fn id(&self) -> EntityId {
        self.id
    }
}
