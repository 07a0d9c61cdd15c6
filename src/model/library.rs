use super::{Entity, EntityId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: EntityId,
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub author_ids: Vec<EntityId>,
}

impl Book {
    pub fn new(id: EntityId, name: String) -> Self {
        Self {
            id,
            name,
            description: String::new(),
            author_ids: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: String) -> Self {
        self.description = description;
        self
    }

    pub fn with_author_ids(mut self, author_ids: Vec<EntityId>) -> Self {
        self.author_ids = author_ids;
        self
    }
}

impl Entity for Book {
    fn id(&self) -> EntityId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: EntityId,
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub book_ids: Vec<EntityId>,
}

impl Author {
    pub fn new(id: EntityId, name: String) -> Self {
        Self {
            id,
            name,
            book_ids: Vec::new(),
        }
    }

    pub fn with_book_ids(mut self, book_ids: Vec<EntityId>) -> Self {
        self.book_ids = book_ids;
        self
    }
}

impl Entity for Author {
    fn id(&self) -> EntityId {
        self.id
    }
}
