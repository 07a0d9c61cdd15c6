//! Data models for the demo services.
//!
//! - [`Book`] and [`Author`]: the library, linked many-to-many by ID lists
//!   kept on both sides
//! - [`Person`]: the standalone person CRUD entity

mod library;
mod person;

pub use library::{Author, Book};
pub use person::Person;

/// Identifier of an entity within its collection.
pub type EntityId = u32;

/// Anything stored in a collection keyed by [`EntityId`].
pub trait Entity: Clone {
    fn id(&self) -> EntityId;
}
