//! In-memory storage layer.
//!
//! Every collection is an insertion-ordered `Vec` behind a
//! [`tokio::sync::RwLock`], shared through `Arc` by all requests.
//!
//! ## Components
//!
//! - [`Collection`]: generic by-id lookup, append, update and delete
//! - [`LibraryRepository`]: books and authors, plus the batch fetches used
//!   by the relation loaders
//! - [`PersonRepository`]: persons with store-assigned IDs

mod collection;
mod library;
mod persons;

pub use collection::Collection;
pub use library::{AuthorChanges, BookChanges, LibraryRepository};
pub use persons::PersonRepository;
