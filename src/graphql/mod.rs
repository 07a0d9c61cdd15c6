//! GraphQL schemas and the HTTP server.
//!
//! Two independent services share one process:
//!
//! - **Library** (`/graphql`): `book`, `author`, `books`, `authors` queries;
//!   `book`, `author`, `updateBook`, `updateAuthor` mutations. `Book.authors`
//!   and `Author.books` resolve through the request's batch loaders.
//! - **Person** (`/person`): `person`, `allPersons` queries;
//!   `createPerson`, `updatePerson`, `deletePerson` mutations.
//!
//! ## Usage
//!
//! ```bash
//! # Start the server
//! gql-demo serve --port 8080
//!
//! # Query over HTTP
//! curl 'http://localhost:8080/graphql?query={book(id:1){id,name,authors{id,name}}}'
//!
//! # Execute a document from the CLI
//! gql-demo query '{ books { name authors { name } } }'
//! ```

mod library;
mod person;
mod server;
mod types;

pub use library::{LibraryMutation, LibraryQuery, LibrarySchema, build_library_schema};
pub use person::{PersonMutation, PersonQuery, PersonSchema, build_person_schema};
pub use server::{AppState, Service, router, run_server};
pub use types::*;

use crate::error::Result;

/// Parses optional JSON variables, treating `None` as no variables.
pub fn parse_variables(variables: Option<&str>) -> Result<async_graphql::Variables> {
    match variables {
        Some(json) => Ok(serde_json::from_str(json)?),
        None => Ok(async_graphql::Variables::default()),
    }
}
