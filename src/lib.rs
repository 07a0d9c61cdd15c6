//! # gql-demo - GraphQL over in-memory data with batched relation loading
//!
//! Two small GraphQL services share one process: a person CRUD API and a
//! books/authors API. The interesting part is the [`loader`] module: relation
//! fields such as `Book.authors` submit their foreign keys to a per-request
//! batched resolver, which deduplicates them and fetches each batch once
//! instead of once per parent.
//!
//! ## Quick Start
//!
//! ```bash
//! # Write a config with sample data
//! gql-demo init --sample
//!
//! # Run a query against the seeded stores
//! gql-demo query '{ books { name authors { name } } }'
//!
//! # Serve both APIs over HTTP
//! gql-demo serve --port 8080
//! ```
//!
//! ## Modules
//!
//! - [`cli`]: Command-line interface definitions and handlers
//! - [`config`]: Configuration loading and seed data
//! - [`error`]: Error types and result aliases
//! - [`graphql`]: Schemas, resolvers and the HTTP server
//! - [`loader`]: Request-scoped batched relation loading
//! - [`model`]: Books, authors and persons
//! - [`storage`]: In-memory stores

/// Command-line interface definitions using clap.
pub mod cli;

/// Configuration loading and management.
///
/// Handles `.gql-demo.yml` discovery, server and batch settings, and seed data.
pub mod config;

/// Error types and result aliases.
///
/// Defines `DemoError` enum and `Result<T>` type alias.
pub mod error;

/// GraphQL schemas and the axum server.
pub mod graphql;

pub mod loader;

/// Data models.
///
/// Includes `Book`, `Author` and `Person`.
pub mod model;

/// In-memory storage layer.
pub mod storage;

pub mod logging;
