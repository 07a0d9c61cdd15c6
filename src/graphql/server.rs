use std::sync::Arc;

use async_graphql::http::GraphiQLSource;
use async_graphql::{Request, Response};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::Router;
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::DemoConfig;
use crate::error::Result;
use crate::loader::{BatchOptions, Loaders};
use crate::storage::{LibraryRepository, PersonRepository};

use super::library::{LibrarySchema, build_library_schema};
use super::person::{PersonSchema, build_person_schema};

/// Which schema a document is executed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// Books and authors, served at `/graphql`
    Library,
    /// Persons, served at `/person`
    Person,
}

/// Everything a request needs: the shared stores, both schemas and the
/// batch settings used to build each request's [`Loaders`].
#[derive(Clone)]
pub struct AppState {
    pub library: Arc<LibraryRepository>,
    pub persons: Arc<PersonRepository>,
    library_schema: LibrarySchema,
    person_schema: PersonSchema,
    batch: BatchOptions,
}

impl AppState {
    pub fn new(
        library: Arc<LibraryRepository>,
        persons: Arc<PersonRepository>,
        batch: BatchOptions,
    ) -> Self {
        Self {
            library_schema: build_library_schema(Arc::clone(&library)),
            person_schema: build_person_schema(Arc::clone(&persons)),
            library,
            persons,
            batch,
        }
    }

    /// Builds the stores from the config's seed data.
    pub fn from_config(config: &DemoConfig) -> Self {
        let seed = config.seed.clone();
        Self::new(
            Arc::new(LibraryRepository::new(seed.books, seed.authors)),
            Arc::new(PersonRepository::new(seed.persons)),
            config.batch.options(),
        )
    }

    /// A fresh registry for one request.
    pub fn loaders(&self) -> Loaders {
        Loaders::new(Arc::clone(&self.library), self.batch)
    }

    /// Executes one request. Library requests get their own [`Loaders`].
    pub async fn execute(&self, service: Service, request: Request) -> Response {
        let response = match service {
            Service::Library => {
                let request = request.data(self.loaders());
                self.library_schema.execute(request).await
            }
            Service::Person => self.person_schema.execute(request).await,
        };

        if response.is_err() {
            let messages: Vec<String> = response.errors.iter().map(|e| e.message.clone()).collect();
            warn!(?service, errors = ?messages, "query finished with errors");
        }
        response
    }
}

async fn library_graphql(State(state): State<AppState>, req: GraphQLRequest) -> GraphQLResponse {
    state.execute(Service::Library, req.into_inner()).await.into()
}

async fn person_graphql(State(state): State<AppState>, req: GraphQLRequest) -> GraphQLResponse {
    state.execute(Service::Person, req.into_inner()).await.into()
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(graphiql))
        .route("/graphql", get(library_graphql).post(library_graphql))
        .route("/person", get(person_graphql).post(person_graphql))
        .with_state(state)
}

pub async fn run_server(state: AppState, host: &str, port: u16) -> Result<()> {
    let listener = TcpListener::bind((host, port)).await?;
    info!(address = %listener.local_addr()?, "server is running");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(%err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
