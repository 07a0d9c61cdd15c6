use std::collections::HashMap;
use std::sync::Arc;

use async_graphql::Request;
use gql_demo::graphql::{AppState, Service, build_library_schema, router};
use gql_demo::loader::{AuthorsById, BatchKey, BatchOptions, BooksById, LoadError, Loaders};
use gql_demo::model::{Author, Book, Person};
use gql_demo::storage::{LibraryRepository, PersonRepository};
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

fn library() -> Arc<LibraryRepository> {
    Arc::new(LibraryRepository::new(
        vec![
            Book::new(1, "Dune".to_string())
                .with_description("Desert planet".to_string())
                .with_author_ids(vec![1, 2]),
            Book::new(2, "Emma".to_string()).with_author_ids(vec![2, 3]),
            Book::new(3, "Orphan".to_string()).with_author_ids(vec![3, 99]),
        ],
        vec![
            Author::new(1, "Frank".to_string()).with_book_ids(vec![1]),
            Author::new(2, "Jane".to_string()).with_book_ids(vec![1, 2]),
            Author::new(3, "Brian".to_string()).with_book_ids(vec![2, 3]),
        ],
    ))
}

fn state() -> AppState {
    AppState::new(
        library(),
        Arc::new(PersonRepository::new(vec![
            Person::new(1, "Sagor".to_string()).with_age(Some(26.0)),
        ])),
        BatchOptions::default(),
    )
}

async fn run(state: &AppState, service: Service, query: &str) -> (Value, Vec<String>) {
    let response = state.execute(service, Request::new(query)).await;
    let errors = response.errors.iter().map(|e| e.message.clone()).collect();
    (response.data.into_json().unwrap(), errors)
}

// =============================================================================
// Batched relation loading
// =============================================================================

#[tokio::test]
async fn test_relation_fields_across_parents_share_one_fetch() {
    let library = library();
    let schema = build_library_schema(Arc::clone(&library));
    let loaders = Loaders::new(library, BatchOptions::default());

    let response = schema
        .execute(Request::new("{ books { id authors { id name } } }").data(loaders.clone()))
        .await;

    assert!(response.errors.is_empty(), "{:?}", response.errors);
    assert_eq!(loaders.book_authors.dispatched_batches(), 1);
    assert_eq!(loaders.book_authors.fetched_keys(), 4);
    assert_eq!(
        response.data.into_json().unwrap(),
        json!({
            "books": [
                { "id": 1, "authors": [{ "id": 1, "name": "Frank" }, { "id": 2, "name": "Jane" }] },
                { "id": 2, "authors": [{ "id": 2, "name": "Jane" }, { "id": 3, "name": "Brian" }] },
                { "id": 3, "authors": [{ "id": 3, "name": "Brian" }, null] },
            ]
        })
    );
}

#[tokio::test]
async fn test_each_depth_is_one_batch() {
    let library = library();
    let schema = build_library_schema(Arc::clone(&library));
    let loaders = Loaders::new(library, BatchOptions::default());

    let response = schema
        .execute(
            Request::new("{ authors { name books { name authors { name } } } }")
                .data(loaders.clone()),
        )
        .await;

    assert!(response.errors.is_empty(), "{:?}", response.errors);
    assert_eq!(
        loaders.dispatched_batches(),
        [("book.authors", 1), ("author.books", 1)]
    );
}

#[tokio::test]
async fn test_aliased_sibling_fields_reuse_cached_keys() {
    let library = library();
    let schema = build_library_schema(Arc::clone(&library));
    let loaders = Loaders::new(library, BatchOptions::default());

    let response = schema
        .execute(
            Request::new("{ book(id: 1) { first: authors { name } second: authors { id } } }")
                .data(loaders.clone()),
        )
        .await;

    assert!(response.errors.is_empty(), "{:?}", response.errors);
    assert_eq!(loaders.book_authors.dispatched_batches(), 1);
    assert_eq!(loaders.book_authors.fetched_keys(), 2);
}

#[tokio::test]
async fn test_large_level_is_one_fetch_by_default() {
    let books = (1..=150)
        .map(|id| Book::new(id, format!("Book {id}")).with_author_ids(vec![id]))
        .collect();
    let authors = (1..=150)
        .map(|id| Author::new(id, format!("Author {id}")).with_book_ids(vec![id]))
        .collect();
    let library = Arc::new(LibraryRepository::new(books, authors));
    let schema = build_library_schema(Arc::clone(&library));
    let loaders = Loaders::new(library, BatchOptions::default());

    let response = schema
        .execute(Request::new("{ books { authors { id } } }").data(loaders.clone()))
        .await;

    assert!(response.errors.is_empty(), "{:?}", response.errors);
    assert_eq!(loaders.book_authors.dispatched_batches(), 1);
    assert_eq!(loaders.book_authors.fetched_keys(), 150);
}

#[tokio::test]
async fn test_failed_keys_return_partial_list_and_joined_error() {
    let library = Arc::new(LibraryRepository::new(
        vec![Book::new(1, "Anthology".to_string()).with_author_ids(vec![1, 2, 3])],
        vec![
            Author::new(1, "Frank".to_string()),
            Author::new(2, "Jane".to_string()),
            Author::new(3, "Brian".to_string()),
        ],
    ));
    let store = Arc::clone(&library);
    let authors = AuthorsById::from_fn(move |keys: Vec<BatchKey>| {
        let store = Arc::clone(&store);
        async move {
            let mut results = HashMap::new();
            for key in keys {
                if key.id() == 2 {
                    if let Some(author) = store.authors.get(key.id()).await {
                        results.insert(key, Ok(author));
                    }
                } else {
                    results.insert(key, Err(LoadError::new(format!("author {key} is unavailable"))));
                }
            }
            results
        }
    });
    let loaders = Loaders::with_fetches(
        authors,
        BooksById::new(Arc::clone(&library)),
        BatchOptions::default(),
    );
    let schema = build_library_schema(library);

    let response = schema
        .execute(Request::new("{ book(id: 1) { name authors { name } } }").data(loaders))
        .await;

    assert_eq!(response.errors.len(), 1);
    assert_eq!(
        response.errors[0].message,
        "author 1 is unavailable\nauthor 3 is unavailable"
    );
    assert_eq!(
        response.data.into_json().unwrap(),
        json!({
            "book": { "name": "Anthology", "authors": [null, { "name": "Jane" }, null] }
        })
    );
}

#[tokio::test]
async fn test_missing_registry_is_a_field_error() {
    let schema = build_library_schema(library());

    let response = schema
        .execute(Request::new("{ book(id: 1) { name authors { name } } }"))
        .await;

    assert_eq!(response.errors.len(), 1);
    assert!(response.errors[0].message.contains("No loader registry"));
}

// =============================================================================
// Library service
// =============================================================================

#[tokio::test]
async fn test_book_by_id() {
    let state = state();

    let (data, errors) = run(
        &state,
        Service::Library,
        "{ book(id: 1) { id name description authors { name books { name } } } }",
    )
    .await;

    assert!(errors.is_empty());
    assert_eq!(data["book"]["description"], "Desert planet");
    assert_eq!(data["book"]["authors"][1]["name"], "Jane");
    assert_eq!(data["book"]["authors"][1]["books"][1]["name"], "Emma");
}

#[tokio::test]
async fn test_unknown_book_is_null() {
    let state = state();

    let (data, errors) = run(&state, Service::Library, "{ book(id: 42) { name } }").await;

    assert!(errors.is_empty());
    assert_eq!(data, json!({ "book": null }));
}

#[tokio::test]
async fn test_create_and_update_book() {
    let state = state();

    let (data, errors) = run(
        &state,
        Service::Library,
        r#"mutation { book(id: 10, name: "Persuasion", authorIds: [2]) { id name description authors { name } } }"#,
    )
    .await;
    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(
        data,
        json!({ "book": { "id": 10, "name": "Persuasion", "description": "", "authors": [{ "name": "Jane" }] } })
    );

    let (data, errors) = run(
        &state,
        Service::Library,
        r#"mutation { updateBook(id: 10, description: "Last novel") { name description } }"#,
    )
    .await;
    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(data["updateBook"]["name"], "Persuasion");
    assert_eq!(data["updateBook"]["description"], "Last novel");

    assert_eq!(state.library.books.len().await, 4);
}

#[tokio::test]
async fn test_create_author_returns_author() {
    let state = state();

    let (data, errors) = run(
        &state,
        Service::Library,
        r#"mutation { author(id: 7, name: "Ursula", bookIds: [1, 2]) { id name books { name } } }"#,
    )
    .await;

    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(data["author"]["name"], "Ursula");
    assert_eq!(data["author"]["books"], json!([{ "name": "Dune" }, { "name": "Emma" }]));

    let (data, _) = run(
        &state,
        Service::Library,
        r#"mutation { updateAuthor(id: 99, name: "Nobody") { id } }"#,
    )
    .await;
    assert_eq!(data, json!({ "updateAuthor": null }));
}

#[tokio::test]
async fn test_wrong_argument_type_is_rejected_without_side_effects() {
    let state = state();

    let (_, errors) = run(
        &state,
        Service::Library,
        r#"mutation { book(id: "ten", name: "Bad", authorIds: []) { id } }"#,
    )
    .await;

    assert!(!errors.is_empty());
    assert_eq!(state.library.books.len().await, 3);
}

// =============================================================================
// Person service
// =============================================================================

#[tokio::test]
async fn test_person_crud() {
    let state = state();

    let (data, errors) = run(
        &state,
        Service::Person,
        r#"mutation { createPerson(name: "Ada", age: 36) { id name age } }"#,
    )
    .await;
    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(data, json!({ "createPerson": { "id": 2, "name": "Ada", "age": 36.0 } }));

    let (data, _) = run(
        &state,
        Service::Person,
        r#"mutation { updatePerson(id: 2, name: "Ada Lovelace") { name age } }"#,
    )
    .await;
    assert_eq!(data["updatePerson"], json!({ "name": "Ada Lovelace", "age": 36.0 }));

    let (data, _) = run(&state, Service::Person, "{ allPersons { id } }").await;
    assert_eq!(data["allPersons"], json!([{ "id": 1 }, { "id": 2 }]));

    let (data, _) = run(
        &state,
        Service::Person,
        "mutation { deletePerson(id: 1) { name } }",
    )
    .await;
    assert_eq!(data["deletePerson"]["name"], "Sagor");

    let (data, _) = run(&state, Service::Person, "{ person(id: 1) { name } }").await;
    assert_eq!(data, json!({ "person": null }));
}

// =============================================================================
// HTTP
// =============================================================================

async fn http_get(addr: std::net::SocketAddr, path: &str) -> String {
    let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
    let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await.unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

#[tokio::test]
async fn test_get_with_query_parameter() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router(state())).await });

    let books = http_get(addr, "/graphql?query=%7Bbook(id:1)%7Bname,authors%7Bname%7D%7D%7D").await;
    assert!(books.starts_with("HTTP/1.1 200"), "{books}");
    assert!(books.contains(r#"{"data":{"book":{"name":"Dune","authors":[{"name":"Frank"},{"name":"Jane"}]}}}"#));

    let persons = http_get(addr, "/person?query=%7BallPersons%7Bname%7D%7D").await;
    assert!(persons.contains(r#"{"data":{"allPersons":[{"name":"Sagor"}]}}"#));
}
