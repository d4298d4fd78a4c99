use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use bson::{oid::ObjectId, Document};
use models::{Animal, AnimalRecord, Cat, Dog};
use serde_json::json;
use service::store::{DocumentStore, MemoryStore, StoreError};
use service::AnimalService;
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

use server::{routes, AppState};

struct TestApp {
    router: Router,
    animals: AnimalService,
}

fn build_app() -> TestApp {
    let animals = AnimalService::new(Arc::new(MemoryStore::new()));
    let router = routes::build_router(AppState::new(animals.clone()), CorsLayer::very_permissive());
    TestApp { router, animals }
}

/// Store whose every call fails with a backend error carrying `detail`.
struct FailingStore {
    detail: &'static str,
}

impl FailingStore {
    fn err(&self) -> StoreError {
        StoreError::Backend(self.detail.to_string())
    }
}

#[async_trait]
impl DocumentStore for FailingStore {
    async fn insert_one(&self, _doc: Document) -> Result<ObjectId, StoreError> { Err(self.err()) }
    async fn insert_many(&self, _docs: Vec<Document>) -> Result<Vec<ObjectId>, StoreError> { Err(self.err()) }
    async fn find(&self, _filter: Document) -> Result<Vec<Document>, StoreError> { Err(self.err()) }
    async fn find_by_id(&self, _id: ObjectId) -> Result<Option<Document>, StoreError> { Err(self.err()) }
    async fn clear(&self) -> Result<(), StoreError> { Err(self.err()) }
}

fn build_failing_app(detail: &'static str) -> TestApp {
    let animals = AnimalService::new(Arc::new(FailingStore { detail }));
    let router = routes::build_router(AppState::new(animals.clone()), CorsLayer::very_permissive());
    TestApp { router, animals }
}

struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl TestResponse {
    fn json<T: serde::de::DeserializeOwned>(&self) -> anyhow::Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

async fn send(app: &TestApp, req: Request<Body>) -> anyhow::Result<TestResponse> {
    let resp = app.router.clone().oneshot(req).await?;
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await?.to_vec();
    Ok(TestResponse { status, headers, body })
}

async fn get(app: &TestApp, uri: &str) -> anyhow::Result<TestResponse> {
    send(app, Request::builder().uri(uri).body(Body::empty())?).await
}

async fn post_json(app: &TestApp, uri: &str, body: &serde_json::Value) -> anyhow::Result<TestResponse> {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body)?))?;
    send(app, req).await
}

async fn seed_pile(app: &TestApp) -> anyhow::Result<(Vec<Cat>, Vec<Dog>)> {
    let mut pile: Vec<Animal> = vec![
        Cat::new("Loki", true).into(),
        Cat::new("Felix", false).into(),
        Cat::new("Mario", true).into(),
        Cat::new("Esper", true).into(),
        Dog::new("Thor", false, false).into(),
        Dog::new("Vadem", false, false).into(),
        Dog::new("Vork", false, false).into(),
    ];
    app.animals.insert_many(&mut pile).await?;

    let mut cats = Vec::new();
    let mut dogs = Vec::new();
    for animal in pile {
        match animal {
            Animal::Cat(c) => cats.push(c),
            Animal::Dog(d) => dogs.push(d),
        }
    }
    Ok((cats, dogs))
}

fn sorted_by_id<T: AnimalRecord>(mut v: Vec<T>) -> Vec<T> {
    v.sort_by(|a, b| a.id().cmp(&b.id()));
    v
}

#[tokio::test]
async fn get_cats_returns_only_the_cats() -> anyhow::Result<()> {
    let app = build_app();
    let (cats, _) = seed_pile(&app).await?;

    let res = get(&app, "/cats").await?;
    assert_eq!(res.status, StatusCode::OK);
    let listed: Vec<Cat> = res.json()?;
    assert_eq!(sorted_by_id(listed), sorted_by_id(cats));
    Ok(())
}

#[tokio::test]
async fn get_dogs_returns_only_the_dogs() -> anyhow::Result<()> {
    let app = build_app();
    let (_, dogs) = seed_pile(&app).await?;

    let res = get(&app, "/dogs").await?;
    assert_eq!(res.status, StatusCode::OK);
    let listed: Vec<Dog> = res.json()?;
    assert_eq!(sorted_by_id(listed), sorted_by_id(dogs));
    Ok(())
}

#[tokio::test]
async fn list_body_uses_wire_field_names() -> anyhow::Result<()> {
    let app = build_app();
    let mut dog = Dog::new("Thor", true, true);
    app.animals.insert_one(&mut dog).await?;

    let res = get(&app, "/dogs").await?;
    let body: serde_json::Value = res.json()?;
    assert_eq!(
        body,
        json!([{"id": dog.base.id, "name": "Thor", "barks": true, "pottyTrained": true}])
    );
    Ok(())
}

#[tokio::test]
async fn empty_collection_lists_as_empty_array() -> anyhow::Result<()> {
    let app = build_app();
    for uri in ["/cats", "/dogs"] {
        let res = get(&app, uri).await?;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.json::<serde_json::Value>()?, json!([]));
    }
    Ok(())
}

#[tokio::test]
async fn repeated_listing_is_identical() -> anyhow::Result<()> {
    let app = build_app();
    seed_pile(&app).await?;
    let first: Vec<Cat> = get(&app, "/cats").await?.json()?;
    let second: Vec<Cat> = get(&app, "/cats").await?.json()?;
    assert_eq!(sorted_by_id(first), sorted_by_id(second));
    Ok(())
}

#[tokio::test]
async fn persist_dog_returns_created_with_location() -> anyhow::Result<()> {
    let app = build_app();
    let res = post_json(&app, "/dogs", &json!({"barks": true, "name": "Barbkbark", "pottyTrained": false})).await?;
    assert_eq!(res.status, StatusCode::CREATED);

    let dog: Dog = res.json()?;
    assert_eq!(dog.base.name, "Barbkbark");
    assert!(dog.barks);
    assert!(!dog.potty_trained);
    let id = dog.base.id.clone().unwrap_or_default();
    assert!(!id.trim().is_empty());

    let location = res.headers.get(header::LOCATION).and_then(|v| v.to_str().ok());
    assert_eq!(location, Some(format!("/dogs/{id}").as_str()));
    Ok(())
}

#[tokio::test]
async fn get_single_dog_follows_location() -> anyhow::Result<()> {
    let app = build_app();
    let posted = post_json(&app, "/dogs", &json!({"barks": true, "name": "Barbkbark", "pottyTrained": false})).await?;
    let location = posted
        .headers
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .expect("location header");

    let res = get(&app, &location).await?;
    assert_eq!(res.status, StatusCode::OK);
    let dog: Dog = res.json()?;
    assert_eq!(dog.base.name, "Barbkbark");
    assert!(dog.barks);
    assert!(!dog.potty_trained);
    assert!(dog.base.id.is_some_and(|id| !id.is_empty()));
    Ok(())
}

#[tokio::test]
async fn get_single_dog_with_malformed_id_is_404() -> anyhow::Result<()> {
    let app = build_app();
    let res = get(&app, "/dogs/blabla").await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert!(res.body.is_empty());
    Ok(())
}

#[tokio::test]
async fn get_single_dog_with_unknown_id_is_404() -> anyhow::Result<()> {
    let app = build_app();
    let res = get(&app, "/dogs/64b7f0c2a1b2c3d4e5f60718").await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn cat_id_is_not_served_as_a_dog() -> anyhow::Result<()> {
    let app = build_app();
    let posted = post_json(&app, "/cats", &json!({"name": "Loki", "hisses": true})).await?;
    assert_eq!(posted.status, StatusCode::CREATED);
    let cat: Cat = posted.json()?;
    let id = cat.base.id.expect("cat id");

    assert_eq!(get(&app, &format!("/cats/{id}")).await?.status, StatusCode::OK);
    assert_eq!(get(&app, &format!("/dogs/{id}")).await?.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn create_ignores_client_id_and_defaults_booleans() -> anyhow::Result<()> {
    let app = build_app();
    let res = post_json(&app, "/dogs", &json!({"id": "64b7f0c2a1b2c3d4e5f60718", "name": "Vork", "color": "brown"})).await?;
    assert_eq!(res.status, StatusCode::CREATED);
    let dog: Dog = res.json()?;
    assert_ne!(dog.base.id.as_deref(), Some("64b7f0c2a1b2c3d4e5f60718"));
    assert!(!dog.barks);
    assert!(!dog.potty_trained);
    Ok(())
}

#[tokio::test]
async fn non_string_client_id_is_ignored_on_create() -> anyhow::Result<()> {
    let app = build_app();
    let res = post_json(&app, "/dogs", &json!({"id": 7, "name": "Thor", "barks": true})).await?;
    assert_eq!(res.status, StatusCode::CREATED);
    let dog: Dog = res.json()?;
    let id = dog.base.id.clone().expect("store-assigned id");
    assert_eq!(id.len(), 24);
    assert_eq!(dog.base.name, "Thor");

    assert_eq!(get(&app, &format!("/dogs/{id}")).await?.status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn store_failure_is_opaque_internal_error() -> anyhow::Result<()> {
    let app = build_failing_app("secret detail");
    let oid = ObjectId::new().to_hex();
    let dog_uri = format!("/dogs/{oid}");

    for res in [
        get(&app, "/dogs").await?,
        get(&app, &dog_uri).await?,
        post_json(&app, "/cats", &json!({"name": "Loki"})).await?,
    ] {
        assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(res.json::<serde_json::Value>()?, json!({"error": "Internal Server Error"}));
        assert!(!String::from_utf8_lossy(&res.body).contains("secret detail"));
    }
    Ok(())
}

#[tokio::test]
async fn malformed_body_is_bad_request() -> anyhow::Result<()> {
    let app = build_app();
    let req = Request::builder()
        .method("POST")
        .uri("/dogs")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))?;
    let res = send(&app, req).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let missing_name = post_json(&app, "/cats", &json!({"hisses": true})).await?;
    assert_eq!(missing_name.status, StatusCode::BAD_REQUEST);
    let body: serde_json::Value = missing_name.json()?;
    assert_eq!(body["error"], "Validation Error");
    Ok(())
}

#[tokio::test]
async fn health_metrics_and_docs_are_served() -> anyhow::Result<()> {
    let app = build_app();

    let res = get(&app, "/health").await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>()?, json!({"status": "ok"}));

    post_json(&app, "/cats", &json!({"name": "Esper"})).await?;
    let res = get(&app, "/metrics").await?;
    assert_eq!(res.status, StatusCode::OK);
    let text = String::from_utf8(res.body)?;
    assert!(text.contains("animal_api_animals_created_total"));

    let res = get(&app, "/api-docs/openapi.json").await?;
    assert_eq!(res.status, StatusCode::OK);
    let doc: serde_json::Value = res.json()?;
    assert!(doc["paths"].get("/dogs/{id}").is_some());
    Ok(())
}
