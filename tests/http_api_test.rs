use async_trait::async_trait;
use recipe_catalogue::core::{
    Document, Projection, Recipe, RecipeFilter, RecipeRepository, ReferenceLookup,
};
use recipe_catalogue::{build_router, CatalogueError, CatalogueService, InMemoryStore, Result};
use serde_json::{json, Value};
use std::sync::Arc;

async fn seeded_store() -> Arc<InMemoryStore> {
    let store = Arc::new(InMemoryStore::new());
    store
        .seed(
            &["Italian".to_string(), "Japanese".to_string()],
            &["vegan".to_string(), "quick".to_string()],
        )
        .await
        .unwrap();
    store
}

/// Spin up the HTTP server on an OS-assigned port, returning the base URL.
async fn spawn_server<L, R>(service: CatalogueService<L, R>) -> String
where
    L: ReferenceLookup + 'static,
    R: RecipeRepository + 'static,
{
    let app = build_router(Arc::new(service));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://127.0.0.1:{}", port)
}

async fn spawn_test_server() -> String {
    let store = seeded_store().await;
    spawn_server(CatalogueService::new(store.clone(), store)).await
}

fn margherita() -> Value {
    json!({
        "name": "Margherita",
        "cuisine": "Italian",
        "prepTime": 20,
        "cookTime": 10,
        "servings": 2,
        "ingredients": [
            {"name": "Flour", "quantity": "250g"},
            {"name": "Mozzarella", "quantity": 1, "unit": "ball"}
        ],
        "instructions": ["Make dough", "Bake"],
        "tags": ["quick"]
    })
}

async fn create(client: &reqwest::Client, base: &str, body: &Value) -> String {
    let resp = client
        .post(format!("{}/recipes", base))
        .json(body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Recipe Added");
    body["recipeId"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_hello_endpoint() {
    let base = spawn_test_server().await;
    let resp = reqwest::get(format!("{}/test", base)).await.unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "hello world");
}

#[tokio::test]
async fn test_create_then_search_returns_summary() {
    let base = spawn_test_server().await;
    let client = reqwest::Client::new();
    let id = create(&client, &base, &margherita()).await;

    let resp = reqwest::get(format!("{}/recipes?ingredients=flour,mozz&tags=quick,vegan", base))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    let recipes = body["recipes"].as_array().unwrap();
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0]["_id"], id.as_str());
    assert_eq!(recipes[0]["name"], "Margherita");
    assert_eq!(recipes[0]["cuisine"]["name"], "Italian");
    assert_eq!(recipes[0]["tags"][0]["name"], "quick");
    assert_eq!(recipes[0]["prepTime"], 20.0);
    assert!(recipes[0].get("ingredients").is_none());
}

#[tokio::test]
async fn test_search_without_match_is_empty_list() {
    let base = spawn_test_server().await;
    let client = reqwest::Client::new();
    create(&client, &base, &margherita()).await;

    let resp = reqwest::get(format!("{}/recipes?ingredients=flour,sugar", base))
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["recipes"], json!([]));
}

#[tokio::test]
async fn test_create_with_missing_fields_is_bad_request() {
    let base = spawn_test_server().await;
    let client = reqwest::Client::new();

    let mut body = margherita();
    body.as_object_mut().unwrap().remove("servings");

    let resp = client
        .post(format!("{}/recipes", base))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let error: Value = resp.json().await.unwrap();
    assert_eq!(error["error"], "Missing fields: servings");
}

#[tokio::test]
async fn test_create_with_unknown_cuisine_or_tag_is_bad_request() {
    let base = spawn_test_server().await;
    let client = reqwest::Client::new();

    let mut body = margherita();
    body["cuisine"] = json!("Martian");
    let resp = client
        .post(format!("{}/recipes", base))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let mut body = margherita();
    body["tags"] = json!(["quick", "quick"]);
    let resp = client
        .post(format!("{}/recipes", base))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let base = spawn_test_server().await;
    let resp = reqwest::Client::new()
        .post(format!("{}/recipes", base))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_replace_revalidates_whole_payload() {
    let base = spawn_test_server().await;
    let client = reqwest::Client::new();
    let id = create(&client, &base, &margherita()).await;

    let mut updated = margherita();
    updated["name"] = json!("Marinara");
    updated["tags"] = json!(["vegan", "quick"]);
    let resp = client
        .put(format!("{}/recipes/{}", base, id))
        .json(&updated)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = reqwest::get(format!("{}/recipes?name=marinara", base)).await.unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["recipes"][0]["_id"], id.as_str());
    assert_eq!(body["recipes"][0]["tags"].as_array().unwrap().len(), 2);

    updated.as_object_mut().unwrap().remove("instructions");
    let resp = client
        .put(format!("{}/recipes/{}", base, id))
        .json(&updated)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_replace_unknown_recipe_is_not_found() {
    let base = spawn_test_server().await;
    let resp = reqwest::Client::new()
        .put(format!("{}/recipes/unknown", base))
        .json(&margherita())
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_delete_then_delete_again() {
    let base = spawn_test_server().await;
    let client = reqwest::Client::new();
    let id = create(&client, &base, &margherita()).await;

    let resp = client
        .delete(format!("{}/recipes/{}", base, id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "deleted successfully");

    let resp = client
        .delete(format!("{}/recipes/{}", base, id))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

/// Recipe repository whose backend is down.
struct UnavailableRepository;

#[async_trait]
impl RecipeRepository for UnavailableRepository {
    async fn insert(&self, _recipe: Recipe) -> Result<String> {
        Err(CatalogueError::store("write timed out"))
    }

    async fn replace(&self, _id: &str, _recipe: Recipe) -> Result<bool> {
        Err(CatalogueError::store("write timed out"))
    }

    async fn delete(&self, _id: &str) -> Result<bool> {
        Err(CatalogueError::store("write timed out"))
    }

    async fn find(&self, _filter: &RecipeFilter, _projection: &Projection) -> Result<Vec<Document>> {
        Err(CatalogueError::store("read timed out"))
    }
}

#[tokio::test]
async fn test_store_failures_are_internal_errors() {
    let store = seeded_store().await;
    let base = spawn_server(CatalogueService::new(store, UnavailableRepository)).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/recipes", base))
        .json(&margherita())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);
    let error: Value = resp.json().await.unwrap();
    assert_eq!(error["error"], "Internal server error");

    let resp = reqwest::get(format!("{}/recipes", base)).await.unwrap();
    assert_eq!(resp.status(), 500);

    let resp = client
        .delete(format!("{}/recipes/any", base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);
}

#[tokio::test]
async fn test_validation_precedes_store_failure() {
    let store = seeded_store().await;
    let base = spawn_server(CatalogueService::new(store, UnavailableRepository)).await;

    let mut body = margherita();
    body["cuisine"] = json!("Martian");
    let resp = reqwest::Client::new()
        .post(format!("{}/recipes", base))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}
