use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};

use crate::core::catalogue::CatalogueService;
use crate::core::query::SearchParams;
use crate::core::{RecipePayload, RecipeRepository, ReferenceLookup};
use crate::utils::error::CatalogueError;

type Catalogue<L, R> = State<Arc<CatalogueService<L, R>>>;

fn payload_from(body: Result<Json<RecipePayload>, JsonRejection>) -> Result<RecipePayload, CatalogueError> {
    body.map(|Json(payload)| payload)
        .map_err(|rejection| {
            tracing::warn!("Malformed recipe payload: {}", rejection.body_text());
            CatalogueError::MalformedPayload {
                message: rejection.body_text(),
            }
        })
}

pub async fn hello_handler() -> Json<Value> {
    Json(json!({ "message": "hello world" }))
}

/// GET /recipes?name=&tags=&ingredients=
pub async fn search_recipes<L, R>(
    State(service): Catalogue<L, R>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Value>, CatalogueError>
where
    L: ReferenceLookup,
    R: RecipeRepository,
{
    let recipes = service.search(&params).await?;
    Ok(Json(json!({ "recipes": recipes })))
}

/// POST /recipes
pub async fn create_recipe<L, R>(
    State(service): Catalogue<L, R>,
    body: Result<Json<RecipePayload>, JsonRejection>,
) -> Result<impl IntoResponse, CatalogueError>
where
    L: ReferenceLookup,
    R: RecipeRepository,
{
    let payload = payload_from(body)?;
    let id = service.create(&payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Recipe Added", "recipeId": id })),
    ))
}

/// PUT /recipes/{id}
pub async fn replace_recipe<L, R>(
    State(service): Catalogue<L, R>,
    Path(id): Path<String>,
    body: Result<Json<RecipePayload>, JsonRejection>,
) -> Result<Json<Value>, CatalogueError>
where
    L: ReferenceLookup,
    R: RecipeRepository,
{
    let payload = payload_from(body)?;
    service.replace(&id, &payload).await?;
    Ok(Json(json!({ "message": "Recipe has been successfully updated" })))
}

/// DELETE /recipes/{id}
pub async fn delete_recipe<L, R>(
    State(service): Catalogue<L, R>,
    Path(id): Path<String>,
) -> Result<Json<Value>, CatalogueError>
where
    L: ReferenceLookup,
    R: RecipeRepository,
{
    service.delete(&id).await?;
    Ok(Json(json!({ "message": "deleted successfully" })))
}
