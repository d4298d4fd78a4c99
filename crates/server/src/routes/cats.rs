use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Response,
    Json,
};
use models::Cat;

use super::animals;
use crate::{errors::ApiError, state::AppState};

#[utoipa::path(
    get, path = "/cats", tag = "cats",
    responses((status = 200, description = "All cats", body = [crate::openapi::CatDoc]))
)]
pub async fn list_cats(State(state): State<AppState>) -> Result<Json<Vec<Cat>>, ApiError> {
    animals::list(&state).await
}

#[utoipa::path(
    get, path = "/cats/{id}", tag = "cats",
    params(("id" = String, Path, description = "Cat identifier")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::CatDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_cat(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Cat>, ApiError> {
    animals::get_one(&state, &id).await
}

#[utoipa::path(
    post, path = "/cats", tag = "cats",
    request_body = crate::openapi::CatDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::CatDoc),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn create_cat(
    State(state): State<AppState>,
    payload: Result<Json<Cat>, JsonRejection>,
) -> Result<Response, ApiError> {
    animals::create(&state, payload).await
}
