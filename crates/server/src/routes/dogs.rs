use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Response,
    Json,
};
use models::Dog;

use super::animals;
use crate::{errors::ApiError, state::AppState};

#[utoipa::path(
    get, path = "/dogs", tag = "dogs",
    responses((status = 200, description = "All dogs", body = [crate::openapi::DogDoc]))
)]
pub async fn list_dogs(State(state): State<AppState>) -> Result<Json<Vec<Dog>>, ApiError> {
    animals::list(&state).await
}

#[utoipa::path(
    get, path = "/dogs/{id}", tag = "dogs",
    params(("id" = String, Path, description = "Dog identifier")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::DogDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_dog(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Dog>, ApiError> {
    animals::get_one(&state, &id).await
}

#[utoipa::path(
    post, path = "/dogs", tag = "dogs",
    request_body = crate::openapi::DogDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::DogDoc),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn create_dog(
    State(state): State<AppState>,
    payload: Result<Json<Dog>, JsonRejection>,
) -> Result<Response, ApiError> {
    animals::create(&state, payload).await
}
