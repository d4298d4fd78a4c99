//! Handlers shared by every animal resource. `cats` and `dogs` bind these to
//! concrete record types.

use axum::{
    extract::rejection::JsonRejection,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use models::AnimalRecord;
use tracing::info;

use crate::{errors::ApiError, metrics, state::AppState};

pub async fn list<T: AnimalRecord>(state: &AppState) -> Result<Json<Vec<T>>, ApiError> {
    metrics::record_request(T::KIND, "list");
    let records = state.animals.find_all::<T>().await?;
    info!(kind = %T::KIND, count = records.len(), "list animals");
    Ok(Json(records))
}

pub async fn get_one<T: AnimalRecord>(state: &AppState, id: &str) -> Result<Json<T>, ApiError> {
    metrics::record_request(T::KIND, "get");
    let record = state.animals.find_by_id::<T>(id).await?;
    Ok(Json(record))
}

/// Persist the posted record and answer 201 with a `Location` pointing at it.
pub async fn create<T: AnimalRecord>(
    state: &AppState,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<Response, ApiError> {
    metrics::record_request(T::KIND, "create");
    let Json(mut record) = payload?;
    // identifiers are assigned by the store only
    record.base_mut().id = None;

    state.animals.insert_one(&mut record).await?;
    let location = record
        .location()
        .ok_or_else(|| ApiError::Internal("store did not assign an id".into()))?;
    metrics::record_created(T::KIND);
    info!(kind = %T::KIND, %location, "created animal");

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(record)).into_response())
}
