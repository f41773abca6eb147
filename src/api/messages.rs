use crate::api::AppState;
use crate::api::schemas::messages::{
    CreateMessageRequest, DeleteMessageResponse, ListMessagesParams, MessagePageResponse, MessageResponse,
};
use crate::error::{AppError, Result};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};

/// Lists the thread between two users, or one user's inbox.
///
/// # Errors
/// Returns `AppError::BadRequest` if neither `sender`+`receiver` nor `user` is given,
/// or the paging values are out of range. Nothing is read from the store in that case.
/// Returns `AppError::Store` if the store query fails.
pub async fn list_messages(
    State(state): State<AppState>,
    query: std::result::Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<impl IntoResponse> {
    let Query(pairs) = query?;
    let (selector, request) = ListMessagesParams::from_pairs(pairs).into_parts(&state.config.pagination).map_err(AppError::BadRequest)?;

    let page = state.message_service.list_messages(selector, request).await?;

    Ok(Json(MessagePageResponse::from(page)))
}

/// Stores a message and echoes it back with its assigned id and timestamp.
///
/// # Errors
/// Returns `AppError::BadRequest` if the body is not JSON or a required field is missing.
/// Returns `AppError::Store` if the insert fails.
pub async fn send_message(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateMessageRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    let message = payload.validate().map_err(AppError::BadRequest)?;

    let stored = state.message_service.send_message(message).await?;

    Ok((StatusCode::CREATED, Json(MessageResponse::from(stored))))
}

/// Deletes a message by id.
///
/// # Errors
/// Returns `AppError::BadRequest` if the id is not an integer.
/// Returns `AppError::NotFound` if no message has this id.
/// Returns `AppError::Store` if a query fails.
pub async fn delete_message(
    State(state): State<AppState>,
    path: std::result::Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse> {
    let Path(message_id) = path?;

    state.message_service.delete_message(message_id).await?;

    Ok(Json(DeleteMessageResponse::for_id(message_id)))
}

/// Fallback for unknown routes so they still answer with an `error` body.
pub async fn not_found() -> AppError {
    AppError::NotFound("Not found".to_string())
}
