use crate::models::{Category, Content};
use crate::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;

/// Random dad joke
#[utoipa::path(
    get,
    path = "/joke",
    responses(
        (status = 200, description = "A random joke document", body = ContentSchema),
        (status = 404, description = "No jokes stored", body = ErrorResponse),
        (status = 503, description = "Content store unavailable", body = ErrorResponse)
    ),
    tag = "Content"
)]
pub async fn random_joke(State(state): State<AppState>) -> Result<Json<Content>, AppError> {
    random_content(&state, Category::Joke).await
}

/// Random pickup line
#[utoipa::path(
    get,
    path = "/pickup",
    responses(
        (status = 200, description = "A random pickup line document", body = ContentSchema),
        (status = 404, description = "No pickup lines stored", body = ErrorResponse),
        (status = 503, description = "Content store unavailable", body = ErrorResponse)
    ),
    tag = "Content"
)]
pub async fn random_pickup(State(state): State<AppState>) -> Result<Json<Content>, AppError> {
    random_content(&state, Category::Pickup).await
}

async fn random_content(state: &AppState, category: Category) -> Result<Json<Content>, AppError> {
    let content = state.content.random(category).await?;
    Ok(Json(content))
}
