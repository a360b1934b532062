// src/handlers/categories.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        i18n::Locale,
        tenancy::{ResourceId, StoreContext, StoreIdPath},
    },
    models::catalog::{Category, CategoryDetail, CategoryInput, CategoryPayload},
};

fn validated(
    payload: CategoryPayload,
    locale: &Locale,
    app_state: &AppState,
) -> Result<CategoryInput, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(locale, &app_state.i18n_store))?;

    payload
        .into_input()
        .map_err(|e| AppError::ValidationError(e).to_api_error(locale, &app_state.i18n_store))
}

// POST /api/{store_id}/categories
#[utoipa::path(
    post,
    path = "/api/{store_id}/categories",
    tag = "Categories",
    request_body = CategoryPayload,
    responses(
        (status = 201, description = "Categoria criada", body = Category),
        (status = 400, description = "Nome ausente ou billboard de outra loja"),
        (status = 403, description = "Loja de outro dono")
    ),
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn create_category(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: StoreContext,
    Json(payload): Json<CategoryPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let input = validated(payload, &locale, &app_state)?;

    let category = app_state
        .catalog_service
        .create_category(ctx.store.id, input)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(category)))
}

// GET /api/{store_id}/categories (público)
#[utoipa::path(
    get,
    path = "/api/{store_id}/categories",
    tag = "Categories",
    responses(
        (status = 200, description = "Categorias com seus billboards", body = Vec<CategoryDetail>)
    ),
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja")
    )
)]
pub async fn list_categories(
    State(app_state): State<AppState>,
    locale: Locale,
    StoreIdPath(store_id): StoreIdPath,
) -> Result<impl IntoResponse, ApiError> {
    let categories = app_state
        .catalog_service
        .list_categories(store_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(categories)))
}

// GET /api/{store_id}/categories/{id} (público)
#[utoipa::path(
    get,
    path = "/api/{store_id}/categories/{id}",
    tag = "Categories",
    responses(
        (status = 200, description = "Categoria com billboard", body = CategoryDetail),
        (status = 404, description = "Categoria não encontrada na loja")
    ),
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja"),
        ("id" = Uuid, Path, description = "ID da Categoria")
    )
)]
pub async fn get_category(
    State(app_state): State<AppState>,
    locale: Locale,
    StoreIdPath(store_id): StoreIdPath,
    ResourceId(id): ResourceId,
) -> Result<impl IntoResponse, ApiError> {
    let category = app_state
        .catalog_service
        .get_category(store_id, id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(category)))
}

// PATCH /api/{store_id}/categories/{id}
#[utoipa::path(
    patch,
    path = "/api/{store_id}/categories/{id}",
    tag = "Categories",
    request_body = CategoryPayload,
    responses(
        (status = 200, description = "Categoria atualizada", body = Category),
        (status = 404, description = "Categoria não encontrada na loja")
    ),
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja"),
        ("id" = Uuid, Path, description = "ID da Categoria")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn update_category(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: StoreContext,
    ResourceId(id): ResourceId,
    Json(payload): Json<CategoryPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let input = validated(payload, &locale, &app_state)?;

    let category = app_state
        .catalog_service
        .update_category(ctx.store.id, id, input)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(category)))
}

// DELETE /api/{store_id}/categories/{id}
#[utoipa::path(
    delete,
    path = "/api/{store_id}/categories/{id}",
    tag = "Categories",
    responses(
        (status = 204, description = "Categoria removida"),
        (status = 404, description = "Categoria não encontrada na loja"),
        (status = 409, description = "Ainda usada por produtos")
    ),
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja"),
        ("id" = Uuid, Path, description = "ID da Categoria")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn delete_category(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: StoreContext,
    ResourceId(id): ResourceId,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .catalog_service
        .delete_category(ctx.store.id, id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
