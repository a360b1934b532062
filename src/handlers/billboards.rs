// src/handlers/billboards.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        i18n::Locale,
        tenancy::{ResourceId, StoreContext, StoreIdPath},
    },
    models::catalog::{Billboard, BillboardPayload},
};

// POST /api/{store_id}/billboards
#[utoipa::path(
    post,
    path = "/api/{store_id}/billboards",
    tag = "Billboards",
    request_body = BillboardPayload,
    responses(
        (status = 201, description = "Billboard criado", body = Billboard),
        (status = 400, description = "Texto ou URL da imagem inválidos"),
        (status = 403, description = "Loja de outro dono")
    ),
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn create_billboard(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: StoreContext,
    Json(payload): Json<BillboardPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let billboard = app_state
        .catalog_service
        .create_billboard(ctx.store.id, payload.into_input())
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(billboard)))
}

// GET /api/{store_id}/billboards (público)
#[utoipa::path(
    get,
    path = "/api/{store_id}/billboards",
    tag = "Billboards",
    responses(
        (status = 200, description = "Billboards, mais recentes primeiro", body = Vec<Billboard>)
    ),
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja")
    )
)]
pub async fn list_billboards(
    State(app_state): State<AppState>,
    locale: Locale,
    StoreIdPath(store_id): StoreIdPath,
) -> Result<impl IntoResponse, ApiError> {
    let billboards = app_state
        .catalog_service
        .list_billboards(store_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(billboards)))
}

// GET /api/{store_id}/billboards/{id} (público)
#[utoipa::path(
    get,
    path = "/api/{store_id}/billboards/{id}",
    tag = "Billboards",
    responses(
        (status = 200, description = "Billboard", body = Billboard),
        (status = 404, description = "Billboard não encontrado na loja")
    ),
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja"),
        ("id" = Uuid, Path, description = "ID do Billboard")
    )
)]
pub async fn get_billboard(
    State(app_state): State<AppState>,
    locale: Locale,
    StoreIdPath(store_id): StoreIdPath,
    ResourceId(id): ResourceId,
) -> Result<impl IntoResponse, ApiError> {
    let billboard = app_state
        .catalog_service
        .get_billboard(store_id, id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(billboard)))
}

// PATCH /api/{store_id}/billboards/{id}
#[utoipa::path(
    patch,
    path = "/api/{store_id}/billboards/{id}",
    tag = "Billboards",
    request_body = BillboardPayload,
    responses(
        (status = 200, description = "Billboard atualizado", body = Billboard),
        (status = 404, description = "Billboard não encontrado na loja")
    ),
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja"),
        ("id" = Uuid, Path, description = "ID do Billboard")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn update_billboard(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: StoreContext,
    ResourceId(id): ResourceId,
    Json(payload): Json<BillboardPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let billboard = app_state
        .catalog_service
        .update_billboard(ctx.store.id, id, payload.into_input())
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(billboard)))
}

// DELETE /api/{store_id}/billboards/{id}
#[utoipa::path(
    delete,
    path = "/api/{store_id}/billboards/{id}",
    tag = "Billboards",
    responses(
        (status = 204, description = "Billboard removido"),
        (status = 404, description = "Billboard não encontrado na loja"),
        (status = 409, description = "Ainda usado por categorias")
    ),
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja"),
        ("id" = Uuid, Path, description = "ID do Billboard")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn delete_billboard(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: StoreContext,
    ResourceId(id): ResourceId,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .catalog_service
        .delete_billboard(ctx.store.id, id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
