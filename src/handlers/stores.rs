// src/handlers/stores.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale, tenancy::StoreContext},
    models::store::{CreateStorePayload, Store, UpdateStorePayload},
};

// POST /api/stores
#[utoipa::path(
    post,
    path = "/api/stores",
    tag = "Stores",
    request_body = CreateStorePayload,
    responses(
        (status = 201, description = "Loja criada", body = Store),
        (status = 400, description = "Nome ausente"),
        (status = 401, description = "Não autenticado")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn create_store(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Json(payload): Json<CreateStorePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let store = app_state
        .store_service
        .create_store(&user.0, &payload.name)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(store)))
}

// GET /api/stores
#[utoipa::path(
    get,
    path = "/api/stores",
    tag = "Stores",
    responses(
        (status = 200, description = "Lojas do usuário, mais recentes primeiro", body = Vec<Store>)
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn list_my_stores(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let stores = app_state
        .store_service
        .list_stores(&user.0)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(stores)))
}

// GET /api/stores/{store_id}
#[utoipa::path(
    get,
    path = "/api/stores/{store_id}",
    tag = "Stores",
    responses(
        (status = 200, description = "Loja", body = Store),
        (status = 403, description = "Loja de outro dono"),
        (status = 404, description = "Loja não encontrada")
    ),
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn get_store(ctx: StoreContext) -> impl IntoResponse {
    (StatusCode::OK, Json(ctx.store))
}

// PATCH /api/stores/{store_id}
#[utoipa::path(
    patch,
    path = "/api/stores/{store_id}",
    tag = "Stores",
    request_body = UpdateStorePayload,
    responses(
        (status = 200, description = "Loja renomeada", body = Store)
    ),
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn update_store(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: StoreContext,
    Json(payload): Json<UpdateStorePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let store = app_state
        .store_service
        .rename_store(&ctx.store, &payload.name)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(store)))
}

// DELETE /api/stores/{store_id}
#[utoipa::path(
    delete,
    path = "/api/stores/{store_id}",
    tag = "Stores",
    responses(
        (status = 204, description = "Loja removida com catálogo e pedidos")
    ),
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn delete_store(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: StoreContext,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .store_service
        .delete_store(&ctx.store)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
