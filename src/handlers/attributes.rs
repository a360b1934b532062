// src/handlers/attributes.rs
//
// Tamanhos e cores têm a mesma forma; cada rota só fixa o `AttributeKind`.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        i18n::Locale,
        tenancy::{ResourceId, StoreContext, StoreIdPath},
    },
    models::catalog::{Attribute, AttributeInput, AttributeKind, AttributePayload},
};

fn validated(
    payload: AttributePayload,
    kind: AttributeKind,
    locale: &Locale,
    app_state: &AppState,
) -> Result<AttributeInput, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(locale, &app_state.i18n_store))?;

    payload
        .into_input(kind)
        .map_err(|e| AppError::ValidationError(e).to_api_error(locale, &app_state.i18n_store))
}

async fn create(
    kind: AttributeKind,
    app_state: AppState,
    locale: Locale,
    ctx: StoreContext,
    payload: AttributePayload,
) -> Result<(StatusCode, Json<Attribute>), ApiError> {
    let input = validated(payload, kind, &locale, &app_state)?;

    let attribute = app_state
        .catalog_service
        .create_attribute(kind, ctx.store.id, input)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(attribute)))
}

async fn list(
    kind: AttributeKind,
    app_state: AppState,
    locale: Locale,
    store_id: Uuid,
) -> Result<(StatusCode, Json<Vec<Attribute>>), ApiError> {
    let attributes = app_state
        .catalog_service
        .list_attributes(kind, store_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(attributes)))
}

async fn get(
    kind: AttributeKind,
    app_state: AppState,
    locale: Locale,
    store_id: Uuid,
    id: Uuid,
) -> Result<(StatusCode, Json<Attribute>), ApiError> {
    let attribute = app_state
        .catalog_service
        .get_attribute(kind, store_id, id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(attribute)))
}

async fn update(
    kind: AttributeKind,
    app_state: AppState,
    locale: Locale,
    ctx: StoreContext,
    id: Uuid,
    payload: AttributePayload,
) -> Result<(StatusCode, Json<Attribute>), ApiError> {
    let input = validated(payload, kind, &locale, &app_state)?;

    let attribute = app_state
        .catalog_service
        .update_attribute(kind, ctx.store.id, id, input)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(attribute)))
}

async fn delete(
    kind: AttributeKind,
    app_state: AppState,
    locale: Locale,
    ctx: StoreContext,
    id: Uuid,
) -> Result<StatusCode, ApiError> {
    app_state
        .catalog_service
        .delete_attribute(kind, ctx.store.id, id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// ---
// Sizes
// ---

// POST /api/{store_id}/sizes
#[utoipa::path(
    post,
    path = "/api/{store_id}/sizes",
    tag = "Sizes",
    request_body = AttributePayload,
    responses(
        (status = 201, description = "Tamanho criado", body = Attribute),
        (status = 400, description = "Nome ou valor ausente"),
        (status = 403, description = "Loja de outro dono")
    ),
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn create_size(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: StoreContext,
    Json(payload): Json<AttributePayload>,
) -> Result<impl IntoResponse, ApiError> {
    create(AttributeKind::Size, app_state, locale, ctx, payload).await
}

// GET /api/{store_id}/sizes (público)
#[utoipa::path(
    get,
    path = "/api/{store_id}/sizes",
    tag = "Sizes",
    responses(
        (status = 200, description = "Tamanhos, mais recentes primeiro", body = Vec<Attribute>)
    ),
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja")
    )
)]
pub async fn list_sizes(
    State(app_state): State<AppState>,
    locale: Locale,
    StoreIdPath(store_id): StoreIdPath,
) -> Result<impl IntoResponse, ApiError> {
    list(AttributeKind::Size, app_state, locale, store_id).await
}

// GET /api/{store_id}/sizes/{id} (público)
#[utoipa::path(
    get,
    path = "/api/{store_id}/sizes/{id}",
    tag = "Sizes",
    responses(
        (status = 200, description = "Tamanho", body = Attribute),
        (status = 404, description = "Tamanho não encontrado na loja")
    ),
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja"),
        ("id" = Uuid, Path, description = "ID do Tamanho")
    )
)]
pub async fn get_size(
    State(app_state): State<AppState>,
    locale: Locale,
    StoreIdPath(store_id): StoreIdPath,
    ResourceId(id): ResourceId,
) -> Result<impl IntoResponse, ApiError> {
    get(AttributeKind::Size, app_state, locale, store_id, id).await
}

// PATCH /api/{store_id}/sizes/{id}
#[utoipa::path(
    patch,
    path = "/api/{store_id}/sizes/{id}",
    tag = "Sizes",
    request_body = AttributePayload,
    responses(
        (status = 200, description = "Tamanho atualizado", body = Attribute),
        (status = 404, description = "Tamanho não encontrado na loja")
    ),
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja"),
        ("id" = Uuid, Path, description = "ID do Tamanho")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn update_size(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: StoreContext,
    ResourceId(id): ResourceId,
    Json(payload): Json<AttributePayload>,
) -> Result<impl IntoResponse, ApiError> {
    update(AttributeKind::Size, app_state, locale, ctx, id, payload).await
}

// DELETE /api/{store_id}/sizes/{id}
#[utoipa::path(
    delete,
    path = "/api/{store_id}/sizes/{id}",
    tag = "Sizes",
    responses(
        (status = 204, description = "Tamanho removido"),
        (status = 404, description = "Tamanho não encontrado na loja"),
        (status = 409, description = "Ainda usado por produtos")
    ),
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja"),
        ("id" = Uuid, Path, description = "ID do Tamanho")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn delete_size(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: StoreContext,
    ResourceId(id): ResourceId,
) -> Result<impl IntoResponse, ApiError> {
    delete(AttributeKind::Size, app_state, locale, ctx, id).await
}

// ---
// Colors
// ---

// POST /api/{store_id}/colors
#[utoipa::path(
    post,
    path = "/api/{store_id}/colors",
    tag = "Colors",
    request_body = AttributePayload,
    responses(
        (status = 201, description = "Cor criada", body = Attribute),
        (status = 400, description = "Nome ausente ou valor fora do formato #rgb ou #rrggbb"),
        (status = 403, description = "Loja de outro dono")
    ),
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn create_color(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: StoreContext,
    Json(payload): Json<AttributePayload>,
) -> Result<impl IntoResponse, ApiError> {
    create(AttributeKind::Color, app_state, locale, ctx, payload).await
}

// GET /api/{store_id}/colors (público)
#[utoipa::path(
    get,
    path = "/api/{store_id}/colors",
    tag = "Colors",
    responses(
        (status = 200, description = "Cores, mais recentes primeiro", body = Vec<Attribute>)
    ),
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja")
    )
)]
pub async fn list_colors(
    State(app_state): State<AppState>,
    locale: Locale,
    StoreIdPath(store_id): StoreIdPath,
) -> Result<impl IntoResponse, ApiError> {
    list(AttributeKind::Color, app_state, locale, store_id).await
}

// GET /api/{store_id}/colors/{id} (público)
#[utoipa::path(
    get,
    path = "/api/{store_id}/colors/{id}",
    tag = "Colors",
    responses(
        (status = 200, description = "Cor", body = Attribute),
        (status = 404, description = "Cor não encontrada na loja")
    ),
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja"),
        ("id" = Uuid, Path, description = "ID da Cor")
    )
)]
pub async fn get_color(
    State(app_state): State<AppState>,
    locale: Locale,
    StoreIdPath(store_id): StoreIdPath,
    ResourceId(id): ResourceId,
) -> Result<impl IntoResponse, ApiError> {
    get(AttributeKind::Color, app_state, locale, store_id, id).await
}

// PATCH /api/{store_id}/colors/{id}
#[utoipa::path(
    patch,
    path = "/api/{store_id}/colors/{id}",
    tag = "Colors",
    request_body = AttributePayload,
    responses(
        (status = 200, description = "Cor atualizada", body = Attribute),
        (status = 404, description = "Cor não encontrada na loja")
    ),
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja"),
        ("id" = Uuid, Path, description = "ID da Cor")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn update_color(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: StoreContext,
    ResourceId(id): ResourceId,
    Json(payload): Json<AttributePayload>,
) -> Result<impl IntoResponse, ApiError> {
    update(AttributeKind::Color, app_state, locale, ctx, id, payload).await
}

// DELETE /api/{store_id}/colors/{id}
#[utoipa::path(
    delete,
    path = "/api/{store_id}/colors/{id}",
    tag = "Colors",
    responses(
        (status = 204, description = "Cor removida"),
        (status = 404, description = "Cor não encontrada na loja"),
        (status = 409, description = "Ainda usada por produtos")
    ),
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja"),
        ("id" = Uuid, Path, description = "ID da Cor")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn delete_color(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: StoreContext,
    ResourceId(id): ResourceId,
) -> Result<impl IntoResponse, ApiError> {
    delete(AttributeKind::Color, app_state, locale, ctx, id).await
}
