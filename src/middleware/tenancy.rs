// src/middleware/tenancy.rs

use std::collections::HashMap;

use axum::{
    extract::{FromRef, FromRequestParts, Path},
    http::{request::Parts, StatusCode},
};
use uuid::Uuid;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::store::Store,
};

// Parâmetros de rota: a loja e o item dentro dela
const STORE_ID_PARAM: &str = "store_id";
const RESOURCE_ID_PARAM: &str = "id";

/// Loja da rota, já verificada como pertencente ao usuário autenticado.
#[derive(Debug, Clone)]
pub struct StoreContext {
    pub store: Store,
    pub user: AuthenticatedUser,
}

/// `{store_id}` da rota para as rotas públicas da vitrine (sem checar dono).
#[derive(Debug, Clone, Copy)]
pub struct StoreIdPath(pub Uuid);

impl<S> FromRequestParts<S> for StoreIdPath
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        store_id_from_path(parts, state).await.map(StoreIdPath)
    }
}

/// `{id}` da rota: billboard, categoria, tamanho, cor ou produto da loja.
#[derive(Debug, Clone, Copy)]
pub struct ResourceId(pub Uuid);

impl<S> FromRequestParts<S> for ResourceId
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        uuid_from_path(parts, state, RESOURCE_ID_PARAM, "errors.invalid_id")
            .await
            .map(ResourceId)
    }
}

async fn store_id_from_path<S>(parts: &mut Parts, state: &S) -> Result<Uuid, ApiError>
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    uuid_from_path(parts, state, STORE_ID_PARAM, "errors.invalid_store_id").await
}

async fn uuid_from_path<S>(
    parts: &mut Parts,
    state: &S,
    param: &str,
    error_key: &str,
) -> Result<Uuid, ApiError>
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    let app_state = AppState::from_ref(state);
    let locale = Locale::from_parts(parts);
    let invalid = || {
        ApiError::new(
            StatusCode::BAD_REQUEST,
            app_state.i18n_store.translate(&locale.0, error_key),
        )
    };

    let Ok(Path(params)) = Path::<HashMap<String, String>>::from_request_parts(parts, state).await
    else {
        return Err(invalid());
    };

    params
        .get(param)
        .and_then(|raw| Uuid::parse_str(raw).ok())
        .ok_or_else(invalid)
}

impl<S> FromRequestParts<S> for StoreContext
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // 1. Autenticação primeiro: sem token não revelamos se a loja existe
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;

        // 2. Loja da rota
        let store_id = store_id_from_path(parts, state).await?;

        // 3. Verificação de dono
        let app_state = AppState::from_ref(state);
        let store = app_state
            .store_service
            .find_owned(store_id, &user.0)
            .await
            .map_err(|e| e.to_api_error(&Locale::from_parts(parts), &app_state.i18n_store))?;

        Ok(StoreContext { store, user })
    }
}
