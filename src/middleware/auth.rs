// src/middleware/auth.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
};

// Extrator para obter o usuário autenticado diretamente nos handlers.
// Guarda o `sub` do token emitido pelo provedor de identidade.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub String);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let locale = Locale::from_parts(parts);

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|rejection| {
                    let err = if rejection.is_missing() {
                        AppError::MissingToken
                    } else {
                        AppError::InvalidToken
                    };
                    err.to_api_error(&locale, &app_state.i18n_store)
                })?;

        let owner_id = app_state
            .auth_service
            .validate_token(bearer.token())
            .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

        Ok(AuthenticatedUser(owner_id))
    }
}
