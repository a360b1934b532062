// src/common/error.rs

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::{common::i18n::I18nStore, middleware::i18n::Locale};

// Erro de domínio: usado por repositórios e serviços.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Token ausente")]
    MissingToken,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Loja não encontrada")]
    StoreNotFound,

    #[error("Acesso negado à loja")]
    Forbidden,

    // Billboard, categoria, tamanho, cor ou produto inexistente na loja
    #[error("Recurso não encontrado")]
    ResourceNotFound,

    // Exclusão bloqueada por registros que ainda apontam para o recurso
    #[error("Recurso em uso")]
    ResourceInUse,

    // Chave estrangeira inexistente (categoria, tamanho, cor...)
    #[error("Referência inválida: {0}")]
    InvalidReference(String),

    // Variante para erros de banco de dados (inclui indisponibilidade do pool)
    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

// Erro já traduzido, pronto para virar resposta HTTP.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            details: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::InvalidReference(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::MissingToken | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::StoreNotFound | AppError::ResourceNotFound => StatusCode::NOT_FOUND,
            AppError::ResourceInUse => StatusCode::CONFLICT,
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Converte o erro de domínio numa resposta traduzida para o idioma do cliente.
    pub fn to_api_error(self, locale: &Locale, i18n: &I18nStore) -> ApiError {
        let status = self.status_code();
        let lang = locale.0.as_str();

        match self {
            AppError::ValidationError(errors) => {
                let mut details: HashMap<String, Vec<String>> = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages = field_errors
                        .iter()
                        .map(|e| match &e.message {
                            Some(key) => i18n.translate(lang, key),
                            None => i18n.translate(lang, &format!("validation.{}", e.code)),
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                ApiError {
                    status,
                    error: i18n.translate(lang, "errors.validation"),
                    details: Some(json!(details)),
                }
            }
            AppError::InvalidReference(field) => ApiError {
                status,
                error: i18n.translate(lang, "errors.invalid_reference"),
                details: Some(json!({ "field": field })),
            },
            AppError::MissingToken => {
                ApiError::new(status, i18n.translate(lang, "errors.missing_token"))
            }
            AppError::InvalidToken => {
                ApiError::new(status, i18n.translate(lang, "errors.invalid_token"))
            }
            AppError::Forbidden => ApiError::new(status, i18n.translate(lang, "errors.forbidden")),
            AppError::StoreNotFound => {
                ApiError::new(status, i18n.translate(lang, "errors.store_not_found"))
            }
            AppError::ResourceNotFound => {
                ApiError::new(status, i18n.translate(lang, "errors.not_found"))
            }
            AppError::ResourceInUse => ApiError::new(status, i18n.translate(lang, "errors.in_use")),
            // Banco e erros internos viram 500; o detalhe fica só no log.
            ref e => {
                tracing::error!(error = %e, "Erro Interno do Servidor");
                ApiError::new(status, i18n.translate(lang, "errors.internal"))
            }
        }
    }
}
