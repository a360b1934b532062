// src/services/auth.rs

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::common::error::AppError;

// Estrutura de dados ("claims") do JWT emitido pelo provedor de identidade
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (ID do usuário no provedor)
    pub exp: usize,  // Expiration time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

/// Verifica tokens HS256 emitidos externamente. Não cria sessões.
#[derive(Clone)]
pub struct AuthService {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AuthService {
    pub fn new(jwt_secret: &str, issuer: Option<&str>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        if let Some(iss) = issuer {
            validation.set_issuer(&[iss]);
        }

        Self {
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Retorna o id do dono (claim `sub`).
    pub fn validate_token(&self, token: &str) -> Result<String, AppError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "token rejeitado");
                AppError::InvalidToken
            })?;

        if token_data.claims.sub.is_empty() {
            return Err(AppError::InvalidToken);
        }
        Ok(token_data.claims.sub)
    }
}
