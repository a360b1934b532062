// src/models/store.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::not_blank;

// ---
// Store (a "Loja")
// ---
// Fronteira de isolamento: todo dado de catálogo e pedidos pertence a uma loja.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: Uuid,
    #[schema(example = "Minha Loja")]
    pub name: String,
    // Subject do provedor de identidade (dono da loja)
    #[schema(example = "user_2abc")]
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Store {
    pub fn is_owned_by(&self, owner_id: &str) -> bool {
        self.user_id == owner_id
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStorePayload {
    #[validate(custom(function = "not_blank", message = "validation.name_required"))]
    #[schema(example = "Minha Loja")]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStorePayload {
    #[validate(custom(function = "not_blank", message = "validation.name_required"))]
    pub name: String,
}
