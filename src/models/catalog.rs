// src/models/catalog.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::common::validation::{is_hex_color, not_blank};

// --- Billboard (banner exibido no topo de uma categoria) ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Billboard {
    pub id: Uuid,
    pub store_id: Uuid,
    #[schema(example = "Coleção de Inverno")]
    pub label: String,
    #[schema(example = "https://media.example.com/b/inverno.jpg")]
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Categoria ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub store_id: Uuid,
    pub billboard_id: Uuid,
    #[schema(example = "Camisetas")]
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDetail {
    #[serde(flatten)]
    pub category: Category,
    pub billboard: Billboard,
}

// --- Tamanho ou cor: mesma forma (nome + valor) ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    pub id: Uuid,
    pub store_id: Uuid,
    #[schema(example = "Médio")]
    pub name: String,
    #[schema(example = "M")]
    pub value: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Size,
    Color,
}

impl AttributeKind {
    pub const fn table(self) -> &'static str {
        match self {
            AttributeKind::Size => "sizes",
            AttributeKind::Color => "colors",
        }
    }

    /// Campo do payload de produto que referencia este tipo.
    pub const fn field(self) -> &'static str {
        match self {
            AttributeKind::Size => "sizeId",
            AttributeKind::Color => "colorId",
        }
    }
}

// ---
// Dados já validados
// ---

#[derive(Debug, Clone)]
pub struct BillboardInput {
    pub label: String,
    pub image_url: String,
}

#[derive(Debug, Clone)]
pub struct CategoryInput {
    pub billboard_id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct AttributeInput {
    pub name: String,
    pub value: String,
}

// ---
// Payloads (POST e PATCH usam o mesmo corpo completo)
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BillboardPayload {
    #[validate(custom(function = "not_blank", message = "validation.label_required"))]
    #[serde(default)]
    #[schema(example = "Coleção de Inverno")]
    pub label: String,

    #[validate(url(message = "validation.image_url_invalid"))]
    #[serde(default)]
    #[schema(example = "https://media.example.com/b/inverno.jpg")]
    pub image_url: String,
}

impl BillboardPayload {
    pub fn into_input(self) -> BillboardInput {
        BillboardInput {
            label: self.label.trim().to_string(),
            image_url: self.image_url,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPayload {
    #[validate(custom(function = "not_blank", message = "validation.name_required"))]
    #[serde(default)]
    #[schema(example = "Camisetas")]
    pub name: String,

    #[validate(required(message = "validation.billboard_required"))]
    pub billboard_id: Option<Uuid>,
}

impl CategoryPayload {
    pub fn into_input(self) -> Result<CategoryInput, ValidationErrors> {
        let Some(billboard_id) = self.billboard_id else {
            let mut errors = ValidationErrors::new();
            errors.add("billboardId", message("required", "validation.billboard_required"));
            return Err(errors);
        };

        Ok(CategoryInput {
            billboard_id,
            name: self.name.trim().to_string(),
        })
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttributePayload {
    #[validate(custom(function = "not_blank", message = "validation.name_required"))]
    #[serde(default)]
    #[schema(example = "Médio")]
    pub name: String,

    #[validate(custom(function = "not_blank", message = "validation.value_required"))]
    #[serde(default)]
    #[schema(example = "M")]
    pub value: String,
}

impl AttributePayload {
    // Cores guardam o hexadecimal exibido na vitrine
    pub fn into_input(self, kind: AttributeKind) -> Result<AttributeInput, ValidationErrors> {
        let value = self.value.trim().to_string();

        if kind == AttributeKind::Color && !is_hex_color(&value) {
            let mut errors = ValidationErrors::new();
            errors.add("value", message("hex", "validation.color_value_invalid"));
            return Err(errors);
        }

        Ok(AttributeInput {
            name: self.name.trim().to_string(),
            value,
        })
    }
}

fn message(code: &'static str, key: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(key.into());
    err
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attribute(name: &str, value: &str) -> AttributePayload {
        AttributePayload {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn whitespace_label_and_bad_image_url_are_rejected() {
        let payload: BillboardPayload =
            serde_json::from_value(serde_json::json!({ "label": "   ", "imageUrl": "capa" }))
                .unwrap();

        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("label"));
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn category_without_billboard_fails() {
        let payload: CategoryPayload =
            serde_json::from_value(serde_json::json!({ "name": "Camisetas" })).unwrap();

        assert!(payload.validate().is_err());
        assert!(payload.into_input().is_err());
    }

    #[test]
    fn color_values_must_be_hex_but_sizes_are_free_text() {
        assert!(attribute("Preto", "#000").into_input(AttributeKind::Color).is_ok());
        assert!(attribute("Preto", "black").into_input(AttributeKind::Color).is_err());

        let size = attribute("  Grande ", " GG ").into_input(AttributeKind::Size).unwrap();
        assert_eq!(size.name, "Grande");
        assert_eq!(size.value, "GG");
    }

    #[test]
    fn blank_attribute_value_fails_validation() {
        let errors = attribute("Grande", "  ").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("value"));
    }
}
