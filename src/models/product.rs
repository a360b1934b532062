// src/models/product.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::catalog::{Attribute, Category};

// --- Produto (catálogo da loja) ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub store_id: Uuid,
    pub category_id: Uuid,
    pub size_id: Uuid,
    pub color_id: Uuid,
    #[schema(example = "Camiseta Básica")]
    pub name: String,
    pub description: String,
    // NUMERIC(12,2) no banco; nunca ponto flutuante internamente
    #[schema(example = 49.90)]
    pub price: Decimal,
    pub is_featured: bool,
    pub in_stock: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Imagem (URL hospedada externamente) ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub id: Uuid,
    pub product_id: Uuid,
    #[schema(example = "https://media.example.com/p/123.jpg")]
    pub url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub images: Vec<ProductImage>,
    pub category: Category,
    pub size: Attribute,
    pub color: Attribute,
}

/// Filtros da listagem. A vitrine nunca liga `include_out_of_stock`;
/// só a tabela do painel mostra produtos esgotados.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category_id: Option<Uuid>,
    pub size_id: Option<Uuid>,
    pub color_id: Option<Uuid>,
    pub featured_only: bool,
    pub include_out_of_stock: bool,
}

impl ProductFilter {
    pub fn admin() -> Self {
        Self {
            include_out_of_stock: true,
            ..Default::default()
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        (self.include_out_of_stock || product.in_stock)
            && self.category_id.is_none_or(|id| product.category_id == id)
            && self.size_id.is_none_or(|id| product.size_id == id)
            && self.color_id.is_none_or(|id| product.color_id == id)
            && (!self.featured_only || product.is_featured)
    }
}

// --- Linha da tabela de produtos do painel ---
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductRow {
    pub id: Uuid,
    pub name: String,
    pub is_featured: bool,
    pub in_stock: bool,
    #[schema(example = 49.90)]
    pub price: Decimal,
    #[schema(example = "$49.90")]
    pub formatted_price: String,
    #[schema(example = "Camisetas")]
    pub category: String,
    #[schema(example = "Médio")]
    pub size: String,
    #[schema(example = "#000000")]
    pub color: String,
    #[schema(example = "March 05, 2024")]
    pub created_at: String,
}

// Dados já validados para inserir ou substituir um produto
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub category_id: Uuid,
    pub size_id: Uuid,
    pub color_id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub is_featured: bool,
    pub in_stock: bool,
    pub image_urls: Vec<String>,
}
