// src/models/order.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Pedido ---
// Criado pelo checkout; `is_paid` é virado pelo webhook de pagamento (ambos externos).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub store_id: Uuid,
    pub is_paid: bool,
    #[schema(example = "+1 555 0100")]
    pub phone: String,
    #[schema(example = "742 Evergreen Terrace")]
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Item do pedido, já com o produto resolvido ---
// Uma linha = uma unidade do produto (não existe campo de quantidade).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderLine>,
}

impl OrderWithItems {
    /// Receita do pedido: soma do preço de cada item.
    pub fn total(&self) -> Decimal {
        self.items.iter().map(|item| item.price).sum()
    }
}

/// Critério de busca de pedidos de uma loja. `paid = None` traz todos.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderQuery {
    pub paid: Option<bool>,
}

impl OrderQuery {
    pub const fn paid() -> Self {
        Self { paid: Some(true) }
    }

    pub const fn all() -> Self {
        Self { paid: None }
    }

    pub fn matches(&self, order: &Order) -> bool {
        self.paid.is_none_or(|paid| order.is_paid == paid)
    }
}

// --- Linha da tabela de pedidos do painel ---
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderRow {
    pub id: Uuid,
    pub phone: String,
    pub address: String,
    // Nomes dos produtos separados por ", "
    #[schema(example = "Camiseta, Boné")]
    pub products: String,
    #[schema(example = 35.0)]
    pub total_price: Decimal,
    #[schema(example = "$35.00")]
    pub formatted_total: String,
    pub is_paid: bool,
    #[schema(example = "March 05, 2024")]
    pub created_at: String,
}
