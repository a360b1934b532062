// src/services/analytics_service.rs

use std::sync::Arc;

use chrono::Datelike;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{OrderStore, ProductStore},
    models::{
        dashboard::GraphRevenueEntry,
        order::{OrderQuery, OrderWithItems},
    },
};

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// ---
// Indicadores da loja
// ---
// Cada operação faz uma leitura escopada pela loja e reduz em memória.
// Sem estado, sem escrita: chamadas repetidas sobre os mesmos dados dão o mesmo resultado.
#[derive(Clone)]
pub struct AnalyticsService {
    orders: Arc<dyn OrderStore>,
    products: Arc<dyn ProductStore>,
}

impl AnalyticsService {
    pub fn new(orders: Arc<dyn OrderStore>, products: Arc<dyn ProductStore>) -> Self {
        Self { orders, products }
    }

    /// Receita total dos pedidos pagos. Zero quando não há nenhum.
    pub async fn total_revenue(&self, store_id: Uuid) -> Result<Decimal, AppError> {
        let paid_orders = self.orders.find_many(store_id, OrderQuery::paid()).await?;
        Ok(sum_revenue(&paid_orders))
    }

    pub async fn sales_count(&self, store_id: Uuid) -> Result<i64, AppError> {
        self.orders.count(store_id, OrderQuery::paid()).await
    }

    pub async fn stock_count(&self, store_id: Uuid) -> Result<i64, AppError> {
        self.products.count_in_stock(store_id).await
    }

    /// Receita por mês do ano (Jan..Dec), sempre 12 entradas.
    ///
    /// Não há filtro de período: pedidos de anos diferentes caem no mesmo mês.
    pub async fn monthly_revenue(
        &self,
        store_id: Uuid,
    ) -> Result<Vec<GraphRevenueEntry>, AppError> {
        let paid_orders = self.orders.find_many(store_id, OrderQuery::paid()).await?;
        Ok(group_by_month(&paid_orders))
    }
}

pub fn sum_revenue(orders: &[OrderWithItems]) -> Decimal {
    orders.iter().map(OrderWithItems::total).sum()
}

// Mês calculado em UTC
pub fn group_by_month(orders: &[OrderWithItems]) -> Vec<GraphRevenueEntry> {
    let mut buckets = [Decimal::ZERO; 12];
    for order in orders {
        buckets[order.order.created_at.month0() as usize] += order.total();
    }

    MONTH_LABELS
        .iter()
        .zip(buckets)
        .map(|(label, total)| GraphRevenueEntry {
            name: label.to_string(),
            total,
        })
        .collect()
}
