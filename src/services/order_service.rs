// src/services/order_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::{error::AppError, money::format_usd},
    db::OrderStore,
    models::order::{OrderQuery, OrderRow, OrderWithItems},
};

#[derive(Clone)]
pub struct OrderService {
    orders: Arc<dyn OrderStore>,
}

impl OrderService {
    pub fn new(orders: Arc<dyn OrderStore>) -> Self {
        Self { orders }
    }

    /// Tabela de pedidos do painel: pagos e não pagos, mais recentes primeiro.
    pub async fn list_orders(&self, store_id: Uuid) -> Result<Vec<OrderRow>, AppError> {
        let orders = self.orders.find_many(store_id, OrderQuery::all()).await?;
        Ok(orders.iter().map(to_row).collect())
    }
}

fn to_row(order: &OrderWithItems) -> OrderRow {
    let total = order.total();
    let products = order
        .items
        .iter()
        .map(|item| item.product_name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    OrderRow {
        id: order.order.id,
        phone: order.order.phone.clone(),
        address: order.order.address.clone(),
        products,
        total_price: total,
        formatted_total: format_usd(total),
        is_paid: order.order.is_paid,
        created_at: order.order.created_at.format("%B %d, %Y").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{memory::SeedProduct, InMemoryDatabase};
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn rows_join_product_names_and_format_totals() {
        let db = InMemoryDatabase::new();
        let service = OrderService::new(Arc::new(db.clone()));
        let store = Uuid::new_v4();
        let shirt =
            db.insert_product(store, SeedProduct::new("Camiseta", Decimal::new(1000, 2))).unwrap();
        let cap = db.insert_product(store, SeedProduct::new("Boné", Decimal::new(500, 2))).unwrap();

        let old = Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap();
        let new = Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0).unwrap();
        db.insert_order(store, false, old, &[shirt.id, cap.id]).unwrap();
        db.insert_order(store, true, new, &[cap.id]).unwrap();

        let rows = service.list_orders(store).await.unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].created_at, "April 01, 2024");
        assert!(rows[0].is_paid);
        assert_eq!(rows[1].products, "Camiseta, Boné");
        assert_eq!(rows[1].total_price, Decimal::new(1500, 2));
        assert_eq!(rows[1].formatted_total, "$15.00");
        assert_eq!(rows[1].created_at, "March 05, 2024");
    }
}
