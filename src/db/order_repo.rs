// src/db/order_repo.rs

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::OrderStore,
    models::order::{Order, OrderLine, OrderQuery, OrderWithItems},
};

#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderStore for OrderRepository {
    async fn find_many(
        &self,
        store_id: Uuid,
        query: OrderQuery,
    ) -> Result<Vec<OrderWithItems>, AppError> {
        // Pedidos e itens lidos no mesmo snapshot
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, store_id, is_paid, phone, address, created_at, updated_at
            FROM orders
            WHERE store_id = $1
              AND ($2::boolean IS NULL OR is_paid = $2)
            ORDER BY created_at DESC
            "#,
        )
            .bind(store_id)
            .bind(query.paid)
            .fetch_all(&mut *tx)
            .await?;

        let lines = sqlx::query_as::<_, OrderLine>(
            r#"
            SELECT oi.id, oi.order_id, oi.product_id, p.name AS product_name, p.price
            FROM order_items oi
            JOIN orders o ON oi.order_id = o.id
            JOIN products p ON oi.product_id = p.id
            WHERE o.store_id = $1
              AND ($2::boolean IS NULL OR o.is_paid = $2)
            ORDER BY oi.created_at ASC, oi.id ASC
            "#,
        )
            .bind(store_id)
            .bind(query.paid)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(
            %store_id,
            orders = orders.len(),
            lines = lines.len(),
            "pedidos carregados"
        );
        Ok(attach_lines(orders, lines))
    }

    async fn count(&self, store_id: Uuid, query: OrderQuery) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM orders
            WHERE store_id = $1
              AND ($2::boolean IS NULL OR is_paid = $2)
            "#,
        )
            .bind(store_id)
            .bind(query.paid)
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }
}

// Distribui os itens entre os pedidos, preservando a ordem de cada lista.
pub(crate) fn attach_lines(orders: Vec<Order>, lines: Vec<OrderLine>) -> Vec<OrderWithItems> {
    let mut by_order: HashMap<Uuid, Vec<OrderLine>> = HashMap::new();
    for line in lines {
        by_order.entry(line.order_id).or_default().push(line);
    }

    orders
        .into_iter()
        .map(|order| {
            let items = by_order.remove(&order.id).unwrap_or_default();
            OrderWithItems { order, items }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn order(id: Uuid) -> Order {
        Order {
            id,
            store_id: Uuid::nil(),
            is_paid: true,
            phone: String::new(),
            address: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn line(order_id: Uuid, price: i64) -> OrderLine {
        OrderLine {
            id: Uuid::new_v4(),
            order_id,
            product_id: Uuid::new_v4(),
            product_name: format!("p{price}"),
            price: Decimal::new(price, 0),
        }
    }

    #[test]
    fn attaches_lines_to_their_orders_in_order() {
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let lines = vec![line(a, 10), line(b, 20), line(a, 5)];

        let result = attach_lines(vec![order(a), order(b), order(c)], lines);

        let names: Vec<_> = result[0].items.iter().map(|l| l.product_name.as_str()).collect();
        assert_eq!(names, ["p10", "p5"]);
        assert_eq!(result[1].items.len(), 1);
        // Pedido sem itens continua presente
        assert!(result[2].items.is_empty());
    }
}
