// src/db/store_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, db::StoreDirectory, models::store::Store};

// Ordem de remoção dos dados de uma loja
const DEPENDENT_TABLES: [&str; 6] =
    ["orders", "products", "categories", "billboards", "sizes", "colors"];

// Responsável por todas as interações com a tabela 'stores'
#[derive(Clone)]
pub struct StoreRepository {
    pool: PgPool,
}

impl StoreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoreDirectory for StoreRepository {
    async fn create(&self, owner_id: &str, name: &str) -> Result<Store, AppError> {
        let store = sqlx::query_as::<_, Store>(
            "INSERT INTO stores (name, user_id) VALUES ($1, $2) RETURNING *",
        )
            .bind(name)
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(store)
    }

    async fn find_by_id(&self, store_id: Uuid) -> Result<Option<Store>, AppError> {
        let store = sqlx::query_as::<_, Store>("SELECT * FROM stores WHERE id = $1")
            .bind(store_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(store)
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Store>, AppError> {
        let stores = sqlx::query_as::<_, Store>(
            "SELECT * FROM stores WHERE user_id = $1 ORDER BY created_at DESC",
        )
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(stores)
    }

    async fn rename(&self, store_id: Uuid, name: &str) -> Result<Store, AppError> {
        sqlx::query_as::<_, Store>(
            "UPDATE stores SET name = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
            .bind(store_id)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::StoreNotFound)
    }

    async fn delete(&self, store_id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        // Dependentes antes das dependências; itens de pedido e imagens saem por CASCADE
        for table in DEPENDENT_TABLES {
            sqlx::query(&format!("DELETE FROM {table} WHERE store_id = $1"))
                .bind(store_id)
                .execute(&mut *tx)
                .await?;
        }

        let result = sqlx::query("DELETE FROM stores WHERE id = $1")
            .bind(store_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::StoreNotFound);
        }
        tx.commit().await?;
        Ok(())
    }
}
