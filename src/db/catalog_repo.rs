// src/db/catalog_repo.rs

use std::collections::HashMap;

use anyhow::anyhow;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CatalogStore,
    models::catalog::{
        Attribute, AttributeInput, AttributeKind, Billboard, BillboardInput, Category,
        CategoryDetail, CategoryInput,
    },
};

// Billboards, categorias, tamanhos e cores. Toda consulta filtra por `store_id`.
#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn billboards_by_id(
        &self,
        store_id: Uuid,
        ids: Vec<Uuid>,
    ) -> Result<Vec<Billboard>, AppError> {
        let billboards = sqlx::query_as::<_, Billboard>(
            "SELECT * FROM billboards WHERE store_id = $1 AND id = ANY($2)",
        )
            .bind(store_id)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(billboards)
    }
}

#[async_trait]
impl CatalogStore for CatalogRepository {
    // ---
    // Billboards
    // ---

    async fn create_billboard(
        &self,
        store_id: Uuid,
        input: BillboardInput,
    ) -> Result<Billboard, AppError> {
        let billboard = sqlx::query_as::<_, Billboard>(
            "INSERT INTO billboards (store_id, label, image_url) VALUES ($1, $2, $3) RETURNING *",
        )
            .bind(store_id)
            .bind(&input.label)
            .bind(&input.image_url)
            .fetch_one(&self.pool)
            .await?;

        Ok(billboard)
    }

    async fn list_billboards(&self, store_id: Uuid) -> Result<Vec<Billboard>, AppError> {
        let billboards = sqlx::query_as::<_, Billboard>(
            "SELECT * FROM billboards WHERE store_id = $1 ORDER BY created_at DESC",
        )
            .bind(store_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(billboards)
    }

    async fn find_billboard(&self, store_id: Uuid, id: Uuid) -> Result<Billboard, AppError> {
        sqlx::query_as::<_, Billboard>("SELECT * FROM billboards WHERE store_id = $1 AND id = $2")
            .bind(store_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::ResourceNotFound)
    }

    async fn update_billboard(
        &self,
        store_id: Uuid,
        id: Uuid,
        input: BillboardInput,
    ) -> Result<Billboard, AppError> {
        sqlx::query_as::<_, Billboard>(
            r#"
            UPDATE billboards
            SET label = $3, image_url = $4, updated_at = NOW()
            WHERE store_id = $1 AND id = $2
            RETURNING *
            "#,
        )
            .bind(store_id)
            .bind(id)
            .bind(&input.label)
            .bind(&input.image_url)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::ResourceNotFound)
    }

    async fn delete_billboard(&self, store_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM billboards WHERE store_id = $1 AND id = $2")
            .bind(store_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(in_use_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::ResourceNotFound);
        }
        Ok(())
    }

    // ---
    // Categorias (sempre com o billboard resolvido na leitura)
    // ---

    async fn create_category(
        &self,
        store_id: Uuid,
        input: CategoryInput,
    ) -> Result<Category, AppError> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (store_id, billboard_id, name)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
            .bind(store_id)
            .bind(input.billboard_id)
            .bind(&input.name)
            .fetch_one(&self.pool)
            .await
            .map_err(billboard_reference_error)?;

        Ok(category)
    }

    async fn list_categories(&self, store_id: Uuid) -> Result<Vec<CategoryDetail>, AppError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT * FROM categories WHERE store_id = $1 ORDER BY created_at DESC",
        )
            .bind(store_id)
            .fetch_all(&self.pool)
            .await?;

        if categories.is_empty() {
            return Ok(Vec::new());
        }

        let ids = categories.iter().map(|c| c.billboard_id).collect();
        let billboards = self.billboards_by_id(store_id, ids).await?;
        attach_billboards(categories, billboards)
    }

    async fn find_category(&self, store_id: Uuid, id: Uuid) -> Result<CategoryDetail, AppError> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT * FROM categories WHERE store_id = $1 AND id = $2",
        )
            .bind(store_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::ResourceNotFound)?;

        let billboards = self.billboards_by_id(store_id, vec![category.billboard_id]).await?;
        attach_billboards(vec![category], billboards)?
            .pop()
            .ok_or(AppError::ResourceNotFound)
    }

    async fn update_category(
        &self,
        store_id: Uuid,
        id: Uuid,
        input: CategoryInput,
    ) -> Result<Category, AppError> {
        sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET billboard_id = $3, name = $4, updated_at = NOW()
            WHERE store_id = $1 AND id = $2
            RETURNING *
            "#,
        )
            .bind(store_id)
            .bind(id)
            .bind(input.billboard_id)
            .bind(&input.name)
            .fetch_optional(&self.pool)
            .await
            .map_err(billboard_reference_error)?
            .ok_or(AppError::ResourceNotFound)
    }

    async fn delete_category(&self, store_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM categories WHERE store_id = $1 AND id = $2")
            .bind(store_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(in_use_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::ResourceNotFound);
        }
        Ok(())
    }

    // ---
    // Tamanhos e cores: mesma forma, tabela escolhida por `AttributeKind`
    // ---

    async fn create_attribute(
        &self,
        kind: AttributeKind,
        store_id: Uuid,
        input: AttributeInput,
    ) -> Result<Attribute, AppError> {
        let sql = format!(
            "INSERT INTO {} (store_id, name, value) VALUES ($1, $2, $3) RETURNING *",
            kind.table()
        );
        let attribute = sqlx::query_as::<_, Attribute>(&sql)
            .bind(store_id)
            .bind(&input.name)
            .bind(&input.value)
            .fetch_one(&self.pool)
            .await?;

        Ok(attribute)
    }

    async fn list_attributes(
        &self,
        kind: AttributeKind,
        store_id: Uuid,
    ) -> Result<Vec<Attribute>, AppError> {
        let sql = format!(
            "SELECT * FROM {} WHERE store_id = $1 ORDER BY created_at DESC",
            kind.table()
        );
        let attributes = sqlx::query_as::<_, Attribute>(&sql)
            .bind(store_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(attributes)
    }

    async fn find_attribute(
        &self,
        kind: AttributeKind,
        store_id: Uuid,
        id: Uuid,
    ) -> Result<Attribute, AppError> {
        let sql = format!("SELECT * FROM {} WHERE store_id = $1 AND id = $2", kind.table());
        sqlx::query_as::<_, Attribute>(&sql)
            .bind(store_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::ResourceNotFound)
    }

    async fn update_attribute(
        &self,
        kind: AttributeKind,
        store_id: Uuid,
        id: Uuid,
        input: AttributeInput,
    ) -> Result<Attribute, AppError> {
        let sql = format!(
            r#"
            UPDATE {}
            SET name = $3, value = $4, updated_at = NOW()
            WHERE store_id = $1 AND id = $2
            RETURNING *
            "#,
            kind.table()
        );
        sqlx::query_as::<_, Attribute>(&sql)
            .bind(store_id)
            .bind(id)
            .bind(&input.name)
            .bind(&input.value)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::ResourceNotFound)
    }

    async fn delete_attribute(
        &self,
        kind: AttributeKind,
        store_id: Uuid,
        id: Uuid,
    ) -> Result<(), AppError> {
        let sql = format!("DELETE FROM {} WHERE store_id = $1 AND id = $2", kind.table());
        let result = sqlx::query(&sql)
            .bind(store_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(in_use_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::ResourceNotFound);
        }
        Ok(())
    }
}

/// Junta cada categoria ao seu billboard. Billboard ausente indica dado corrompido.
pub(crate) fn attach_billboards(
    categories: Vec<Category>,
    billboards: Vec<Billboard>,
) -> Result<Vec<CategoryDetail>, AppError> {
    let by_id: HashMap<Uuid, Billboard> = billboards.into_iter().map(|b| (b.id, b)).collect();

    categories
        .into_iter()
        .map(|category| {
            let billboard = by_id.get(&category.billboard_id).cloned().ok_or_else(|| {
                AppError::InternalServerError(anyhow!(
                    "Category {} refers to missing billboard {}",
                    category.id,
                    category.billboard_id
                ))
            })?;
            Ok(CategoryDetail { category, billboard })
        })
        .collect()
}

// Exclusão barrada por FK: ainda há registros apontando para o item.
pub(crate) fn in_use_error(e: sqlx::Error) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return AppError::ResourceInUse;
        }
    }
    AppError::DatabaseError(e)
}

fn billboard_reference_error(e: sqlx::Error) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return AppError::InvalidReference("billboardId".to_string());
        }
    }
    AppError::DatabaseError(e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn billboard(id: Uuid) -> Billboard {
        Billboard {
            id,
            store_id: Uuid::nil(),
            label: "Inverno".to_string(),
            image_url: "https://media.example.com/b.jpg".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn category(billboard_id: Uuid) -> Category {
        Category {
            id: Uuid::new_v4(),
            store_id: Uuid::nil(),
            billboard_id,
            name: "Casacos".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn categories_share_billboards_and_keep_order() {
        let banner = Uuid::new_v4();
        let first = category(banner);
        let second = category(banner);
        let expected = vec![first.id, second.id];

        let details = attach_billboards(vec![first, second], vec![billboard(banner)]).unwrap();

        let ids: Vec<Uuid> = details.iter().map(|d| d.category.id).collect();
        assert_eq!(ids, expected);
        assert!(details.iter().all(|d| d.billboard.id == banner));
    }

    #[test]
    fn missing_billboard_is_an_internal_error() {
        let result = attach_billboards(vec![category(Uuid::new_v4())], Vec::new());
        assert!(matches!(result, Err(AppError::InternalServerError(_))));
    }

    #[test]
    fn non_database_errors_pass_through() {
        assert!(matches!(
            in_use_error(sqlx::Error::RowNotFound),
            AppError::DatabaseError(sqlx::Error::RowNotFound)
        ));
    }
}
