// src/db/product_repo.rs

use std::collections::HashMap;

use anyhow::anyhow;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{catalog_repo::in_use_error, ProductStore},
    models::{
        catalog::{Attribute, Category},
        product::{NewProduct, Product, ProductDetail, ProductFilter, ProductImage},
    },
};

#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Imagens, categoria, tamanho e cor de cada produto, em poucas consultas
    async fn load_details(&self, products: Vec<Product>) -> Result<Vec<ProductDetail>, AppError> {
        if products.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = products.iter().map(|p| p.id).collect();
        let category_ids: Vec<Uuid> = products.iter().map(|p| p.category_id).collect();
        let size_ids: Vec<Uuid> = products.iter().map(|p| p.size_id).collect();
        let color_ids: Vec<Uuid> = products.iter().map(|p| p.color_id).collect();

        let images = sqlx::query_as::<_, ProductImage>(
            "SELECT * FROM product_images WHERE product_id = ANY($1) ORDER BY created_at ASC",
        )
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        let categories =
            sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = ANY($1)")
                .bind(category_ids)
                .fetch_all(&self.pool)
                .await?;

        let sizes = sqlx::query_as::<_, Attribute>("SELECT * FROM sizes WHERE id = ANY($1)")
            .bind(size_ids)
            .fetch_all(&self.pool)
            .await?;

        let colors = sqlx::query_as::<_, Attribute>("SELECT * FROM colors WHERE id = ANY($1)")
            .bind(color_ids)
            .fetch_all(&self.pool)
            .await?;

        attach_relations(products, images, categories, sizes, colors)
    }

    async fn insert_images(
        tx: &mut Transaction<'_, Postgres>,
        product_id: Uuid,
        urls: &[String],
    ) -> Result<(), AppError> {
        for url in urls {
            sqlx::query("INSERT INTO product_images (product_id, url) VALUES ($1, $2)")
                .bind(product_id)
                .bind(url)
                .execute(&mut **tx)
                .await?;
        }
        Ok(())
    }

    async fn find_detail(
        &self,
        store_id: Uuid,
        product_id: Uuid,
    ) -> Result<ProductDetail, AppError> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE store_id = $1 AND id = $2",
        )
            .bind(store_id)
            .bind(product_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::ResourceNotFound)?;

        self.load_details(vec![product])
            .await?
            .pop()
            .ok_or(AppError::ResourceNotFound)
    }
}

#[async_trait]
impl ProductStore for ProductRepository {
    async fn count_in_stock(&self, store_id: Uuid) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM products WHERE store_id = $1 AND in_stock = true",
        )
            .bind(store_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    async fn list(
        &self,
        store_id: Uuid,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductDetail>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT *
            FROM products
            WHERE store_id = $1
              AND ($2::uuid IS NULL OR category_id = $2)
              AND ($3::uuid IS NULL OR size_id = $3)
              AND ($4::uuid IS NULL OR color_id = $4)
              AND (NOT $5 OR is_featured = true)
              AND ($6 OR in_stock = true)
            ORDER BY created_at DESC
            "#,
        )
            .bind(store_id)
            .bind(filter.category_id)
            .bind(filter.size_id)
            .bind(filter.color_id)
            .bind(filter.featured_only)
            .bind(filter.include_out_of_stock)
            .fetch_all(&self.pool)
            .await?;

        self.load_details(products).await
    }

    async fn find(&self, store_id: Uuid, product_id: Uuid) -> Result<ProductDetail, AppError> {
        self.find_detail(store_id, product_id).await
    }

    async fn create(&self, store_id: Uuid, input: NewProduct) -> Result<ProductDetail, AppError> {
        let mut tx = self.pool.begin().await?;

        // As FKs compostas (store_id, *_id) garantem categoria, tamanho e cor da mesma loja
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products
                (store_id, category_id, size_id, color_id, name, description,
                 price, is_featured, in_stock)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
            .bind(store_id)
            .bind(input.category_id)
            .bind(input.size_id)
            .bind(input.color_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.price)
            .bind(input.is_featured)
            .bind(input.in_stock)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_reference_error)?;

        Self::insert_images(&mut tx, product.id, &input.image_urls).await?;
        tx.commit().await?;

        tracing::info!(%store_id, product_id = %product.id, "produto criado");
        self.find_detail(store_id, product.id).await
    }

    async fn update(
        &self,
        store_id: Uuid,
        product_id: Uuid,
        input: NewProduct,
    ) -> Result<ProductDetail, AppError> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE products
            SET category_id = $3, size_id = $4, color_id = $5, name = $6,
                description = $7, price = $8, is_featured = $9, in_stock = $10,
                updated_at = NOW()
            WHERE store_id = $1 AND id = $2
            RETURNING id
            "#,
        )
            .bind(store_id)
            .bind(product_id)
            .bind(input.category_id)
            .bind(input.size_id)
            .bind(input.color_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.price)
            .bind(input.is_featured)
            .bind(input.in_stock)
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_reference_error)?;

        if updated.is_none() {
            return Err(AppError::ResourceNotFound);
        }

        // O conjunto de imagens é sempre substituído por inteiro
        sqlx::query("DELETE FROM product_images WHERE product_id = $1")
            .bind(product_id)
            .execute(&mut *tx)
            .await?;
        Self::insert_images(&mut tx, product_id, &input.image_urls).await?;
        tx.commit().await?;

        tracing::info!(%store_id, %product_id, "produto atualizado");
        self.find_detail(store_id, product_id).await
    }

    async fn delete(&self, store_id: Uuid, product_id: Uuid) -> Result<(), AppError> {
        // Imagens saem por ON DELETE CASCADE; itens de pedido barram a exclusão
        let result = sqlx::query("DELETE FROM products WHERE store_id = $1 AND id = $2")
            .bind(store_id)
            .bind(product_id)
            .execute(&self.pool)
            .await
            .map_err(in_use_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::ResourceNotFound);
        }
        tracing::info!(%store_id, %product_id, "produto removido");
        Ok(())
    }
}

/// Monta os `ProductDetail` preservando a ordem de `products`.
pub(crate) fn attach_relations(
    products: Vec<Product>,
    images: Vec<ProductImage>,
    categories: Vec<Category>,
    sizes: Vec<Attribute>,
    colors: Vec<Attribute>,
) -> Result<Vec<ProductDetail>, AppError> {
    let mut images_by_product: HashMap<Uuid, Vec<ProductImage>> = HashMap::new();
    for image in images {
        images_by_product.entry(image.product_id).or_default().push(image);
    }
    let categories: HashMap<Uuid, Category> = categories.into_iter().map(|c| (c.id, c)).collect();
    let sizes: HashMap<Uuid, Attribute> = sizes.into_iter().map(|s| (s.id, s)).collect();
    let colors: HashMap<Uuid, Attribute> = colors.into_iter().map(|c| (c.id, c)).collect();

    let missing = |product: &Product, what: &str, id: Uuid| {
        AppError::InternalServerError(anyhow!(
            "Product {} refers to missing {} {}",
            product.id,
            what,
            id
        ))
    };

    products
        .into_iter()
        .map(|product| {
            let category = categories
                .get(&product.category_id)
                .cloned()
                .ok_or_else(|| missing(&product, "category", product.category_id))?;
            let size = sizes
                .get(&product.size_id)
                .cloned()
                .ok_or_else(|| missing(&product, "size", product.size_id))?;
            let color = colors
                .get(&product.color_id)
                .cloned()
                .ok_or_else(|| missing(&product, "color", product.color_id))?;
            let images = images_by_product.remove(&product.id).unwrap_or_default();

            Ok(ProductDetail { product, images, category, size, color })
        })
        .collect()
}

// Converte violação de chave estrangeira no campo do payload correspondente.
fn map_reference_error(e: sqlx::Error) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            let field = match db_err.constraint().unwrap_or_default() {
                c if c.contains("category") => "categoryId",
                c if c.contains("size") => "sizeId",
                c if c.contains("color") => "colorId",
                _ => "storeId",
            };
            return AppError::InvalidReference(field.to_string());
        }
    }
    AppError::DatabaseError(e)
}
