// src/services/product_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::{error::AppError, money::format_usd},
    db::ProductStore,
    models::product::{NewProduct, ProductDetail, ProductFilter, ProductRow},
};

#[derive(Clone)]
pub struct ProductService {
    products: Arc<dyn ProductStore>,
}

impl ProductService {
    pub fn new(products: Arc<dyn ProductStore>) -> Self {
        Self { products }
    }

    pub async fn create_product(
        &self,
        store_id: Uuid,
        input: NewProduct,
    ) -> Result<ProductDetail, AppError> {
        self.products.create(store_id, input).await
    }

    pub async fn get_product(
        &self,
        store_id: Uuid,
        product_id: Uuid,
    ) -> Result<ProductDetail, AppError> {
        self.products.find(store_id, product_id).await
    }

    pub async fn update_product(
        &self,
        store_id: Uuid,
        product_id: Uuid,
        input: NewProduct,
    ) -> Result<ProductDetail, AppError> {
        self.products.update(store_id, product_id, input).await
    }

    pub async fn delete_product(&self, store_id: Uuid, product_id: Uuid) -> Result<(), AppError> {
        self.products.delete(store_id, product_id).await
    }

    // Vitrine pública: nunca mostra produto fora de estoque
    pub async fn list_storefront(
        &self,
        store_id: Uuid,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductDetail>, AppError> {
        let filter = ProductFilter {
            include_out_of_stock: false,
            ..filter.clone()
        };
        let products = self.products.list(store_id, &filter).await?;
        tracing::debug!(%store_id, found = products.len(), "vitrine consultada");
        Ok(products)
    }

    /// Tabela de produtos do painel: todos, em estoque ou não, mais recentes primeiro.
    pub async fn list_admin(&self, store_id: Uuid) -> Result<Vec<ProductRow>, AppError> {
        let products = self.products.list(store_id, &ProductFilter::admin()).await?;
        Ok(products.iter().map(to_row).collect())
    }
}

fn to_row(detail: &ProductDetail) -> ProductRow {
    let product = &detail.product;

    ProductRow {
        id: product.id,
        name: product.name.clone(),
        is_featured: product.is_featured,
        in_stock: product.in_stock,
        price: product.price,
        formatted_price: format_usd(product.price),
        category: detail.category.name.clone(),
        size: detail.size.name.clone(),
        color: detail.color.value.clone(),
        created_at: product.created_at.format("%B %d, %Y").to_string(),
    }
}
