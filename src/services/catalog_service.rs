// src/services/catalog_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CatalogStore,
    models::catalog::{
        Attribute, AttributeInput, AttributeKind, Billboard, BillboardInput, Category,
        CategoryDetail, CategoryInput,
    },
};

// Dimensões do catálogo. O dono da loja já foi verificado pelo extrator nas escritas.
#[derive(Clone)]
pub struct CatalogService {
    catalog: Arc<dyn CatalogStore>,
}

impl CatalogService {
    pub fn new(catalog: Arc<dyn CatalogStore>) -> Self {
        Self { catalog }
    }

    // --- Billboards ---

    pub async fn create_billboard(
        &self,
        store_id: Uuid,
        input: BillboardInput,
    ) -> Result<Billboard, AppError> {
        let billboard = self.catalog.create_billboard(store_id, input).await?;
        tracing::info!(%store_id, billboard_id = %billboard.id, "billboard criado");
        Ok(billboard)
    }

    pub async fn list_billboards(&self, store_id: Uuid) -> Result<Vec<Billboard>, AppError> {
        self.catalog.list_billboards(store_id).await
    }

    pub async fn get_billboard(&self, store_id: Uuid, id: Uuid) -> Result<Billboard, AppError> {
        self.catalog.find_billboard(store_id, id).await
    }

    pub async fn update_billboard(
        &self,
        store_id: Uuid,
        id: Uuid,
        input: BillboardInput,
    ) -> Result<Billboard, AppError> {
        self.catalog.update_billboard(store_id, id, input).await
    }

    pub async fn delete_billboard(&self, store_id: Uuid, id: Uuid) -> Result<(), AppError> {
        self.catalog.delete_billboard(store_id, id).await?;
        tracing::info!(%store_id, billboard_id = %id, "billboard removido");
        Ok(())
    }

    // --- Categorias ---

    pub async fn create_category(
        &self,
        store_id: Uuid,
        input: CategoryInput,
    ) -> Result<Category, AppError> {
        let category = self.catalog.create_category(store_id, input).await?;
        tracing::info!(%store_id, category_id = %category.id, "categoria criada");
        Ok(category)
    }

    pub async fn list_categories(&self, store_id: Uuid) -> Result<Vec<CategoryDetail>, AppError> {
        self.catalog.list_categories(store_id).await
    }

    pub async fn get_category(&self, store_id: Uuid, id: Uuid) -> Result<CategoryDetail, AppError> {
        self.catalog.find_category(store_id, id).await
    }

    pub async fn update_category(
        &self,
        store_id: Uuid,
        id: Uuid,
        input: CategoryInput,
    ) -> Result<Category, AppError> {
        self.catalog.update_category(store_id, id, input).await
    }

    pub async fn delete_category(&self, store_id: Uuid, id: Uuid) -> Result<(), AppError> {
        self.catalog.delete_category(store_id, id).await?;
        tracing::info!(%store_id, category_id = %id, "categoria removida");
        Ok(())
    }

    // --- Tamanhos e cores ---

    pub async fn create_attribute(
        &self,
        kind: AttributeKind,
        store_id: Uuid,
        input: AttributeInput,
    ) -> Result<Attribute, AppError> {
        let attribute = self.catalog.create_attribute(kind, store_id, input).await?;
        tracing::info!(%store_id, id = %attribute.id, table = kind.table(), "atributo criado");
        Ok(attribute)
    }

    pub async fn list_attributes(
        &self,
        kind: AttributeKind,
        store_id: Uuid,
    ) -> Result<Vec<Attribute>, AppError> {
        self.catalog.list_attributes(kind, store_id).await
    }

    pub async fn get_attribute(
        &self,
        kind: AttributeKind,
        store_id: Uuid,
        id: Uuid,
    ) -> Result<Attribute, AppError> {
        self.catalog.find_attribute(kind, store_id, id).await
    }

    pub async fn update_attribute(
        &self,
        kind: AttributeKind,
        store_id: Uuid,
        id: Uuid,
        input: AttributeInput,
    ) -> Result<Attribute, AppError> {
        self.catalog.update_attribute(kind, store_id, id, input).await
    }

    pub async fn delete_attribute(
        &self,
        kind: AttributeKind,
        store_id: Uuid,
        id: Uuid,
    ) -> Result<(), AppError> {
        self.catalog.delete_attribute(kind, store_id, id).await?;
        tracing::info!(%store_id, %id, table = kind.table(), "atributo removido");
        Ok(())
    }
}
