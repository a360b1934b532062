// src/db.rs

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        catalog::{
            Attribute, AttributeInput, AttributeKind, Billboard, BillboardInput, Category,
            CategoryDetail, CategoryInput,
        },
        order::{OrderQuery, OrderWithItems},
        product::{NewProduct, ProductDetail, ProductFilter},
        store::Store,
    },
};

pub mod catalog_repo;
pub mod memory;
pub mod order_repo;
pub mod product_repo;
pub mod store_repo;

pub use catalog_repo::CatalogRepository;
pub use memory::InMemoryDatabase;
pub use order_repo::OrderRepository;
pub use product_repo::ProductRepository;
pub use store_repo::StoreRepository;

// ---
// Capacidades de acesso a dados
// ---
// Os serviços recebem estes traits injetados (Postgres em produção,
// `InMemoryDatabase` nos testes). Toda operação é escopada por loja.

/// Leitura de pedidos com itens e produtos já resolvidos.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn find_many(
        &self,
        store_id: Uuid,
        query: OrderQuery,
    ) -> Result<Vec<OrderWithItems>, AppError>;

    async fn count(&self, store_id: Uuid, query: OrderQuery) -> Result<i64, AppError>;
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn count_in_stock(&self, store_id: Uuid) -> Result<i64, AppError>;

    /// Mais recentes primeiro; esgotados só com `include_out_of_stock`.
    async fn list(
        &self,
        store_id: Uuid,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductDetail>, AppError>;

    async fn find(&self, store_id: Uuid, product_id: Uuid) -> Result<ProductDetail, AppError>;

    async fn create(&self, store_id: Uuid, product: NewProduct) -> Result<ProductDetail, AppError>;

    /// Substitui todos os campos e o conjunto de imagens.
    async fn update(
        &self,
        store_id: Uuid,
        product_id: Uuid,
        product: NewProduct,
    ) -> Result<ProductDetail, AppError>;

    /// Falha com `ResourceInUse` se algum pedido ainda referencia o produto.
    async fn delete(&self, store_id: Uuid, product_id: Uuid) -> Result<(), AppError>;
}

/// Billboards, categorias, tamanhos e cores de uma loja.
///
/// Item ausente (ou de outra loja) vira `ResourceNotFound`; exclusão de item
/// ainda referenciado vira `ResourceInUse`.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn create_billboard(
        &self,
        store_id: Uuid,
        input: BillboardInput,
    ) -> Result<Billboard, AppError>;

    async fn list_billboards(&self, store_id: Uuid) -> Result<Vec<Billboard>, AppError>;

    async fn find_billboard(&self, store_id: Uuid, id: Uuid) -> Result<Billboard, AppError>;

    async fn update_billboard(
        &self,
        store_id: Uuid,
        id: Uuid,
        input: BillboardInput,
    ) -> Result<Billboard, AppError>;

    async fn delete_billboard(&self, store_id: Uuid, id: Uuid) -> Result<(), AppError>;

    async fn create_category(
        &self,
        store_id: Uuid,
        input: CategoryInput,
    ) -> Result<Category, AppError>;

    async fn list_categories(&self, store_id: Uuid) -> Result<Vec<CategoryDetail>, AppError>;

    async fn find_category(&self, store_id: Uuid, id: Uuid) -> Result<CategoryDetail, AppError>;

    async fn update_category(
        &self,
        store_id: Uuid,
        id: Uuid,
        input: CategoryInput,
    ) -> Result<Category, AppError>;

    async fn delete_category(&self, store_id: Uuid, id: Uuid) -> Result<(), AppError>;

    async fn create_attribute(
        &self,
        kind: AttributeKind,
        store_id: Uuid,
        input: AttributeInput,
    ) -> Result<Attribute, AppError>;

    async fn list_attributes(
        &self,
        kind: AttributeKind,
        store_id: Uuid,
    ) -> Result<Vec<Attribute>, AppError>;

    async fn find_attribute(
        &self,
        kind: AttributeKind,
        store_id: Uuid,
        id: Uuid,
    ) -> Result<Attribute, AppError>;

    async fn update_attribute(
        &self,
        kind: AttributeKind,
        store_id: Uuid,
        id: Uuid,
        input: AttributeInput,
    ) -> Result<Attribute, AppError>;

    async fn delete_attribute(
        &self,
        kind: AttributeKind,
        store_id: Uuid,
        id: Uuid,
    ) -> Result<(), AppError>;
}

#[async_trait]
pub trait StoreDirectory: Send + Sync {
    async fn create(&self, owner_id: &str, name: &str) -> Result<Store, AppError>;

    async fn find_by_id(&self, store_id: Uuid) -> Result<Option<Store>, AppError>;

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Store>, AppError>;

    async fn rename(&self, store_id: Uuid, name: &str) -> Result<Store, AppError>;

    async fn delete(&self, store_id: Uuid) -> Result<(), AppError>;
}
