//! Implementação em memória dos repositórios, para testes e desenvolvimento local.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{catalog_repo::attach_billboards, CatalogStore, OrderStore, ProductStore, StoreDirectory},
    models::{
        catalog::{
            Attribute, AttributeInput, AttributeKind, Billboard, BillboardInput, Category,
            CategoryDetail, CategoryInput,
        },
        order::{Order, OrderLine, OrderQuery, OrderWithItems},
        product::{NewProduct, Product, ProductDetail, ProductFilter, ProductImage},
        store::Store,
    },
};

#[derive(Debug, Clone)]
struct StoredLineItem {
    id: Uuid,
    order_id: Uuid,
    product_id: Uuid,
}

#[derive(Debug, Default)]
struct Tables {
    stores: HashMap<Uuid, Store>,
    billboards: Vec<Billboard>,
    categories: Vec<Category>,
    sizes: Vec<Attribute>,
    colors: Vec<Attribute>,
    products: Vec<Product>,
    images: Vec<ProductImage>,
    orders: Vec<Order>,
    line_items: Vec<StoredLineItem>,
}

impl Tables {
    fn attributes(&self, kind: AttributeKind) -> &Vec<Attribute> {
        match kind {
            AttributeKind::Size => &self.sizes,
            AttributeKind::Color => &self.colors,
        }
    }

    fn attributes_mut(&mut self, kind: AttributeKind) -> &mut Vec<Attribute> {
        match kind {
            AttributeKind::Size => &mut self.sizes,
            AttributeKind::Color => &mut self.colors,
        }
    }

    fn has_billboard(&self, store_id: Uuid, id: Uuid) -> bool {
        self.billboards.iter().any(|b| b.store_id == store_id && b.id == id)
    }

    // Mesmas FKs compostas do Postgres: a dimensão precisa ser da loja
    fn check_references(&self, store_id: Uuid, input: &NewProduct) -> Result<(), AppError> {
        if !self.categories.iter().any(|c| c.store_id == store_id && c.id == input.category_id) {
            return Err(AppError::InvalidReference("categoryId".to_string()));
        }
        for (kind, id) in [
            (AttributeKind::Size, input.size_id),
            (AttributeKind::Color, input.color_id),
        ] {
            if !self.attributes(kind).iter().any(|a| a.store_id == store_id && a.id == id) {
                return Err(AppError::InvalidReference(kind.field().to_string()));
            }
        }
        Ok(())
    }

    fn detail(&self, product: &Product) -> Result<ProductDetail, AppError> {
        let missing = |what: &str, id: Uuid| {
            AppError::InternalServerError(anyhow!(
                "Product {} refers to missing {} {}",
                product.id,
                what,
                id
            ))
        };

        let category = self
            .categories
            .iter()
            .find(|c| c.id == product.category_id)
            .cloned()
            .ok_or_else(|| missing("category", product.category_id))?;
        let size = self
            .sizes
            .iter()
            .find(|s| s.id == product.size_id)
            .cloned()
            .ok_or_else(|| missing("size", product.size_id))?;
        let color = self
            .colors
            .iter()
            .find(|c| c.id == product.color_id)
            .cloned()
            .ok_or_else(|| missing("color", product.color_id))?;

        Ok(ProductDetail {
            product: product.clone(),
            images: self
                .images
                .iter()
                .filter(|i| i.product_id == product.id)
                .cloned()
                .collect(),
            category,
            size,
            color,
        })
    }

    // Cria billboard, categoria, tamanho e cor de apoio quando o id semeado não existe
    fn ensure_dimensions(&mut self, store_id: Uuid, seed: &SeedProduct) {
        let now = Utc::now();

        if !self.categories.iter().any(|c| c.id == seed.category_id) {
            let billboard = Billboard {
                id: Uuid::new_v4(),
                store_id,
                label: "Destaques".to_string(),
                image_url: "https://media.example.com/billboard.jpg".to_string(),
                created_at: now,
                updated_at: now,
            };
            self.categories.push(Category {
                id: seed.category_id,
                store_id,
                billboard_id: billboard.id,
                name: "Geral".to_string(),
                created_at: now,
                updated_at: now,
            });
            self.billboards.push(billboard);
        }

        for (kind, id, value) in [
            (AttributeKind::Size, seed.size_id, "U"),
            (AttributeKind::Color, seed.color_id, "#000000"),
        ] {
            let attributes = self.attributes_mut(kind);
            if !attributes.iter().any(|a| a.id == id) {
                attributes.push(Attribute {
                    id,
                    store_id,
                    name: value.to_string(),
                    value: value.to_string(),
                    created_at: now,
                    updated_at: now,
                });
            }
        }
    }
}

fn new_images(product_id: Uuid, urls: Vec<String>, now: DateTime<Utc>) -> Vec<ProductImage> {
    urls.into_iter()
        .map(|url| ProductImage {
            id: Uuid::new_v4(),
            product_id,
            url,
            created_at: now,
        })
        .collect()
}

/// Banco em memória que implementa todos os traits de acesso a dados.
///
/// Clonar compartilha as mesmas tabelas. `set_unavailable(true)` faz toda
/// leitura/escrita falhar como um pool esgotado.
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    tables: Arc<RwLock<Tables>>,
    unavailable: Arc<AtomicBool>,
}

/// Produto a semear diretamente (sem passar pela validação da API).
///
/// Dimensões com ids desconhecidos são criadas na hora, na loja do produto.
#[derive(Debug, Clone)]
pub struct SeedProduct {
    pub name: String,
    pub price: Decimal,
    pub in_stock: bool,
    pub is_featured: bool,
    pub category_id: Uuid,
    pub size_id: Uuid,
    pub color_id: Uuid,
}

impl SeedProduct {
    pub fn new(name: &str, price: Decimal) -> Self {
        Self {
            name: name.to_string(),
            price,
            in_stock: true,
            is_featured: false,
            category_id: Uuid::new_v4(),
            size_id: Uuid::new_v4(),
            color_id: Uuid::new_v4(),
        }
    }
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), AppError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseError(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, AppError> {
        self.check_available()?;
        self.tables.read().map_err(|e| {
            AppError::InternalServerError(anyhow!("Failed to acquire read lock: {}", e))
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, AppError> {
        self.check_available()?;
        self.tables.write().map_err(|e| {
            AppError::InternalServerError(anyhow!("Failed to acquire write lock: {}", e))
        })
    }

    // ---
    // Semeadura (fora dos traits; checkout e webhook são externos)
    // ---

    pub fn insert_product(&self, store_id: Uuid, seed: SeedProduct) -> Result<Product, AppError> {
        let mut tables = self.write()?;
        tables.ensure_dimensions(store_id, &seed);

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4(),
            store_id,
            category_id: seed.category_id,
            size_id: seed.size_id,
            color_id: seed.color_id,
            name: seed.name,
            description: String::new(),
            price: seed.price,
            is_featured: seed.is_featured,
            in_stock: seed.in_stock,
            created_at: now,
            updated_at: now,
        };
        tables.products.push(product.clone());
        Ok(product)
    }

    /// Insere um pedido com um item por id de produto (repetições = unidades extras).
    pub fn insert_order(
        &self,
        store_id: Uuid,
        is_paid: bool,
        created_at: DateTime<Utc>,
        product_ids: &[Uuid],
    ) -> Result<Order, AppError> {
        let order = Order {
            id: Uuid::new_v4(),
            store_id,
            is_paid,
            phone: "+1 555 0100".to_string(),
            address: "742 Evergreen Terrace".to_string(),
            created_at,
            updated_at: created_at,
        };

        let mut tables = self.write()?;
        tables.orders.push(order.clone());
        for product_id in product_ids {
            tables.line_items.push(StoredLineItem {
                id: Uuid::new_v4(),
                order_id: order.id,
                product_id: *product_id,
            });
        }
        Ok(order)
    }

    pub fn mark_paid(&self, order_id: Uuid) -> Result<(), AppError> {
        let mut tables = self.write()?;
        let order = tables
            .orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or_else(|| {
                AppError::InternalServerError(anyhow!("Order {} not found", order_id))
            })?;
        order.is_paid = true;
        order.updated_at = Utc::now();
        Ok(())
    }
}

#[async_trait]
impl OrderStore for InMemoryDatabase {
    async fn find_many(
        &self,
        store_id: Uuid,
        query: OrderQuery,
    ) -> Result<Vec<OrderWithItems>, AppError> {
        let tables = self.read()?;

        let mut orders: Vec<&Order> = tables
            .orders
            .iter()
            .filter(|o| o.store_id == store_id && query.matches(o))
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        orders
            .into_iter()
            .map(|order| -> Result<OrderWithItems, AppError> {
                let items = tables
                    .line_items
                    .iter()
                    .filter(|item| item.order_id == order.id)
                    .map(|item| -> Result<OrderLine, AppError> {
                        let product = tables
                            .products
                            .iter()
                            .find(|p| p.id == item.product_id)
                            .ok_or_else(|| {
                                AppError::InternalServerError(anyhow!(
                                    "Line item {} refers to missing product {}",
                                    item.id,
                                    item.product_id
                                ))
                            })?;
                        Ok(OrderLine {
                            id: item.id,
                            order_id: item.order_id,
                            product_id: product.id,
                            product_name: product.name.clone(),
                            price: product.price,
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(OrderWithItems { order: order.clone(), items })
            })
            .collect()
    }

    async fn count(&self, store_id: Uuid, query: OrderQuery) -> Result<i64, AppError> {
        let tables = self.read()?;
        let total = tables
            .orders
            .iter()
            .filter(|o| o.store_id == store_id && query.matches(o))
            .count();
        Ok(total as i64)
    }
}

#[async_trait]
impl ProductStore for InMemoryDatabase {
    async fn count_in_stock(&self, store_id: Uuid) -> Result<i64, AppError> {
        let tables = self.read()?;
        let total = tables
            .products
            .iter()
            .filter(|p| p.store_id == store_id && p.in_stock)
            .count();
        Ok(total as i64)
    }

    async fn list(
        &self,
        store_id: Uuid,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductDetail>, AppError> {
        let tables = self.read()?;

        let mut products: Vec<&Product> = tables
            .products
            .iter()
            .filter(|p| p.store_id == store_id && filter.matches(p))
            .collect();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        products.into_iter().map(|product| tables.detail(product)).collect()
    }

    async fn find(&self, store_id: Uuid, product_id: Uuid) -> Result<ProductDetail, AppError> {
        let tables = self.read()?;
        let product = tables
            .products
            .iter()
            .find(|p| p.store_id == store_id && p.id == product_id)
            .ok_or(AppError::ResourceNotFound)?;
        tables.detail(product)
    }

    async fn create(&self, store_id: Uuid, input: NewProduct) -> Result<ProductDetail, AppError> {
        let mut tables = self.write()?;
        tables.check_references(store_id, &input)?;

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4(),
            store_id,
            category_id: input.category_id,
            size_id: input.size_id,
            color_id: input.color_id,
            name: input.name,
            description: input.description,
            price: input.price,
            is_featured: input.is_featured,
            in_stock: input.in_stock,
            created_at: now,
            updated_at: now,
        };
        let images = new_images(product.id, input.image_urls, now);

        tables.products.push(product.clone());
        tables.images.extend(images);
        tables.detail(&product)
    }

    async fn update(
        &self,
        store_id: Uuid,
        product_id: Uuid,
        input: NewProduct,
    ) -> Result<ProductDetail, AppError> {
        let mut tables = self.write()?;
        if !tables.products.iter().any(|p| p.store_id == store_id && p.id == product_id) {
            return Err(AppError::ResourceNotFound);
        }
        tables.check_references(store_id, &input)?;

        let now = Utc::now();
        let product = tables
            .products
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or(AppError::ResourceNotFound)?;
        product.category_id = input.category_id;
        product.size_id = input.size_id;
        product.color_id = input.color_id;
        product.name = input.name;
        product.description = input.description;
        product.price = input.price;
        product.is_featured = input.is_featured;
        product.in_stock = input.in_stock;
        product.updated_at = now;
        let product = product.clone();

        tables.images.retain(|i| i.product_id != product_id);
        tables.images.extend(new_images(product_id, input.image_urls, now));
        tables.detail(&product)
    }

    async fn delete(&self, store_id: Uuid, product_id: Uuid) -> Result<(), AppError> {
        let mut tables = self.write()?;
        if !tables.products.iter().any(|p| p.store_id == store_id && p.id == product_id) {
            return Err(AppError::ResourceNotFound);
        }
        if tables.line_items.iter().any(|i| i.product_id == product_id) {
            return Err(AppError::ResourceInUse);
        }

        tables.products.retain(|p| p.id != product_id);
        tables.images.retain(|i| i.product_id != product_id);
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for InMemoryDatabase {
    async fn create_billboard(
        &self,
        store_id: Uuid,
        input: BillboardInput,
    ) -> Result<Billboard, AppError> {
        let now = Utc::now();
        let billboard = Billboard {
            id: Uuid::new_v4(),
            store_id,
            label: input.label,
            image_url: input.image_url,
            created_at: now,
            updated_at: now,
        };
        self.write()?.billboards.push(billboard.clone());
        Ok(billboard)
    }

    async fn list_billboards(&self, store_id: Uuid) -> Result<Vec<Billboard>, AppError> {
        let tables = self.read()?;
        let mut billboards: Vec<Billboard> = tables
            .billboards
            .iter()
            .filter(|b| b.store_id == store_id)
            .cloned()
            .collect();
        billboards.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(billboards)
    }

    async fn find_billboard(&self, store_id: Uuid, id: Uuid) -> Result<Billboard, AppError> {
        self.read()?
            .billboards
            .iter()
            .find(|b| b.store_id == store_id && b.id == id)
            .cloned()
            .ok_or(AppError::ResourceNotFound)
    }

    async fn update_billboard(
        &self,
        store_id: Uuid,
        id: Uuid,
        input: BillboardInput,
    ) -> Result<Billboard, AppError> {
        let mut tables = self.write()?;
        let billboard = tables
            .billboards
            .iter_mut()
            .find(|b| b.store_id == store_id && b.id == id)
            .ok_or(AppError::ResourceNotFound)?;
        billboard.label = input.label;
        billboard.image_url = input.image_url;
        billboard.updated_at = Utc::now();
        Ok(billboard.clone())
    }

    async fn delete_billboard(&self, store_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let mut tables = self.write()?;
        if !tables.has_billboard(store_id, id) {
            return Err(AppError::ResourceNotFound);
        }
        if tables.categories.iter().any(|c| c.billboard_id == id) {
            return Err(AppError::ResourceInUse);
        }
        tables.billboards.retain(|b| b.id != id);
        Ok(())
    }

    async fn create_category(
        &self,
        store_id: Uuid,
        input: CategoryInput,
    ) -> Result<Category, AppError> {
        let mut tables = self.write()?;
        if !tables.has_billboard(store_id, input.billboard_id) {
            return Err(AppError::InvalidReference("billboardId".to_string()));
        }

        let now = Utc::now();
        let category = Category {
            id: Uuid::new_v4(),
            store_id,
            billboard_id: input.billboard_id,
            name: input.name,
            created_at: now,
            updated_at: now,
        };
        tables.categories.push(category.clone());
        Ok(category)
    }

    async fn list_categories(&self, store_id: Uuid) -> Result<Vec<CategoryDetail>, AppError> {
        let tables = self.read()?;
        let mut categories: Vec<Category> = tables
            .categories
            .iter()
            .filter(|c| c.store_id == store_id)
            .cloned()
            .collect();
        categories.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        attach_billboards(categories, tables.billboards.clone())
    }

    async fn find_category(&self, store_id: Uuid, id: Uuid) -> Result<CategoryDetail, AppError> {
        let tables = self.read()?;
        let category = tables
            .categories
            .iter()
            .find(|c| c.store_id == store_id && c.id == id)
            .cloned()
            .ok_or(AppError::ResourceNotFound)?;
        attach_billboards(vec![category], tables.billboards.clone())?
            .pop()
            .ok_or(AppError::ResourceNotFound)
    }

    async fn update_category(
        &self,
        store_id: Uuid,
        id: Uuid,
        input: CategoryInput,
    ) -> Result<Category, AppError> {
        let mut tables = self.write()?;
        if !tables.categories.iter().any(|c| c.store_id == store_id && c.id == id) {
            return Err(AppError::ResourceNotFound);
        }
        if !tables.has_billboard(store_id, input.billboard_id) {
            return Err(AppError::InvalidReference("billboardId".to_string()));
        }

        let category = tables
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(AppError::ResourceNotFound)?;
        category.billboard_id = input.billboard_id;
        category.name = input.name;
        category.updated_at = Utc::now();
        Ok(category.clone())
    }

    async fn delete_category(&self, store_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let mut tables = self.write()?;
        if !tables.categories.iter().any(|c| c.store_id == store_id && c.id == id) {
            return Err(AppError::ResourceNotFound);
        }
        if tables.products.iter().any(|p| p.category_id == id) {
            return Err(AppError::ResourceInUse);
        }
        tables.categories.retain(|c| c.id != id);
        Ok(())
    }

    async fn create_attribute(
        &self,
        kind: AttributeKind,
        store_id: Uuid,
        input: AttributeInput,
    ) -> Result<Attribute, AppError> {
        let now = Utc::now();
        let attribute = Attribute {
            id: Uuid::new_v4(),
            store_id,
            name: input.name,
            value: input.value,
            created_at: now,
            updated_at: now,
        };
        self.write()?.attributes_mut(kind).push(attribute.clone());
        Ok(attribute)
    }

    async fn list_attributes(
        &self,
        kind: AttributeKind,
        store_id: Uuid,
    ) -> Result<Vec<Attribute>, AppError> {
        let tables = self.read()?;
        let mut attributes: Vec<Attribute> = tables
            .attributes(kind)
            .iter()
            .filter(|a| a.store_id == store_id)
            .cloned()
            .collect();
        attributes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(attributes)
    }

    async fn find_attribute(
        &self,
        kind: AttributeKind,
        store_id: Uuid,
        id: Uuid,
    ) -> Result<Attribute, AppError> {
        self.read()?
            .attributes(kind)
            .iter()
            .find(|a| a.store_id == store_id && a.id == id)
            .cloned()
            .ok_or(AppError::ResourceNotFound)
    }

    async fn update_attribute(
        &self,
        kind: AttributeKind,
        store_id: Uuid,
        id: Uuid,
        input: AttributeInput,
    ) -> Result<Attribute, AppError> {
        let mut tables = self.write()?;
        let attribute = tables
            .attributes_mut(kind)
            .iter_mut()
            .find(|a| a.store_id == store_id && a.id == id)
            .ok_or(AppError::ResourceNotFound)?;
        attribute.name = input.name;
        attribute.value = input.value;
        attribute.updated_at = Utc::now();
        Ok(attribute.clone())
    }

    async fn delete_attribute(
        &self,
        kind: AttributeKind,
        store_id: Uuid,
        id: Uuid,
    ) -> Result<(), AppError> {
        let mut tables = self.write()?;
        if !tables.attributes(kind).iter().any(|a| a.store_id == store_id && a.id == id) {
            return Err(AppError::ResourceNotFound);
        }
        let in_use = tables.products.iter().any(|p| match kind {
            AttributeKind::Size => p.size_id == id,
            AttributeKind::Color => p.color_id == id,
        });
        if in_use {
            return Err(AppError::ResourceInUse);
        }
        tables.attributes_mut(kind).retain(|a| a.id != id);
        Ok(())
    }
}

#[async_trait]
impl StoreDirectory for InMemoryDatabase {
    async fn create(&self, owner_id: &str, name: &str) -> Result<Store, AppError> {
        let now = Utc::now();
        let store = Store {
            id: Uuid::new_v4(),
            name: name.to_string(),
            user_id: owner_id.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.write()?.stores.insert(store.id, store.clone());
        Ok(store)
    }

    async fn find_by_id(&self, store_id: Uuid) -> Result<Option<Store>, AppError> {
        Ok(self.read()?.stores.get(&store_id).cloned())
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Store>, AppError> {
        let tables = self.read()?;
        let mut stores: Vec<Store> = tables
            .stores
            .values()
            .filter(|s| s.is_owned_by(owner_id))
            .cloned()
            .collect();
        stores.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(stores)
    }

    async fn rename(&self, store_id: Uuid, name: &str) -> Result<Store, AppError> {
        let mut tables = self.write()?;
        let store = tables.stores.get_mut(&store_id).ok_or(AppError::StoreNotFound)?;
        store.name = name.to_string();
        store.updated_at = Utc::now();
        Ok(store.clone())
    }

    async fn delete(&self, store_id: Uuid) -> Result<(), AppError> {
        let mut tables = self.write()?;
        tables.stores.remove(&store_id).ok_or(AppError::StoreNotFound)?;

        // Mesmo efeito da remoção em ordem do Postgres
        let removed_orders: Vec<Uuid> = tables
            .orders
            .iter()
            .filter(|o| o.store_id == store_id)
            .map(|o| o.id)
            .collect();
        let removed_products: Vec<Uuid> = tables
            .products
            .iter()
            .filter(|p| p.store_id == store_id)
            .map(|p| p.id)
            .collect();
        tables.line_items.retain(|i| !removed_orders.contains(&i.order_id));
        tables.orders.retain(|o| o.store_id != store_id);
        tables.images.retain(|i| !removed_products.contains(&i.product_id));
        tables.products.retain(|p| p.store_id != store_id);
        tables.categories.retain(|c| c.store_id != store_id);
        tables.billboards.retain(|b| b.store_id != store_id);
        tables.sizes.retain(|a| a.store_id != store_id);
        tables.colors.retain(|a| a.store_id != store_id);
        Ok(())
    }
}
