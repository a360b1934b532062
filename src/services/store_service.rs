// src/services/store_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{common::error::AppError, db::StoreDirectory, models::store::Store};

#[derive(Clone)]
pub struct StoreService {
    stores: Arc<dyn StoreDirectory>,
}

impl StoreService {
    pub fn new(stores: Arc<dyn StoreDirectory>) -> Self {
        Self { stores }
    }

    pub async fn create_store(&self, owner_id: &str, name: &str) -> Result<Store, AppError> {
        let store = self.stores.create(owner_id, name.trim()).await?;
        tracing::info!(store_id = %store.id, owner = owner_id, "🏬 loja criada");
        Ok(store)
    }

    pub async fn list_stores(&self, owner_id: &str) -> Result<Vec<Store>, AppError> {
        self.stores.list_by_owner(owner_id).await
    }

    /// A verificação de autorização mais importante: a loja existe e pertence ao usuário?
    pub async fn find_owned(&self, store_id: Uuid, owner_id: &str) -> Result<Store, AppError> {
        let store = self
            .stores
            .find_by_id(store_id)
            .await?
            .ok_or(AppError::StoreNotFound)?;

        if !store.is_owned_by(owner_id) {
            tracing::warn!(%store_id, owner = owner_id, "acesso a loja de outro dono negado");
            return Err(AppError::Forbidden);
        }
        Ok(store)
    }

    // `store` já passou por `find_owned` no extrator
    pub async fn rename_store(&self, store: &Store, name: &str) -> Result<Store, AppError> {
        self.stores.rename(store.id, name.trim()).await
    }

    pub async fn delete_store(&self, store: &Store) -> Result<(), AppError> {
        self.stores.delete(store.id).await?;
        tracing::info!(store_id = %store.id, "🗑️ loja removida");
        Ok(())
    }
}
