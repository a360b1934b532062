// src/config.rs

use std::{env, str::FromStr, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    common::i18n::I18nStore,
    db::{
        CatalogRepository, CatalogStore, InMemoryDatabase, OrderRepository, OrderStore,
        ProductRepository, ProductStore, StoreDirectory, StoreRepository,
    },
    services::{
        AnalyticsService, AuthService, CatalogService, DashboardService, OrderService,
        ProductService, StoreService,
    },
};

// ---
// Configuração (variáveis de ambiente / .env)
// ---
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_issuer: Option<String>,
    pub bind_addr: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?,
            jwt_secret: env::var("AUTH_JWT_SECRET").context("AUTH_JWT_SECRET deve ser definido")?,
            jwt_issuer: env::var("AUTH_ISSUER").ok().filter(|v| !v.is_empty()),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", 5)?,
            db_acquire_timeout: Duration::from_secs(parse_or("DB_ACQUIRE_TIMEOUT_SECS", 3)?),
        })
    }

    pub async fn connect(&self) -> anyhow::Result<PgPool> {
        let pool = PgPoolOptions::new()
            .max_connections(self.db_max_connections)
            .acquire_timeout(self.db_acquire_timeout)
            .connect(&self.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");
        Ok(pool)
    }
}

fn parse_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{key} inválido: '{raw}'")),
        Err(_) => Ok(default),
    }
}

// ---
// Repositórios injetados nos serviços
// ---
#[derive(Clone)]
pub struct Repositories {
    pub stores: Arc<dyn StoreDirectory>,
    pub catalog: Arc<dyn CatalogStore>,
    pub products: Arc<dyn ProductStore>,
    pub orders: Arc<dyn OrderStore>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            stores: Arc::new(StoreRepository::new(pool.clone())),
            catalog: Arc::new(CatalogRepository::new(pool.clone())),
            products: Arc::new(ProductRepository::new(pool.clone())),
            orders: Arc::new(OrderRepository::new(pool)),
        }
    }

    pub fn in_memory(db: InMemoryDatabase) -> Self {
        Self {
            stores: Arc::new(db.clone()),
            catalog: Arc::new(db.clone()),
            products: Arc::new(db.clone()),
            orders: Arc::new(db),
        }
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub i18n_store: Arc<I18nStore>,
    pub auth_service: AuthService,
    pub store_service: StoreService,
    pub catalog_service: CatalogService,
    pub product_service: ProductService,
    pub order_service: OrderService,
    pub analytics_service: AnalyticsService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub fn new(config: &Config, repos: Repositories) -> anyhow::Result<Self> {
        // --- Monta o gráfico de dependências ---
        let analytics_service =
            AnalyticsService::new(repos.orders.clone(), repos.products.clone());

        Ok(Self {
            i18n_store: Arc::new(I18nStore::load()?),
            auth_service: AuthService::new(&config.jwt_secret, config.jwt_issuer.as_deref()),
            store_service: StoreService::new(repos.stores),
            catalog_service: CatalogService::new(repos.catalog),
            product_service: ProductService::new(repos.products),
            order_service: OrderService::new(repos.orders),
            dashboard_service: DashboardService::new(analytics_service.clone()),
            analytics_service,
        })
    }
}
