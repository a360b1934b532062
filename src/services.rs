pub mod analytics_service;
pub mod auth;
pub mod catalog_service;
pub mod dashboard_service;
pub mod order_service;
pub mod product_service;
pub mod store_service;

pub use analytics_service::AnalyticsService;
pub use auth::AuthService;
pub use catalog_service::CatalogService;
pub use dashboard_service::DashboardService;
pub use order_service::OrderService;
pub use product_service::ProductService;
pub use store_service::StoreService;
