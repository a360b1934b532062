// src/routes.rs

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers};

/// Monta o app completo. Usado pelo servidor e pelos testes (`oneshot`).
pub fn build_app(app_state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        // Gestão das lojas do usuário autenticado
        .route(
            "/api/stores",
            post(handlers::stores::create_store).get(handlers::stores::list_my_stores),
        )
        .route(
            "/api/stores/{store_id}",
            get(handlers::stores::get_store)
                .patch(handlers::stores::update_store)
                .delete(handlers::stores::delete_store),
        )
        // Escopo de loja; o dono é verificado pelo extrator `StoreContext`
        .route("/api/{store_id}/dashboard", get(handlers::dashboard::get_overview))
        .route(
            "/api/{store_id}/dashboard/revenue",
            get(handlers::dashboard::get_total_revenue),
        )
        .route(
            "/api/{store_id}/dashboard/sales-count",
            get(handlers::dashboard::get_sales_count),
        )
        .route(
            "/api/{store_id}/dashboard/stock-count",
            get(handlers::dashboard::get_stock_count),
        )
        .route(
            "/api/{store_id}/dashboard/graph-revenue",
            get(handlers::dashboard::get_graph_revenue),
        )
        .route("/api/{store_id}/orders", get(handlers::orders::list_orders))
        // Catálogo: leituras públicas para a vitrine, escritas só do dono
        .route(
            "/api/{store_id}/billboards",
            post(handlers::billboards::create_billboard).get(handlers::billboards::list_billboards),
        )
        .route(
            "/api/{store_id}/billboards/{id}",
            get(handlers::billboards::get_billboard)
                .patch(handlers::billboards::update_billboard)
                .delete(handlers::billboards::delete_billboard),
        )
        .route(
            "/api/{store_id}/categories",
            post(handlers::categories::create_category)
                .get(handlers::categories::list_categories),
        )
        .route(
            "/api/{store_id}/categories/{id}",
            get(handlers::categories::get_category)
                .patch(handlers::categories::update_category)
                .delete(handlers::categories::delete_category),
        )
        .route(
            "/api/{store_id}/sizes",
            post(handlers::attributes::create_size).get(handlers::attributes::list_sizes),
        )
        .route(
            "/api/{store_id}/sizes/{id}",
            get(handlers::attributes::get_size)
                .patch(handlers::attributes::update_size)
                .delete(handlers::attributes::delete_size),
        )
        .route(
            "/api/{store_id}/colors",
            post(handlers::attributes::create_color).get(handlers::attributes::list_colors),
        )
        .route(
            "/api/{store_id}/colors/{id}",
            get(handlers::attributes::get_color)
                .patch(handlers::attributes::update_color)
                .delete(handlers::attributes::delete_color),
        )
        .route(
            "/api/{store_id}/products",
            post(handlers::products::create_product).get(handlers::products::list_products),
        )
        .route(
            "/api/{store_id}/products/{id}",
            get(handlers::products::get_product)
                .patch(handlers::products::update_product)
                .delete(handlers::products::delete_product),
        )
        // Tabela do painel: inclui produtos fora de estoque
        .route("/api/{store_id}/admin/products", get(handlers::products::list_admin_products))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
