// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Stores ---
        handlers::stores::create_store,
        handlers::stores::list_my_stores,
        handlers::stores::get_store,
        handlers::stores::update_store,
        handlers::stores::delete_store,

        // --- Dashboard ---
        handlers::dashboard::get_overview,
        handlers::dashboard::get_total_revenue,
        handlers::dashboard::get_sales_count,
        handlers::dashboard::get_stock_count,
        handlers::dashboard::get_graph_revenue,

        // --- Orders ---
        handlers::orders::list_orders,

        // --- Billboards ---
        handlers::billboards::create_billboard,
        handlers::billboards::list_billboards,
        handlers::billboards::get_billboard,
        handlers::billboards::update_billboard,
        handlers::billboards::delete_billboard,

        // --- Categories ---
        handlers::categories::create_category,
        handlers::categories::list_categories,
        handlers::categories::get_category,
        handlers::categories::update_category,
        handlers::categories::delete_category,

        // --- Sizes ---
        handlers::attributes::create_size,
        handlers::attributes::list_sizes,
        handlers::attributes::get_size,
        handlers::attributes::update_size,
        handlers::attributes::delete_size,

        // --- Colors ---
        handlers::attributes::create_color,
        handlers::attributes::list_colors,
        handlers::attributes::get_color,
        handlers::attributes::update_color,
        handlers::attributes::delete_color,

        // --- Products ---
        handlers::products::create_product,
        handlers::products::list_products,
        handlers::products::get_product,
        handlers::products::update_product,
        handlers::products::delete_product,
        handlers::products::list_admin_products,
    ),
    components(
        schemas(
            // --- Stores ---
            models::store::Store,
            models::store::CreateStorePayload,
            models::store::UpdateStorePayload,

            // --- Dashboard ---
            models::dashboard::DashboardOverview,
            models::dashboard::TotalRevenue,
            models::dashboard::SalesCount,
            models::dashboard::StockCount,
            models::dashboard::GraphRevenueEntry,

            // --- Orders ---
            models::order::Order,
            models::order::OrderLine,
            models::order::OrderWithItems,
            models::order::OrderRow,

            // --- Catalog ---
            models::catalog::Billboard,
            models::catalog::Category,
            models::catalog::CategoryDetail,
            models::catalog::Attribute,
            models::catalog::BillboardPayload,
            models::catalog::CategoryPayload,
            models::catalog::AttributePayload,

            // --- Products ---
            models::product::Product,
            models::product::ProductImage,
            models::product::ProductDetail,
            models::product::ProductRow,
            handlers::products::ProductPayload,
            handlers::products::ImagePayload,
        )
    ),
    tags(
        (name = "Stores", description = "Lojas do usuário"),
        (name = "Dashboard", description = "Receita, vendas, estoque e gráfico mensal"),
        (name = "Orders", description = "Tabela de pedidos da loja"),
        (name = "Billboards", description = "Banners das categorias"),
        (name = "Categories", description = "Categorias do catálogo"),
        (name = "Sizes", description = "Tamanhos do catálogo"),
        (name = "Colors", description = "Cores do catálogo"),
        (name = "Products", description = "Catálogo, tabela do painel e vitrine pública")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/stores",
            "/api/stores/{store_id}",
            "/api/{store_id}/dashboard",
            "/api/{store_id}/dashboard/graph-revenue",
            "/api/{store_id}/orders",
            "/api/{store_id}/billboards/{id}",
            "/api/{store_id}/categories",
            "/api/{store_id}/sizes/{id}",
            "/api/{store_id}/colors",
            "/api/{store_id}/products",
            "/api/{store_id}/products/{id}",
            "/api/{store_id}/admin/products",
        ] {
            assert!(doc.paths.paths.contains_key(path), "rota ausente: {path}");
        }
    }
}
