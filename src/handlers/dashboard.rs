// src/handlers/dashboard.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{i18n::Locale, tenancy::StoreContext},
    models::dashboard::{DashboardOverview, GraphRevenueEntry, SalesCount, StockCount, TotalRevenue},
};

// GET /api/{store_id}/dashboard
#[utoipa::path(
    get,
    path = "/api/{store_id}/dashboard",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Cards e gráfico do painel da loja", body = DashboardOverview),
        (status = 401, description = "Não autenticado"),
        (status = 403, description = "Loja de outro dono"),
        (status = 404, description = "Loja não encontrada")
    ),
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn get_overview(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: StoreContext,
) -> Result<impl IntoResponse, ApiError> {
    let overview = app_state
        .dashboard_service
        .overview(&ctx.store)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(overview)))
}

// GET /api/{store_id}/dashboard/revenue
#[utoipa::path(
    get,
    path = "/api/{store_id}/dashboard/revenue",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Receita total dos pedidos pagos", body = TotalRevenue)
    ),
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn get_total_revenue(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: StoreContext,
) -> Result<impl IntoResponse, ApiError> {
    let total_revenue = app_state
        .analytics_service
        .total_revenue(ctx.store.id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(TotalRevenue { total_revenue })))
}

// GET /api/{store_id}/dashboard/sales-count
#[utoipa::path(
    get,
    path = "/api/{store_id}/dashboard/sales-count",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Quantidade de pedidos pagos", body = SalesCount)
    ),
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn get_sales_count(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: StoreContext,
) -> Result<impl IntoResponse, ApiError> {
    let sales_count = app_state
        .analytics_service
        .sales_count(ctx.store.id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(SalesCount { sales_count })))
}

// GET /api/{store_id}/dashboard/stock-count
#[utoipa::path(
    get,
    path = "/api/{store_id}/dashboard/stock-count",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Produtos em estoque", body = StockCount)
    ),
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn get_stock_count(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: StoreContext,
) -> Result<impl IntoResponse, ApiError> {
    let stock_count = app_state
        .analytics_service
        .stock_count(ctx.store.id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(StockCount { stock_count })))
}

// GET /api/{store_id}/dashboard/graph-revenue
#[utoipa::path(
    get,
    path = "/api/{store_id}/dashboard/graph-revenue",
    tag = "Dashboard",
    responses(
        (
            status = 200,
            description = "Receita por mês (Jan..Dec, anos somados)",
            body = Vec<GraphRevenueEntry>
        )
    ),
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn get_graph_revenue(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: StoreContext,
) -> Result<impl IntoResponse, ApiError> {
    let graph = app_state
        .analytics_service
        .monthly_revenue(ctx.store.id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(graph)))
}
