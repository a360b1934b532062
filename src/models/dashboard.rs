// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

// 1. Um mês do gráfico de barras (chaves `name`/`total` esperadas pelo front)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct GraphRevenueEntry {
    #[schema(example = "Mar")]
    pub name: String,
    #[schema(example = 1250.0)]
    pub total: Decimal,
}

// 2. Cards individuais
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TotalRevenue {
    pub total_revenue: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesCount {
    pub sales_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockCount {
    pub stock_count: i64,
}

// 3. Visão geral (todos os cards + gráfico)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    #[schema(example = "Minha Loja")]
    pub store_name: String,
    pub total_revenue: Decimal,
    #[schema(example = "$1,250.00")]
    pub formatted_revenue: String,
    pub sales_count: i64,
    pub stock_count: i64,
    pub graph_revenue: Vec<GraphRevenueEntry>,
}
