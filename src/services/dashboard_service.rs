// src/services/dashboard_service.rs

use crate::{
    common::{error::AppError, money::format_usd},
    models::{dashboard::DashboardOverview, store::Store},
    services::analytics_service::AnalyticsService,
};

#[derive(Clone)]
pub struct DashboardService {
    analytics: AnalyticsService,
}

impl DashboardService {
    pub fn new(analytics: AnalyticsService) -> Self {
        Self { analytics }
    }

    // Os quatro indicadores são leituras independentes: rodam em paralelo
    pub async fn overview(&self, store: &Store) -> Result<DashboardOverview, AppError> {
        let (total_revenue, sales_count, stock_count, graph_revenue) = tokio::try_join!(
            self.analytics.total_revenue(store.id),
            self.analytics.sales_count(store.id),
            self.analytics.stock_count(store.id),
            self.analytics.monthly_revenue(store.id),
        )?;

        tracing::debug!(
            store_id = %store.id,
            %total_revenue,
            sales_count,
            stock_count,
            "painel calculado"
        );

        Ok(DashboardOverview {
            store_name: store.name.clone(),
            total_revenue,
            formatted_revenue: format_usd(total_revenue),
            sales_count,
            stock_count,
            graph_revenue,
        })
    }
}
