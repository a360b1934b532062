// src/handlers/orders.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{i18n::Locale, tenancy::StoreContext},
    models::order::OrderRow,
};

// GET /api/{store_id}/orders
#[utoipa::path(
    get,
    path = "/api/{store_id}/orders",
    tag = "Orders",
    responses(
        (
            status = 200,
            description = "Pedidos da loja (pagos e não pagos), mais recentes primeiro",
            body = Vec<OrderRow>
        ),
        (status = 403, description = "Loja de outro dono")
    ),
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn list_orders(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: StoreContext,
) -> Result<impl IntoResponse, ApiError> {
    let rows = app_state
        .order_service
        .list_orders(ctx.store.id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(rows)))
}
