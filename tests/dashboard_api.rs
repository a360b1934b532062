// tests/dashboard_api.rs

mod common;

use axum::http::{Method, StatusCode};
use chrono::{TimeZone, Utc};
use common::{token_for, TestApp, OTHER_OWNER, OWNER};
use rust_decimal::Decimal;
use store_admin::db::memory::SeedProduct;
use uuid::Uuid;

// Loja com receita espalhada por anos diferentes:
//   Jan/2024 pago [10.50 + 25.00], Mar/2023 pago [10.50], Jan/2023 pago [25.00],
//   Fev/2024 não pago [25.00]
async fn seeded_store(app: &TestApp) -> Uuid {
    let store = app.store_for(OWNER, "Loja Centro").await;

    let shirt = SeedProduct::new("Camiseta", Decimal::new(1050, 2));
    let shirt = app.db.insert_product(store.id, shirt).unwrap();
    let shoes = SeedProduct::new("Tênis", Decimal::new(2500, 2));
    let shoes = app.db.insert_product(store.id, shoes).unwrap();
    let mut sold_out = SeedProduct::new("Boné", Decimal::new(500, 2));
    sold_out.in_stock = false;
    app.db.insert_product(store.id, sold_out).unwrap();

    let jan_2024 = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
    let mar_2023 = Utc.with_ymd_and_hms(2023, 3, 2, 9, 0, 0).unwrap();
    let jan_2023 = Utc.with_ymd_and_hms(2023, 1, 31, 23, 0, 0).unwrap();
    let feb_2024 = Utc.with_ymd_and_hms(2024, 2, 10, 8, 0, 0).unwrap();

    app.db.insert_order(store.id, true, jan_2024, &[shirt.id, shoes.id]).unwrap();
    app.db.insert_order(store.id, true, mar_2023, &[shirt.id]).unwrap();
    app.db.insert_order(store.id, true, jan_2023, &[shoes.id]).unwrap();
    app.db.insert_order(store.id, false, feb_2024, &[shoes.id]).unwrap();

    store.id
}

#[tokio::test]
async fn overview_sums_only_paid_orders() {
    let app = TestApp::new();
    let store_id = seeded_store(&app).await;

    let uri = format!("/api/{store_id}/dashboard");
    let (status, body) = app.get(&uri, Some(&token_for(OWNER))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["storeName"], "Loja Centro");
    assert_eq!(body["totalRevenue"].as_f64(), Some(71.0));
    assert_eq!(body["formattedRevenue"], "$71.00");
    assert_eq!(body["salesCount"], 3);
    assert_eq!(body["stockCount"], 2);
    assert_eq!(body["graphRevenue"].as_array().unwrap().len(), 12);
}

#[tokio::test]
async fn single_card_endpoints_match_overview() {
    let app = TestApp::new();
    let store_id = seeded_store(&app).await;
    let token = token_for(OWNER);

    let (_, revenue) = app.get(&format!("/api/{store_id}/dashboard/revenue"), Some(&token)).await;
    let (_, sales) = app.get(&format!("/api/{store_id}/dashboard/sales-count"), Some(&token)).await;
    let (_, stock) = app.get(&format!("/api/{store_id}/dashboard/stock-count"), Some(&token)).await;

    assert_eq!(revenue["totalRevenue"].as_f64(), Some(71.0));
    assert_eq!(sales["salesCount"], 3);
    assert_eq!(stock["stockCount"], 2);
}

#[tokio::test]
async fn graph_collapses_years_into_calendar_months() {
    let app = TestApp::new();
    let store_id = seeded_store(&app).await;

    let (status, body) = app
        .get(&format!("/api/{store_id}/dashboard/graph-revenue"), Some(&token_for(OWNER)))
        .await;
    assert_eq!(status, StatusCode::OK);

    let graph = body.as_array().unwrap();
    let names: Vec<_> = graph.iter().map(|entry| entry["name"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"]
    );

    // Jan/2024 (35.50) + Jan/2023 (25.00)
    assert_eq!(graph[0]["total"].as_f64(), Some(60.5));
    // Fevereiro só tem pedido não pago
    assert_eq!(graph[1]["total"].as_f64(), Some(0.0));
    assert_eq!(graph[2]["total"].as_f64(), Some(10.5));
    assert!(graph[3..].iter().all(|entry| entry["total"].as_f64() == Some(0.0)));
}

#[tokio::test]
async fn empty_store_reports_zeroes() {
    let app = TestApp::new();
    let store = app.store_for(OWNER, "Vazia").await;

    let uri = format!("/api/{}/dashboard", store.id);
    let (status, body) = app.get(&uri, Some(&token_for(OWNER))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalRevenue"].as_f64(), Some(0.0));
    assert_eq!(body["formattedRevenue"], "$0.00");
    assert_eq!(body["salesCount"], 0);
    assert_eq!(body["stockCount"], 0);
}

#[tokio::test]
async fn other_stores_never_leak_into_the_numbers() {
    let app = TestApp::new();
    let store_id = seeded_store(&app).await;

    let neighbour = app.store_for(OWNER, "Loja Vizinha").await;
    let mug = SeedProduct::new("Caneca", Decimal::new(999, 0));
    let product = app.db.insert_product(neighbour.id, mug).unwrap();
    app.db.insert_order(neighbour.id, true, Utc::now(), &[product.id]).unwrap();

    let (_, body) = app.get(&format!("/api/{store_id}/dashboard"), Some(&token_for(OWNER))).await;
    assert_eq!(body["totalRevenue"].as_f64(), Some(71.0));
    assert_eq!(body["salesCount"], 3);
    assert_eq!(body["stockCount"], 2);

    let uri = format!("/api/{}/dashboard", neighbour.id);
    let (_, body) = app.get(&uri, Some(&token_for(OWNER))).await;
    assert_eq!(body["totalRevenue"].as_f64(), Some(999.0));
}

#[tokio::test]
async fn repeated_reads_return_the_same_payload() {
    let app = TestApp::new();
    let store_id = seeded_store(&app).await;
    let token = token_for(OWNER);
    let uri = format!("/api/{store_id}/dashboard");

    let (_, first) = app.get(&uri, Some(&token)).await;
    let (_, second) = app.get(&uri, Some(&token)).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn marking_an_order_paid_moves_the_revenue() {
    let app = TestApp::new();
    let store = app.store_for(OWNER, "Loja").await;
    let book = SeedProduct::new("Livro", Decimal::new(40, 0));
    let product = app.db.insert_product(store.id, book).unwrap();
    let june = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    let order = app.db.insert_order(store.id, false, june, &[product.id]).unwrap();
    let uri = format!("/api/{}/dashboard", store.id);
    let token = token_for(OWNER);

    let (_, before) = app.get(&uri, Some(&token)).await;
    assert_eq!(before["salesCount"], 0);

    app.db.mark_paid(order.id).unwrap();

    let (_, after) = app.get(&uri, Some(&token)).await;
    assert_eq!(after["salesCount"], 1);
    assert_eq!(after["totalRevenue"].as_f64(), Some(40.0));
    assert_eq!(after["graphRevenue"][5]["total"].as_f64(), Some(40.0));
}

#[tokio::test]
async fn missing_or_bad_token_is_unauthorized() {
    let app = TestApp::new();
    let store_id = seeded_store(&app).await;
    let uri = format!("/api/{store_id}/dashboard/revenue");

    let (status, body) = app.get(&uri, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Authentication token is missing.");

    let (status, _) = app.get(&uri, Some("not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn foreign_store_is_forbidden_and_translated() {
    let app = TestApp::new();
    let store_id = seeded_store(&app).await;

    let (status, body) = app
        .request_with_language(
            Method::GET,
            &format!("/api/{store_id}/dashboard"),
            Some(&token_for(OTHER_OWNER)),
            None,
            Some("pt-BR,pt;q=0.9"),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Você não tem acesso a esta loja.");
}

#[tokio::test]
async fn unknown_or_malformed_store_ids_are_rejected() {
    let app = TestApp::new();
    let token = token_for(OWNER);

    let (status, _) = app.get(&format!("/api/{}/dashboard", Uuid::new_v4()), Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.get("/api/not-a-uuid/dashboard", Some(&token)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Store id is invalid.");
}

#[tokio::test]
async fn storage_failure_surfaces_as_generic_error() {
    let app = TestApp::new();
    let store_id = seeded_store(&app).await;
    let token = token_for(OWNER);

    app.db.set_unavailable(true);
    let uri = format!("/api/{store_id}/dashboard/graph-revenue");
    let (status, body) = app.get(&uri, Some(&token)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "An unexpected error occurred.");
}
