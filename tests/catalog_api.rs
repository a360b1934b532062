// tests/catalog_api.rs

mod common;

use axum::http::{Method, StatusCode};
use chrono::{TimeZone, Utc};
use common::{token_for, Dimensions, TestApp, OTHER_OWNER, OWNER};
use rust_decimal::Decimal;
use serde_json::json;
use store_admin::db::memory::SeedProduct;
use uuid::Uuid;

#[tokio::test]
async fn health_is_public() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn store_lifecycle_for_the_owner() {
    let app = TestApp::new();
    let token = token_for(OWNER);

    let body = json!({ "name": "  Loja Norte  " });
    let (status, created) =
        app.request(Method::POST, "/api/stores", Some(&token), Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Loja Norte");
    assert_eq!(created["userId"], OWNER);
    let store_id = created["id"].as_str().unwrap().to_string();

    let (status, listed) = app.get("/api/stores", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    // Outro usuário não vê a loja na listagem
    let (_, others) = app.get("/api/stores", Some(&token_for(OTHER_OWNER))).await;
    assert!(others.as_array().unwrap().is_empty());

    let (status, renamed) = app
        .request(
            Method::PATCH,
            &format!("/api/stores/{store_id}"),
            Some(&token),
            Some(json!({ "name": "Loja Sul" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renamed["name"], "Loja Sul");

    let uri = format!("/api/stores/{store_id}");
    let (status, _) = app.request(Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.get(&uri, Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blank_store_name_is_a_validation_error() {
    let app = TestApp::new();
    let token = token_for(OWNER);

    for name in ["", "   "] {
        let body = json!({ "name": name });
        let (status, body) =
            app.request(Method::POST, "/api/stores", Some(&token), Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["name"][0], "Name is required.");
    }
}

#[tokio::test]
async fn renaming_to_whitespace_keeps_the_old_name() {
    let app = TestApp::new();
    let store = app.store_for(OWNER, "Loja").await;
    let token = token_for(OWNER);
    let uri = format!("/api/stores/{}", store.id);

    let (status, _) =
        app.request(Method::PATCH, &uri, Some(&token), Some(json!({ "name": " \t " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = app.get(&uri, Some(&token)).await;
    assert_eq!(body["name"], "Loja");
}

#[tokio::test]
async fn only_the_owner_can_rename_or_delete() {
    let app = TestApp::new();
    let store = app.store_for(OWNER, "Loja").await;
    let intruder = token_for(OTHER_OWNER);

    let (status, _) = app
        .request(
            Method::PATCH,
            &format!("/api/stores/{}", store.id),
            Some(&intruder),
            Some(json!({ "name": "Minha agora" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let uri = format!("/api/stores/{}", store.id);
    let (status, _) = app.request(Method::DELETE, &uri, Some(&intruder), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.get(&uri, Some(&token_for(OWNER))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Loja");
}

fn product_body(dims: &Dimensions, in_stock: bool) -> serde_json::Value {
    json!({
        "name": "Jaqueta",
        "description": "Couro sintético",
        "price": 120.5,
        "categoryId": dims.category_id,
        "sizeId": dims.size_id,
        "colorId": dims.color_id,
        "images": [
            { "url": "https://media.example.com/jaqueta-1.jpg" },
            { "url": "https://media.example.com/jaqueta-2.jpg" }
        ],
        "isFeatured": true,
        "inStock": in_stock
    })
}

#[tokio::test]
async fn created_product_shows_up_on_the_public_storefront() {
    let app = TestApp::new();
    let store = app.store_for(OWNER, "Loja").await;
    let token = token_for(OWNER);
    let dims = app.dimensions_for(store.id, &token).await;
    let uri = format!("/api/{}/products", store.id);

    let (status, created) =
        app.request(Method::POST, &uri, Some(&token), Some(product_body(&dims, true))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Jaqueta");
    assert_eq!(created["price"].as_f64(), Some(120.5));
    assert_eq!(created["images"].as_array().unwrap().len(), 2);
    assert_eq!(created["categoryId"], dims.category_id.as_str());

    // Vitrine não exige token e traz as dimensões resolvidas
    let (status, listed) = app.get(&uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["id"], created["id"]);
    assert_eq!(listed[0]["images"].as_array().unwrap().len(), 2);
    assert_eq!(listed[0]["category"]["name"], "Casacos");
    assert_eq!(listed[0]["size"]["value"], "M");
    assert_eq!(listed[0]["color"]["value"], "#000000");
}

#[tokio::test]
async fn out_of_stock_products_stay_hidden() {
    let app = TestApp::new();
    let store = app.store_for(OWNER, "Loja").await;
    let token = token_for(OWNER);
    let dims = app.dimensions_for(store.id, &token).await;
    let uri = format!("/api/{}/products", store.id);

    let (status, _) =
        app.request(Method::POST, &uri, Some(&token), Some(product_body(&dims, false))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, listed) = app.get(&uri, None).await;
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_or_foreign_dimension_is_an_invalid_reference() {
    let app = TestApp::new();
    let store = app.store_for(OWNER, "Loja").await;
    let neighbour = app.store_for(OTHER_OWNER, "Vizinha").await;
    let token = token_for(OWNER);
    let dims = app.dimensions_for(store.id, &token).await;
    let foreign = app.dimensions_for(neighbour.id, &token_for(OTHER_OWNER)).await;
    let uri = format!("/api/{}/products", store.id);

    let mut body = product_body(&dims, true);
    body["sizeId"] = json!(Uuid::new_v4());
    let (status, response) = app.request(Method::POST, &uri, Some(&token), Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["details"]["field"], "sizeId");

    let mut body = product_body(&dims, true);
    body["categoryId"] = json!(foreign.category_id);
    let (status, response) = app.request(Method::POST, &uri, Some(&token), Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["details"]["field"], "categoryId");
}

#[tokio::test]
async fn storefront_filters_by_dimension_and_featured_flag() {
    let app = TestApp::new();
    let store = app.store_for(OWNER, "Loja").await;
    let category = Uuid::new_v4();

    let mut featured = SeedProduct::new("Vestido", Decimal::new(80, 0));
    featured.category_id = category;
    featured.is_featured = true;
    app.db.insert_product(store.id, featured).unwrap();

    let mut regular = SeedProduct::new("Saia", Decimal::new(60, 0));
    regular.category_id = category;
    app.db.insert_product(store.id, regular).unwrap();

    app.db.insert_product(store.id, SeedProduct::new("Meia", Decimal::new(10, 0))).unwrap();

    let base = format!("/api/{}/products", store.id);

    let (_, all) = app.get(&base, None).await;
    assert_eq!(all.as_array().unwrap().len(), 3);

    let (_, by_category) = app.get(&format!("{base}?categoryId={category}"), None).await;
    assert_eq!(by_category.as_array().unwrap().len(), 2);

    let uri = format!("{base}?categoryId={category}&isFeatured=true");
    let (_, featured_only) = app.get(&uri, None).await;
    let featured_only = featured_only.as_array().unwrap();
    assert_eq!(featured_only.len(), 1);
    assert_eq!(featured_only[0]["name"], "Vestido");
}

#[tokio::test]
async fn storefront_of_unknown_store_is_empty() {
    let app = TestApp::new();
    let (status, body) = app.get(&format!("/api/{}/products", Uuid::new_v4()), None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn invalid_product_payload_lists_field_errors() {
    let app = TestApp::new();
    let store = app.store_for(OWNER, "Loja").await;

    let (status, body) = app
        .request(
            Method::POST,
            &format!("/api/{}/products", store.id),
            Some(&token_for(OWNER)),
            Some(json!({ "name": "  ", "images": [] })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "One or more fields are invalid.");
    assert_eq!(body["details"]["name"][0], "Name is required.");
    assert_eq!(body["details"]["price"][0], "Price is required.");
    assert_eq!(body["details"]["images"][0], "Images are required.");
}

#[tokio::test]
async fn prices_must_be_positive_and_fit_two_decimal_places() {
    let app = TestApp::new();
    let store = app.store_for(OWNER, "Loja").await;
    let token = token_for(OWNER);
    let dims = app.dimensions_for(store.id, &token).await;
    let uri = format!("/api/{}/products", store.id);

    for (price, message) in [
        (json!(0), "Price must be greater than zero."),
        (json!(10.005), "Price must have at most two decimal places."),
        (json!(1e10), "Price is too large."),
    ] {
        let mut body = product_body(&dims, true);
        body["price"] = price;

        let (status, response) = app.request(Method::POST, &uri, Some(&token), Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["details"]["price"][0], message);
    }

    let (_, listed) = app.get(&uri, None).await;
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn creating_products_requires_ownership() {
    let app = TestApp::new();
    let store = app.store_for(OWNER, "Loja").await;
    let dims = app.dimensions_for(store.id, &token_for(OWNER)).await;
    let uri = format!("/api/{}/products", store.id);

    let (status, _) = app.request(Method::POST, &uri, None, Some(product_body(&dims, true))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let intruder = token_for(OTHER_OWNER);
    let (status, _) =
        app.request(Method::POST, &uri, Some(&intruder), Some(product_body(&dims, true))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn owner_updates_and_deletes_a_product() {
    let app = TestApp::new();
    let store = app.store_for(OWNER, "Loja").await;
    let token = token_for(OWNER);
    let dims = app.dimensions_for(store.id, &token).await;
    let id = app
        .create(&format!("/api/{}/products", store.id), &token, product_body(&dims, true))
        .await;
    let uri = format!("/api/{}/products/{id}", store.id);

    let mut body = product_body(&dims, false);
    body["name"] = json!("Jaqueta Leve");
    body["price"] = json!(99.9);
    body["images"] = json!([{ "url": "https://media.example.com/leve.jpg" }]);
    let (status, updated) = app.request(Method::PATCH, &uri, Some(&token), Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Jaqueta Leve");
    assert_eq!(updated["inStock"], false);
    assert_eq!(updated["images"].as_array().unwrap().len(), 1);

    // Leitura pública do item, mesmo fora de estoque
    let (status, fetched) = app.get(&uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["price"].as_f64(), Some(99.9));
    assert_eq!(fetched["size"]["name"], "Médio");

    let intruder = token_for(OTHER_OWNER);
    let (status, _) = app.request(Method::DELETE, &uri, Some(&intruder), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.request(Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.get(&uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn updating_an_unknown_product_is_not_found() {
    let app = TestApp::new();
    let store = app.store_for(OWNER, "Loja").await;
    let token = token_for(OWNER);
    let dims = app.dimensions_for(store.id, &token).await;
    let uri = format!("/api/{}/products/{}", store.id, Uuid::new_v4());

    let (status, _) =
        app.request(Method::PATCH, &uri, Some(&token), Some(product_body(&dims, true))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.get(&format!("/api/{}/products/abc", store.id), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Id is invalid.");
}

#[tokio::test]
async fn sold_products_cannot_be_deleted() {
    let app = TestApp::new();
    let store = app.store_for(OWNER, "Loja").await;
    let product = app
        .db
        .insert_product(store.id, SeedProduct::new("Livro", Decimal::new(30, 0)))
        .unwrap();
    app.db.insert_order(store.id, true, Utc::now(), &[product.id]).unwrap();

    let uri = format!("/api/{}/products/{}", store.id, product.id);
    let (status, _) = app.request(Method::DELETE, &uri, Some(&token_for(OWNER)), None).await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn admin_table_lists_every_product_with_dimension_names() {
    let app = TestApp::new();
    let store = app.store_for(OWNER, "Loja").await;
    let token = token_for(OWNER);
    let dims = app.dimensions_for(store.id, &token).await;
    let products = format!("/api/{}/products", store.id);
    app.create(&products, &token, product_body(&dims, false)).await;

    let uri = format!("/api/{}/admin/products", store.id);
    let (status, rows) = app.get(&uri, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["inStock"], false);
    assert_eq!(rows[0]["formattedPrice"], "$120.50");
    assert_eq!(rows[0]["category"], "Casacos");
    assert_eq!(rows[0]["size"], "Médio");
    assert_eq!(rows[0]["color"], "#000000");

    let (status, _) = app.get(&uri, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = app.get(&uri, Some(&token_for(OTHER_OWNER))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn orders_table_includes_unpaid_orders_with_formatted_totals() {
    let app = TestApp::new();
    let store = app.store_for(OWNER, "Loja").await;
    let shirt = SeedProduct::new("Camiseta", Decimal::new(1050, 2));
    let shirt = app.db.insert_product(store.id, shirt).unwrap();
    let cap = SeedProduct::new("Boné", Decimal::new(2500, 2));
    let cap = app.db.insert_product(store.id, cap).unwrap();

    let march = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap();
    let april = Utc.with_ymd_and_hms(2024, 4, 1, 10, 0, 0).unwrap();
    app.db.insert_order(store.id, true, march, &[shirt.id, cap.id]).unwrap();
    app.db.insert_order(store.id, false, april, &[cap.id]).unwrap();

    let uri = format!("/api/{}/orders", store.id);
    let (status, body) = app.get(&uri, Some(&token_for(OWNER))).await;
    assert_eq!(status, StatusCode::OK);

    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);

    // Mais recente primeiro
    assert_eq!(rows[0]["isPaid"], false);
    assert_eq!(rows[0]["formattedTotal"], "$25.00");
    assert_eq!(rows[0]["createdAt"], "April 01, 2024");

    assert_eq!(rows[1]["products"], "Camiseta, Boné");
    assert_eq!(rows[1]["formattedTotal"], "$35.50");
    assert_eq!(rows[1]["createdAt"], "March 05, 2024");
}

#[tokio::test]
async fn deleting_a_store_removes_its_numbers() {
    let app = TestApp::new();
    let store = app.store_for(OWNER, "Loja").await;
    let product = SeedProduct::new("Livro", Decimal::new(30, 0));
    let product = app.db.insert_product(store.id, product).unwrap();
    app.db.insert_order(store.id, true, Utc::now(), &[product.id]).unwrap();
    let token = token_for(OWNER);

    let uri = format!("/api/stores/{}", store.id);
    let (status, _) = app.request(Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, storefront) = app.get(&format!("/api/{}/products", store.id), None).await;
    assert!(storefront.as_array().unwrap().is_empty());
    let (_, categories) = app.get(&format!("/api/{}/categories", store.id), None).await;
    assert!(categories.as_array().unwrap().is_empty());
}
