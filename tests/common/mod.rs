// tests/common/mod.rs
#![allow(dead_code)]

use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use store_admin::{
    config::{AppState, Config, Repositories},
    db::{InMemoryDatabase, StoreDirectory},
    models::store::Store,
    routes::build_app,
    services::auth::Claims,
};
use tower::ServiceExt;
use uuid::Uuid;

pub const JWT_SECRET: &str = "segredo-de-teste";
pub const OWNER: &str = "user_owner";
pub const OTHER_OWNER: &str = "user_other";

/// Ids do catálogo criado por `TestApp::dimensions_for`.
#[derive(Debug, Clone)]
pub struct Dimensions {
    pub billboard_id: String,
    pub category_id: String,
    pub size_id: String,
    pub color_id: String,
}

pub struct TestApp {
    pub db: InMemoryDatabase,
    router: Router,
}

pub fn test_config() -> Config {
    Config {
        database_url: String::new(),
        jwt_secret: JWT_SECRET.to_string(),
        jwt_issuer: None,
        bind_addr: "127.0.0.1:0".to_string(),
        db_max_connections: 1,
        db_acquire_timeout: Duration::from_secs(1),
    }
}

/// Token HS256 válido por uma hora para o `sub` informado.
pub fn token_for(owner: &str) -> String {
    let claims = Claims {
        sub: owner.to_string(),
        exp: (chrono::Utc::now().timestamp() + 3600) as usize,
        iss: None,
    };
    let key = EncodingKey::from_secret(JWT_SECRET.as_bytes());
    encode(&Header::default(), &claims, &key).unwrap()
}

impl TestApp {
    pub fn new() -> Self {
        let db = InMemoryDatabase::new();
        let state = AppState::new(&test_config(), Repositories::in_memory(db.clone())).unwrap();
        Self { db, router: build_app(state) }
    }

    pub async fn store_for(&self, owner: &str, name: &str) -> Store {
        StoreDirectory::create(&self.db, owner, name).await.unwrap()
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        self.request_with_language(method, uri, token, body, None).await
    }

    pub async fn request_with_language(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
        language: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(language) = language {
            builder = builder.header(header::ACCEPT_LANGUAGE, language);
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, uri, token, None).await
    }

    /// POST que precisa dar 201; devolve o `id` criado.
    pub async fn create(&self, uri: &str, token: &str, body: Value) -> String {
        let (status, created) = self.request(Method::POST, uri, Some(token), Some(body)).await;
        assert_eq!(status, StatusCode::CREATED, "POST {uri} falhou: {created}");
        created["id"].as_str().unwrap().to_string()
    }

    /// Billboard, categoria, tamanho e cor criados pela API, como no painel.
    pub async fn dimensions_for(&self, store_id: Uuid, token: &str) -> Dimensions {
        let base = format!("/api/{store_id}");
        let billboard_id = self
            .create(
                &format!("{base}/billboards"),
                token,
                json!({ "label": "Inverno", "imageUrl": "https://media.example.com/b.jpg" }),
            )
            .await;
        let category_id = self
            .create(
                &format!("{base}/categories"),
                token,
                json!({ "name": "Casacos", "billboardId": billboard_id }),
            )
            .await;
        let size_id = self
            .create(&format!("{base}/sizes"), token, json!({ "name": "Médio", "value": "M" }))
            .await;
        let color = json!({ "name": "Preto", "value": "#000000" });
        let color_id = self.create(&format!("{base}/colors"), token, color).await;

        Dimensions { billboard_id, category_id, size_id, color_id }
    }
}
