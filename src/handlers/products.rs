// src/handlers/products.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidateUrl, ValidationError, ValidationErrors};

use crate::{
    common::{
        error::{ApiError, AppError},
        validation::{not_blank, price_problem},
    },
    config::AppState,
    middleware::{
        i18n::Locale,
        tenancy::{ResourceId, StoreContext, StoreIdPath},
    },
    models::product::{NewProduct, ProductDetail, ProductFilter, ProductRow},
};

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ImagePayload {
    #[schema(example = "https://media.example.com/p/123.jpg")]
    pub url: String,
}

// ---
// Payload: criação e edição (PATCH envia o produto completo)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    #[validate(custom(function = "not_blank", message = "validation.name_required"))]
    #[serde(default)]
    pub name: String,

    #[validate(custom(function = "not_blank", message = "validation.description_required"))]
    #[serde(default)]
    pub description: String,

    #[validate(required(message = "validation.price_required"))]
    #[schema(value_type = Option<f64>, example = 49.90)]
    pub price: Option<Decimal>,

    #[validate(required(message = "validation.category_required"))]
    pub category_id: Option<Uuid>,

    #[validate(required(message = "validation.size_required"))]
    pub size_id: Option<Uuid>,

    #[validate(required(message = "validation.color_required"))]
    pub color_id: Option<Uuid>,

    #[validate(length(min = 1, message = "validation.images_required"))]
    #[serde(default)]
    pub images: Vec<ImagePayload>,

    #[serde(default)]
    pub is_featured: bool,

    #[serde(default)]
    pub in_stock: bool,
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

impl ProductPayload {
    // Regras que o derive não expressa: preço cabe em NUMERIC(12,2) e URLs válidas
    fn validate_consistency(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Some(key) = self.price.and_then(price_problem) {
            errors.add("price", invalid("range", key));
        }
        if self.images.iter().any(|image| !image.url.validate_url()) {
            errors.add("images", invalid("url", "validation.image_url_invalid"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn into_new_product(self) -> Result<NewProduct, ValidationErrors> {
        let (Some(price), Some(category_id), Some(size_id), Some(color_id)) =
            (self.price, self.category_id, self.size_id, self.color_id)
        else {
            let mut errors = ValidationErrors::new();
            errors.add("price", invalid("required", "validation.required"));
            return Err(errors);
        };

        Ok(NewProduct {
            category_id,
            size_id,
            color_id,
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price,
            is_featured: self.is_featured,
            in_stock: self.in_stock,
            image_urls: self.images.into_iter().map(|image| image.url).collect(),
        })
    }

    // Derive, regras de consistência e conversão, nessa ordem
    fn into_valid_product(
        self,
        locale: &Locale,
        app_state: &AppState,
    ) -> Result<NewProduct, ApiError> {
        let translate = |e: ValidationErrors| {
            AppError::ValidationError(e).to_api_error(locale, &app_state.i18n_store)
        };

        self.validate().map_err(translate)?;
        self.validate_consistency().map_err(translate)?;
        self.into_new_product().map_err(translate)
    }
}

// POST /api/{store_id}/products
#[utoipa::path(
    post,
    path = "/api/{store_id}/products",
    tag = "Products",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Produto criado com imagens", body = ProductDetail),
        (status = 400, description = "Payload inválido ou referência de outra loja"),
        (status = 403, description = "Loja de outro dono")
    ),
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: StoreContext,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let new_product = payload.into_valid_product(&locale, &app_state)?;

    let product = app_state
        .product_service
        .create_product(ctx.store.id, new_product)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(product)))
}

// GET /api/{store_id}/products/{id} (público)
#[utoipa::path(
    get,
    path = "/api/{store_id}/products/{id}",
    tag = "Products",
    responses(
        (status = 200, description = "Produto com categoria, tamanho e cor", body = ProductDetail),
        (status = 404, description = "Produto não encontrado na loja")
    ),
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja"),
        ("id" = Uuid, Path, description = "ID do Produto")
    )
)]
pub async fn get_product(
    State(app_state): State<AppState>,
    locale: Locale,
    StoreIdPath(store_id): StoreIdPath,
    ResourceId(product_id): ResourceId,
) -> Result<impl IntoResponse, ApiError> {
    let product = app_state
        .product_service
        .get_product(store_id, product_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(product)))
}

// PATCH /api/{store_id}/products/{id}
#[utoipa::path(
    patch,
    path = "/api/{store_id}/products/{id}",
    tag = "Products",
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Produto e imagens substituídos", body = ProductDetail),
        (status = 400, description = "Payload inválido ou referência de outra loja"),
        (status = 404, description = "Produto não encontrado na loja")
    ),
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja"),
        ("id" = Uuid, Path, description = "ID do Produto")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: StoreContext,
    ResourceId(product_id): ResourceId,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let input = payload.into_valid_product(&locale, &app_state)?;

    let product = app_state
        .product_service
        .update_product(ctx.store.id, product_id, input)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(product)))
}

// DELETE /api/{store_id}/products/{id}
#[utoipa::path(
    delete,
    path = "/api/{store_id}/products/{id}",
    tag = "Products",
    responses(
        (status = 204, description = "Produto removido com suas imagens"),
        (status = 404, description = "Produto não encontrado na loja"),
        (status = 409, description = "Produto presente em pedidos")
    ),
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja"),
        ("id" = Uuid, Path, description = "ID do Produto")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: StoreContext,
    ResourceId(product_id): ResourceId,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .product_service
        .delete_product(ctx.store.id, product_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// GET /api/{store_id}/admin/products
#[utoipa::path(
    get,
    path = "/api/{store_id}/admin/products",
    tag = "Products",
    responses(
        (
            status = 200,
            description = "Todos os produtos, em estoque ou não",
            body = Vec<ProductRow>
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
pub async fn list_admin_products(
    State(app_state): State<AppState>,
    locale: Locale,
    ctx: StoreContext,
) -> Result<impl IntoResponse, ApiError> {
    let rows = app_state
        .product_service
        .list_admin(ctx.store.id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(rows)))
}

// ---
// Query: vitrine pública
// ---
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct StorefrontQuery {
    pub category_id: Option<Uuid>,
    pub size_id: Option<Uuid>,
    pub color_id: Option<Uuid>,
    /// Qualquer valor não vazio restringe aos destaques
    pub is_featured: Option<String>,
}

impl From<StorefrontQuery> for ProductFilter {
    fn from(query: StorefrontQuery) -> Self {
        ProductFilter {
            category_id: query.category_id,
            size_id: query.size_id,
            color_id: query.color_id,
            featured_only: query.is_featured.is_some_and(|flag| !flag.is_empty()),
            include_out_of_stock: false,
        }
    }
}

// GET /api/{store_id}/products (público)
#[utoipa::path(
    get,
    path = "/api/{store_id}/products",
    tag = "Products",
    responses(
        (
            status = 200,
            description = "Produtos em estoque, mais recentes primeiro",
            body = Vec<ProductDetail>
        )
    ),
    params(
        ("store_id" = Uuid, Path, description = "ID da Loja"),
        StorefrontQuery
    )
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    locale: Locale,
    StoreIdPath(store_id): StoreIdPath,
    Query(query): Query<StorefrontQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = ProductFilter::from(query);

    let products = app_state
        .product_service
        .list_storefront(store_id, &filter)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(products)))
}
