//! HTTP handlers for the Catalog API

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_helpers::{UuidPath, ValidatedJson};
use std::sync::Arc;

use crate::error::{CatalogError, CatalogResult, ListingError};
use crate::models::{ApiResponse, CreateProduct, Product, ProductQuery};
use crate::pagination::ResultEnvelope;
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// Create the products router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/{id}", get(get_product))
        .with_state(shared_service)
}

/// List products with filtering, sorting and pagination
///
/// Query: `name`, `category`, `priceRange`, `sort`, `page`, `limit`.
/// Any failure answers `400` with the message "Failed to fetch product list",
/// including a query string that does not deserialize (e.g. a repeated key).
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<ResultEnvelope<Product>>>, ListingError> {
    let Query(query) =
        query.map_err(|rejection| CatalogError::validation("query", rejection.body_text()))?;
    let envelope = service.list_products(query).await?;
    Ok(Json(ApiResponse::new(envelope)))
}

/// Create a new product
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> CatalogResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a product by ID
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<Product>> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}
