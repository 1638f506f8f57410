//! HTTP handlers for Products API

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    routing::{get, post},
    Json, Router,
};
use axum_helpers::{
    empty_json_response, errors::handlers::method_not_allowed, ErrorEnvelope, ValidatedJson,
};
use std::sync::Arc;
use tracing::instrument;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{
    CreateProductRequest, Product, ProductEnvelope, ProductResponse, UpdateProductRequest,
};
use crate::service::ProductService;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(get_product, create_product, update_product, delete_product),
    components(schemas(
        CreateProductRequest,
        UpdateProductRequest,
        ProductResponse,
        ProductEnvelope,
        ErrorEnvelope
    )),
    tags(
        (name = "Products", description = "Product catalogue endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router
///
/// Routes are relative (`/` and `/{product_id}`); the caller decides where
/// to mount them.
pub fn router<S: ProductService + 'static>(service: S) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/",
            post(create_product::<S>).fallback(method_not_allowed),
        )
        .route(
            "/{product_id}",
            get(get_product::<S>)
                .put(update_product::<S>)
                .delete(delete_product::<S>)
                .fallback(method_not_allowed),
        )
        .with_state(shared_service)
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{product_id}",
    tag = "Products",
    params(
        ("product_id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductEnvelope),
        (status = 401, description = "Not authenticated", body = ErrorEnvelope),
        (status = 404, description = "Product not found", body = ErrorEnvelope),
        (status = 500, description = "Internal error", body = ErrorEnvelope)
    )
)]
#[instrument(skip(service))]
async fn get_product<S: ProductService>(
    State(service): State<Arc<S>>,
    Path(product_id): Path<String>,
) -> ProductResult<Json<ProductEnvelope>> {
    let product = service.get_product(&product_id).await?;
    Ok(Json(product.into()))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "/",
    tag = "Products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created"),
        (status = 200, description = "Product already exists", body = ErrorEnvelope),
        (status = 400, description = "Malformed or invalid body", body = ErrorEnvelope),
        (status = 401, description = "Not authenticated", body = ErrorEnvelope),
        (status = 500, description = "Internal error", body = ErrorEnvelope)
    )
)]
#[instrument(skip(service, input), fields(product_id = %input.product_id))]
async fn create_product<S: ProductService>(
    State(service): State<Arc<S>>,
    ValidatedJson(input): ValidatedJson<CreateProductRequest>,
) -> ProductResult<Response> {
    service.create_product(Product::from(input)).await?;
    Ok(empty_json_response(StatusCode::CREATED))
}

/// Update a product
///
/// The route decides the identity; any `productId` in the body is ignored.
#[utoipa::path(
    put,
    path = "/{product_id}",
    tag = "Products",
    params(
        ("product_id" = String, Path, description = "Product ID")
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated"),
        (status = 400, description = "Malformed or invalid body", body = ErrorEnvelope),
        (status = 401, description = "Not authenticated", body = ErrorEnvelope),
        (status = 404, description = "Product not found", body = ErrorEnvelope),
        (status = 500, description = "Internal error", body = ErrorEnvelope)
    )
)]
#[instrument(skip(service, input))]
async fn update_product<S: ProductService>(
    State(service): State<Arc<S>>,
    Path(product_id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateProductRequest>,
) -> ProductResult<Response> {
    let mut patch = Product::from(input);
    patch.product_id = product_id.clone();

    service.update_product(&product_id, patch).await?;
    Ok(empty_json_response(StatusCode::OK))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{product_id}",
    tag = "Products",
    params(
        ("product_id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 401, description = "Not authenticated", body = ErrorEnvelope),
        (status = 404, description = "Product not found", body = ErrorEnvelope),
        (status = 500, description = "Internal error", body = ErrorEnvelope)
    )
)]
#[instrument(skip(service))]
async fn delete_product<S: ProductService>(
    State(service): State<Arc<S>>,
    Path(product_id): Path<String>,
) -> ProductResult<Response> {
    service.delete_product(&product_id).await?;
    Ok(empty_json_response(StatusCode::OK))
}
