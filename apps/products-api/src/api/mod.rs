//! API routes module

pub mod products;

use axum::Router;

/// Create all API routes, relative to `/api`
pub fn routes() -> Router {
    Router::new().nest("/products", products::router())
}
