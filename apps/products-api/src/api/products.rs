//! Products API routes

use axum::Router;
use domain_products::{handlers, InMemoryProductService};

/// Create products router
///
/// Backed by the in-process store; products live as long as the process.
pub fn router() -> Router {
    handlers::router(InMemoryProductService::new())
}
