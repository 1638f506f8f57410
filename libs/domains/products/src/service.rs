use async_trait::async_trait;

use crate::error::ProductResult;
use crate::models::Product;

/// Persistence-backed product operations consumed by the HTTP handlers.
///
/// Implementations own storage, caching and patch-merge semantics, and must
/// be safe to call concurrently.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductService: Send + Sync {
    /// Fetch a product by its identity
    async fn get_product(&self, product_id: &str) -> ProductResult<Product>;

    /// Store a new product; the identity is supplied by the client
    async fn create_product(&self, product: Product) -> ProductResult<()>;

    /// Apply `patch` to an existing product. Empty strings and `None`
    /// sequences in `patch` mean "leave unchanged".
    async fn update_product(&self, product_id: &str, patch: Product) -> ProductResult<()>;

    /// Remove a product
    async fn delete_product(&self, product_id: &str) -> ProductResult<()>;
}
