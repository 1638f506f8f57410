//! In-process [`ProductService`] backed by a `HashMap`.
//!
//! Used by the API binary when no external store is wired in, and by the
//! router tests.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::Product;
use crate::service::ProductService;

#[derive(Debug, Default)]
pub struct InMemoryProductService {
    products: RwLock<HashMap<String, Product>>,
}

impl InMemoryProductService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing products
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let products = products
            .into_iter()
            .map(|p| (p.product_id.clone(), p))
            .collect();
        Self {
            products: RwLock::new(products),
        }
    }

    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }
}

/// Overwrite the fields `patch` carries; empty strings and `None` keep the stored value.
fn merge_patch(stored: &mut Product, patch: Product) {
    fn set(target: &mut String, value: String) {
        if !value.is_empty() {
            *target = value;
        }
    }

    set(&mut stored.name, patch.name);
    set(&mut stored.image_closed_url, patch.image_closed_url);
    set(&mut stored.image_open_url, patch.image_open_url);
    set(&mut stored.description, patch.description);
    set(&mut stored.story, patch.story);
    set(&mut stored.allergy_info, patch.allergy_info);
    set(&mut stored.dietary_certification, patch.dietary_certification);
    if patch.sourcing_values.is_some() {
        stored.sourcing_values = patch.sourcing_values;
    }
    if patch.ingredients.is_some() {
        stored.ingredients = patch.ingredients;
    }
}

#[async_trait]
impl ProductService for InMemoryProductService {
    #[instrument(skip(self))]
    async fn get_product(&self, product_id: &str) -> ProductResult<Product> {
        self.products
            .read()
            .await
            .get(product_id)
            .cloned()
            .ok_or_else(|| ProductError::NotFound(product_id.to_string()))
    }

    #[instrument(skip(self, product), fields(product_id = %product.product_id))]
    async fn create_product(&self, product: Product) -> ProductResult<()> {
        if product.product_id.is_empty() {
            return Err(ProductError::BadParamInput(
                "product id must not be empty".to_string(),
            ));
        }

        let mut products = self.products.write().await;
        if products.contains_key(&product.product_id) {
            return Err(ProductError::Conflict(format!(
                "product {} already exists",
                product.product_id
            )));
        }
        products.insert(product.product_id.clone(), product);
        Ok(())
    }

    #[instrument(skip(self, patch))]
    async fn update_product(&self, product_id: &str, patch: Product) -> ProductResult<()> {
        let mut products = self.products.write().await;
        let stored = products
            .get_mut(product_id)
            .ok_or_else(|| ProductError::NotFound(product_id.to_string()))?;
        merge_patch(stored, patch);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_product(&self, product_id: &str) -> ProductResult<()> {
        self.products
            .write()
            .await
            .remove(product_id)
            .map(|_| ())
            .ok_or_else(|| ProductError::NotFound(product_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str) -> Product {
        Product {
            product_id: id.to_string(),
            name: "Chunky Monkey".to_string(),
            description: "Banana Ice Cream with Fudge Chunks & Walnuts".to_string(),
            story: "Original story".to_string(),
            sourcing_values: Some(vec!["Fairtrade".to_string()]),
            ingredients: None,
            allergy_info: "contains walnuts".to_string(),
            dietary_certification: "Kosher".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let service = InMemoryProductService::new();
        service.create_product(product("123")).await.unwrap();

        let stored = service.get_product("123").await.unwrap();
        assert_eq!(stored, product("123"));
        assert_eq!(service.len().await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_create_is_conflict() {
        let service = InMemoryProductService::with_products([product("123")]);

        let err = service.create_product(product("123")).await.unwrap_err();
        assert!(matches!(err, ProductError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_create_without_id_is_bad_param() {
        let service = InMemoryProductService::new();

        let err = service.create_product(product("")).await.unwrap_err();
        assert!(matches!(err, ProductError::BadParamInput(_)));
        assert!(service.is_empty().await);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let service = InMemoryProductService::new();

        let err = service.get_product("404").await.unwrap_err();
        assert_eq!(err, ProductError::NotFound("404".to_string()));
    }

    #[tokio::test]
    async fn test_update_merges_only_present_fields() {
        let service = InMemoryProductService::with_products([product("123")]);
        let patch = Product {
            name: "X".to_string(),
            ingredients: Some(vec![]),
            ..Default::default()
        };

        service.update_product("123", patch).await.unwrap();

        let stored = service.get_product("123").await.unwrap();
        assert_eq!(stored.name, "X");
        assert_eq!(stored.story, "Original story");
        assert_eq!(stored.sourcing_values, Some(vec!["Fairtrade".to_string()]));
        assert_eq!(stored.ingredients, Some(vec![]));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let service = InMemoryProductService::new();

        let err = service
            .update_product("123", Product::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_second_delete_is_not_found() {
        let service = InMemoryProductService::with_products([product("123")]);

        assert!(service.delete_product("123").await.is_ok());
        let err = service.delete_product("123").await.unwrap_err();
        assert!(matches!(err, ProductError::NotFound(_)));
    }
}
