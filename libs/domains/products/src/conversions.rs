//! Conversions between wire shapes and the [`Product`] entity.
//!
//! Plain field copies: no validation, no defaulting beyond "absent means
//! empty", no I/O.

use crate::models::{
    CreateProductRequest, Product, ProductEnvelope, ProductResponse, UpdateProductRequest,
};

impl From<CreateProductRequest> for Product {
    fn from(request: CreateProductRequest) -> Self {
        Self {
            product_id: request.product_id,
            name: request.name,
            image_closed_url: request.image_closed,
            image_open_url: request.image_open,
            description: request.description,
            story: request.story,
            sourcing_values: request.sourcing_values,
            ingredients: request.ingredients,
            allergy_info: request.allergy_info,
            dietary_certification: request.dietary_certifications,
        }
    }
}

/// The identity is left empty; the handler sets it from the route.
impl From<UpdateProductRequest> for Product {
    fn from(request: UpdateProductRequest) -> Self {
        Self {
            product_id: String::new(),
            name: request.name.unwrap_or_default(),
            image_closed_url: request.image_closed.unwrap_or_default(),
            image_open_url: request.image_open.unwrap_or_default(),
            description: request.description.unwrap_or_default(),
            story: request.story.unwrap_or_default(),
            sourcing_values: request.sourcing_values,
            ingredients: request.ingredients,
            allergy_info: request.allergy_info.unwrap_or_default(),
            dietary_certification: request.dietary_certifications.unwrap_or_default(),
        }
    }
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            product_id: product.product_id,
            name: product.name,
            image_closed: product.image_closed_url,
            image_open: product.image_open_url,
            description: product.description,
            story: product.story,
            sourcing_values: product.sourcing_values,
            ingredients: product.ingredients,
            allergy_info: product.allergy_info,
            dietary_certifications: product.dietary_certification,
        }
    }
}

impl From<Product> for ProductEnvelope {
    fn from(product: Product) -> Self {
        Self {
            product: product.into(),
        }
    }
}
