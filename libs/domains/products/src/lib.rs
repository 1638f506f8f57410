//! Products Domain
//!
//! HTTP request-handling core for the product catalogue: wire models and
//! their field rules, mapping to the [`Product`] entity, the four resource
//! handlers and the translation of service failures into HTTP statuses.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Handlers   │  ← decode + validate, map, call service, write status
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │   Service    │  ← trait; storage, caching and patch merge live behind it
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │    Models    │  ← entity, request/response shapes, conversions
//! └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{handlers, InMemoryProductService};
//!
//! let service = InMemoryProductService::new();
//! let router: axum::Router = handlers::router(service);
//! ```

pub mod conversions;
pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod service;

pub use error::{response_status, ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use memory::InMemoryProductService;
pub use models::{
    CreateProductRequest, Product, ProductEnvelope, ProductResponse, UpdateProductRequest,
};
pub use service::ProductService;
