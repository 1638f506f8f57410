//! # Axum Helpers
//!
//! Shared plumbing for the Axum services in this workspace.
//!
//! ## Modules
//!
//! - **[`extractors`]**: JSON decoding + field validation (`ValidatedJson`, `decode_and_validate`)
//! - **[`errors`]**: The `{"message": ...}` error envelope and fallback handlers
//! - **[`http`]**: CORS and security-header middleware
//! - **[`server`]**: Router assembly, health endpoints, graceful shutdown
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::default();
//!     let router = create_router::<ApiDoc>(Router::new(), &config)?;
//!     create_production_app(router, &config, async {}).await?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthResponse, OPENAPI_JSON_PATH, ReadyResponse, ShutdownCoordinator, create_production_app,
    create_router, health_router, shutdown_signal,
};

pub use http::{create_cors_layer, security_headers};

pub use errors::{ErrorEnvelope, empty_json_response, error_response};

pub use extractors::{FieldOrder, PayloadError, ValidatedJson, decode_and_validate};
