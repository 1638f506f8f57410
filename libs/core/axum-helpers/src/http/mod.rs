//! HTTP middleware module.
//!
//! - CORS configuration from a comma-separated origin list
//! - Security response headers

pub mod cors;
pub mod security;

pub use cors::{create_cors_layer, parse_allowed_origins};
pub use security::security_headers;
