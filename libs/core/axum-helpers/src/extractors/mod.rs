//! Custom extractors for Axum handlers.

pub mod validated_json;

pub use validated_json::{
    FieldOrder, PayloadError, ValidatedJson, decode_and_validate, min_length_violation,
    rule_violation,
};
