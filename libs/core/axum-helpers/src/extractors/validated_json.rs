//! JSON body decoding with field-level validation using the validator crate.
//!
//! Decoding and validation are two separate steps with separate failure
//! classes: [`PayloadError::Malformed`] for bodies that are not the expected
//! JSON shape, [`PayloadError::Invalid`] for well-formed bodies that break a
//! field rule. Both answer `400 Bad Request` with the message envelope.

use crate::errors::error_response;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors};

/// Declaration order of a payload's fields, used to pick the violation that
/// gets reported when several fields fail at once.
///
/// Each entry is `(rust_field_name, wire_name)`.
pub trait FieldOrder {
    const FIELDS: &'static [(&'static str, &'static str)];
}

/// Failure to turn a request body into a valid payload.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// The body is not parseable into the target shape.
    #[error("invalid request body: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The body parsed but at least one field violates its rules.
    #[error("{field}: {reason}")]
    Invalid {
        field: String,
        reason: String,
        errors: ValidationErrors,
    },
}

impl PayloadError {
    /// Human-readable message returned to the client.
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, PayloadError::Malformed(_))
    }
}

impl IntoResponse for PayloadError {
    fn into_response(self) -> Response {
        tracing::debug!(malformed = self.is_malformed(), "Rejected request payload: {}", self);
        error_response(StatusCode::BAD_REQUEST, self.message())
    }
}

/// Decode `body` as JSON into `T`, then run `T`'s validation rules.
pub fn decode_and_validate<T>(body: &[u8]) -> Result<T, PayloadError>
where
    T: DeserializeOwned + Validate + FieldOrder,
{
    let payload: T = serde_json::from_slice(body)?;

    payload.validate().map_err(|errors| {
        let (field, reason) = first_violation::<T>(&errors);
        PayloadError::Invalid {
            field,
            reason,
            errors,
        }
    })?;

    Ok(payload)
}

/// Pick the first violated field in declaration order and describe it.
fn first_violation<T: FieldOrder>(errors: &ValidationErrors) -> (String, String) {
    let field_errors = errors.field_errors();

    for (rust_name, wire_name) in T::FIELDS {
        let found = field_errors
            .get(*rust_name)
            .or_else(|| field_errors.get(*wire_name));
        if let Some(first) = found.and_then(|errs| errs.first()) {
            return (wire_name.to_string(), describe(first));
        }
    }

    // Fields missing from FIELDS still produce a stable message.
    field_errors
        .iter()
        .min_by(|a, b| a.0.cmp(b.0))
        .and_then(|(name, errs)| errs.first().map(|e| (name.to_string(), describe(e))))
        .unwrap_or_else(|| ("body".to_string(), "is invalid".to_string()))
}

/// Render a single validation error as a reason phrase.
pub fn describe(error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }

    match error.code.as_ref() {
        "required" => "is required".to_string(),
        "numeric" => "must be numeric".to_string(),
        "ascii" => "must contain only ASCII characters".to_string(),
        "uri" | "url" => "must be a valid URI".to_string(),
        "length" => {
            let min = error.params.get("min").and_then(|v| v.as_u64());
            let max = error.params.get("max").and_then(|v| v.as_u64());
            match (min, max) {
                (Some(min), Some(max)) => {
                    format!("must be between {} and {} characters", min, max)
                }
                (Some(min), None) => format!("must be at least {} characters", min),
                (None, Some(max)) => format!("must be at most {} characters", max),
                (None, None) => "has an invalid length".to_string(),
            }
        }
        other => format!("failed the '{}' rule", other),
    }
}

/// Build a [`ValidationError`] with the given code, for custom field rules.
pub fn rule_violation(code: &'static str) -> ValidationError {
    ValidationError::new(code)
}

/// Build a length [`ValidationError`] carrying the bound that was broken.
pub fn min_length_violation(min: u64) -> ValidationError {
    let mut error = ValidationError::new("length");
    error.add_param(Cow::from("min"), &min);
    error
}

/// JSON extractor with decoding and validation.
///
/// Reads the raw body (no `Content-Type` requirement) and runs
/// [`decode_and_validate`]. Rejections are rendered as `400` with
/// `{"message": "..."}`, so the handler body only ever sees valid payloads.
///
/// # Example
/// ```ignore
/// use axum::routing::post;
/// use axum_helpers::extractors::ValidatedJson;
///
/// async fn create(ValidatedJson(payload): ValidatedJson<CreateThing>) { /* ... */ }
///
/// let app = axum::Router::new().route("/", post(create));
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + FieldOrder,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!("Unreadable request body: {}", rejection.body_text());
            error_response(rejection.status(), rejection.body_text())
        })?;

        decode_and_validate::<T>(&body)
            .map(ValidatedJson)
            .map_err(IntoResponse::into_response)
    }
}
