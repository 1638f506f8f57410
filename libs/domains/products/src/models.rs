use axum_helpers::extractors::{min_length_violation, rule_violation, FieldOrder};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use utoipa::ToSchema;
use validator::{Validate, ValidateUrl, ValidationError};

/// Signed integer or decimal, e.g. `123`, `-7`, `+1.50`
static NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?[0-9]+(?:\.[0-9]+)?$").unwrap());

const PRODUCT_ID_MIN_LENGTH: u64 = 3;

/// Product identity: required, numeric, at least 3 characters
fn validate_product_id(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(rule_violation("required"));
    }
    if !NUMERIC.is_match(value) {
        return Err(rule_violation("numeric"));
    }
    if (value.chars().count() as u64) < PRODUCT_ID_MIN_LENGTH {
        return Err(min_length_violation(PRODUCT_ID_MIN_LENGTH));
    }
    Ok(())
}

fn validate_required(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(rule_violation("required"));
    }
    Ok(())
}

fn validate_ascii(value: &str) -> Result<(), ValidationError> {
    if !value.is_ascii() {
        return Err(rule_violation("ascii"));
    }
    Ok(())
}

fn validate_required_ascii(value: &str) -> Result<(), ValidationError> {
    validate_required(value)?;
    validate_ascii(value)
}

/// Absolute URL, or an absolute path such as `/images/646/open.png`.
/// An empty string counts as "not provided".
fn validate_optional_uri(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.validate_url() || is_absolute_path(value) {
        return Ok(());
    }
    Err(rule_violation("uri"))
}

fn is_absolute_path(value: &str) -> bool {
    value.starts_with('/') && !value.chars().any(char::is_whitespace)
}

/// Product entity as handed to and returned from the service layer.
///
/// Empty strings stand for "not set". The sequence fields keep `None`
/// (absent) apart from `Some(vec![])` (present but empty).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Product {
    pub product_id: String,
    pub name: String,
    pub image_closed_url: String,
    pub image_open_url: String,
    pub description: String,
    pub story: String,
    pub sourcing_values: Option<Vec<String>>,
    pub ingredients: Option<Vec<String>>,
    pub allergy_info: String,
    pub dietary_certification: String,
}

/// Body of `POST /`
///
/// Missing string fields decode as `""` so that absence is reported by
/// validation ("is required"), not as a malformed body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct CreateProductRequest {
    #[serde(rename = "productId")]
    #[validate(custom(function = "validate_product_id"))]
    pub product_id: String,
    #[validate(length(max = 50), custom(function = "validate_required_ascii"))]
    pub name: String,
    #[validate(custom(function = "validate_optional_uri"))]
    pub image_closed: String,
    #[validate(custom(function = "validate_optional_uri"))]
    pub image_open: String,
    #[validate(length(max = 100), custom(function = "validate_required"))]
    pub description: String,
    #[validate(length(max = 300))]
    pub story: String,
    pub sourcing_values: Option<Vec<String>>,
    pub ingredients: Option<Vec<String>>,
    #[validate(length(max = 50), custom(function = "validate_required"))]
    pub allergy_info: String,
    #[validate(length(max = 25), custom(function = "validate_required"))]
    pub dietary_certifications: String,
}

impl FieldOrder for CreateProductRequest {
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("product_id", "productId"),
        ("name", "name"),
        ("image_closed", "image_closed"),
        ("image_open", "image_open"),
        ("description", "description"),
        ("story", "story"),
        ("sourcing_values", "sourcing_values"),
        ("ingredients", "ingredients"),
        ("allergy_info", "allergy_info"),
        ("dietary_certifications", "dietary_certifications"),
    ];
}

/// Body of `PUT /{product_id}`. Every field is optional; a `productId` in
/// the body is ignored because the route decides the identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[validate(length(max = 50), custom(function = "validate_ascii"))]
    pub name: Option<String>,
    #[validate(custom(function = "validate_optional_uri"))]
    pub image_closed: Option<String>,
    #[validate(custom(function = "validate_optional_uri"))]
    pub image_open: Option<String>,
    #[validate(length(max = 100))]
    pub description: Option<String>,
    #[validate(length(max = 300))]
    pub story: Option<String>,
    pub sourcing_values: Option<Vec<String>>,
    pub ingredients: Option<Vec<String>>,
    #[validate(length(max = 50))]
    pub allergy_info: Option<String>,
    #[validate(length(max = 25))]
    pub dietary_certifications: Option<String>,
}

impl FieldOrder for UpdateProductRequest {
    const FIELDS: &'static [(&'static str, &'static str)] = &[
        ("name", "name"),
        ("image_closed", "image_closed"),
        ("image_open", "image_open"),
        ("description", "description"),
        ("story", "story"),
        ("sourcing_values", "sourcing_values"),
        ("ingredients", "ingredients"),
        ("allergy_info", "allergy_info"),
        ("dietary_certifications", "dietary_certifications"),
    ];
}

/// Public projection of a product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    #[serde(rename = "productId")]
    pub product_id: String,
    pub name: String,
    pub image_closed: String,
    pub image_open: String,
    pub description: String,
    pub story: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sourcing_values: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    pub allergy_info: String,
    pub dietary_certifications: String,
}

/// `{"product": {...}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductEnvelope {
    pub product: ProductResponse,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_helpers::extractors::{decode_and_validate, PayloadError};
    use serde_json::json;

    fn valid_create() -> serde_json::Value {
        json!({
            "productId": "646",
            "name": "Vanilla Toffee Bar Crunch",
            "image_closed": "https://example.com/646/closed.png",
            "image_open": "https://example.com/646/open.png",
            "description": "Vanilla Ice Cream with Fudge Covered Toffee Pieces",
            "story": "Vanilla What Bar Crunch? We gave this flavor a new name.",
            "sourcing_values": ["Non-GMO", "Cage-Free Eggs"],
            "ingredients": ["cream", "skim milk"],
            "allergy_info": "may contain wheat, peanuts and other tree nuts",
            "dietary_certifications": "Kosher"
        })
    }

    fn create_with(field: &str, value: serde_json::Value) -> Vec<u8> {
        let mut body = valid_create();
        body[field] = value;
        serde_json::to_vec(&body).unwrap()
    }

    fn create_without(field: &str) -> Vec<u8> {
        let mut body = valid_create();
        body.as_object_mut().unwrap().remove(field);
        serde_json::to_vec(&body).unwrap()
    }

    fn invalid_message<T>(body: &[u8]) -> String
    where
        T: serde::de::DeserializeOwned + Validate + FieldOrder + std::fmt::Debug,
    {
        match decode_and_validate::<T>(body) {
            Err(err @ PayloadError::Invalid { .. }) => err.message(),
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_create_request_passes() {
        let body = serde_json::to_vec(&valid_create()).unwrap();
        let request: CreateProductRequest = decode_and_validate(&body).unwrap();
        assert_eq!(request.product_id, "646");
        assert_eq!(request.dietary_certifications, "Kosher");
        assert_eq!(request.ingredients.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_missing_or_empty_name_is_required() {
        assert_eq!(
            invalid_message::<CreateProductRequest>(&create_without("name")),
            "name: is required"
        );
        assert_eq!(
            invalid_message::<CreateProductRequest>(&create_with("name", json!(""))),
            "name: is required"
        );
    }

    #[test]
    fn test_product_id_rules() {
        assert_eq!(
            invalid_message::<CreateProductRequest>(&create_without("productId")),
            "productId: is required"
        );
        assert_eq!(
            invalid_message::<CreateProductRequest>(&create_with("productId", json!("64a"))),
            "productId: must be numeric"
        );
        assert_eq!(
            invalid_message::<CreateProductRequest>(&create_with("productId", json!("64"))),
            "productId: must be at least 3 characters"
        );
    }

    #[test]
    fn test_name_must_be_ascii_and_short() {
        assert_eq!(
            invalid_message::<CreateProductRequest>(&create_with("name", json!("Crème Brûlée"))),
            "name: must contain only ASCII characters"
        );
        assert_eq!(
            invalid_message::<CreateProductRequest>(&create_with("name", json!("x".repeat(51)))),
            "name: must be at most 50 characters"
        );
    }

    #[test]
    fn test_length_limits() {
        let cases = [
            ("description", 101, "description: must be at most 100 characters"),
            ("story", 301, "story: must be at most 300 characters"),
            ("allergy_info", 51, "allergy_info: must be at most 50 characters"),
            (
                "dietary_certifications",
                26,
                "dietary_certifications: must be at most 25 characters",
            ),
        ];
        for (field, len, expected) in cases {
            let body = create_with(field, json!("a".repeat(len)));
            assert_eq!(invalid_message::<CreateProductRequest>(&body), expected);
        }
    }

    #[test]
    fn test_optional_fields_may_be_absent() {
        let mut body = valid_create();
        let object = body.as_object_mut().unwrap();
        for field in ["image_closed", "image_open", "story", "sourcing_values", "ingredients"] {
            object.remove(field);
        }
        let request: CreateProductRequest =
            decode_and_validate(&serde_json::to_vec(&body).unwrap()).unwrap();
        assert!(request.image_closed.is_empty());
        assert!(request.sourcing_values.is_none());
    }

    #[test]
    fn test_image_must_be_uri_when_present() {
        assert_eq!(
            invalid_message::<CreateProductRequest>(&create_with("image_open", json!("not a uri"))),
            "image_open: must be a valid URI"
        );
        let body = create_with("image_open", json!(""));
        assert!(decode_and_validate::<CreateProductRequest>(&body).is_ok());
    }

    #[test]
    fn test_image_accepts_absolute_url_or_absolute_path() {
        for image in [
            "https://cdn.example.com/646/open.png",
            "/images/646/open.png",
        ] {
            let body = create_with("image_open", json!(image));
            assert!(
                decode_and_validate::<CreateProductRequest>(&body).is_ok(),
                "{}",
                image
            );

            let body = serde_json::to_vec(&json!({ "image_closed": image })).unwrap();
            assert!(
                decode_and_validate::<UpdateProductRequest>(&body).is_ok(),
                "{}",
                image
            );
        }
    }

    #[test]
    fn test_image_rejects_relative_or_spaced_paths() {
        for image in ["images/646/open.png", "/images/646/open png.png"] {
            assert_eq!(
                invalid_message::<CreateProductRequest>(&create_with("image_open", json!(image))),
                "image_open: must be a valid URI"
            );
        }
    }

    #[test]
    fn test_sequences_distinguish_null_from_empty() {
        let body = create_with("sourcing_values", json!([]));
        let request: CreateProductRequest = decode_and_validate(&body).unwrap();
        assert_eq!(request.sourcing_values, Some(vec![]));

        let body = create_with("sourcing_values", json!(null));
        let request: CreateProductRequest = decode_and_validate(&body).unwrap();
        assert_eq!(request.sourcing_values, None);
    }

    #[test]
    fn test_first_declared_violation_wins() {
        let body = serde_json::to_vec(&json!({ "name": "Ã" })).unwrap();
        assert_eq!(
            invalid_message::<CreateProductRequest>(&body),
            "productId: is required"
        );
    }

    #[test]
    fn test_malformed_create_body() {
        let err = decode_and_validate::<CreateProductRequest>(b"{\"name\": ").unwrap_err();
        assert!(err.is_malformed());

        let err = decode_and_validate::<CreateProductRequest>(br#"{"ingredients": "milk"}"#)
            .unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_update_request_accepts_empty_body() {
        let request: UpdateProductRequest = decode_and_validate(b"{}").unwrap();
        assert!(request.name.is_none());
        assert!(request.ingredients.is_none());
    }

    #[test]
    fn test_update_request_rules_apply_to_present_fields() {
        assert_eq!(
            invalid_message::<UpdateProductRequest>(r#"{"name": "Café"}"#.as_bytes()),
            "name: must contain only ASCII characters"
        );
        assert_eq!(
            invalid_message::<UpdateProductRequest>(br#"{"image_closed": "::"}"#),
            "image_closed: must be a valid URI"
        );
        let long = serde_json::to_vec(&json!({ "dietary_certifications": "k".repeat(26) })).unwrap();
        assert_eq!(
            invalid_message::<UpdateProductRequest>(&long),
            "dietary_certifications: must be at most 25 characters"
        );
    }

    #[test]
    fn test_update_request_ignores_body_product_id() {
        let request: UpdateProductRequest =
            decode_and_validate(br#"{"productId": "999", "name": "X"}"#).unwrap();
        assert_eq!(request.name.as_deref(), Some("X"));
    }

    #[test]
    fn test_response_omits_absent_sequences_only() {
        let mut response = ProductResponse {
            product_id: "646".to_string(),
            name: "Vanilla".to_string(),
            image_closed: String::new(),
            image_open: String::new(),
            description: "d".to_string(),
            story: String::new(),
            sourcing_values: None,
            ingredients: Some(vec![]),
            allergy_info: "none".to_string(),
            dietary_certifications: "Kosher".to_string(),
        };

        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("sourcing_values").is_none());
        assert_eq!(value["ingredients"], json!([]));
        assert_eq!(value["productId"], "646");

        response.sourcing_values = Some(vec![]);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["sourcing_values"], json!([]));
    }
}
