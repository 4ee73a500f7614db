use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Product entity as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Product name
    pub name: String,
    /// Product description
    #[serde(default)]
    pub description: String,
    /// Unit price
    pub price: f64,
    /// Category label, matched exactly by the listing filter
    pub category: String,
    /// Average rating (0 when unrated)
    #[serde(default)]
    pub rating: f64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new product
///
/// Fields default when missing so that an incomplete body is rejected by
/// validation (400) rather than by deserialization.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateProduct {
    #[serde(default)]
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub description: String,
    #[validate(required, range(min = 0.0))]
    pub price: Option<f64>,
    #[serde(default)]
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: Option<f64>,
}

/// Raw query parameters of the listing endpoint.
///
/// Every field is kept as an untyped string; [`crate::FilterRequest`] is the
/// validated form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    /// Case-insensitive substring of the product name
    pub name: Option<String>,
    /// Exact category
    pub category: Option<String>,
    /// `"<min>-<max>"` or `"<min>-"`
    pub price_range: Option<String>,
    /// 1-based page number
    pub page: Option<String>,
    /// Page size
    pub limit: Option<String>,
    /// One of `price_asc`, `price_desc`, `name_asc`, `name_desc`, `rating_desc`
    pub sort: Option<String>,
}

/// `{ "data": ... }` wrapper used by the listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

impl Product {
    /// Create a new product from a validated CreateProduct DTO
    pub fn new(input: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            price: input.price.unwrap_or_default(),
            category: input.category,
            rating: input.rating.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> CreateProduct {
        CreateProduct {
            name: "Test Product".to_string(),
            description: "Test Description".to_string(),
            price: Some(99.99),
            category: "Test Category".to_string(),
            rating: None,
        }
    }

    #[test]
    fn test_create_product_valid() {
        assert!(valid_input().validate().is_ok());
    }

    #[test]
    fn test_create_product_empty_body_fails_validation() {
        let input: CreateProduct = serde_json::from_str("{}").unwrap();
        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("price"));
        assert!(fields.contains_key("category"));
    }

    #[test]
    fn test_create_product_negative_price_fails() {
        let input = CreateProduct {
            price: Some(-1.0),
            ..valid_input()
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_product_new_defaults_rating() {
        let product = Product::new(valid_input());
        assert_eq!(product.rating, 0.0);
        assert_eq!(product.price, 99.99);
        assert_eq!(product.created_at, product.updated_at);
    }

    #[test]
    fn test_product_serializes_camel_case_with_mongo_id() {
        let product = Product::new(valid_input());
        let json = serde_json::to_value(&product).unwrap();
        assert!(json.get("_id").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_product_query_reads_price_range_param() {
        let query: ProductQuery =
            serde_json::from_value(serde_json::json!({ "priceRange": "10-20" })).unwrap();
        assert_eq!(query.price_range.as_deref(), Some("10-20"));
    }
}
