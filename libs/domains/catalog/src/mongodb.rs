//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    bson::{self, doc, Document},
    options::{FindOptions, IndexOptions},
    Collection, Database, IndexModel,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{CreateProduct, Product};
use crate::predicate::{Condition, QueryPredicate};
use crate::repository::ProductRepository;
use crate::sort::{SortDirection, SortOrder};

/// Default collection name
pub const PRODUCTS_COLLECTION: &str = "products";

/// Stored shape of a product.
///
/// Timestamps are native BSON dates so that `created_at` sorts chronologically.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProductDocument {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    price: f64,
    category: String,
    #[serde(default)]
    rating: f64,
    created_at: bson::DateTime,
    updated_at: bson::DateTime,
}

impl From<&Product> for ProductDocument {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            category: product.category.clone(),
            rating: product.rating,
            created_at: bson::DateTime::from_millis(product.created_at.timestamp_millis()),
            updated_at: bson::DateTime::from_millis(product.updated_at.timestamp_millis()),
        }
    }
}

impl TryFrom<ProductDocument> for Product {
    type Error = CatalogError;

    fn try_from(doc: ProductDocument) -> CatalogResult<Self> {
        let id = Uuid::parse_str(&doc.id)
            .map_err(|e| CatalogError::Storage(format!("invalid product id '{}': {}", doc.id, e)))?;

        Ok(Product {
            id,
            name: doc.name,
            description: doc.description,
            price: doc.price,
            category: doc.category,
            rating: doc.rating,
            created_at: from_bson_date(doc.created_at)?,
            updated_at: from_bson_date(doc.updated_at)?,
        })
    }
}

fn from_bson_date(date: bson::DateTime) -> CatalogResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(date.timestamp_millis())
        .ok_or_else(|| CatalogError::Storage(format!("timestamp out of range: {}", date)))
}

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    collection: Collection<ProductDocument>,
}

impl MongoProductRepository {
    /// Create a new MongoProductRepository
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, PRODUCTS_COLLECTION)
    }

    /// Create a new MongoProductRepository with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<ProductDocument>(collection_name);
        Self { collection }
    }

    /// Initialize indexes for the filterable and sortable fields
    pub async fn init_indexes(&self) -> CatalogResult<()> {
        let index = |keys: Document, name: &str| {
            IndexModel::builder()
                .keys(keys)
                .options(IndexOptions::builder().name(name.to_string()).build())
                .build()
        };

        let indexes = vec![
            // Category listing, newest first
            index(doc! { "category": 1, "created_at": -1 }, "idx_category_created"),
            index(doc! { "price": 1 }, "idx_price"),
            index(doc! { "name": 1 }, "idx_name"),
            index(doc! { "rating": -1 }, "idx_rating"),
            index(doc! { "created_at": -1 }, "idx_created_at"),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    /// Store a fully-formed product as-is
    pub async fn insert(&self, product: &Product) -> CatalogResult<()> {
        self.collection
            .insert_one(ProductDocument::from(product))
            .await?;
        Ok(())
    }

    /// Translate a predicate into a MongoDB filter document.
    ///
    /// The name condition is escaped before it reaches `$regex`, so user text
    /// only ever matches itself.
    fn build_filter(predicate: &QueryPredicate) -> Document {
        let mut filter = doc! {};

        for condition in predicate.conditions() {
            match condition {
                Condition::NameContains(name) => {
                    filter.insert(
                        "name",
                        doc! { "$regex": regex::escape(name), "$options": "i" },
                    );
                }
                Condition::CategoryEquals(category) => {
                    filter.insert("category", category.as_str());
                }
                Condition::PriceBetween { min, max } => {
                    let mut price = doc! { "$gte": *min };
                    if let Some(max) = max {
                        price.insert("$lte", *max);
                    }
                    filter.insert("price", price);
                }
            }
        }

        filter
    }

    /// Sort document with `_id` as a tie-breaker
    fn build_sort(order: SortOrder) -> Document {
        let mut sort = Document::new();
        sort.insert(order.field.as_str(), order.direction.as_i32());
        sort.insert("_id", SortDirection::Ascending.as_i32());
        sort
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self))]
    async fn find(
        &self,
        predicate: &QueryPredicate,
        order: SortOrder,
        skip: u64,
        limit: u64,
    ) -> CatalogResult<Vec<Product>> {
        let limit = i64::try_from(limit)
            .map_err(|_| CatalogError::Storage(format!("limit {} out of range", limit)))?;

        let options = FindOptions::builder()
            .sort(Self::build_sort(order))
            .skip(skip)
            .limit(limit)
            .build();

        let cursor = self
            .collection
            .find(Self::build_filter(predicate))
            .with_options(options)
            .await?;
        let documents: Vec<ProductDocument> = cursor.try_collect().await?;

        documents.into_iter().map(Product::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn count(&self, predicate: &QueryPredicate) -> CatalogResult<u64> {
        let count = self
            .collection
            .count_documents(Self::build_filter(predicate))
            .await?;
        Ok(count)
    }

    #[instrument(skip(self, input), fields(product_name = %input.name))]
    async fn create(&self, input: CreateProduct) -> CatalogResult<Product> {
        let product = Product::new(input);
        self.insert(&product).await?;

        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        let document = self
            .collection
            .find_one(doc! { "_id": id.to_string() })
            .await?;
        document.map(Product::try_from).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{FilterRequest, PriceRange};
    use crate::sort::SortField;

    #[test]
    fn test_build_filter_empty() {
        let doc = MongoProductRepository::build_filter(&QueryPredicate::new());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_build_filter_escapes_name() {
        let mut predicate = QueryPredicate::new();
        predicate.push(Condition::name_contains("a.b(c)*"));
        let doc = MongoProductRepository::build_filter(&predicate);

        let name = doc.get_document("name").unwrap();
        assert_eq!(name.get_str("$regex").unwrap(), r"a\.b\(c\)\*");
        assert_eq!(name.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn test_build_filter_with_category() {
        let mut predicate = QueryPredicate::new();
        predicate.push(Condition::CategoryEquals("Books".to_string()));
        let doc = MongoProductRepository::build_filter(&predicate);
        assert_eq!(doc.get_str("category").unwrap(), "Books");
    }

    #[test]
    fn test_build_filter_with_bounded_price_range() {
        let request = FilterRequest {
            price_range: Some(PriceRange {
                min: 10.0,
                max: Some(20.0),
            }),
            ..Default::default()
        };
        let doc = MongoProductRepository::build_filter(&QueryPredicate::from_filter(&request));

        let price = doc.get_document("price").unwrap();
        assert_eq!(price.get_f64("$gte").unwrap(), 10.0);
        assert_eq!(price.get_f64("$lte").unwrap(), 20.0);
    }

    #[test]
    fn test_build_filter_with_open_price_range_omits_upper_bound() {
        let mut predicate = QueryPredicate::new();
        predicate.push(Condition::PriceBetween {
            min: 10.0,
            max: None,
        });
        let doc = MongoProductRepository::build_filter(&predicate);

        let price = doc.get_document("price").unwrap();
        assert!(price.contains_key("$gte"));
        assert!(!price.contains_key("$lte"));
    }

    #[test]
    fn test_build_sort_keeps_field_first() {
        let sort = MongoProductRepository::build_sort(SortOrder {
            field: SortField::Price,
            direction: SortDirection::Descending,
        });
        let keys: Vec<&String> = sort.keys().collect();
        assert_eq!(keys, ["price", "_id"]);
        assert_eq!(sort.get_i32("price").unwrap(), -1);
    }

    #[test]
    fn test_default_sort_is_created_at_desc() {
        let sort = MongoProductRepository::build_sort(SortOrder::default());
        assert_eq!(sort.get_i32("created_at").unwrap(), -1);
    }

    #[test]
    fn test_document_round_trip_keeps_millisecond_timestamps() {
        let product = Product::new(CreateProduct {
            name: "Lamp".to_string(),
            description: String::new(),
            price: Some(12.5),
            category: "Home".to_string(),
            rating: Some(4.0),
        });
        let restored = Product::try_from(ProductDocument::from(&product)).unwrap();

        assert_eq!(restored.id, product.id);
        assert_eq!(
            restored.created_at.timestamp_millis(),
            product.created_at.timestamp_millis()
        );
    }
}
