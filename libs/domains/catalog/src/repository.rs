use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CatalogResult;
use crate::models::{CreateProduct, Product};
use crate::predicate::QueryPredicate;
use crate::sort::SortOrder;

/// Repository trait for Product persistence
///
/// `find` and `count` are the read contract the listing path relies on; both
/// are read-only and report every backend fault as `CatalogError::Storage`.
/// Implementations enforce their own timeouts; callers never retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Fetch matching products in `order`, skipping `skip` and returning at most `limit`
    async fn find(
        &self,
        predicate: &QueryPredicate,
        order: SortOrder,
        skip: u64,
        limit: u64,
    ) -> CatalogResult<Vec<Product>>;

    /// Count all products matching `predicate`, ignoring pagination
    async fn count(&self, predicate: &QueryPredicate) -> CatalogResult<u64>;

    /// Create a new product
    async fn create(&self, input: CreateProduct) -> CatalogResult<Product>;

    /// Get a product by ID
    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>>;
}
