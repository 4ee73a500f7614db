//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{CatalogError, CatalogResult};
use crate::executor;
use crate::filter::FilterRequest;
use crate::models::{CreateProduct, Product, ProductQuery};
use crate::pagination::{PageSpec, ResultEnvelope};
use crate::predicate::QueryPredicate;
use crate::repository::ProductRepository;
use crate::sort::SortOrder;

/// Product service providing catalog operations
///
/// The listing path runs normalize → predicate / sort / page → execute. Every
/// step before `execute` is pure, so a malformed request never reaches the
/// repository.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List products matching the raw query parameters
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        query: ProductQuery,
    ) -> CatalogResult<ResultEnvelope<Product>> {
        let request = FilterRequest::from_query(&query)?;

        let predicate = QueryPredicate::from_filter(&request);
        let order = SortOrder::resolve(request.sort);
        let page = PageSpec::new(request.page, request.limit);

        executor::execute(self.repository.as_ref(), &predicate, order, page).await
    }

    /// Create a new product
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> CatalogResult<Product> {
        input
            .validate()
            .map_err(|e| CatalogError::InvalidInput(e.to_string()))?;

        self.repository.create(input).await
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> CatalogResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound(id))
    }
}
