//! Count + bounded fetch against a [`ProductRepository`].

use tracing::instrument;

use crate::error::CatalogResult;
use crate::models::Product;
use crate::pagination::{PageSpec, ResultEnvelope};
use crate::predicate::QueryPredicate;
use crate::repository::ProductRepository;
use crate::sort::SortOrder;

/// Run one listing query and assemble the envelope.
///
/// The count and the fetch are two independent reads issued concurrently.
/// They are not snapshot-consistent: a write landing between them can make
/// `total` disagree with the returned page by that write. Either failure
/// fails the whole request; partial envelopes are never returned.
#[instrument(skip(repository, predicate), fields(skip = page.skip, limit = page.limit))]
pub async fn execute<R>(
    repository: &R,
    predicate: &QueryPredicate,
    order: SortOrder,
    page: PageSpec,
) -> CatalogResult<ResultEnvelope<Product>>
where
    R: ProductRepository + ?Sized,
{
    let (products, total) = tokio::try_join!(
        repository.find(predicate, order, page.skip, page.limit),
        repository.count(predicate),
    )?;

    tracing::debug!(
        returned = products.len(),
        total,
        "Product listing query completed"
    );

    Ok(ResultEnvelope::new(products, total, page))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use crate::models::CreateProduct;
    use crate::repository::MockProductRepository;

    fn product(name: &str) -> Product {
        Product::new(CreateProduct {
            name: name.to_string(),
            description: String::new(),
            price: Some(1.0),
            category: "c".to_string(),
            rating: None,
        })
    }

    #[tokio::test]
    async fn test_execute_passes_window_to_repository() {
        let mut repo = MockProductRepository::new();
        repo.expect_find()
            .withf(|_, order, skip, limit| {
                *order == SortOrder::default() && *skip == 20 && *limit == 10
            })
            .times(1)
            .returning(|_, _, _, _| Ok(vec![product("a")]));
        repo.expect_count().times(1).returning(|_| Ok(21));

        let envelope = execute(
            &repo,
            &QueryPredicate::new(),
            SortOrder::default(),
            PageSpec::new(3, 10),
        )
        .await
        .unwrap();

        assert_eq!(envelope.products.len(), 1);
        assert_eq!(envelope.total, 21);
        assert_eq!(envelope.current_page, 3);
        assert_eq!(envelope.total_pages, 3);
        assert_eq!(envelope.limit, 10);
    }

    #[tokio::test]
    async fn test_execute_fails_when_count_fails() {
        let mut repo = MockProductRepository::new();
        repo.expect_find().returning(|_, _, _, _| Ok(vec![]));
        repo.expect_count()
            .returning(|_| Err(CatalogError::Storage("count timed out".into())));

        let result = execute(
            &repo,
            &QueryPredicate::new(),
            SortOrder::default(),
            PageSpec::new(1, 12),
        )
        .await;

        assert!(matches!(result, Err(CatalogError::Storage(_))));
    }

    #[tokio::test]
    async fn test_execute_fails_when_fetch_fails() {
        let mut repo = MockProductRepository::new();
        repo.expect_find()
            .returning(|_, _, _, _| Err(CatalogError::Storage("connection reset".into())));
        repo.expect_count().returning(|_| Ok(5));

        let result = execute(
            &repo,
            &QueryPredicate::new(),
            SortOrder::default(),
            PageSpec::new(1, 12),
        )
        .await;

        assert!(matches!(result, Err(CatalogError::Storage(_))));
    }
}
