//! In-memory implementation of ProductRepository
//!
//! Evaluates the same [`QueryPredicate`] and [`SortOrder`] as the MongoDB
//! backend, so it doubles as the reference store in tests.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{CreateProduct, Product};
use crate::predicate::QueryPredicate;
use crate::repository::ProductRepository;
use crate::sort::SortOrder;

#[derive(Debug, Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a fully-formed product, replacing any with the same id
    pub fn insert(&self, product: Product) -> CatalogResult<()> {
        let mut products = self
            .products
            .write()
            .map_err(|e| CatalogError::Storage(format!("lock poisoned: {}", e)))?;
        products.insert(product.id, product);
        Ok(())
    }

    /// Number of stored products, read through a poisoned lock
    pub fn len(&self) -> usize {
        match self.products.read() {
            Ok(products) => products.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find(
        &self,
        predicate: &QueryPredicate,
        order: SortOrder,
        skip: u64,
        limit: u64,
    ) -> CatalogResult<Vec<Product>> {
        let products = self
            .products
            .read()
            .map_err(|e| CatalogError::Storage(format!("lock poisoned: {}", e)))?;

        let mut matching: Vec<&Product> = products
            .values()
            .filter(|p| predicate.matches(p))
            .collect();
        matching.sort_by(|a, b| order.compare(a, b));

        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);

        Ok(matching
            .into_iter()
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count(&self, predicate: &QueryPredicate) -> CatalogResult<u64> {
        let products = self
            .products
            .read()
            .map_err(|e| CatalogError::Storage(format!("lock poisoned: {}", e)))?;

        Ok(products.values().filter(|p| predicate.matches(p)).count() as u64)
    }

    async fn create(&self, input: CreateProduct) -> CatalogResult<Product> {
        let product = Product::new(input);
        self.insert(product.clone())?;
        Ok(product)
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        let products = self
            .products
            .read()
            .map_err(|e| CatalogError::Storage(format!("lock poisoned: {}", e)))?;
        Ok(products.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::Condition;
    use crate::sort::{SortDirection, SortField};

    fn input(name: &str, category: &str, price: f64) -> CreateProduct {
        CreateProduct {
            name: name.to_string(),
            description: String::new(),
            price: Some(price),
            category: category.to_string(),
            rating: None,
        }
    }

    async fn seeded() -> InMemoryProductRepository {
        let repo = InMemoryProductRepository::new();
        for (name, category, price) in [
            ("Desk", "Office", 120.0),
            ("Chair", "Office", 80.0),
            ("Pen", "Office", 2.5),
            ("Kettle", "Kitchen", 30.0),
        ] {
            repo.create(input(name, category, price)).await.unwrap();
        }
        repo
    }

    fn by_price_asc() -> SortOrder {
        SortOrder {
            field: SortField::Price,
            direction: SortDirection::Ascending,
        }
    }

    #[tokio::test]
    async fn test_find_filters_and_sorts() {
        let repo = seeded().await;
        let mut predicate = QueryPredicate::new();
        predicate.push(Condition::CategoryEquals("Office".to_string()));

        let products = repo.find(&predicate, by_price_asc(), 0, 10).await.unwrap();
        let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Pen", "Chair", "Desk"]);
    }

    #[tokio::test]
    async fn test_find_applies_window() {
        let repo = seeded().await;
        let products = repo
            .find(&QueryPredicate::new(), by_price_asc(), 1, 2)
            .await
            .unwrap();
        let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Kettle", "Chair"]);
    }

    #[tokio::test]
    async fn test_find_past_end_is_empty() {
        let repo = seeded().await;
        let products = repo
            .find(&QueryPredicate::new(), SortOrder::default(), 100, 10)
            .await
            .unwrap();
        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn test_count_ignores_window() {
        let repo = seeded().await;
        let mut predicate = QueryPredicate::new();
        predicate.push(Condition::CategoryEquals("Office".to_string()));
        assert_eq!(repo.count(&predicate).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_poisoned_lock_keeps_len_and_fails_queries() {
        let repo = seeded().await;
        let writer = repo.clone();
        let _ = std::thread::spawn(move || {
            let _guard = writer.products.write().unwrap();
            panic!("writer died holding the lock");
        })
        .join();

        assert_eq!(repo.len(), 4);
        assert!(!repo.is_empty());
        let err = repo.count(&QueryPredicate::new()).await.unwrap_err();
        assert!(matches!(err, CatalogError::Storage(_)));
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let repo = InMemoryProductRepository::new();
        let created = repo.create(input("Lamp", "Home", 10.0)).await.unwrap();

        assert_eq!(repo.get_by_id(created.id).await.unwrap(), Some(created));
        assert_eq!(repo.get_by_id(Uuid::now_v7()).await.unwrap(), None);
    }
}
