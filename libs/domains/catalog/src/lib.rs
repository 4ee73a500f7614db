//! Catalog Domain
//!
//! Product catalog backed by MongoDB, exposing a filtered, sorted and paginated
//! product listing.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Normalize → predicate / sort / page → execute
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← find + count (trait, MongoDB and in-memory implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs, raw query parameters
//! └─────────────┘
//! ```
//!
//! The query path is split into small pure pieces:
//!
//! - [`filter`]: raw query strings → [`FilterRequest`] (or a validation error)
//! - [`predicate`]: [`FilterRequest`] → [`QueryPredicate`]
//! - [`sort`]: sort token → [`SortOrder`]
//! - [`pagination`]: page/limit → [`PageSpec`], count → total pages
//! - [`executor`]: count + fetch against a [`ProductRepository`] → [`ResultEnvelope`]
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_catalog::{handlers, MongoProductRepository, ProductService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("catalog");
//!
//! let repository = MongoProductRepository::new(&db);
//! let service = ProductService::new(repository);
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod executor;
pub mod filter;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod mongodb;
pub mod pagination;
pub mod predicate;
pub mod repository;
pub mod service;
pub mod sort;

pub use error::{CatalogError, CatalogResult};
pub use filter::{FilterRequest, PriceRange, SortKey, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
pub use memory::InMemoryProductRepository;
pub use models::{ApiResponse, CreateProduct, Product, ProductQuery};
pub use self::mongodb::MongoProductRepository;
pub use pagination::{total_pages, PageSpec, ResultEnvelope};
pub use predicate::{Condition, QueryPredicate};
pub use repository::ProductRepository;
pub use service::ProductService;
pub use sort::{SortDirection, SortField, SortOrder};
