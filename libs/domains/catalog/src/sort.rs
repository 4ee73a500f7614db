//! Sort token → concrete ordering.

use std::cmp::Ordering;

use crate::filter::SortKey;
use crate::models::Product;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Price,
    Name,
    Rating,
    CreatedAt,
}

impl SortField {
    /// Stored field name
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Price => "price",
            SortField::Name => "name",
            SortField::Rating => "rating",
            SortField::CreatedAt => "created_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// `1` / `-1`, as used by document stores
    pub fn as_i32(&self) -> i32 {
        match self {
            SortDirection::Ascending => 1,
            SortDirection::Descending => -1,
        }
    }
}

/// Exactly one (field, direction) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortOrder {
    /// Newest first
    fn default() -> Self {
        Self {
            field: SortField::CreatedAt,
            direction: SortDirection::Descending,
        }
    }
}

impl From<SortKey> for SortOrder {
    fn from(key: SortKey) -> Self {
        let (field, direction) = match key {
            SortKey::PriceAsc => (SortField::Price, SortDirection::Ascending),
            SortKey::PriceDesc => (SortField::Price, SortDirection::Descending),
            SortKey::NameAsc => (SortField::Name, SortDirection::Ascending),
            SortKey::NameDesc => (SortField::Name, SortDirection::Descending),
            SortKey::RatingDesc => (SortField::Rating, SortDirection::Descending),
        };
        Self { field, direction }
    }
}

impl SortOrder {
    /// Total over its input: `None` resolves to the default order.
    pub fn resolve(key: Option<SortKey>) -> Self {
        key.map(Self::from).unwrap_or_default()
    }

    /// Compare two products under this order. Ties break on id so that
    /// paging through an unchanged collection is deterministic.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let ordering = match self.field {
            SortField::Price => a.price.total_cmp(&b.price),
            SortField::Name => a.name.cmp(&b.name),
            SortField::Rating => a.rating.total_cmp(&b.rating),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        };

        let ordering = match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        };

        ordering.then_with(|| a.id.cmp(&b.id))
    }
}
