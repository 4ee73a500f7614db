//! Store-agnostic filter predicate.

use crate::filter::{FilterRequest, PriceRange};
use crate::models::Product;

/// A single field condition
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Case-insensitive substring of `name`. The text is literal, never a pattern,
    /// and is held lowercased; build it with [`Condition::name_contains`].
    NameContains(String),
    /// Exact `category` match
    CategoryEquals(String),
    /// Inclusive price range, unbounded above when `max` is `None`
    PriceBetween { min: f64, max: Option<f64> },
}

impl Condition {
    pub fn name_contains(text: &str) -> Self {
        Condition::NameContains(text.to_lowercase())
    }

    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Condition::NameContains(needle) => {
                product.name.to_lowercase().contains(needle.as_str())
            }
            Condition::CategoryEquals(category) => product.category == *category,
            Condition::PriceBetween { min, max } => PriceRange {
                min: *min,
                max: *max,
            }
            .contains(product.price),
        }
    }
}

/// Conjunction of conditions. An empty predicate matches every product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryPredicate {
    conditions: Vec<Condition>,
}

impl QueryPredicate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the predicate for a normalized request; absent filters add nothing.
    pub fn from_filter(request: &FilterRequest) -> Self {
        let mut predicate = Self::new();

        if let Some(ref name) = request.name {
            predicate.push(Condition::name_contains(name));
        }

        if let Some(ref category) = request.category {
            predicate.push(Condition::CategoryEquals(category.clone()));
        }

        if let Some(range) = request.price_range {
            predicate.push(Condition::PriceBetween {
                min: range.min,
                max: range.max,
            });
        }

        predicate
    }

    pub fn push(&mut self, condition: Condition) {
        self.conditions.push(condition);
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.conditions.iter().all(|c| c.matches(product))
    }
}
