//! Normalization of raw listing parameters into a typed [`FilterRequest`].
//!
//! `page`, `limit` and `priceRange` are strict: malformed values reject the
//! request before any storage access. `sort` is lenient: an unknown token
//! falls back to the default order.

use std::num::IntErrorKind;
use std::str::FromStr;

use strum::{Display, EnumString};

use crate::error::{CatalogError, CatalogResult};
use crate::models::ProductQuery;

/// Page size used when the client sends no `limit`
pub const DEFAULT_PAGE_LIMIT: u64 = 12;

/// Upper bound for `limit`; larger values are clamped
pub const MAX_PAGE_LIMIT: u64 = 100;

const DEFAULT_PAGE: u64 = 1;

/// Largest offset the store accepts (BSON integers are signed 64-bit)
const MAX_SKIP: u64 = i64::MAX as u64;

/// Recognized sort tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum SortKey {
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
    RatingDesc,
}

/// Inclusive price bounds; `max == None` means unbounded above
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: Option<f64>,
}

impl PriceRange {
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && self.max.is_none_or(|max| price <= max)
    }
}

/// Validated listing request
#[derive(Debug, Clone, PartialEq)]
pub struct FilterRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price_range: Option<PriceRange>,
    /// 1-based
    pub page: u64,
    /// In `1..=MAX_PAGE_LIMIT`
    pub limit: u64,
    /// `None` when absent or unrecognized
    pub sort: Option<SortKey>,
}

impl Default for FilterRequest {
    fn default() -> Self {
        Self {
            name: None,
            category: None,
            price_range: None,
            page: DEFAULT_PAGE,
            limit: DEFAULT_PAGE_LIMIT,
            sort: None,
        }
    }
}

impl FilterRequest {
    /// Normalize raw query parameters.
    pub fn from_query(query: &ProductQuery) -> CatalogResult<Self> {
        let page = parse_page(query.page.as_deref())?;
        let limit = parse_limit(query.limit.as_deref())?;

        if (page - 1).checked_mul(limit).is_none_or(|skip| skip > MAX_SKIP) {
            return Err(CatalogError::validation(
                "page",
                format!("page {} is too large for limit {}", page, limit),
            ));
        }

        let price_range = match non_empty(query.price_range.as_deref()) {
            Some(raw) => Some(parse_price_range(raw)?),
            None => None,
        };

        Ok(Self {
            name: non_empty(query.name.as_deref()).map(str::to_string),
            category: non_empty(query.category.as_deref()).map(str::to_string),
            price_range,
            page,
            limit,
            sort: parse_sort(query.sort.as_deref()),
        })
    }
}

impl TryFrom<&ProductQuery> for FilterRequest {
    type Error = CatalogError;

    fn try_from(query: &ProductQuery) -> CatalogResult<Self> {
        Self::from_query(query)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn parse_page(raw: Option<&str>) -> CatalogResult<u64> {
    let Some(raw) = non_empty(raw.map(str::trim)) else {
        return Ok(DEFAULT_PAGE);
    };

    match raw.parse::<u64>() {
        Ok(0) => Err(CatalogError::validation("page", "must be a positive integer")),
        Ok(page) => Ok(page),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Err(CatalogError::validation(
            "page",
            format!("'{}' is too large", raw),
        )),
        Err(_) => Err(CatalogError::validation(
            "page",
            format!("'{}' is not a positive integer", raw),
        )),
    }
}

fn parse_limit(raw: Option<&str>) -> CatalogResult<u64> {
    let Some(raw) = non_empty(raw.map(str::trim)) else {
        return Ok(DEFAULT_PAGE_LIMIT);
    };

    match raw.parse::<u64>() {
        Ok(0) => Err(CatalogError::validation("limit", "must be a positive integer")),
        Ok(limit) => Ok(limit.min(MAX_PAGE_LIMIT)),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Ok(MAX_PAGE_LIMIT),
        Err(_) => Err(CatalogError::validation(
            "limit",
            format!("'{}' is not a positive integer", raw),
        )),
    }
}

/// Parse `"<min>-<max>"` or `"<min>-"`.
///
/// Each `-`-separated token is stripped of everything except digits and `.`
/// (so `"$10-$20"` reads as 10..=20). A missing or non-numeric upper token
/// leaves the range unbounded above.
fn parse_price_range(raw: &str) -> CatalogResult<PriceRange> {
    let tokens: Vec<&str> = raw.split('-').collect();
    if tokens.len() > 2 {
        return Err(CatalogError::validation(
            "priceRange",
            format!("'{}' must look like '<min>-<max>' or '<min>-'", raw),
        ));
    }

    let min = tokens.first().and_then(|t| parse_bound(t)).ok_or_else(|| {
        CatalogError::validation(
            "priceRange",
            format!("'{}' has no numeric lower bound", raw),
        )
    })?;
    let max = tokens.get(1).and_then(|t| parse_bound(t));

    if let Some(max) = max {
        if min > max {
            return Err(CatalogError::validation(
                "priceRange",
                format!("lower bound {} exceeds upper bound {}", min, max),
            ));
        }
    }

    Ok(PriceRange { min, max })
}

fn parse_bound(token: &str) -> Option<f64> {
    let digits: String = token
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_sort(raw: Option<&str>) -> Option<SortKey> {
    let raw = non_empty(raw)?;
    match SortKey::from_str(raw) {
        Ok(key) => Some(key),
        Err(_) => {
            tracing::debug!(sort = raw, "Unrecognized sort token, using default order");
            None
        }
    }
}
