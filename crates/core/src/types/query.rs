//! Product listing queries and their canonical cache keys.

use serde::{Deserialize, Serialize};

use super::gender::Gender;

/// Page size applied when a query leaves `limit` unset.
pub const DEFAULT_LIMIT: u32 = 9;

/// Offset applied when a query leaves `offset` unset.
pub const DEFAULT_OFFSET: u32 = 0;

/// A product listing request as issued by callers.
///
/// Any field may be omitted; [`ProductQuery::key`] fills in defaults so
/// omitted and explicitly defaulted fields resolve to the same listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    /// `None` lists every gender.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
}

impl ProductQuery {
    /// Query for a 1-based page of `per_page` products.
    ///
    /// Page 0 is treated as the first page.
    #[must_use]
    pub const fn for_page(page: u32, per_page: u32, gender: Option<Gender>) -> Self {
        let index = page.saturating_sub(1);
        Self {
            limit: Some(per_page),
            offset: Some(index.saturating_mul(per_page)),
            gender,
        }
    }

    /// Canonical key with defaults applied.
    #[must_use]
    pub fn key(&self) -> QueryKey {
        QueryKey {
            limit: self.limit.unwrap_or(DEFAULT_LIMIT),
            offset: self.offset.unwrap_or(DEFAULT_OFFSET),
            gender: self.gender,
        }
    }
}

/// Effective listing parameters, used as the list cache key.
///
/// Two queries that resolve to the same `{limit, offset, gender}` produce
/// equal keys; any difference in the tuple produces a different key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey {
    pub limit: u32,
    pub offset: u32,
    pub gender: Option<Gender>,
}

impl QueryKey {
    /// Query-string pairs sent to the listing endpoint.
    ///
    /// An unset gender is sent as an empty value, which the server treats
    /// as "all genders".
    #[must_use]
    pub fn query_pairs(&self) -> [(&'static str, String); 3] {
        [
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
            ("gender", self.gender.map(Gender::as_str).unwrap_or_default().to_string()),
        ]
    }
}

impl From<ProductQuery> for QueryKey {
    fn from(query: ProductQuery) -> Self {
        query.key()
    }
}

impl std::fmt::Display for QueryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}-", self.limit, self.offset)?;
        if let Some(gender) = self.gender {
            write!(f, "{gender}")?;
        }
        Ok(())
    }
}

/// Parse a 1-based page number from a raw query-string value.
///
/// Missing, non-numeric and zero values fall back to page 1.
#[must_use]
pub fn parse_page(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
        .filter(|page| *page > 0)
        .unwrap_or(1)
}
