use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Country label for visitors whose location could not be resolved.
pub const UNKNOWN_COUNTRY: &str = "Unknown";

/// Maximum number of visitors returned by a single listing.
pub const VISITOR_LIST_LIMIT: u64 = 1000;

/// Visitor entity - a recorded site access. Written by an external
/// ingestion path; this system only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visitor {
    pub id: Uuid,
    pub ip: String,
    pub country: Option<String>,
    pub city: Option<String>,
    pub email: Option<String>,
    pub cookies_accepted: bool,
    pub visited_at: DateTime<Utc>,
}

/// Aggregate counts over the whole visitor collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorStats {
    pub total: u64,
    pub with_email: u64,
    pub cookies_accepted: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryCount {
    pub country: String,
    pub count: usize,
}

/// Visitor listing filter.
#[derive(Debug, Clone, Default)]
pub struct VisitorQuery {
    pub country: Option<String>,
}

impl VisitorQuery {
    /// `"all"` and blank values mean no filter.
    pub fn new(country: Option<&str>) -> Self {
        Self {
            country: country
                .map(str::trim)
                .filter(|c| !c.is_empty() && *c != "all")
                .map(String::from),
        }
    }

    pub fn matches(&self, visitor: &Visitor) -> bool {
        self.country
            .as_deref()
            .is_none_or(|c| visitor.country.as_deref() == Some(c))
    }
}

/// Whether a stored country value belongs in the distinct country list.
pub fn is_listable_country(country: Option<&str>) -> bool {
    country.is_some_and(|c| !c.is_empty() && c != UNKNOWN_COUNTRY)
}

/// Count visitors per country over an already fetched page.
///
/// Missing countries are tallied as [`UNKNOWN_COUNTRY`]. Sorted by count,
/// highest first, ties broken alphabetically.
pub fn tally_by_country(visitors: &[Visitor]) -> Vec<CountryCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for visitor in visitors {
        let country = visitor
            .country
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(UNKNOWN_COUNTRY);
        *counts.entry(country).or_default() += 1;
    }

    let mut tally: Vec<CountryCount> = counts
        .into_iter()
        .map(|(country, count)| CountryCount {
            country: country.to_string(),
            count,
        })
        .collect();
    tally.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.country.cmp(&b.country)));
    tally
}
