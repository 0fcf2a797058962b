// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filter/sort orchestration.
//!
//! Independent filters, structured predicates and free terms are all ANDed.
//! Survivors are sorted by level (desc), introduced year (desc) and name
//! (asc, case-insensitive). A result cap, when set, applies after sorting.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

use crate::catalog::{Level, Record};
use crate::goals::GoalTag;
use crate::query::{matches, matches_free_term, parse_query, ParsedQuery};
use crate::vocab::Vocabulary;

/// Price-type select values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceType {
    Paid,
    Free,
    Unknown,
    Concrete,
}

impl PriceType {
    pub fn accepts(self, record: &Record) -> bool {
        match self {
            PriceType::Paid => record.is_paid(),
            PriceType::Free => record.is_free(),
            PriceType::Unknown => record.is_unknown_price(),
            PriceType::Concrete => record.has_concrete_price(),
        }
    }
}

/// Filters that sit beside the query box. `None`, empty strings and
/// `false` toggles are inactive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filters {
    pub domain: Option<String>,
    pub level: Option<Level>,
    pub provider: Option<String>,
    pub role_group: Option<String>,
    pub price_type: Option<PriceType>,
    /// Lower bound; also requires a paid record.
    pub min_price: Option<f64>,
    /// Upper bound; also requires a paid record.
    pub max_price: Option<f64>,
    pub ai_only: bool,
    pub priced_only: bool,
    pub goal: Option<GoalTag>,
}

fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl Filters {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// True when the record passes every active filter.
    pub fn accepts(&self, record: &Record) -> bool {
        if let Some(domain) = active(&self.domain) {
            if !record.domain_area.eq_ignore_ascii_case(domain) {
                return false;
            }
        }
        if let Some(level) = self.level {
            if record.level != level {
                return false;
            }
        }
        if let Some(provider) = active(&self.provider) {
            if !record.provider.eq_ignore_ascii_case(provider) {
                return false;
            }
        }
        if let Some(group) = active(&self.role_group) {
            if !record
                .role_groups
                .iter()
                .any(|g| g.eq_ignore_ascii_case(group))
            {
                return false;
            }
        }
        if let Some(price_type) = self.price_type {
            if !price_type.accepts(record) {
                return false;
            }
        }
        // Non-finite bounds are inactive.
        let min_price = self.min_price.filter(|v| v.is_finite());
        let max_price = self.max_price.filter(|v| v.is_finite());
        if min_price.is_some() || max_price.is_some() {
            if !record.is_paid() {
                return false;
            }
            let price = f64::from(record.price_usd);
            if min_price.is_some_and(|min| price < min) {
                return false;
            }
            if max_price.is_some_and(|max| price > max) {
                return false;
            }
        }
        if self.ai_only && !record.ai_focus {
            return false;
        }
        if self.priced_only && !record.is_paid() {
            return false;
        }
        if let Some(goal) = self.goal {
            if !record.goal_categories.contains(&goal) {
                return false;
            }
        }
        true
    }
}

/// True when the record satisfies the filters and every query term.
pub fn record_matches(record: &Record, query: &ParsedQuery, filters: &Filters) -> bool {
    filters.accepts(record)
        && query.structured.iter().all(|p| matches(record, p))
        && query
            .free
            .iter()
            .all(|term| matches_free_term(record, term))
}

/// Level desc, then year desc (unknown `0` last), then name asc ignoring case.
pub fn compare_records(a: &Record, b: &Record) -> Ordering {
    b.level
        .rank()
        .cmp(&a.level.rank())
        .then_with(|| b.introduced_year.cmp(&a.introduced_year))
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
}

/// Stable sort by [`compare_records`].
pub fn sort_records(records: &mut [&Record]) {
    records.sort_by(|a, b| compare_records(a, b));
}

/// Filter with an already parsed query, then sort.
pub fn filter_and_sort_parsed<'a>(
    records: &'a [Record],
    query: &ParsedQuery,
    filters: &Filters,
) -> Vec<&'a Record> {
    let mut matched: Vec<&Record> = records
        .iter()
        .filter(|record| record_matches(record, query, filters))
        .collect();
    sort_records(&mut matched);
    debug!(
        candidates = records.len(),
        matched = matched.len(),
        predicates = query.structured.len(),
        free_terms = query.free.len(),
        "filtered catalog"
    );
    matched
}

/// Parse `query`, filter `records` and sort the survivors.
pub fn filter_and_sort<'a>(
    records: &'a [Record],
    query: &str,
    filters: &Filters,
    vocab: &Vocabulary,
) -> Vec<&'a Record> {
    let parsed = parse_query(query, vocab);
    filter_and_sort_parsed(records, &parsed, filters)
}

/// Full search result with the parsed query for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome<'a> {
    pub query: ParsedQuery,
    /// Matches before the cap was applied.
    pub total: usize,
    pub truncated: bool,
    pub results: Vec<&'a Record>,
}

/// Filter, sort, then keep at most `cap` results.
pub fn search<'a>(
    records: &'a [Record],
    query: &str,
    filters: &Filters,
    vocab: &Vocabulary,
    cap: Option<usize>,
) -> SearchOutcome<'a> {
    let parsed = parse_query(query, vocab);
    let mut results = filter_and_sort_parsed(records, &parsed, filters);
    let total = results.len();
    if let Some(cap) = cap {
        results.truncate(cap);
    }
    SearchOutcome {
        query: parsed,
        total,
        truncated: results.len() < total,
        results,
    }
}
