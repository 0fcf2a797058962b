// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-key predicate evaluation.
//!
//! Each search key maps to one match function, registered once in
//! [`MATCHERS`]. Keys without an entry fall back to [`match_search_blob`].

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::numeric::NumericExpr;
use super::parser::StructuredPredicate;
use crate::catalog::normalize::is_truthy;
use crate::catalog::Record;

pub type MatchFn = fn(&Record, &StructuredPredicate) -> bool;

static MATCHERS: Lazy<HashMap<&'static str, MatchFn>> = Lazy::new(|| {
    let entries: [(&'static str, MatchFn); 13] = [
        ("provider", match_provider),
        ("domain", match_domain),
        ("code", match_code),
        ("subarea", match_sub_area),
        ("track", match_track),
        ("role", match_role),
        ("rolegroup", match_role_group),
        ("tag", match_tag),
        ("level", match_level),
        ("status", match_status),
        ("ai", match_ai),
        ("year", match_year),
        ("price", match_price),
    ];
    entries.into_iter().collect()
});

/// Keys with dedicated semantics, sorted.
pub fn known_keys() -> Vec<&'static str> {
    let mut keys: Vec<&'static str> = MATCHERS.keys().copied().collect();
    keys.sort_unstable();
    keys
}

/// Match function for a resolved key, or the search-blob default.
pub fn matcher_for(key: &str) -> MatchFn {
    MATCHERS.get(key).copied().unwrap_or(match_search_blob)
}

/// Evaluate one structured predicate against a record.
pub fn matches(record: &Record, predicate: &StructuredPredicate) -> bool {
    matcher_for(&predicate.key)(record, predicate)
}

/// Free terms only ever look at the search blob.
pub fn matches_free_term(record: &Record, term_lower: &str) -> bool {
    record.search_blob.contains(term_lower)
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

fn any_contains_ci(values: &[String], needle_lower: &str) -> bool {
    values.iter().any(|v| contains_ci(v, needle_lower))
}

fn match_provider(record: &Record, p: &StructuredPredicate) -> bool {
    contains_ci(&record.provider, &p.value_lower)
}

fn match_domain(record: &Record, p: &StructuredPredicate) -> bool {
    contains_ci(&record.domain_area, &p.value_lower)
}

fn match_code(record: &Record, p: &StructuredPredicate) -> bool {
    contains_ci(&record.code, &p.value_lower)
}

fn match_sub_area(record: &Record, p: &StructuredPredicate) -> bool {
    any_contains_ci(&record.sub_areas, &p.value_lower)
}

fn match_track(record: &Record, p: &StructuredPredicate) -> bool {
    any_contains_ci(&record.tracks, &p.value_lower)
}

fn match_role(record: &Record, p: &StructuredPredicate) -> bool {
    any_contains_ci(&record.roles, &p.value_lower)
}

fn match_role_group(record: &Record, p: &StructuredPredicate) -> bool {
    any_contains_ci(&record.role_groups, &p.value_lower)
}

fn match_tag(record: &Record, p: &StructuredPredicate) -> bool {
    any_contains_ci(&record.tags, &p.value_lower)
}

fn match_level(record: &Record, p: &StructuredPredicate) -> bool {
    record.level.as_str() == p.value_lower
}

fn match_status(record: &Record, p: &StructuredPredicate) -> bool {
    record.status.as_str() == p.value_lower
}

fn match_ai(record: &Record, p: &StructuredPredicate) -> bool {
    record.ai_focus == is_truthy(&p.value_lower)
}

/// Numeric when the value parses as one. Otherwise the year's digits must
/// start with the value; this key is a prefix match, not a substring match.
fn match_year(record: &Record, p: &StructuredPredicate) -> bool {
    match &p.numeric {
        Some(expr) => expr.matches(f64::from(record.introduced_year)),
        None => record
            .introduced_year
            .to_string()
            .starts_with(p.value_lower.as_str()),
    }
}

fn match_price(record: &Record, p: &StructuredPredicate) -> bool {
    match p.value_lower.as_str() {
        "paid" => return record.is_paid(),
        "free" => return record.is_free(),
        "unknown" => return record.is_unknown_price(),
        "concrete" => return record.has_concrete_price(),
        _ => {}
    }
    if let Some(expr) = &p.numeric {
        return price_in(record, expr);
    }
    contains_ci(&record.price_label, &p.value_lower)
        || record.price_usd.to_string().contains(p.value_lower.as_str())
}

/// Unknown prices never satisfy a numeric comparison.
fn price_in(record: &Record, expr: &NumericExpr) -> bool {
    !record.is_unknown_price() && expr.matches(f64::from(record.price_usd))
}

/// Default for keys without dedicated semantics.
pub fn match_search_blob(record: &Record, p: &StructuredPredicate) -> bool {
    record.search_blob.contains(p.value_lower.as_str())
}
