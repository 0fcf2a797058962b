// SPDX-License-Identifier: MIT OR Apache-2.0

//! Strict schema checks over raw catalog entries.
//!
//! Loading is lenient and fills defaults; validation reports every place a
//! source file relies on those defaults or disagrees with the vocabulary.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;
use tracing::debug;

use crate::catalog::normalize::parse_iso_date;
use crate::catalog::{Level, PriceConfidence, RawCatalog, RawEntry, RawRecord, RawValue, Status};
use crate::vocab::{Vocabulary, FREE_PRICE_MARKER};

static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("iso date regex"));

/// Source label for catalog-wide issues.
pub const CATALOG_SOURCE: &str = "catalog";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// File name, with `[n]` appended for records inside a multi-record file.
    pub source: String,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source, self.message)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    /// Records and unparseable files examined.
    pub checked: usize,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }
}

struct Issues<'a> {
    source: &'a str,
    out: &'a mut Vec<ValidationIssue>,
}

impl Issues<'_> {
    fn push(&mut self, message: impl Into<String>) {
        self.out.push(ValidationIssue {
            source: self.source.to_string(),
            message: message.into(),
        });
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn text(value: &Option<RawValue>) -> String {
    value.as_ref().map(RawValue::as_text).unwrap_or_default()
}

fn missing_keys(raw: &RawRecord) -> Vec<&'static str> {
    let present = [
        ("id", raw.id.is_some()),
        ("name", raw.name.is_some()),
        ("provider", raw.provider.is_some()),
        ("cert_code", raw.cert_code.is_some()),
        ("url", raw.url.is_some()),
        ("domain_area", raw.domain_area.is_some()),
        ("sub_areas", raw.sub_areas.is_some()),
        ("tracks", raw.tracks.is_some()),
        ("level", raw.level.is_some()),
        ("status", raw.status.is_some()),
        ("ai_focus", raw.ai_focus.is_some()),
        ("introduced_year", raw.introduced_year.is_some()),
        ("last_updated", raw.last_updated.is_some()),
        ("delivery", raw.delivery.is_some()),
        ("renewal", raw.renewal.is_some()),
        ("language", raw.language.is_some()),
        ("role_groups", raw.role_groups.is_some()),
        ("roles", raw.roles.is_some()),
        ("tags", raw.tags.is_some()),
        ("prerequisites", raw.prerequisites.is_some()),
        ("description", raw.description.is_some()),
        ("summary", raw.summary.is_some()),
        ("price_usd", raw.price_usd.is_some()),
        ("price_label", raw.price_label.is_some()),
        ("price_confidence", raw.price_confidence.is_some()),
        ("tooltip_legacy", raw.tooltip_legacy.is_some()),
    ];
    let mut missing: Vec<&'static str> = present
        .into_iter()
        .filter(|(_, found)| !found)
        .map(|(key, _)| key)
        .collect();
    missing.sort_unstable();
    missing
}

/// Check every entry of a raw catalog.
pub fn validate_catalog(catalog: &RawCatalog, vocab: &Vocabulary) -> ValidationReport {
    let mut report = ValidationReport {
        checked: catalog.entries.len() + catalog.problems.len(),
        issues: Vec::new(),
    };

    if catalog.entries.is_empty() && catalog.problems.is_empty() {
        report.issues.push(ValidationIssue {
            source: CATALOG_SOURCE.to_string(),
            message: "no certification records found".to_string(),
        });
    }

    for (path, message) in &catalog.problems {
        report.issues.push(ValidationIssue {
            source: file_name(path),
            message: format!("could not be parsed: {message}"),
        });
    }

    let mut seen_ids = HashSet::new();
    let mut positions: HashMap<&Path, usize> = HashMap::new();
    for entry in &catalog.entries {
        let position = positions.entry(entry.source.as_path()).or_insert(0);
        let source = if entry.per_record_file {
            file_name(&entry.source)
        } else {
            format!("{}[{}]", file_name(&entry.source), position)
        };
        *position += 1;

        let mut issues = Issues {
            source: &source,
            out: &mut report.issues,
        };
        check_entry(entry, vocab, &mut seen_ids, &mut issues);
    }

    debug!(
        checked = report.checked,
        issues = report.issues.len(),
        "validated catalog"
    );
    report
}

fn check_entry(
    entry: &RawEntry,
    vocab: &Vocabulary,
    seen_ids: &mut HashSet<String>,
    issues: &mut Issues<'_>,
) {
    let raw = &entry.raw;

    let missing = missing_keys(raw);
    if !missing.is_empty() {
        issues.push(format!("missing keys {}", missing.join(", ")));
    }

    let id = text(&raw.id);
    if entry.per_record_file {
        let stem = entry
            .source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        if id != stem {
            issues.push(format!("id '{id}' must match filename '{stem}'"));
        }
    }
    if !seen_ids.insert(id.clone()) {
        issues.push(format!("duplicate id '{id}'"));
    }

    let domain = text(&raw.domain_area);
    if !vocab.is_domain(&domain) {
        issues.push(format!("invalid domain_area '{domain}'"));
    }
    check_sub_areas(raw, &domain, vocab, issues);

    match &raw.role_groups {
        Some(groups) if groups.is_list() && !groups.items().is_empty() => {
            for group in groups.items() {
                if !vocab.is_role_group(&group) {
                    issues.push(format!("invalid role_group '{group}'"));
                }
            }
        }
        _ => issues.push("role_groups must be a non-empty list"),
    }

    let level = text(&raw.level);
    if !Level::try_parse(&level).is_some_and(|l| l.as_str() == level) {
        issues.push(format!("invalid level '{level}'"));
    }
    let status = text(&raw.status);
    if !Status::try_parse(&status).is_some_and(|s| s.as_str() == status) {
        issues.push(format!("invalid status '{status}'"));
    }

    if !matches!(raw.ai_focus, Some(RawValue::Bool(_))) {
        issues.push("ai_focus must be boolean");
    }
    if !matches!(raw.introduced_year, Some(RawValue::Int(_))) {
        issues.push("introduced_year must be integer");
    }
    match raw.price_usd {
        Some(RawValue::Int(price)) if price < 0 => issues.push("price_usd must be >= 0"),
        Some(RawValue::Int(_)) => {}
        _ => issues.push("price_usd must be integer"),
    }

    for (key, value) in [
        ("description", &raw.description),
        ("price_label", &raw.price_label),
        ("summary", &raw.summary),
    ] {
        if text(value).is_empty() {
            issues.push(format!("{key} must not be empty"));
        }
    }

    let confidence = text(&raw.price_confidence);
    if !PriceConfidence::try_parse(&confidence).is_some_and(|c| c.as_str() == confidence) {
        issues.push(format!(
            "price_confidence '{confidence}' must be one of estimated, from-original-tooltip"
        ));
    }

    let url = text(&raw.url);
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        issues.push("url must start with http:// or https://");
    }

    let last_updated = text(&raw.last_updated);
    if !ISO_DATE_RE.is_match(&last_updated) {
        issues.push("last_updated must use YYYY-MM-DD");
    } else if parse_iso_date(&last_updated).is_none() {
        issues.push("last_updated is not a valid calendar date");
    }

    check_tooltip(raw, issues);
    check_price_consistency(raw, vocab, issues);
}

fn check_sub_areas(raw: &RawRecord, domain: &str, vocab: &Vocabulary, issues: &mut Issues<'_>) {
    let sub_areas = match &raw.sub_areas {
        Some(list) if list.is_list() => list.items(),
        _ => {
            issues.push("sub_areas must be a list");
            return;
        }
    };
    for sub_area in &sub_areas {
        if !vocab.is_sub_area(sub_area) {
            issues.push(format!("invalid sub_area '{sub_area}'"));
        }
    }
    let allowed = vocab.sub_areas_for(domain);
    if allowed.is_empty() {
        if !sub_areas.is_empty() {
            issues.push(format!(
                "domain_area '{domain}' does not define sub-areas, so sub_areas must be empty"
            ));
        }
        return;
    }
    for sub_area in &sub_areas {
        if !allowed.contains(sub_area) {
            issues.push(format!(
                "sub_area '{sub_area}' is incompatible with domain_area '{domain}'"
            ));
        }
    }
}

fn check_tooltip(raw: &RawRecord, issues: &mut Issues<'_>) {
    let tooltip = text(&raw.tooltip_legacy).to_lowercase();
    if tooltip.is_empty() {
        issues.push("tooltip_legacy must not be empty");
        return;
    }
    let mentions = [&raw.name, &raw.cert_code, &raw.description]
        .into_iter()
        .map(|v| text(v).to_lowercase())
        .any(|v| !v.is_empty() && tooltip.contains(&v));
    if !mentions {
        issues.push("tooltip_legacy should contain name, cert_code, or description");
    }
}

fn check_price_consistency(raw: &RawRecord, vocab: &Vocabulary, issues: &mut Issues<'_>) {
    let price = raw.price_usd.as_ref().and_then(RawValue::as_int).unwrap_or(0);
    let label = text(&raw.price_label);
    let label_lower = label.to_lowercase();
    let has_digit = label.chars().any(|c| c.is_ascii_digit());
    let says_free = label_lower.contains(FREE_PRICE_MARKER);

    if price == 0
        && (has_digit || label.contains('$'))
        && !vocab.is_unknown_price_label(&label_lower)
        && !says_free
    {
        issues.push(
            "price_usd is 0 but price_label looks numeric; \
             set a numeric price_usd or use an unknown/free label",
        );
    }
    if price > 0 && !has_digit {
        issues.push("price_usd is > 0 but price_label has no numeric hint");
    }
    if says_free && price != 0 {
        issues.push("price_label says free but price_usd is not 0");
    }
}
