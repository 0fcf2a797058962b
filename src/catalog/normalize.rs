// SPDX-License-Identifier: MIT OR Apache-2.0

//! Raw catalog input and its normalization into [`Record`]s.
//!
//! Raw documents are loose: every key is optional, list fields accept a bare
//! scalar, and numbers may arrive as strings. Normalization applies defaults,
//! coerces values, and computes the search blob and goal tags once.

use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeSet;

use super::record::{Level, PriceConfidence, Record, Status};
use crate::goals;
use crate::vocab::Vocabulary;

/// Domain assigned when the input names none or an unknown one.
pub const FALLBACK_DOMAIN: &str = "Security Operations";
pub const DEFAULT_PRICE_LABEL: &str = "Price not listed";
pub const DEFAULT_PROVIDER: &str = "Unknown";
pub const DEFAULT_DELIVERY: &str = "exam";
pub const DEFAULT_RENEWAL: &str = "See provider policy";
pub const DEFAULT_LANGUAGE: &str = "en";

/// A scalar as it appears in YAML or JSON input.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawValue {
    pub fn as_text(&self) -> String {
        match self {
            RawValue::Bool(b) => b.to_string(),
            RawValue::Int(n) => n.to_string(),
            RawValue::Float(n) => n.to_string(),
            RawValue::Text(s) => s.trim().to_string(),
        }
    }

    /// Whole number value, accepting numeric strings.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            RawValue::Int(n) => Some(*n),
            RawValue::Float(n) if n.is_finite() => Some(n.trunc() as i64),
            RawValue::Text(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().filter(|n| n.is_finite()).map(|n| n.trunc() as i64))
            }
            _ => None,
        }
    }

    pub fn as_flag(&self) -> bool {
        match self {
            RawValue::Bool(b) => *b,
            RawValue::Int(n) => *n == 1,
            RawValue::Float(_) => false,
            RawValue::Text(s) => is_truthy(&s.to_lowercase()),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<u32> for RawValue {
    fn from(value: u32) -> Self {
        RawValue::Int(i64::from(value))
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Int(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Bool(value)
    }
}

/// A list field, or a single scalar standing in for a one-element list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawList {
    Many(Vec<RawValue>),
    One(RawValue),
}

impl RawList {
    /// Trimmed, non-empty entries in input order.
    pub fn items(&self) -> Vec<String> {
        let values: &[RawValue] = match self {
            RawList::Many(values) => values,
            RawList::One(value) => std::slice::from_ref(value),
        };
        values
            .iter()
            .map(RawValue::as_text)
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn is_list(&self) -> bool {
        matches!(self, RawList::Many(_))
    }
}

impl From<Vec<&str>> for RawList {
    fn from(values: Vec<&str>) -> Self {
        RawList::Many(values.into_iter().map(RawValue::from).collect())
    }
}

/// One catalog entry before normalization (schema v2 keys).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawRecord {
    pub id: Option<RawValue>,
    pub name: Option<RawValue>,
    pub provider: Option<RawValue>,
    pub cert_code: Option<RawValue>,
    pub url: Option<RawValue>,
    pub domain_area: Option<RawValue>,
    pub sub_areas: Option<RawList>,
    pub tracks: Option<RawList>,
    pub level: Option<RawValue>,
    pub status: Option<RawValue>,
    pub ai_focus: Option<RawValue>,
    pub introduced_year: Option<RawValue>,
    pub last_updated: Option<RawValue>,
    pub delivery: Option<RawValue>,
    pub renewal: Option<RawValue>,
    pub language: Option<RawValue>,
    pub role_groups: Option<RawList>,
    pub roles: Option<RawList>,
    pub tags: Option<RawList>,
    pub prerequisites: Option<RawList>,
    pub description: Option<RawValue>,
    pub summary: Option<RawValue>,
    pub price_usd: Option<RawValue>,
    pub price_label: Option<RawValue>,
    pub price_confidence: Option<RawValue>,
    pub tooltip_legacy: Option<RawValue>,
}

fn text(value: &Option<RawValue>) -> String {
    value.as_ref().map(RawValue::as_text).unwrap_or_default()
}

fn list(value: &Option<RawList>) -> Vec<String> {
    value.as_ref().map(RawList::items).unwrap_or_default()
}

fn or_default(value: String, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}

/// Map a value onto its canonical vocabulary spelling, ignoring case.
fn canonical(value: String, known: &[String]) -> String {
    known
        .iter()
        .find(|k| k.eq_ignore_ascii_case(&value))
        .cloned()
        .unwrap_or(value)
}

/// `true`, `1` and `yes` are truthy; everything else is false.
pub fn is_truthy(value_lower: &str) -> bool {
    matches!(value_lower.trim(), "true" | "1" | "yes")
}

/// Lowercase slug with runs of non-alphanumerics collapsed to `-`.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    for c in value.trim().to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "cert".to_string()
    } else {
        slug.to_string()
    }
}

pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

impl RawRecord {
    /// Build the immutable [`Record`] for this entry.
    pub fn normalize(&self, vocab: &Vocabulary) -> Record {
        let code = text(&self.cert_code);
        let mut name = text(&self.name);
        if name.is_empty() {
            name = if code.is_empty() { text(&self.id) } else { code.clone() };
        }
        let id = or_default(text(&self.id), &slugify(&name));
        let code = or_default(code, &name);

        let domain_area = canonical(text(&self.domain_area), vocab.domains());
        let domain_area = if vocab.is_domain(&domain_area) {
            domain_area
        } else {
            FALLBACK_DOMAIN.to_string()
        };

        let sub_areas = list(&self.sub_areas)
            .into_iter()
            .map(|s| canonical(s, vocab.sub_areas()))
            .collect();
        let role_groups = list(&self.role_groups)
            .into_iter()
            .map(|g| canonical(g, vocab.role_groups()))
            .collect();

        let introduced_year = self
            .introduced_year
            .as_ref()
            .and_then(RawValue::as_int)
            .and_then(|y| u16::try_from(y).ok())
            .unwrap_or(0);
        let price_usd = self
            .price_usd
            .as_ref()
            .and_then(RawValue::as_int)
            .and_then(|p| u32::try_from(p).ok())
            .unwrap_or(0);

        let mut description = text(&self.description);
        let mut summary = text(&self.summary);
        if description.is_empty() {
            description = summary.clone();
        }
        if summary.is_empty() {
            summary = description.clone();
        }

        let mut record = Record {
            id,
            name,
            provider: or_default(text(&self.provider), DEFAULT_PROVIDER),
            code,
            url: text(&self.url),
            domain_area,
            level: Level::parse(&text(&self.level)),
            status: Status::try_parse(&text(&self.status)).unwrap_or_default(),
            delivery: or_default(text(&self.delivery), DEFAULT_DELIVERY),
            renewal_policy: or_default(text(&self.renewal), DEFAULT_RENEWAL),
            language: or_default(text(&self.language), DEFAULT_LANGUAGE),
            introduced_year,
            last_updated: parse_iso_date(&text(&self.last_updated)),
            description,
            summary,
            sub_areas,
            tracks: list(&self.tracks),
            role_groups,
            roles: list(&self.roles),
            tags: list(&self.tags),
            prerequisites: list(&self.prerequisites),
            ai_focus: self.ai_focus.as_ref().is_some_and(RawValue::as_flag),
            price_usd,
            price_label: or_default(text(&self.price_label), DEFAULT_PRICE_LABEL),
            price_confidence: PriceConfidence::try_parse(&text(&self.price_confidence))
                .unwrap_or_default(),
            search_blob: String::new(),
            goal_categories: BTreeSet::new(),
        };
        record.search_blob = search_blob(&record);
        record.goal_categories = goals::classify(&record, vocab);
        record
    }
}

/// Lower-cased concatenation of every text-bearing field.
fn search_blob(record: &Record) -> String {
    let year = record.introduced_year.to_string();
    let price = record.price_usd.to_string();
    let scalars = [
        record.name.as_str(),
        record.provider.as_str(),
        record.code.as_str(),
        record.domain_area.as_str(),
        record.level.as_str(),
        record.status.as_str(),
        year.as_str(),
        record.description.as_str(),
        record.summary.as_str(),
        record.price_label.as_str(),
        price.as_str(),
    ];
    let lists = [
        &record.sub_areas,
        &record.tracks,
        &record.role_groups,
        &record.roles,
        &record.tags,
    ];
    scalars
        .into_iter()
        .chain(lists.into_iter().flatten().map(String::as_str))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
