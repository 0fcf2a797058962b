// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog index summary.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::catalog::{Catalog, CatalogMeta, PriceClass};
use crate::goals::GoalTag;
use crate::vocab::Vocabulary;

/// Record fields that feed the search blob, in blob order.
pub const SEARCHABLE_FIELDS: &[&str] = &[
    "name",
    "provider",
    "cert_code",
    "domain_area",
    "level",
    "status",
    "introduced_year",
    "description",
    "summary",
    "price_label",
    "price_usd",
    "sub_areas",
    "tracks",
    "role_groups",
    "roles",
    "tags",
];

#[derive(Debug, Clone, Serialize)]
pub struct CatalogSummary {
    pub meta: CatalogMeta,
    pub records: usize,
    /// Domains present, vocabulary order first.
    pub domains: Vec<String>,
    /// Sub-areas present, vocabulary order first.
    pub sub_areas: Vec<String>,
    pub goals: BTreeMap<GoalTag, usize>,
    pub prices: BTreeMap<&'static str, usize>,
    pub searchable_fields: Vec<&'static str>,
}

pub fn summarize(catalog: &Catalog, vocab: &Vocabulary) -> CatalogSummary {
    let records = &catalog.records;

    let domains = Vocabulary::order_by(
        vocab.domains(),
        records.iter().map(|r| r.domain_area.as_str()),
    );
    let sub_areas = Vocabulary::order_by(
        vocab.sub_areas(),
        records.iter().flat_map(|r| r.sub_areas.iter().map(String::as_str)),
    );

    let goals = GoalTag::ALL
        .iter()
        .map(|&goal| {
            let count = records
                .iter()
                .filter(|r| r.goal_categories.contains(&goal))
                .count();
            (goal, count)
        })
        .collect();
    let prices = PriceClass::ALL
        .iter()
        .map(|&class| {
            let count = records.iter().filter(|r| r.price_class() == class).count();
            (class.as_str(), count)
        })
        .collect();

    CatalogSummary {
        meta: catalog.meta.clone(),
        records: catalog.len(),
        domains,
        sub_areas,
        goals,
        prices,
        searchable_fields: SEARCHABLE_FIELDS.to_vec(),
    }
}
