// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secondary groupings of an already filtered and sorted result set.
//!
//! Buckets keep input order, so grouping a sorted slice yields sorted buckets.

use serde::Serialize;

use crate::catalog::Record;
use crate::goals::GoalTag;
use crate::vocab::{Vocabulary, GENERAL_BUCKET};

#[derive(Debug, Clone, Serialize)]
pub struct SubAreaBucket<'a> {
    pub sub_area: String,
    pub records: Vec<&'a Record>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DomainGroup<'a> {
    pub domain: String,
    pub buckets: Vec<SubAreaBucket<'a>>,
}

impl DomainGroup<'_> {
    /// Distinct records across all buckets.
    pub fn record_count(&self) -> usize {
        let mut ids: Vec<&str> = self
            .buckets
            .iter()
            .flat_map(|b| b.records.iter().map(|r| r.id.as_str()))
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GoalGroup<'a> {
    pub goal: GoalTag,
    pub records: Vec<&'a Record>,
}

/// Group by domain, then by the domain's sub-areas.
///
/// Records whose sub-areas are all outside the domain's configured list go
/// to a trailing [`GENERAL_BUCKET`]. A record with several in-domain
/// sub-areas appears in each of them.
pub fn group_by_domain<'a>(records: &[&'a Record], vocab: &Vocabulary) -> Vec<DomainGroup<'a>> {
    let domains = Vocabulary::order_by(
        vocab.domains(),
        records.iter().map(|r| r.domain_area.as_str()),
    );

    domains
        .into_iter()
        .filter_map(|domain| {
            let in_domain: Vec<&'a Record> = records
                .iter()
                .copied()
                .filter(|r| r.domain_area == domain)
                .collect();
            let configured = vocab.sub_areas_for(&domain);

            let mut buckets: Vec<SubAreaBucket<'a>> = configured
                .iter()
                .map(|sub_area| SubAreaBucket {
                    sub_area: sub_area.clone(),
                    records: in_domain
                        .iter()
                        .copied()
                        .filter(|r| r.sub_areas.contains(sub_area))
                        .collect(),
                })
                .collect();
            buckets.push(SubAreaBucket {
                sub_area: GENERAL_BUCKET.to_string(),
                records: in_domain
                    .iter()
                    .copied()
                    .filter(|r| !r.sub_areas.iter().any(|s| configured.contains(s)))
                    .collect(),
            });
            buckets.retain(|b| !b.records.is_empty());

            (!buckets.is_empty()).then_some(DomainGroup { domain, buckets })
        })
        .collect()
}

/// One bucket per goal tag in tag order; empty buckets are omitted.
pub fn group_by_goal<'a>(records: &[&'a Record]) -> Vec<GoalGroup<'a>> {
    GoalTag::ALL
        .iter()
        .map(|&goal| GoalGroup {
            goal,
            records: records
                .iter()
                .copied()
                .filter(|r| r.goal_categories.contains(&goal))
                .collect(),
        })
        .filter(|g| !g.records.is_empty())
        .collect()
}
