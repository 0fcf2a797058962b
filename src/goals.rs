// SPDX-License-Identifier: MIT OR Apache-2.0

//! Career-goal classification.
//!
//! Goal tags are inferred from a record's categorical attributes by an
//! ordered list of independent rules. Every rule runs and the tags are
//! unioned; only when no rule fires does the record get [`DEFAULT_GOAL`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::catalog::Record;
use crate::vocab::Vocabulary;

/// Career-path category used to group certifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalTag {
    Blue,
    Red,
    Grc,
    Cloud,
}

/// Tag injected when no rule matches.
pub const DEFAULT_GOAL: GoalTag = GoalTag::Blue;

impl GoalTag {
    pub const ALL: [GoalTag; 4] = [GoalTag::Blue, GoalTag::Red, GoalTag::Grc, GoalTag::Cloud];

    pub fn as_str(self) -> &'static str {
        match self {
            GoalTag::Blue => "blue",
            GoalTag::Red => "red",
            GoalTag::Grc => "grc",
            GoalTag::Cloud => "cloud",
        }
    }

    pub fn try_parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "blue" => Some(GoalTag::Blue),
            "red" => Some(GoalTag::Red),
            "grc" => Some(GoalTag::Grc),
            "cloud" => Some(GoalTag::Cloud),
            _ => None,
        }
    }

    /// Human label for grouped views.
    pub fn label(self) -> &'static str {
        match self {
            GoalTag::Blue => "Blue Team / Defense",
            GoalTag::Red => "Red Team / Offense",
            GoalTag::Grc => "Governance, Risk & Compliance",
            GoalTag::Cloud => "Cloud Security",
        }
    }
}

impl fmt::Display for GoalTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type GoalRule = fn(&Record, &Vocabulary, &mut BTreeSet<GoalTag>);

/// Rules in evaluation order. None of them short-circuit the others.
const RULES: &[GoalRule] = &[by_role_group, by_domain, by_sub_area, by_hint_words];

/// Infer the goal tags for a record. Never returns an empty set.
pub fn classify(record: &Record, vocab: &Vocabulary) -> BTreeSet<GoalTag> {
    let mut tags = BTreeSet::new();
    for rule in RULES {
        rule(record, vocab, &mut tags);
    }
    if tags.is_empty() {
        tags.insert(DEFAULT_GOAL);
    }
    tags
}

fn by_role_group(record: &Record, _vocab: &Vocabulary, tags: &mut BTreeSet<GoalTag>) {
    for group in &record.role_groups {
        match group.to_lowercase().as_str() {
            "blue team ops" => {
                tags.insert(GoalTag::Blue);
            }
            "red team ops" => {
                tags.insert(GoalTag::Red);
            }
            "management" => {
                tags.insert(GoalTag::Grc);
            }
            _ => {}
        }
    }
}

fn by_domain(record: &Record, _vocab: &Vocabulary, tags: &mut BTreeSet<GoalTag>) {
    let domain = record.domain_area.to_lowercase();
    if domain.contains("risk management") {
        tags.insert(GoalTag::Grc);
    }
    if domain.contains("assessment and testing") {
        tags.insert(GoalTag::Red);
    }
}

fn by_sub_area(record: &Record, _vocab: &Vocabulary, tags: &mut BTreeSet<GoalTag>) {
    for sub_area in &record.sub_areas {
        match sub_area.to_lowercase().as_str() {
            "grc" => {
                tags.insert(GoalTag::Grc);
            }
            "cloud/sysops" => {
                tags.insert(GoalTag::Cloud);
            }
            "penetration testing" | "exploitation" => {
                tags.insert(GoalTag::Red);
            }
            "forensics" | "incident handling" => {
                tags.insert(GoalTag::Blue);
            }
            _ => {}
        }
    }
}

fn by_hint_words(record: &Record, vocab: &Vocabulary, tags: &mut BTreeSet<GoalTag>) {
    let values: Vec<String> = record
        .tracks
        .iter()
        .chain(&record.tags)
        .map(|v| v.to_lowercase())
        .collect();
    for tag in GoalTag::ALL {
        let hints = vocab.goal_hints(tag);
        let hit = values
            .iter()
            .any(|value| hints.iter().any(|hint| value.contains(hint.as_str())));
        if hit {
            tags.insert(tag);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RawRecord;

    fn record(raw: RawRecord) -> Record {
        let raw = RawRecord {
            name: Some("Test".into()),
            ..raw
        };
        raw.normalize(&Vocabulary::default())
    }

    #[test]
    fn unmatched_record_defaults_to_blue() {
        let r = record(RawRecord {
            domain_area: Some("IAM".into()),
            role_groups: Some(vec!["IAM"].into()),
            tags: Some(vec!["identity"].into()),
            ..RawRecord::default()
        });
        assert_eq!(r.goal_categories, BTreeSet::from([GoalTag::Blue]));
    }

    #[test]
    fn rules_union_instead_of_short_circuiting() {
        let r = record(RawRecord {
            domain_area: Some("Security Architecture and Engineering".into()),
            sub_areas: Some(vec!["Cloud/SysOps"].into()),
            role_groups: Some(vec!["Red Team Ops", "Management"].into()),
            ..RawRecord::default()
        });
        assert_eq!(
            r.goal_categories,
            BTreeSet::from([GoalTag::Red, GoalTag::Grc, GoalTag::Cloud])
        );
    }

    #[test]
    fn default_never_added_alongside_specific_match() {
        let r = record(RawRecord {
            domain_area: Some("Security and Risk Management".into()),
            ..RawRecord::default()
        });
        assert_eq!(r.goal_categories, BTreeSet::from([GoalTag::Grc]));
    }

    #[test]
    fn hint_words_match_as_substrings_of_tracks_and_tags() {
        let r = record(RawRecord {
            domain_area: Some("Software Security".into()),
            tracks: Some(vec!["azure-specialty"].into()),
            tags: Some(vec!["offensive-appsec"].into()),
            ..RawRecord::default()
        });
        assert!(r.goal_categories.contains(&GoalTag::Cloud));
        assert!(r.goal_categories.contains(&GoalTag::Red));
        assert!(!r.goal_categories.contains(&GoalTag::Blue));
    }

    #[test]
    fn words_that_merely_contain_short_acronyms_add_no_tag() {
        let r = record(RawRecord {
            domain_area: Some("Software Security".into()),
            role_groups: Some(vec!["Red Team Ops"].into()),
            tags: Some(vec!["associate-level", "social-engineering", "privacy-laws"].into()),
            ..RawRecord::default()
        });
        assert!(!r.goal_categories.contains(&GoalTag::Blue));
        assert!(!r.goal_categories.contains(&GoalTag::Cloud));
        assert!(r.goal_categories.contains(&GoalTag::Red));
    }

    #[test]
    fn soc_analyst_role_slug_is_a_blue_hint() {
        let r = record(RawRecord {
            domain_area: Some("Software Security".into()),
            tags: Some(vec!["soc-analyst"].into()),
            ..RawRecord::default()
        });
        assert!(r.goal_categories.contains(&GoalTag::Blue));
    }

    #[test]
    fn classify_is_deterministic() {
        let r = record(RawRecord {
            sub_areas: Some(vec!["Forensics", "Exploitation"].into()),
            ..RawRecord::default()
        });
        let vocab = Vocabulary::default();
        assert_eq!(classify(&r, &vocab), classify(&r, &vocab));
        assert_eq!(
            classify(&r, &vocab),
            BTreeSet::from([GoalTag::Blue, GoalTag::Red])
        );
    }

    #[test]
    fn goal_tag_parse_roundtrip() {
        for tag in GoalTag::ALL {
            assert_eq!(GoalTag::try_parse(tag.as_str()), Some(tag));
        }
        assert_eq!(GoalTag::try_parse("purple"), None);
    }
}
