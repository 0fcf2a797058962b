// SPDX-License-Identifier: MIT OR Apache-2.0

//! Normalized catalog record and its enumerated attributes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::goals::GoalTag;
use crate::vocab::FREE_PRICE_MARKER;

/// Certification difficulty, ordered from entry level to expert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    Foundational,
    Intermediate,
    Advanced,
    Expert,
}

impl Level {
    /// Parse a level name; anything unrecognized is `Foundational`.
    pub fn parse(value: &str) -> Self {
        Self::try_parse(value).unwrap_or_default()
    }

    pub fn try_parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "foundational" => Some(Level::Foundational),
            "intermediate" => Some(Level::Intermediate),
            "advanced" => Some(Level::Advanced),
            "expert" => Some(Level::Expert),
            _ => None,
        }
    }

    /// Sort rank, `1` for foundational up to `4` for expert.
    pub fn rank(self) -> u8 {
        match self {
            Level::Foundational => 1,
            Level::Intermediate => 2,
            Level::Advanced => 3,
            Level::Expert => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Foundational => "foundational",
            Level::Intermediate => "intermediate",
            Level::Advanced => "advanced",
            Level::Expert => "expert",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a certification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Active,
    Beta,
    Retired,
}

impl Status {
    pub fn try_parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "active" => Some(Status::Active),
            "beta" => Some(Status::Beta),
            "retired" => Some(Status::Retired),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Beta => "beta",
            Status::Retired => "retired",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a record's price came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PriceConfidence {
    FromOriginalTooltip,
    #[default]
    Estimated,
}

impl PriceConfidence {
    pub fn try_parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "from-original-tooltip" => Some(PriceConfidence::FromOriginalTooltip),
            "estimated" => Some(PriceConfidence::Estimated),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PriceConfidence::FromOriginalTooltip => "from-original-tooltip",
            PriceConfidence::Estimated => "estimated",
        }
    }
}

/// Derived price state, computed from `price_usd` and `price_label` together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceClass {
    Paid,
    Free,
    Unknown,
}

impl PriceClass {
    pub const ALL: [PriceClass; 3] = [PriceClass::Paid, PriceClass::Free, PriceClass::Unknown];

    pub fn as_str(self) -> &'static str {
        match self {
            PriceClass::Paid => "paid",
            PriceClass::Free => "free",
            PriceClass::Unknown => "unknown",
        }
    }
}

/// A fully normalized catalog entry. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub id: String,
    pub name: String,
    pub provider: String,
    pub code: String,
    pub url: String,
    pub domain_area: String,
    pub level: Level,
    pub status: Status,
    pub delivery: String,
    pub renewal_policy: String,
    pub language: String,
    /// `0` when unknown.
    pub introduced_year: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<NaiveDate>,
    pub description: String,
    pub summary: String,
    pub sub_areas: Vec<String>,
    pub tracks: Vec<String>,
    pub role_groups: Vec<String>,
    pub roles: Vec<String>,
    pub tags: Vec<String>,
    pub prerequisites: Vec<String>,
    pub ai_focus: bool,
    /// `0` means unknown or non-numeric, not free.
    pub price_usd: u32,
    pub price_label: String,
    pub price_confidence: PriceConfidence,
    #[serde(skip)]
    pub search_blob: String,
    pub goal_categories: BTreeSet<GoalTag>,
}

impl Record {
    /// Zero price with a label that says free. A paid record is never free.
    pub fn is_free(&self) -> bool {
        self.price_usd == 0 && self.price_label.to_lowercase().contains(FREE_PRICE_MARKER)
    }

    pub fn is_paid(&self) -> bool {
        self.price_usd > 0
    }

    pub fn is_unknown_price(&self) -> bool {
        self.price_usd == 0 && !self.is_free()
    }

    /// Known price, either paid or free.
    pub fn has_concrete_price(&self) -> bool {
        !self.is_unknown_price()
    }

    pub fn price_class(&self) -> PriceClass {
        if self.is_paid() {
            PriceClass::Paid
        } else if self.is_free() {
            PriceClass::Free
        } else {
            PriceClass::Unknown
        }
    }
}
