// SPDX-License-Identifier: MIT OR Apache-2.0

//! Controlled vocabularies shared by the loader, query engine and validator.
//!
//! A [`Vocabulary`] is built once at startup and handed around by reference.
//! Nothing mutates it after construction.

use std::collections::HashMap;

use crate::goals::GoalTag;

/// Bucket name used for records whose sub-areas fall outside their domain.
pub const GENERAL_BUCKET: &str = "General";

/// Substring of a price label that marks the certification as free.
pub const FREE_PRICE_MARKER: &str = "free";

const DOMAINS: &[&str] = &[
    "Communication and Network Security",
    "IAM",
    "Security Architecture and Engineering",
    "Asset Security",
    "Security and Risk Management",
    "Security Assessment and Testing",
    "Software Security",
    "Security Operations",
];

const SUB_AREAS: &[&str] = &[
    "Cloud/SysOps",
    "*nix",
    "ICS/IoT",
    "GRC",
    "Forensics",
    "Incident Handling",
    "Penetration Testing",
    "Exploitation",
];

const DOMAIN_SUB_AREAS: &[(&str, &[&str])] = &[
    ("Security Architecture and Engineering", &["Cloud/SysOps", "*nix", "ICS/IoT"]),
    ("Security and Risk Management", &["GRC"]),
    (
        "Security Operations",
        &["Forensics", "Incident Handling", "Penetration Testing", "Exploitation"],
    ),
];

const ROLE_GROUPS: &[&str] = &[
    "Network",
    "Asset",
    "Engineer",
    "Management",
    "Testing",
    "Software",
    "Blue Team Ops",
    "Red Team Ops",
    "IAM",
];

const KEY_ALIASES: &[(&str, &str)] = &[
    ("sub", "subarea"),
    ("sub-area", "subarea"),
    ("sub_area", "subarea"),
    ("subareas", "subarea"),
    ("vendor", "provider"),
    ("issuer", "provider"),
    ("rolecategory", "rolegroup"),
    ("role_group", "rolegroup"),
    ("role-group", "rolegroup"),
    ("rolegroups", "rolegroup"),
    ("roles", "role"),
    ("tags", "tag"),
    ("tracks", "track"),
    ("cert", "code"),
    ("cert_code", "code"),
    ("certcode", "code"),
    ("domain_area", "domain"),
    ("area", "domain"),
    ("cost", "price"),
    ("introduced", "year"),
];

const UNKNOWN_PRICE_HINTS: &[&str] = &["not listed", "unknown", "tbd", "see provider", "n/a", "varies"];

/// Hint fragments matched as substrings of lower-cased tracks and tags.
const GOAL_HINTS: &[(GoalTag, &[&str])] = &[
    (
        GoalTag::Blue,
        &[
            "soc-analyst",
            "security-operations-center",
            "incident",
            "forensic",
            "blue-team",
            "threat-hunt",
            "detection",
            "defen",
        ],
    ),
    (
        GoalTag::Red,
        &["pentest", "penetration", "exploit", "red-team", "offensive", "ethical-hack"],
    ),
    (
        GoalTag::Grc,
        &["grc", "audit", "compliance", "governance", "risk", "privacy"],
    ),
    (
        GoalTag::Cloud,
        &["cloud", "amazon-web-services", "azure", "gcp", "kubernetes", "devsecops"],
    ),
];

/// Read-only lookup tables for domains, sub-areas, role groups and search keys.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    domains: Vec<String>,
    sub_areas: Vec<String>,
    domain_sub_areas: HashMap<String, Vec<String>>,
    role_groups: Vec<String>,
    aliases: HashMap<String, String>,
    goal_hints: Vec<(GoalTag, Vec<String>)>,
    unknown_price_hints: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| (*s).to_string()).collect::<Vec<_>>();
        Self {
            domains: owned(DOMAINS),
            sub_areas: owned(SUB_AREAS),
            domain_sub_areas: DOMAIN_SUB_AREAS
                .iter()
                .map(|(domain, subs)| ((*domain).to_string(), owned(subs)))
                .collect(),
            role_groups: owned(ROLE_GROUPS),
            aliases: KEY_ALIASES
                .iter()
                .map(|(from, to)| ((*from).to_string(), (*to).to_string()))
                .collect(),
            goal_hints: GOAL_HINTS
                .iter()
                .map(|(tag, hints)| (*tag, owned(hints)))
                .collect(),
            unknown_price_hints: owned(UNKNOWN_PRICE_HINTS),
        }
    }
}

impl Vocabulary {
    /// Built-in vocabulary extended with extra search key aliases.
    ///
    /// Alias keys are lower-cased; an extra alias replaces a built-in one
    /// with the same key.
    pub fn with_aliases<'a, I>(extra: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut vocab = Self::default();
        for (from, to) in extra {
            let from = from.trim().to_lowercase();
            let to = to.trim().to_lowercase();
            if from.is_empty() || to.is_empty() {
                continue;
            }
            vocab.aliases.insert(from, to);
        }
        vocab
    }

    /// Domains in display order.
    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    pub fn is_domain(&self, domain: &str) -> bool {
        self.domains.iter().any(|d| d == domain)
    }

    /// All known sub-areas in display order.
    pub fn sub_areas(&self) -> &[String] {
        &self.sub_areas
    }

    pub fn is_sub_area(&self, sub_area: &str) -> bool {
        self.sub_areas.iter().any(|s| s == sub_area)
    }

    /// Sub-areas configured for a domain (empty when the domain has none).
    pub fn sub_areas_for(&self, domain: &str) -> &[String] {
        self.domain_sub_areas
            .get(domain)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn role_groups(&self) -> &[String] {
        &self.role_groups
    }

    pub fn is_role_group(&self, group: &str) -> bool {
        self.role_groups.iter().any(|g| g == group)
    }

    /// Resolve a lower-cased search key through the alias table.
    ///
    /// Unknown keys come back unchanged.
    pub fn resolve_key<'a>(&'a self, key: &'a str) -> &'a str {
        self.aliases.get(key).map(String::as_str).unwrap_or(key)
    }

    /// Hint fragments for a goal tag.
    pub fn goal_hints(&self, tag: GoalTag) -> &[String] {
        self.goal_hints
            .iter()
            .find(|(t, _)| *t == tag)
            .map(|(_, hints)| hints.as_slice())
            .unwrap_or(&[])
    }

    /// True when a lower-cased price label says the price is not known.
    pub fn is_unknown_price_label(&self, label_lower: &str) -> bool {
        self.unknown_price_hints
            .iter()
            .any(|hint| label_lower.contains(hint.as_str()))
    }

    /// Order items by their position in `reference`, unknown items last and sorted.
    pub fn order_by<'a, I>(reference: &[String], items: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut known: Vec<(usize, String)> = Vec::new();
        let mut unknown: Vec<String> = Vec::new();
        for item in items {
            match reference.iter().position(|r| r == item) {
                Some(pos) => {
                    if !known.iter().any(|(p, _)| *p == pos) {
                        known.push((pos, item.to_string()));
                    }
                }
                None => {
                    if !unknown.iter().any(|u| u == item) {
                        unknown.push(item.to_string());
                    }
                }
            }
        }
        known.sort_by_key(|(pos, _)| *pos);
        unknown.sort();
        known.into_iter().map(|(_, item)| item).chain(unknown).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve_and_unknown_keys_pass_through() {
        let vocab = Vocabulary::default();
        assert_eq!(vocab.resolve_key("sub"), "subarea");
        assert_eq!(vocab.resolve_key("vendor"), "provider");
        assert_eq!(vocab.resolve_key("rolecategory"), "rolegroup");
        assert_eq!(vocab.resolve_key("level"), "level");
        assert_eq!(vocab.resolve_key("weirdkey"), "weirdkey");
    }

    #[test]
    fn extra_aliases_are_merged() {
        let extra: HashMap<String, String> =
            [("Org".to_string(), "provider".to_string())].into_iter().collect();
        let vocab = Vocabulary::with_aliases(&extra);
        assert_eq!(vocab.resolve_key("org"), "provider");
        assert_eq!(vocab.resolve_key("sub"), "subarea");
    }

    #[test]
    fn domains_without_sub_areas_return_empty_slice() {
        let vocab = Vocabulary::default();
        assert!(vocab.sub_areas_for("IAM").is_empty());
        assert_eq!(vocab.sub_areas_for("Security and Risk Management"), ["GRC"]);
        assert!(vocab.sub_areas_for("Not A Domain").is_empty());
    }

    #[test]
    fn order_by_keeps_reference_order_then_sorted_extras() {
        let vocab = Vocabulary::default();
        let ordered = Vocabulary::order_by(
            vocab.domains(),
            ["Security Operations", "Zeta", "IAM", "Alpha", "IAM"],
        );
        assert_eq!(ordered, ["IAM", "Security Operations", "Alpha", "Zeta"]);
    }

    #[test]
    fn unknown_price_hints_match_substrings() {
        let vocab = Vocabulary::default();
        assert!(vocab.is_unknown_price_label("price not listed"));
        assert!(vocab.is_unknown_price_label("varies by region"));
        assert!(!vocab.is_unknown_price_label("$499 exam"));
    }
}
