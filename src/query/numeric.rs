// SPDX-License-Identifier: MIT OR Apache-2.0

//! Numeric filter values: comparators (`<=1000`), ranges (`300..1200`)
//! and bare numbers (implicit `=`).

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

static COMPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(<=|>=|=|<|>)(-?\d+(?:\.\d+)?)$").expect("comparator regex"));
static RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(-?\d+(?:\.\d+)?)\.\.(-?\d+(?:\.\d+)?)$").expect("range regex")
});
static NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d+(?:\.\d+)?$").expect("number regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Comparator {
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = ">")]
    Gt,
}

impl Comparator {
    fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "<" => Some(Comparator::Lt),
            "<=" => Some(Comparator::Le),
            "=" => Some(Comparator::Eq),
            ">=" => Some(Comparator::Ge),
            ">" => Some(Comparator::Gt),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Comparator::Lt => "<",
            Comparator::Le => "<=",
            Comparator::Eq => "=",
            Comparator::Ge => ">=",
            Comparator::Gt => ">",
        }
    }

    pub fn holds(self, left: f64, right: f64) -> bool {
        match self {
            Comparator::Lt => left < right,
            Comparator::Le => left <= right,
            Comparator::Eq => left == right,
            Comparator::Ge => left >= right,
            Comparator::Gt => left > right,
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Parsed numeric interpretation of a filter value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NumericExpr {
    Compare { op: Comparator, value: f64 },
    /// Bounds as written; matching normalizes min/max.
    Range { lo: f64, hi: f64 },
}

impl NumericExpr {
    /// True when `value` satisfies the comparator or falls inside the range.
    pub fn matches(&self, value: f64) -> bool {
        match *self {
            NumericExpr::Compare { op, value: target } => op.holds(value, target),
            NumericExpr::Range { lo, hi } => lo.min(hi) <= value && value <= lo.max(hi),
        }
    }
}

impl fmt::Display for NumericExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericExpr::Compare { op, value } => write!(f, "{op}{value}"),
            NumericExpr::Range { lo, hi } => write!(f, "{lo}..{hi}"),
        }
    }
}

/// Classify a trimmed value. `None` means "not numeric".
///
/// Comparator form wins over range form, which wins over a bare number.
pub fn parse_numeric(value: &str) -> Option<NumericExpr> {
    if let Some(caps) = COMPARATOR_RE.captures(value) {
        let op = Comparator::from_symbol(&caps[1])?;
        let number = caps[2].parse().ok()?;
        return Some(NumericExpr::Compare { op, value: number });
    }
    if let Some(caps) = RANGE_RE.captures(value) {
        let lo = caps[1].parse().ok()?;
        let hi = caps[2].parse().ok()?;
        return Some(NumericExpr::Range { lo, hi });
    }
    if NUMBER_RE.is_match(value) {
        let number = value.parse().ok()?;
        return Some(NumericExpr::Compare {
            op: Comparator::Eq,
            value: number,
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comparators() {
        assert_eq!(
            parse_numeric("<=1000"),
            Some(NumericExpr::Compare {
                op: Comparator::Le,
                value: 1000.0
            })
        );
        assert_eq!(
            parse_numeric(">-2.5"),
            Some(NumericExpr::Compare {
                op: Comparator::Gt,
                value: -2.5
            })
        );
    }

    #[test]
    fn parses_ranges_without_reordering() {
        assert_eq!(
            parse_numeric("300..1200"),
            Some(NumericExpr::Range {
                lo: 300.0,
                hi: 1200.0
            })
        );
        assert_eq!(
            parse_numeric("2000..500"),
            Some(NumericExpr::Range {
                lo: 2000.0,
                hi: 500.0
            })
        );
    }

    #[test]
    fn bare_number_is_implicit_equality() {
        assert_eq!(
            parse_numeric("2021"),
            Some(NumericExpr::Compare {
                op: Comparator::Eq,
                value: 2021.0
            })
        );
    }

    #[test]
    fn non_numeric_text_is_rejected() {
        for value in ["abc", "", "<", "1..", "..2", "=>5", "1.2.3", "10k", "< 5"] {
            assert_eq!(parse_numeric(value), None, "{value}");
        }
    }

    #[test]
    fn range_matching_normalizes_bounds() {
        let reversed = NumericExpr::Range { lo: 2000.0, hi: 500.0 };
        assert!(reversed.matches(500.0));
        assert!(reversed.matches(1200.0));
        assert!(reversed.matches(2000.0));
        assert!(!reversed.matches(2000.5));
    }

    #[test]
    fn comparator_matching_is_arithmetic() {
        let lt = parse_numeric("<100").expect("lt");
        assert!(lt.matches(99.0));
        assert!(!lt.matches(100.0));
        let eq = parse_numeric("=100").expect("eq");
        assert!(eq.matches(100.0));
        assert!(!eq.matches(100.5));
    }
}
