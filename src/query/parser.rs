// SPDX-License-Identifier: MIT OR Apache-2.0

//! Splits tokens into `key:value` predicates and free terms.

use serde::Serialize;
use std::fmt;
use tracing::trace;

use super::numeric::{parse_numeric, NumericExpr};
use super::tokenizer::tokenize_detailed;
use crate::vocab::Vocabulary;

/// A parsed `key:value` query term.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuredPredicate {
    /// Lower-cased key after alias resolution.
    pub key: String,
    /// Value as written, trimmed.
    pub value: String,
    pub value_lower: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric: Option<NumericExpr>,
}

impl StructuredPredicate {
    pub fn new(key: &str, value: &str) -> Self {
        let value = value.trim();
        Self {
            key: key.to_lowercase(),
            value: value.to_string(),
            value_lower: value.to_lowercase(),
            numeric: parse_numeric(value),
        }
    }
}

/// Conditions the parser recovered from. They never change matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "token", rename_all = "snake_case")]
pub enum QueryDiagnostic {
    UnterminatedQuote,
    EmptyKey(String),
    EmptyValue(String),
}

impl fmt::Display for QueryDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryDiagnostic::UnterminatedQuote => {
                f.write_str("unterminated quote runs to end of query")
            }
            QueryDiagnostic::EmptyKey(token) => write!(f, "dropped '{token}': empty key"),
            QueryDiagnostic::EmptyValue(token) => write!(f, "dropped '{token}': empty value"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedQuery {
    pub structured: Vec<StructuredPredicate>,
    /// Lower-cased terms matched against the search blob.
    pub free: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<QueryDiagnostic>,
}

impl ParsedQuery {
    pub fn is_empty(&self) -> bool {
        self.structured.is_empty() && self.free.is_empty()
    }
}

/// Tokenize and parse a raw query string.
pub fn parse_query(input: &str, vocab: &Vocabulary) -> ParsedQuery {
    let tokenized = tokenize_detailed(input);
    let mut parsed = parse_tokens(&tokenized.tokens, vocab);
    if tokenized.unterminated_quote {
        parsed.diagnostics.insert(0, QueryDiagnostic::UnterminatedQuote);
    }
    parsed
}

/// Classify tokens as structured predicates or free terms.
///
/// Only the first `:` separates key from value. A token with an empty key
/// or an empty value is dropped entirely; it does not become a free term.
pub fn parse_tokens<S: AsRef<str>>(tokens: &[S], vocab: &Vocabulary) -> ParsedQuery {
    let mut parsed = ParsedQuery::default();
    for token in tokens {
        let token = token.as_ref();
        match token.split_once(':') {
            Some(("", _)) => {
                trace!(token, "dropping token with empty key");
                parsed
                    .diagnostics
                    .push(QueryDiagnostic::EmptyKey(token.to_string()));
            }
            Some((key, value)) => {
                if value.trim().is_empty() {
                    trace!(token, "dropping token with empty value");
                    parsed
                        .diagnostics
                        .push(QueryDiagnostic::EmptyValue(token.to_string()));
                    continue;
                }
                let key = key.to_lowercase();
                let key = vocab.resolve_key(&key);
                parsed.structured.push(StructuredPredicate::new(key, value));
            }
            None => parsed.free.push(token.to_lowercase()),
        }
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::numeric::Comparator;

    fn parse(input: &str) -> ParsedQuery {
        parse_query(input, &Vocabulary::default())
    }

    #[test]
    fn splits_structured_and_free() {
        let q = parse("provider:GIAC Incident response");
        assert_eq!(q.structured.len(), 1);
        assert_eq!(q.structured[0].key, "provider");
        assert_eq!(q.structured[0].value, "GIAC");
        assert_eq!(q.structured[0].value_lower, "giac");
        assert_eq!(q.free, ["incident", "response"]);
    }

    #[test]
    fn keys_are_lowercased_and_aliased() {
        let q = parse("Sub:forensics VENDOR:offsec RoleCategory:management Weird:x");
        let keys: Vec<&str> = q.structured.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, ["subarea", "provider", "rolegroup", "weird"]);
    }

    #[test]
    fn only_first_colon_separates() {
        let q = parse("url:https://example.com");
        assert_eq!(q.structured[0].key, "url");
        assert_eq!(q.structured[0].value, "https://example.com");
    }

    #[test]
    fn empty_key_and_empty_value_tokens_are_dropped() {
        let q = parse(":orphan level: kept");
        assert!(q.structured.is_empty());
        assert_eq!(q.free, ["kept"]);
        assert_eq!(
            q.diagnostics,
            [
                QueryDiagnostic::EmptyKey(":orphan".into()),
                QueryDiagnostic::EmptyValue("level:".into()),
            ]
        );
    }

    #[test]
    fn quoted_whitespace_value_is_treated_as_empty() {
        let q = parse(r#"tag:"   ""#);
        assert!(q.structured.is_empty());
        assert!(q.free.is_empty());
    }

    #[test]
    fn numeric_interpretation_is_eager() {
        let q = parse("price:<=1000 year:2021 provider:giac");
        assert_eq!(
            q.structured[0].numeric,
            Some(NumericExpr::Compare {
                op: Comparator::Le,
                value: 1000.0
            })
        );
        assert!(q.structured[1].numeric.is_some());
        assert!(q.structured[2].numeric.is_none());
    }

    #[test]
    fn unterminated_quote_is_reported() {
        let q = parse(r#"rolegroup:"Blue Team"#);
        assert_eq!(q.structured[0].value, "Blue Team");
        assert_eq!(q.diagnostics, [QueryDiagnostic::UnterminatedQuote]);
    }

    #[test]
    fn empty_query_is_empty() {
        assert!(parse("").is_empty());
        assert!(parse("   ").diagnostics.is_empty());
    }
}
