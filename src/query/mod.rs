// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query module - tokenizer, numeric filter syntax, parser and matcher
//!
//! ```text
//! raw query -> tokenize -> parse_tokens -> {structured, free} -> matches(record, ..)
//! ```

pub mod matcher;
pub mod numeric;
pub mod parser;
pub mod tokenizer;

pub use matcher::{known_keys, matcher_for, matches, matches_free_term, MatchFn};
pub use numeric::{parse_numeric, Comparator, NumericExpr};
pub use parser::{parse_query, parse_tokens, ParsedQuery, QueryDiagnostic, StructuredPredicate};
pub use tokenizer::{tokenize, tokenize_detailed, Tokenized};
