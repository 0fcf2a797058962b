// SPDX-License-Identifier: MIT OR Apache-2.0

//! Whitespace tokenizer with single/double quote spans.

/// Tokens plus whether the input ended inside a quote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokenized {
    pub tokens: Vec<String>,
    pub unterminated_quote: bool,
}

/// Split a raw query into tokens.
///
/// Whitespace separates tokens outside quotes. A `"` or `'` opens a span
/// that only the same character closes; the quote characters themselves
/// are dropped. An unterminated quote runs to the end of the input.
pub fn tokenize(input: &str) -> Vec<String> {
    tokenize_detailed(input).tokens
}

pub fn tokenize_detailed(input: &str) -> Tokenized {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for c in input.chars() {
        match quote {
            Some(open) if c == open => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            None => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    Tokenized {
        tokens,
        unterminated_quote: quote.is_some(),
    }
}
