// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parse command: shows how a query is understood

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use super::Context;
use crate::cli::OutputFormat;
use certq::errors::suggestions::supported_keys_message;
use certq::output::print_json;
use certq::query::{known_keys, parse_query, tokenize, ParsedQuery};

#[derive(Debug, Serialize)]
struct ParseJson<'a> {
    query: &'a str,
    tokens: &'a [String],
    #[serde(flatten)]
    parsed: &'a ParsedQuery,
    /// Keys without dedicated semantics; they search the whole record.
    fallback_keys: Vec<&'a str>,
}

/// Run the parse command
pub fn run(ctx: &Context, query: &str) -> Result<()> {
    let tokens = tokenize(query);
    let parsed = parse_query(query, &ctx.vocab);

    let known = known_keys();
    let mut fallback_keys: Vec<&str> = Vec::new();
    for predicate in &parsed.structured {
        let key = predicate.key.as_str();
        if !known.contains(&key) && !fallback_keys.contains(&key) {
            fallback_keys.push(key);
        }
    }

    match ctx.format {
        OutputFormat::Json => {
            let payload = ParseJson {
                query,
                tokens: &tokens,
                parsed: &parsed,
                fallback_keys,
            };
            print_json(&payload, ctx.compact)?;
        }
        OutputFormat::Text => {
            println!("{} {}", "Tokens:".bold(), tokens.join(" | "));
            println!("{}", "Structured:".bold());
            if parsed.structured.is_empty() {
                println!("  {}", "(none)".dimmed());
            }
            for predicate in &parsed.structured {
                let numeric = predicate
                    .numeric
                    .map(|n| format!(" [numeric {n}]"))
                    .unwrap_or_default();
                let fallback = if known.contains(&predicate.key.as_str()) {
                    String::new()
                } else {
                    " (whole-record search)".to_string()
                };
                println!(
                    "  {}:{}{}{}",
                    predicate.key.cyan(),
                    predicate.value.yellow(),
                    numeric.green(),
                    fallback.dimmed()
                );
            }
            println!("{}", "Free terms:".bold());
            if parsed.free.is_empty() {
                println!("  {}", "(none)".dimmed());
            }
            for term in &parsed.free {
                println!("  {}", term.yellow());
            }
            for diagnostic in &parsed.diagnostics {
                println!("{} {}", "warning:".yellow(), diagnostic);
            }
            if !fallback_keys.is_empty() {
                println!("\n{}", supported_keys_message(&known).dimmed());
            }
        }
    }

    Ok(())
}
