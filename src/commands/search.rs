// SPDX-License-Identifier: MIT OR Apache-2.0

//! Search command

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use super::Context;
use crate::cli::{FilterArgs, OutputFormat};
use certq::catalog::{PriceClass, Record};
use certq::errors::suggestions::no_results_suggestion;
use certq::filter::{search, Filters};
use certq::output::{print_json, truncate_chars};
use certq::query::QueryDiagnostic;

const SUMMARY_WIDTH: usize = 110;

/// Search payload for JSON output
#[derive(Debug, Serialize)]
struct SearchJson<'a> {
    query: &'a str,
    total: usize,
    returned: usize,
    truncated: bool,
    #[serde(skip_serializing_if = "no_diagnostics")]
    diagnostics: &'a [QueryDiagnostic],
    results: &'a [&'a Record],
}

fn no_diagnostics(diagnostics: &&[QueryDiagnostic]) -> bool {
    diagnostics.is_empty()
}

/// Run the search command
pub fn run(ctx: &Context, query: Option<&str>, args: &FilterArgs, limit: Option<usize>) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    let query = query.unwrap_or("");
    let filters = Filters::from(args);
    let cap = ctx.config.merge_max_results(limit);

    let outcome = search(&catalog.records, query, &filters, &ctx.vocab, cap);

    match ctx.format {
        OutputFormat::Json => {
            let payload = SearchJson {
                query,
                total: outcome.total,
                returned: outcome.results.len(),
                truncated: outcome.truncated,
                diagnostics: &outcome.query.diagnostics,
                results: &outcome.results,
            };
            print_json(&payload, ctx.compact)?;
        }
        OutputFormat::Text => {
            for diagnostic in &outcome.query.diagnostics {
                eprintln!("{} {}", "warning:".yellow(), diagnostic);
            }
            if outcome.results.is_empty() {
                println!("{} {}", "✗".red(), no_results_suggestion(query));
                return Ok(());
            }
            if !query.is_empty() {
                println!("\n{} Searching for: {}\n", "🔍".cyan(), query.yellow());
            }
            for record in &outcome.results {
                print_record(record);
            }
            let shown = if outcome.truncated {
                format!(" (showing {})", outcome.results.len())
            } else {
                String::new()
            };
            println!(
                "\n{} Found {} certifications{}",
                "✓".green(),
                outcome.total.to_string().cyan(),
                shown
            );
        }
    }

    Ok(())
}

fn print_record(record: &Record) {
    let level = format!("[{}]", record.level);
    println!(
        "  {} {} {} {}",
        level.blue(),
        record.name.green().bold(),
        format!("({})", record.code).dimmed(),
        record.provider.cyan()
    );

    let year = match record.introduced_year {
        0 => "year n/a".to_string(),
        year => year.to_string(),
    };
    let price = match record.price_class() {
        PriceClass::Paid => format!("${}", record.price_usd).yellow(),
        PriceClass::Free => "free".green(),
        PriceClass::Unknown => record.price_label.as_str().dimmed(),
    };
    let goals: Vec<&str> = record.goal_categories.iter().map(|g| g.as_str()).collect();
    println!(
        "      {} · {} · {} · {}",
        record.domain_area,
        year,
        price,
        goals.join(",").magenta()
    );
    if !record.summary.is_empty() {
        println!("      {}", truncate_chars(&record.summary, SUMMARY_WIDTH).dimmed());
    }
}
