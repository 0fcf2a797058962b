// SPDX-License-Identifier: MIT OR Apache-2.0

//! Validate command

use anyhow::{Context as _, Result};
use colored::Colorize;

use super::Context;
use crate::cli::OutputFormat;
use certq::catalog::load_raw;
use certq::output::print_json;
use certq::validate::validate_catalog;

/// Run the validate command. Returns `false` when issues were found.
pub fn run(ctx: &Context) -> Result<bool> {
    let raw = load_raw(&ctx.catalog_path).with_context(|| {
        format!("Failed to read catalog from {}", ctx.catalog_path.display())
    })?;
    let report = validate_catalog(&raw, &ctx.vocab);

    match ctx.format {
        OutputFormat::Json => print_json(&report, ctx.compact)?,
        OutputFormat::Text => {
            if report.is_ok() {
                println!(
                    "{} Catalog validation passed for {} record(s).",
                    "✓".green(),
                    report.checked.to_string().cyan()
                );
            } else {
                println!("{} Catalog validation failed:", "✗".red());
                for issue in &report.issues {
                    println!("- {}: {}", issue.source.yellow(), issue.message);
                }
            }
        }
    }

    Ok(report.is_ok())
}
