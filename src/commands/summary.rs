// SPDX-License-Identifier: MIT OR Apache-2.0

//! Summary command

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::OutputFormat;
use certq::output::print_json;
use certq::summary::summarize;

/// Run the summary command
pub fn run(ctx: &Context) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    let summary = summarize(&catalog, &ctx.vocab);

    match ctx.format {
        OutputFormat::Json => print_json(&summary, ctx.compact)?,
        OutputFormat::Text => {
            let title = summary.meta.catalog.as_deref().unwrap_or("Certification catalog");
            println!("{}", title.bold());
            if let Some(version) = &summary.meta.version {
                println!("  version       {version}");
            }
            if let Some(reviewed) = summary.meta.last_reviewed {
                println!("  last reviewed {reviewed}");
            }
            println!("  records       {}", summary.records.to_string().cyan());

            println!("\n{}", "Domains".bold());
            for domain in &summary.domains {
                println!("  {domain}");
            }
            println!("\n{}", "Sub-areas".bold());
            for sub_area in &summary.sub_areas {
                println!("  {sub_area}");
            }
            println!("\n{}", "Goals".bold());
            for (goal, count) in &summary.goals {
                println!("  {:<6} {}", goal.as_str(), count.to_string().cyan());
            }
            println!("\n{}", "Prices".bold());
            for (class, count) in &summary.prices {
                println!("  {:<8} {}", class, count.to_string().cyan());
            }
        }
    }

    Ok(())
}
