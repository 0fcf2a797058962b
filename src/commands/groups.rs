// SPDX-License-Identifier: MIT OR Apache-2.0

//! Groups command: domain/sub-area and goal views of a filtered catalog

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use super::Context;
use crate::cli::{FilterArgs, GroupBy, OutputFormat};
use certq::catalog::Record;
use certq::filter::{filter_and_sort, Filters};
use certq::groups::{group_by_domain, group_by_goal};
use certq::output::print_json;

/// Record reference for JSON output
#[derive(Debug, Serialize)]
struct RecordRef<'a> {
    id: &'a str,
    name: &'a str,
}

impl<'a> RecordRef<'a> {
    fn list(records: &[&'a Record]) -> Vec<Self> {
        records
            .iter()
            .map(|r| RecordRef {
                id: &r.id,
                name: &r.name,
            })
            .collect()
    }
}

#[derive(Debug, Serialize)]
struct BucketJson<'a> {
    name: &'a str,
    records: Vec<RecordRef<'a>>,
}

#[derive(Debug, Serialize)]
struct GroupJson<'a> {
    name: &'a str,
    count: usize,
    buckets: Vec<BucketJson<'a>>,
}

/// Run the groups command
pub fn run(ctx: &Context, query: Option<&str>, by: GroupBy, args: &FilterArgs) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    let filters = Filters::from(args);
    let matched = filter_and_sort(&catalog.records, query.unwrap_or(""), &filters, &ctx.vocab);

    match by {
        GroupBy::Domain => {
            let groups = group_by_domain(&matched, &ctx.vocab);
            match ctx.format {
                OutputFormat::Json => {
                    let payload: Vec<GroupJson> = groups
                        .iter()
                        .map(|g| GroupJson {
                            name: &g.domain,
                            count: g.record_count(),
                            buckets: g
                                .buckets
                                .iter()
                                .map(|b| BucketJson {
                                    name: &b.sub_area,
                                    records: RecordRef::list(&b.records),
                                })
                                .collect(),
                        })
                        .collect();
                    print_json(&payload, ctx.compact)?;
                }
                OutputFormat::Text => {
                    for group in &groups {
                        println!(
                            "\n{} {}",
                            group.domain.bold(),
                            format!("({})", group.record_count()).dimmed()
                        );
                        for bucket in &group.buckets {
                            println!("  {}", bucket.sub_area.cyan());
                            for record in &bucket.records {
                                println!("    {} {}", record.name.green(), record.code.dimmed());
                            }
                        }
                    }
                }
            }
        }
        GroupBy::Goal => {
            let groups = group_by_goal(&matched);
            match ctx.format {
                OutputFormat::Json => {
                    let payload: Vec<GroupJson> = groups
                        .iter()
                        .map(|g| GroupJson {
                            name: g.goal.as_str(),
                            count: g.records.len(),
                            buckets: vec![BucketJson {
                                name: g.goal.as_str(),
                                records: RecordRef::list(&g.records),
                            }],
                        })
                        .collect();
                    print_json(&payload, ctx.compact)?;
                }
                OutputFormat::Text => {
                    for group in &groups {
                        println!(
                            "\n{} {}",
                            group.goal.label().bold(),
                            format!("({})", group.records.len()).dimmed()
                        );
                        for record in &group.records {
                            println!("  {} {}", record.name.green(), record.code.dimmed());
                        }
                    }
                }
            }
        }
    }

    if matched.is_empty() && ctx.format == OutputFormat::Text {
        println!("{} No certifications to group", "✗".red());
    }

    Ok(())
}
